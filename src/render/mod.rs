mod canvas;
mod geometry;
mod scene;

pub(crate) use canvas::Canvas;
pub(crate) use geometry::{CanvasGeometry, DESIGN_SIZE};
pub(crate) use scene::render_frame;
