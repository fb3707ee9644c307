use crate::flower::{full_bloom, Rgb};
use crate::render::{render_frame, Canvas, CanvasGeometry, DESIGN_SIZE};
use std::path::Path;

/// Errors that can occur when capturing the bloom to a file
#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Render the fully grown flower at full opacity onto the canonical square
/// canvas and write it as a PNG.
pub(crate) fn capture_bloom(path: &Path, palette: [Rgb; 8]) -> Result<(), CaptureError> {
    let geometry = CanvasGeometry::fit(DESIGN_SIZE as u32, DESIGN_SIZE as u32);
    let mut canvas = Canvas::new(geometry.size, geometry.size);
    render_frame(&mut canvas, &full_bloom(&palette), &geometry);

    let image = image::RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let pixel = canvas.pixel(x, y);
        image::Rgb([pixel.r, pixel.g, pixel.b])
    });
    image.save(path)?;
    Ok(())
}
