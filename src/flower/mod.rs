mod easing;
mod palette;
mod petal;
mod state;

pub(crate) use palette::{sample_gradient, ColorParseError, Rgb, GRADIENT_STOPS, RAINBOW};
pub(crate) use petal::Petal;
pub(crate) use state::{full_bloom, Animator, FrameSnapshot};
