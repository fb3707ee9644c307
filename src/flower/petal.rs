use super::palette::{gradient_window, Rgb, GRADIENT_STOPS};
use std::f32::consts::TAU;

/// Number of petals in the flower.
pub(crate) const PETAL_COUNT: usize = 24;

/// One angularly positioned growth unit of the flower.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Petal {
    /// Fixed position around the circle, in radians.
    pub(crate) angle: f32,
    /// Eased growth fraction in [0, 1].
    pub(crate) progress: f32,
    /// Gradient stops assigned at creation, innermost first.
    pub(crate) colors: [Rgb; GRADIENT_STOPS],
}

/// Create the full ring of petals at zero growth, evenly spaced around the
/// circle with their rainbow windows assigned.
pub(crate) fn spawn_petals(palette: &[Rgb; 8]) -> Vec<Petal> {
    (0..PETAL_COUNT)
        .map(|index| Petal {
            angle: index as f32 / PETAL_COUNT as f32 * TAU,
            progress: 0.0,
            colors: gradient_window(palette, index, PETAL_COUNT),
        })
        .collect()
}
