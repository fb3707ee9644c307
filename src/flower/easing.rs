/// Cubic ease-in-out: accelerate through the first half, decelerate through
/// the second. Maps a linear time fraction in [0, 1] to a smoothed growth
/// fraction in [0, 1].
pub(crate) fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
