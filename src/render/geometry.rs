/// Side of the canonical square canvas all petal dimensions are designed
/// against.
pub(crate) const DESIGN_SIZE: f32 = 800.0;
/// Petal length at full growth, in design units.
pub(crate) const PETAL_LENGTH: f32 = 150.0;
/// Petal width at full growth, in design units.
pub(crate) const PETAL_WIDTH: f32 = 40.0;

/// Line segments used when flattening each Bezier curve of the outline.
const CURVE_STEPS: usize = 24;

/// The square drawing surface derived from a container box: side capped by
/// the smaller container dimension and the canonical design size, with a
/// uniform scale factor mapping design units onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CanvasGeometry {
    pub(crate) size: u32,
    pub(crate) scale: f32,
}

impl CanvasGeometry {
    pub(crate) fn fit(container_width: u32, container_height: u32) -> Self {
        let size = container_width.min(container_height).min(DESIGN_SIZE as u32);
        Self { size, scale: size as f32 / DESIGN_SIZE }
    }

    /// The flower center.
    pub(crate) fn center(&self) -> (f32, f32) {
        let half = self.size as f32 / 2.0;
        (half, half)
    }
}

/// Rotate `point` by `angle` radians and translate it by `center`, taking a
/// point from the petal's local frame into canvas coordinates.
pub(crate) fn place(point: (f32, f32), angle: f32, center: (f32, f32)) -> (f32, f32) {
    let (sin, cos) = angle.sin_cos();
    (
        center.0 + point.0 * cos - point.1 * sin,
        center.1 + point.0 * sin + point.1 * cos,
    )
}

/// The lens-shaped petal outline in the petal's local frame: x runs along
/// the petal axis from the flower center, y across it. Two mirrored cubic
/// Beziers from the center out to the tip and back, with every control point
/// scaled by `progress` so the petal grows in length and width together.
pub(crate) fn petal_outline(progress: f32, scale: f32) -> Vec<(f32, f32)> {
    let length = PETAL_LENGTH * scale;
    let width = PETAL_WIDTH * scale;
    let p = progress;

    let mut points = Vec::with_capacity(2 * CURVE_STEPS + 1);
    points.push((0.0, 0.0));
    // Upper edge out to the tip
    flatten_cubic(
        &mut points,
        (0.0, 0.0),
        (length * 0.3 * p, -width * 0.5 * p),
        (length * 0.7 * p, -width * 0.3 * p),
        (length * p, 0.0),
    );
    // Lower edge back to the center
    flatten_cubic(
        &mut points,
        (length * p, 0.0),
        (length * 0.7 * p, width * 0.3 * p),
        (length * 0.3 * p, width * 0.5 * p),
        (0.0, 0.0),
    );
    points
}

/// Flatten one cubic Bezier into line segments, appending every point after
/// `from` to `points`.
fn flatten_cubic(
    points: &mut Vec<(f32, f32)>,
    from: (f32, f32),
    control1: (f32, f32),
    control2: (f32, f32),
    to: (f32, f32),
) {
    for step in 1..=CURVE_STEPS {
        let t = step as f32 / CURVE_STEPS as f32;
        let inv = 1.0 - t;
        let x = inv * inv * inv * from.0
            + 3.0 * inv * inv * t * control1.0
            + 3.0 * inv * t * t * control2.0
            + t * t * t * to.0;
        let y = inv * inv * inv * from.1
            + 3.0 * inv * inv * t * control1.1
            + 3.0 * inv * t * t * control2.1
            + t * t * t * to.1;
        points.push((x, y));
    }
}
