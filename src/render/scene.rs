use super::canvas::{Canvas, Composite, Mask, RadialGradient};
use super::geometry::{petal_outline, place, CanvasGeometry, PETAL_LENGTH};
use crate::flower::{FrameSnapshot, Petal, Rgb};

/// Blur radius of the outer glow pass, in design units.
const SHADOW_BLUR: f32 = 25.0;
/// Blur radius of the inner highlight pass, in design units.
const GLOW_BLUR: f32 = 15.0;

/// Render one frame snapshot onto the canvas: clear to black, then draw
/// every petal that has started growing.
pub(crate) fn render_frame(canvas: &mut Canvas, frame: &FrameSnapshot, geometry: &CanvasGeometry) {
    canvas.clear(Rgb::BLACK);
    for petal in frame.petals.iter().filter(|petal| petal.progress > 0.0) {
        draw_petal(canvas, petal, frame.alpha, geometry);
    }
}

/// Draw a single petal. The outline is built in the petal's local polar
/// frame, placed by rotation and translation, then layered: a wide blurred
/// halo beneath a radial gradient fill, and a narrower halo plus a second
/// fill in the lightening blend for the inner glow.
fn draw_petal(canvas: &mut Canvas, petal: &Petal, alpha: f32, geometry: &CanvasGeometry) {
    let center = geometry.center();
    let outline: Vec<(f32, f32)> = petal_outline(petal.progress, geometry.scale)
        .into_iter()
        .map(|point| place(point, petal.angle, center))
        .collect();

    let shadow_radius = SHADOW_BLUR * geometry.scale;
    let glow_radius = GLOW_BLUR * geometry.scale;
    let mask = Mask::from_polygon(&outline, shadow_radius.ceil() as u32 + 1);
    let gradient = RadialGradient {
        center,
        radius: PETAL_LENGTH * geometry.scale,
        stops: petal.colors,
    };
    let halo = petal.colors[petal.colors.len() / 2];

    canvas.composite_tint(&mask.blurred(shadow_radius), halo, alpha, Composite::SourceOver);
    canvas.composite_gradient(&mask, &gradient, alpha, Composite::SourceOver);
    canvas.composite_tint(&mask.blurred(glow_radius), halo, alpha, Composite::Screen);
    canvas.composite_gradient(&mask, &gradient, alpha, Composite::Screen);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flower::{full_bloom, RAINBOW};

    #[test]
    fn empty_frame_renders_a_black_canvas() {
        let geometry = CanvasGeometry::fit(64, 64);
        let mut canvas = Canvas::new(geometry.size, geometry.size);
        let frame = FrameSnapshot { petals: Vec::new(), alpha: 1.0 };
        render_frame(&mut canvas, &frame, &geometry);
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                assert_eq!(canvas.pixel(x, y), Rgb::BLACK);
            }
        }
    }

    #[test]
    fn full_bloom_lights_up_the_center() {
        let geometry = CanvasGeometry::fit(64, 64);
        let mut canvas = Canvas::new(geometry.size, geometry.size);
        render_frame(&mut canvas, &full_bloom(&RAINBOW), &geometry);
        let (cx, cy) = geometry.center();
        let pixel = canvas.pixel(cx as u32, cy as u32);
        assert_ne!(pixel, Rgb::BLACK);
    }

    #[test]
    fn corners_stay_dark() {
        let geometry = CanvasGeometry::fit(200, 200);
        let mut canvas = Canvas::new(geometry.size, geometry.size);
        render_frame(&mut canvas, &full_bloom(&RAINBOW), &geometry);
        // Petal reach is 150 of 800 design units from the center; the
        // corners are well beyond the glow
        let corner = canvas.pixel(0, 0);
        assert_eq!(corner, Rgb::BLACK);
    }

    #[test]
    fn lower_alpha_dims_the_result() {
        let geometry = CanvasGeometry::fit(64, 64);
        let mut bright = Canvas::new(geometry.size, geometry.size);
        let mut dim = Canvas::new(geometry.size, geometry.size);

        let frame = full_bloom(&RAINBOW);
        render_frame(&mut bright, &frame, &geometry);
        let mut faded = frame.clone();
        faded.alpha = 0.6;
        render_frame(&mut dim, &faded, &geometry);

        // Midway along the first petal, which points along +x from the center
        let (cx, cy) = geometry.center();
        let (x, y) = (cx as u32 + 6, cy as u32);
        let bright_pixel = bright.pixel(x, y);
        let dim_pixel = dim.pixel(x, y);
        let brightness = |p: Rgb| p.r as u32 + p.g as u32 + p.b as u32;
        assert!(brightness(dim_pixel) < brightness(bright_pixel));
    }
}
