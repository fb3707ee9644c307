use crate::flower::{sample_gradient, Rgb, GRADIENT_STOPS};
use itertools::Itertools;

/// How source pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Composite {
    /// Plain alpha blending over the existing pixel.
    SourceOver,
    /// Lightening blend: the inverse product of the inverted channels, so
    /// layering never darkens.
    Screen,
}

/// A 4-stop radial gradient centered on the flower.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RadialGradient {
    pub(crate) center: (f32, f32),
    pub(crate) radius: f32,
    pub(crate) stops: [Rgb; GRADIENT_STOPS],
}

impl RadialGradient {
    fn color_at(&self, x: f32, y: f32) -> Rgb {
        let dx = x - self.center.0;
        let dy = y - self.center.1;
        let distance = (dx * dx + dy * dy).sqrt();
        sample_gradient(&self.stops, distance / self.radius)
    }
}

/// An opaque square RGB raster surface.
#[derive(Debug, Clone)]
pub(crate) struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![Rgb::BLACK; (width * height) as usize] }
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[(y * self.width + x) as usize]
    }

    pub(crate) fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Composite a flat `color` through the coverage of `mask`.
    pub(crate) fn composite_tint(&mut self, mask: &Mask, color: Rgb, alpha: f32, mode: Composite) {
        self.composite_with(mask, alpha, mode, |_, _| color);
    }

    /// Composite a radial gradient fill through the coverage of `mask`.
    pub(crate) fn composite_gradient(
        &mut self,
        mask: &Mask,
        gradient: &RadialGradient,
        alpha: f32,
        mode: Composite,
    ) {
        self.composite_with(mask, alpha, mode, |x, y| gradient.color_at(x, y));
    }

    fn composite_with(
        &mut self,
        mask: &Mask,
        alpha: f32,
        mode: Composite,
        source: impl Fn(f32, f32) -> Rgb,
    ) {
        for row in 0..mask.height {
            let canvas_y = mask.top + row as i32;
            if canvas_y < 0 || canvas_y >= self.height as i32 {
                continue;
            }
            for column in 0..mask.width {
                let canvas_x = mask.left + column as i32;
                if canvas_x < 0 || canvas_x >= self.width as i32 {
                    continue;
                }
                let coverage = mask.coverage[(row * mask.width + column) as usize];
                if coverage <= 0.0 {
                    continue;
                }
                let color = source(canvas_x as f32 + 0.5, canvas_y as f32 + 0.5);
                self.blend(canvas_x as u32, canvas_y as u32, color, alpha * coverage, mode);
            }
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgb, alpha: f32, mode: Composite) {
        let index = (y * self.width + x) as usize;
        let dst = self.pixels[index];
        let channel = |d: u8, s: u8| {
            let d = d as f32 / 255.0;
            let s = s as f32 / 255.0;
            let src = match mode {
                Composite::SourceOver => s,
                Composite::Screen => 1.0 - (1.0 - d) * (1.0 - s),
            };
            ((d + (src - d) * alpha) * 255.0).round() as u8
        };
        self.pixels[index] = Rgb::new(
            channel(dst.r, color.r),
            channel(dst.g, color.g),
            channel(dst.b, color.b),
        );
    }
}

/// Grayscale coverage for one shape, cropped to its padded bounding box.
/// Offsets may be negative when the padding hangs off the surface; the
/// compositor clips.
#[derive(Debug, Clone)]
pub(crate) struct Mask {
    left: i32,
    top: i32,
    width: u32,
    height: u32,
    coverage: Vec<f32>,
}

impl Mask {
    /// Rasterize a closed polygon with an even-odd scanline fill. `padding`
    /// reserves margin around the bounding box so a later blur has room to
    /// spread.
    pub(crate) fn from_polygon(points: &[(f32, f32)], padding: u32) -> Self {
        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if points.len() < 3 || min_x > max_x {
            return Self { left: 0, top: 0, width: 0, height: 0, coverage: Vec::new() };
        }

        let pad = padding as i32;
        let left = min_x.floor() as i32 - pad;
        let top = min_y.floor() as i32 - pad;
        let width = (max_x.ceil() as i32 - left + pad + 1) as u32;
        let height = (max_y.ceil() as i32 - top + pad + 1) as u32;
        let mut coverage: Vec<f32> = vec![0.0; (width * height) as usize];

        // Segments between consecutive outline points, in mask-local space
        let segments: Vec<(f32, f32, f32, f32)> = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(&(x0, y0), &(x1, y1))| {
                (x0 - left as f32, y0 - top as f32, x1 - left as f32, y1 - top as f32)
            })
            .collect();

        for row in 0..height {
            let y = row as f32 + 0.5;
            let mut crossings: Vec<f32> = segments
                .iter()
                .filter_map(|&(x0, y0, x1, y1)| {
                    let (low, high) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
                    if y < low || y >= high {
                        return None;
                    }
                    Some(x0 + (y - y0) / (y1 - y0) * (x1 - x0))
                })
                .collect();
            crossings.sort_by(f32::total_cmp);

            for (span_left, span_right) in crossings.into_iter().tuples() {
                let first = span_left.floor().max(0.0) as u32;
                let last = (span_right.ceil() as i64).clamp(0, width as i64) as u32;
                for column in first..last {
                    // Fractional horizontal coverage softens the span edges
                    let cell_left = column as f32;
                    let overlap = (span_right.min(cell_left + 1.0) - span_left.max(cell_left)).clamp(0.0, 1.0);
                    let cell = &mut coverage[(row * width + column) as usize];
                    *cell = (*cell).max(overlap);
                }
            }
        }

        Self { left, top, width, height, coverage }
    }

    /// A softened copy of this mask: two separable box-blur passes, which
    /// together approximate the gaussian falloff of a drawn shadow.
    pub(crate) fn blurred(&self, radius: f32) -> Self {
        let half = (radius * 0.5).round() as i32;
        if half < 1 || self.coverage.is_empty() {
            return self.clone();
        }
        let mut blurred = self.clone();
        for _ in 0..2 {
            blurred.box_blur_rows(half);
            blurred.box_blur_columns(half);
        }
        blurred
    }

    fn box_blur_rows(&mut self, half: i32) {
        let window = (half * 2 + 1) as f32;
        let mut output = vec![0.0; self.coverage.len()];
        for row in 0..self.height as i32 {
            for column in 0..self.width as i32 {
                let mut sum = 0.0;
                for offset in -half..=half {
                    let x = column + offset;
                    if x >= 0 && x < self.width as i32 {
                        sum += self.coverage[(row * self.width as i32 + x) as usize];
                    }
                }
                output[(row * self.width as i32 + column) as usize] = sum / window;
            }
        }
        self.coverage = output;
    }

    fn box_blur_columns(&mut self, half: i32) {
        let window = (half * 2 + 1) as f32;
        let mut output = vec![0.0; self.coverage.len()];
        for row in 0..self.height as i32 {
            for column in 0..self.width as i32 {
                let mut sum = 0.0;
                for offset in -half..=half {
                    let y = row + offset;
                    if y >= 0 && y < self.height as i32 {
                        sum += self.coverage[(y * self.width as i32 + column) as usize];
                    }
                }
                output[(row * self.width as i32 + column) as usize] = sum / window;
            }
        }
        self.coverage = output;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f32) -> Vec<(f32, f32)> {
        vec![(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)]
    }

    #[test]
    fn new_canvas_is_black() {
        let canvas = Canvas::new(4, 4);
        assert_eq!(canvas.pixel(0, 0), Rgb::BLACK);
        assert_eq!(canvas.pixel(3, 3), Rgb::BLACK);
    }

    #[test]
    fn polygon_mask_covers_its_interior() {
        let mask = Mask::from_polygon(&square(10.0), 0);
        let mut canvas = Canvas::new(10, 10);
        canvas.composite_tint(&mask, Rgb::new(255, 0, 0), 1.0, Composite::SourceOver);
        assert_eq!(canvas.pixel(5, 5), Rgb::new(255, 0, 0));
        assert_eq!(canvas.pixel(1, 1), Rgb::new(255, 0, 0));
    }

    #[test]
    fn degenerate_polygon_yields_an_empty_mask() {
        let mask = Mask::from_polygon(&[(0.0, 0.0), (0.0, 0.0)], 2);
        let mut canvas = Canvas::new(4, 4);
        canvas.composite_tint(&mask, Rgb::new(255, 255, 255), 1.0, Composite::SourceOver);
        assert_eq!(canvas.pixel(0, 0), Rgb::BLACK);
    }

    #[test]
    fn compositing_clips_to_the_surface() {
        // Polygon reaching far outside a tiny canvas must not panic
        let points = vec![(-20.0, -20.0), (30.0, -20.0), (30.0, 30.0), (-20.0, 30.0)];
        let mask = Mask::from_polygon(&points, 5);
        let mut canvas = Canvas::new(8, 8);
        canvas.composite_tint(&mask, Rgb::new(0, 255, 0), 1.0, Composite::SourceOver);
        assert_eq!(canvas.pixel(4, 4), Rgb::new(0, 255, 0));
    }

    #[test]
    fn source_over_respects_alpha() {
        let mask = Mask::from_polygon(&square(4.0), 0);
        let mut canvas = Canvas::new(4, 4);
        canvas.composite_tint(&mask, Rgb::new(255, 255, 255), 0.5, Composite::SourceOver);
        let pixel = canvas.pixel(2, 2);
        assert!(pixel.r > 120 && pixel.r < 135);
    }

    #[test]
    fn screen_blend_never_darkens() {
        let mask = Mask::from_polygon(&square(4.0), 0);
        let mut canvas = Canvas::new(4, 4);
        canvas.composite_tint(&mask, Rgb::new(200, 10, 10), 1.0, Composite::SourceOver);
        let before = canvas.pixel(2, 2);
        canvas.composite_tint(&mask, Rgb::new(60, 60, 60), 1.0, Composite::Screen);
        let after = canvas.pixel(2, 2);
        assert!(after.r >= before.r);
        assert!(after.g >= before.g);
        assert!(after.b >= before.b);
    }

    #[test]
    fn blur_spreads_coverage_outwards() {
        let mask = Mask::from_polygon(&square(6.0), 6);
        let blurred = mask.blurred(6.0);
        let mut sharp_canvas = Canvas::new(20, 20);
        let mut soft_canvas = Canvas::new(20, 20);
        sharp_canvas.composite_tint(&mask, Rgb::new(255, 255, 255), 1.0, Composite::SourceOver);
        soft_canvas.composite_tint(&blurred, Rgb::new(255, 255, 255), 1.0, Composite::SourceOver);
        // A pixel just outside the square picks up light only after the blur
        assert_eq!(sharp_canvas.pixel(8, 3), Rgb::BLACK);
        assert!(soft_canvas.pixel(8, 3).r > 0);
    }

    #[test]
    fn gradient_fades_across_its_stops() {
        let gradient = RadialGradient {
            center: (0.0, 0.0),
            radius: 30.0,
            stops: [
                Rgb::new(255, 0, 0),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 0, 255),
                Rgb::new(255, 255, 255),
            ],
        };
        assert_eq!(gradient.color_at(0.0, 0.0), Rgb::new(255, 0, 0));
        assert_eq!(gradient.color_at(10.0, 0.0), Rgb::new(0, 255, 0));
        assert_eq!(gradient.color_at(0.0, 20.0), Rgb::new(0, 0, 255));
        // Beyond the radius the last stop holds
        assert_eq!(gradient.color_at(100.0, 0.0), Rgb::new(255, 255, 255));
    }
}
