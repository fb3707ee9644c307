use once_cell::sync::Lazy;

/// An RGB color on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex color string.
    pub(crate) fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let hex = match input.strip_prefix('#') {
            Some(hex) if hex.len() == 6 && hex.is_ascii() => hex,
            _ => return Err(ColorParseError::Invalid(input.to_string())),
        };
        let channel = |range| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ColorParseError::Invalid(input.to_string()))
        };
        Ok(Self { r: channel(0..2)?, g: channel(2..4)?, b: channel(4..6)? })
    }

    /// Linearly mix this color towards `other` by `t` in [0, 1].
    pub(crate) fn mix(self, other: Rgb, t: f32) -> Rgb {
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

/// Errors that can occur when parsing color strings
#[derive(thiserror::Error, Debug)]
pub enum ColorParseError {
    #[error("invalid hex color '{0}'")]
    Invalid(String),
}

/// Number of gradient stops assigned to each petal.
pub(crate) const GRADIENT_STOPS: usize = 4;

/// The fixed rainbow palette the petal gradients slide over.
pub(crate) static RAINBOW: Lazy<[Rgb; 8]> = Lazy::new(|| {
    ["#FF0000", "#FF4500", "#FFD700", "#32CD32", "#00CED1", "#0000FF", "#8A2BE2", "#FF1493"]
        .map(|hex| Rgb::from_hex(hex).expect("default palette literal"))
});

/// The 4-stop gradient window for petal `index` of `count`: a sliding window
/// over the cyclic palette, so consecutive petals sweep smoothly through the
/// rainbow around the circle.
pub(crate) fn gradient_window(palette: &[Rgb; 8], index: usize, count: usize) -> [Rgb; GRADIENT_STOPS] {
    let start = index * palette.len() / count;
    std::array::from_fn(|offset| palette[(start + offset) % palette.len()])
}

/// Sample a 4-stop gradient at fraction `t`, stops evenly spaced at k/3.
pub(crate) fn sample_gradient(stops: &[Rgb; GRADIENT_STOPS], t: f32) -> Rgb {
    let position = t.clamp(0.0, 1.0) * (GRADIENT_STOPS - 1) as f32;
    let segment = (position as usize).min(GRADIENT_STOPS - 2);
    stops[segment].mix(stops[segment + 1], position - segment as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#FF0000", Rgb::new(255, 0, 0))]
    #[case("#32CD32", Rgb::new(50, 205, 50))]
    #[case("#8A2BE2", Rgb::new(138, 43, 226))]
    fn parses_hex_colors(#[case] input: &str, #[case] expected: Rgb) {
        assert_eq!(Rgb::from_hex(input).unwrap(), expected);
    }

    #[rstest]
    #[case("FF0000")]
    #[case("#FF00")]
    #[case("#GG0000")]
    #[case("#FF0000FF")]
    #[case("")]
    fn rejects_malformed_colors(#[case] input: &str) {
        assert!(Rgb::from_hex(input).is_err());
    }

    #[rstest]
    #[case(0, 0)]
    #[case(3, 1)]
    #[case(12, 4)]
    #[case(23, 7)]
    fn window_start_slides_over_the_palette(#[case] petal: usize, #[case] start: usize) {
        let window = gradient_window(&RAINBOW, petal, 24);
        for offset in 0..GRADIENT_STOPS {
            assert_eq!(window[offset], RAINBOW[(start + offset) % 8]);
        }
    }

    #[test]
    fn window_wraps_around_the_palette_end() {
        let window = gradient_window(&RAINBOW, 23, 24);
        assert_eq!(window, [RAINBOW[7], RAINBOW[0], RAINBOW[1], RAINBOW[2]]);
    }

    #[test]
    fn gradient_hits_each_stop() {
        let stops = [Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255), Rgb::new(255, 255, 255)];
        assert_eq!(sample_gradient(&stops, 0.0), stops[0]);
        assert_eq!(sample_gradient(&stops, 1.0 / 3.0), stops[1]);
        assert_eq!(sample_gradient(&stops, 2.0 / 3.0), stops[2]);
        assert_eq!(sample_gradient(&stops, 1.0), stops[3]);
    }

    #[test]
    fn gradient_clamps_out_of_range_fractions() {
        let stops = [Rgb::new(10, 10, 10), Rgb::new(20, 20, 20), Rgb::new(30, 30, 30), Rgb::new(40, 40, 40)];
        assert_eq!(sample_gradient(&stops, -1.0), stops[0]);
        assert_eq!(sample_gradient(&stops, 2.0), stops[3]);
    }

    #[test]
    fn mix_interpolates_channels() {
        let mixed = Rgb::new(0, 0, 0).mix(Rgb::new(255, 100, 50), 0.5);
        assert_eq!(mixed, Rgb::new(128, 50, 25));
    }
}
