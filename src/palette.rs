use rand::Rng;

/// RGB triple, each channel in [0, 1).
pub type Color = [f64; 3];

/// Color used when a group index has no palette entry to look up.
pub const FALLBACK_COLOR: Color = [1.0, 1.0, 1.0];

pub fn default_palette() -> Vec<Color> {
    vec![
        [1.0, 0.0, 0.0], // Red
        [0.0, 1.0, 0.0], // Green
        [0.0, 0.0, 1.0], // Blue
        [1.0, 1.0, 0.0], // Yellow
    ]
}

pub fn random_color<R: Rng>(rng: &mut R) -> Color {
    [rng.gen(), rng.gen(), rng.gen()]
}
