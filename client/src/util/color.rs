//! RGB color type and interpolation helpers.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// An opaque 8-bit-per-channel color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical lowercase `#rrggbb` for use in inline styles.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Linear per-channel blend; `fraction` is clamped to `[0, 1]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn interpolate_color(from: Rgb, to: Rgb, fraction: f32) -> Rgb {
    let t = fraction.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| -> u8 {
        let value = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(mix(from.r, to.r), mix(from.g, to.g), mix(from.b, to.b))
}
