use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// 8-bit RGB colour with a normalized alpha channel.
///
/// Serialized as `#rrggbb` or `#rrggbbaa` so chart definitions stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let digits = input.trim().trim_start_matches('#');
        let invalid = || ChartError::InvalidData(format!("invalid hex colour `{input}`"));
        if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        match digits.len() {
            3 => {
                let short = |index: usize| {
                    u8::from_str_radix(&digits[index..=index], 16)
                        .map(|nibble| nibble * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                f64::from(channel(6..8)?) / 255.0,
            )),
            _ => Err(invalid()),
        }
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            let alpha = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!(
                "#{:02x}{:02x}{:02x}{alpha:02x}",
                self.red, self.green, self.blue
            )
        }
    }

    /// CSS colour text; the alpha form is only used for translucent colours.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.is_opaque() {
            format!("rgb({},{},{})", self.red, self.green, self.blue)
        } else {
            let alpha = (self.alpha.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
            format!("rgba({},{},{},{alpha})", self.red, self.green, self.blue)
        }
    }

    /// Perceived brightness on the 0..=255 scale (299/587/114 weighting).
    #[must_use]
    pub fn luminance(self) -> f64 {
        (299.0 * f64::from(self.red) + 587.0 * f64::from(self.green) + 114.0 * f64::from(self.blue))
            / 1000.0
    }

    /// Black for light colours, white for dark ones.
    #[must_use]
    pub fn contrast(self) -> Self {
        if self.luminance() >= 128.0 {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }

    /// Composites the colour over a white background, returning an opaque colour.
    #[must_use]
    pub fn blend_on_white(self) -> Self {
        let alpha = self.alpha.clamp(0.0, 1.0);
        let mix = |channel: u8| (f64::from(channel) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        Self::rgb(mix(self.red), mix(self.green), mix(self.blue))
    }

    /// Linear interpolation between two colours; channels clamp to 0..=255.
    #[must_use]
    pub fn interpolate(self, target: Self, t: f64) -> Self {
        let lerp = |from: u8, to: u8| {
            let value = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        let alpha = (self.alpha + (target.alpha - self.alpha) * t).clamp(0.0, 1.0);
        Self::rgba(
            lerp(self.red, target.red),
            lerp(self.green, target.green),
            lerp(self.blue, target.blue),
            alpha,
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(ChartError::InvalidData(
                "colour alpha must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

/// Default series palette.
#[must_use]
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::rgb(0x1f, 0x77, 0xb4),
        Color::rgb(0xff, 0x7f, 0x0e),
        Color::rgb(0x2c, 0xa0, 0x2c),
        Color::rgb(0xd6, 0x27, 0x28),
        Color::rgb(0x94, 0x67, 0xbd),
        Color::rgb(0x8c, 0x56, 0x4b),
        Color::rgb(0xe3, 0x77, 0xc2),
        Color::rgb(0x7f, 0x7f, 0x7f),
        Color::rgb(0xbc, 0xbd, 0x22),
        Color::rgb(0x17, 0xbe, 0xcf),
    ]
}
