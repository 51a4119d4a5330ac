use crate::foundation::error::{WeaveError, WeaveResult};

pub use kurbo::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Three-component host vector.
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Construct from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Components as an array.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Linear-light RGB color with unbounded `f64` channels.
///
/// Hex and CSS inputs are sRGB encoded and are decoded to linear on parse, matching what a
/// GPU program expects to receive as a color uniform.
pub struct Color {
    /// Linear red.
    pub r: f64,
    /// Linear green.
    pub g: f64,
    /// Linear blue.
    pub b: f64,
}

impl Color {
    /// Construct from linear components.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Construct from sRGB-encoded components in `[0, 1]`.
    pub fn from_srgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: srgb_to_linear(r),
            g: srgb_to_linear(g),
            b: srgb_to_linear(b),
        }
    }

    /// Components re-encoded to sRGB.
    pub fn to_srgb(self) -> [f64; 3] {
        [
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        ]
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> WeaveResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => {
                return Err(WeaveError::validation(format!(
                    "hex color '{hex}' must have 3 or 6 digits"
                )));
            }
        };
        let value = u32::from_str_radix(&expanded, 16)
            .map_err(|_| WeaveError::validation(format!("hex color '{hex}' is not hexadecimal")))?;
        let channel = |shift: u32| f64::from((value >> shift) & 0xff) / 255.0;
        Ok(Self::from_srgb(channel(16), channel(8), channel(0)))
    }

    /// Encode as `#rrggbb`, clamping out-of-gamut channels.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_srgb();
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b))
    }

    /// Approximate OKLCH to linear sRGB, clamped to `[0, 1]`.
    ///
    /// `l` is perceptual lightness in `[0, 1]`, `c` chroma, `h` hue in degrees.
    pub fn from_oklch(l: f64, c: f64, h: f64) -> Self {
        let [r, g, b] = oklch_to_linear([l, c, h]);
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Parse a CSS-like color: `#hex` or `oklch(L C H)`.
    pub fn parse(input: &str) -> WeaveResult<Self> {
        let trimmed = input.trim();
        if trimmed.starts_with("oklch(") {
            let [l, c, h] = parse_oklch(trimmed)?;
            return Ok(Self::from_oklch(l, c, h));
        }
        Self::from_hex(trimmed)
    }

    /// Components as an array.
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Unclamped OKLCH -> linear sRGB on the host. Mirrors the expression version in
/// `library::color` so host-side previews agree with GPU output.
pub(crate) fn oklch_to_linear([l, c, h]: [f64; 3]) -> [f64; 3] {
    let h = h.to_radians();
    let a = c * h.cos();
    let b = c * h.sin();

    let l_ = l + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
    let m_ = l - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
    let s_ = l - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

    let l3 = l_ * l_ * l_;
    let m3 = m_ * m_ * m_;
    let s3 = s_ * s_ * s_;

    [
        4.076_741_662_1 * l3 - 3.307_711_591_3 * m3 + 0.230_969_929_2 * s3,
        -1.268_438_004_6 * l3 + 2.609_757_401_1 * m3 - 0.341_319_396_5 * s3,
        -0.004_196_086_3 * l3 - 0.703_418_614_7 * m3 + 1.707_614_701_0 * s3,
    ]
}

/// Parse `oklch(L C H)` where `L` may be a percentage, `C` may be a percentage of 0.4 and `H`
/// may carry a `deg` suffix. A trailing `/ alpha` is accepted and ignored.
pub fn parse_oklch(input: &str) -> WeaveResult<[f64; 3]> {
    let invalid = || WeaveError::validation(format!("invalid oklch color '{input}'"));
    let body = input
        .trim()
        .strip_prefix("oklch(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let body = body.split('/').next().unwrap_or_default();
    let parts: Vec<&str> = body.split_whitespace().collect();
    let [l, c, h] = parts.as_slice() else {
        return Err(invalid());
    };

    let number = |s: &str| s.parse::<f64>().ok().filter(|v| v.is_finite());
    let l = match l.strip_suffix('%') {
        Some(pct) => number(pct).map(|v| v / 100.0),
        None => number(l),
    }
    .ok_or_else(invalid)?;
    let c = match c.strip_suffix('%') {
        Some(pct) => number(pct).map(|v| v / 100.0 * 0.4),
        None => number(c),
    }
    .ok_or_else(invalid)?;
    let h = number(h.strip_suffix("deg").unwrap_or(h)).ok_or_else(invalid)?;
    Ok([l, c, h])
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
