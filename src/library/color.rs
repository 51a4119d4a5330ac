//! Palettes, gradients and color-space conversions on vec3 RGB expressions.

use std::f64::consts::{PI, TAU};

use crate::expr::{
    Expr, atan2, clamp, less_than, max, min, mix, select, smoothstep, splat3, step, vec3, vec4,
};
use crate::foundation::core::Color;
use crate::foundation::error::{WeaveError, WeaveResult};
use crate::library::math::EPSILON;

/// Cosine palette `a + b * cos(2pi * (c * t + d))`.
pub fn cosine_palette(
    t: impl Into<Expr>,
    a: impl Into<Expr>,
    b: impl Into<Expr>,
    c: impl Into<Expr>,
    d: impl Into<Expr>,
) -> Expr {
    a.into() + b.into() * ((c.into() * t.into() + d.into()) * TAU).cos()
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Named cosine palettes.
pub enum Palette {
    /// Full hue cycle.
    #[default]
    Rainbow,
    /// Warm oranges into purple.
    Sunset,
    /// Teals and blues.
    Ocean,
    /// Reds through yellow.
    Fire,
    /// Pale cyan.
    Ice,
    /// Saturated magenta and green.
    Neon,
    /// Light desaturated cycle.
    Pastel,
}

impl Palette {
    /// `[a, b, c, d]` coefficients for [`cosine_palette`].
    pub fn coefficients(self) -> [[f64; 3]; 4] {
        const HALF: [f64; 3] = [0.5, 0.5, 0.5];
        match self {
            Self::Rainbow => [HALF, HALF, [1.0, 1.0, 1.0], [0.0, 0.33, 0.67]],
            Self::Sunset => [HALF, HALF, [1.0, 0.7, 0.4], [0.0, 0.15, 0.2]],
            Self::Ocean => [HALF, HALF, [1.0, 1.0, 1.0], [0.3, 0.2, 0.2]],
            Self::Fire => [HALF, HALF, [1.0, 0.5, 0.0], [0.0, 0.1, 0.2]],
            Self::Ice => [HALF, [0.4, 0.4, 0.5], [0.0, 0.1, 0.2], [0.0, 0.0, 0.0]],
            Self::Neon => [HALF, HALF, [2.0, 1.0, 0.0], [0.5, 0.2, 0.25]],
            Self::Pastel => [
                [0.8, 0.8, 0.8],
                [0.2, 0.2, 0.2],
                [1.0, 1.0, 1.0],
                [0.0, 0.33, 0.67],
            ],
        }
    }

    /// Color at `t`.
    pub fn sample(self, t: impl Into<Expr>) -> Expr {
        let [a, b, c, d] = self.coefficients();
        cosine_palette(t, a, b, c, d)
    }
}

/// Two-stop gradient over `t` in `[0, 1]`.
pub fn gradient2(t: impl Into<Expr>, c1: impl Into<Expr>, c2: impl Into<Expr>) -> Expr {
    mix(c1, c2, clamp(t, 0.0, 1.0))
}

/// Three evenly spaced stops.
pub fn gradient3(
    t: impl Into<Expr>,
    c1: impl Into<Expr>,
    c2: impl Into<Expr>,
    c3: impl Into<Expr>,
) -> Expr {
    let t = clamp(t, 0.0, 1.0);
    let c2 = c2.into();
    let first = mix(c1, &c2, clamp(&t * 2.0, 0.0, 1.0));
    let second = mix(&c2, c3, clamp((&t - 0.5) * 2.0, 0.0, 1.0));
    mix(first, second, step(0.5, t))
}

/// Four stops at thirds, with smoothstep transitions.
pub fn gradient4(
    t: impl Into<Expr>,
    c1: impl Into<Expr>,
    c2: impl Into<Expr>,
    c3: impl Into<Expr>,
    c4: impl Into<Expr>,
) -> Expr {
    let t = clamp(t, 0.0, 1.0);
    let seg = mix(c1, c2, smoothstep(0.0, 0.33, &t));
    let seg = mix(seg, c3, smoothstep(0.33, 0.66, &t));
    mix(seg, c4, smoothstep(0.66, 1.0, t))
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A gradient stop.
pub struct ColorStop {
    /// Position along the gradient parameter.
    pub position: f64,
    /// Linear color at `position`.
    pub color: Color,
}

impl ColorStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// Piecewise-linear gradient through arbitrary stops, sorted by position.
///
/// Below the first stop the first color is held; above the last stop the last color.
pub fn gradient_multi(t: impl Into<Expr>, stops: &[ColorStop]) -> WeaveResult<Expr> {
    if stops.len() < 2 {
        return Err(WeaveError::validation(format!(
            "gradient needs at least 2 stops, got {}",
            stops.len()
        )));
    }
    if stops.iter().any(|s| !s.position.is_finite()) {
        return Err(WeaveError::validation("gradient stop positions must be finite"));
    }
    let mut sorted = stops.to_vec();
    sorted.sort_by(|a, b| a.position.total_cmp(&b.position));

    let t = t.into();
    let mut result = Expr::from(sorted[0].color);
    for pair in sorted.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        let span = (curr.position - prev.position).max(EPSILON);
        let local = clamp((&t - prev.position) / span, 0.0, 1.0);
        result = mix(result, curr.color, step(prev.position, &t) * local);
    }
    Ok(result)
}

/// [`gradient_multi`] driven by distance from `center`.
pub fn gradient_radial(
    uv: &Expr,
    center: impl Into<Expr>,
    stops: &[ColorStop],
) -> WeaveResult<Expr> {
    gradient_multi((uv - center.into()).length(), stops)
}

/// Gray ramp.
pub fn grayscale(t: impl Into<Expr>) -> Expr {
    splat3(clamp(t, 0.0, 1.0))
}

/// RGB to `(hue, saturation, lightness)`, all in `[0, 1]` for in-gamut input.
pub fn rgb_to_hsl(rgb: &Expr) -> Expr {
    let (r, g, b) = (rgb.x(), rgb.y(), rgb.z());
    let hi = max(max(&r, &g), &b);
    let lo = min(min(&r, &g), &b);
    let delta = &hi - &lo;
    let l = (&hi + &lo) * 0.5;
    let achromatic = less_than(&delta, 1e-5);
    let safe_delta = max(&delta, EPSILON);

    let s = select(
        less_than(&l, 0.5),
        &delta / max(&hi + &lo, EPSILON),
        &delta / max(2.0 - &hi - &lo, EPSILON),
    );
    let s = select(&achromatic, 0.0, s);

    let h_r = ((&g - &b) / &safe_delta).modulo(6.0);
    let h_g = (&b - &r) / &safe_delta + 2.0;
    let h_b = (&r - &g) / &safe_delta + 4.0;
    let is_r = step(&hi, &r);
    let is_g = step(&hi, &g);
    let h = select(&is_r, h_r, select(&is_g, h_g, h_b)) / 6.0;
    let h = select(&achromatic, 0.0, h);

    vec3(h, s, l)
}

/// `(hue, saturation, lightness)` to RGB. Hue wraps.
pub fn hsl_to_rgb(hsl: &Expr) -> Expr {
    let (h, s, l) = (hsl.x(), hsl.y(), hsl.z());
    let c = (1.0 - (&l * 2.0 - 1.0).abs()) * s;
    let sector = h.fract() * 6.0;
    let x = &c * (1.0 - (sector.modulo(2.0) - 1.0).abs());
    let m = l - &c * 0.5;

    let rest = [
        (1.0, vec3(&x, &c, 0.0)),
        (2.0, vec3(0.0, &c, &x)),
        (3.0, vec3(0.0, &x, &c)),
        (4.0, vec3(&x, 0.0, &c)),
        (5.0, vec3(&c, 0.0, &x)),
    ];
    let rgb = rest
        .into_iter()
        .fold(vec3(&c, &x, 0.0), |acc, (edge, rgb)| {
            select(step(edge, &sector), rgb, acc)
        });
    rgb + m
}

/// OKLCH (`l` in `[0, 1]`, chroma, hue in degrees) to linear sRGB.
///
/// Matrix-based OKLab approximation; not colorimetrically exact and not gamut-mapped.
pub fn oklch_to_linear(l: impl Into<Expr>, c: impl Into<Expr>, h: impl Into<Expr>) -> Expr {
    let l = l.into();
    let c = c.into();
    let h = h.into() * (PI / 180.0);
    let a = &c * h.cos();
    let b = c * h.sin();

    let l_ = &l + &a * 0.396_337_777_4 + &b * 0.215_803_757_3;
    let m_ = &l - &a * 0.105_561_345_8 - &b * 0.063_854_172_8;
    let s_ = l - a * 0.089_484_177_5 - b * 1.291_485_548_0;
    let (l3, m3, s3) = (cube(&l_), cube(&m_), cube(&s_));

    vec3(
        &l3 * 4.076_741_662_1 - &m3 * 3.307_711_591_3 + &s3 * 0.230_969_929_2,
        &l3 * -1.268_438_004_6 + &m3 * 2.609_757_401_1 - &s3 * 0.341_319_396_5,
        l3 * -0.004_196_086_3 - m3 * 0.703_418_614_7 + s3 * 1.707_614_701_0,
    )
}

/// Linear sRGB to `(l, chroma, hue in degrees [0, 360))`. Inverse of [`oklch_to_linear`].
pub fn linear_to_oklch(rgb: &Expr) -> Expr {
    let (r, g, b) = (rgb.x(), rgb.y(), rgb.z());
    let l = cbrt(&(&r * 0.412_221_470_8 + &g * 0.536_332_536_3 + &b * 0.051_445_992_9));
    let m = cbrt(&(&r * 0.211_903_498_2 + &g * 0.680_699_545_1 + &b * 0.107_396_956_6));
    let s = cbrt(&(r * 0.088_302_461_9 + g * 0.281_718_837_6 + b * 0.629_978_700_5));

    let lightness = &l * 0.210_454_255_3 + &m * 0.793_617_785_0 - &s * 0.004_072_046_8;
    let a = &l * 1.977_998_495_1 - &m * 2.428_592_205_0 + &s * 0.450_593_709_9;
    let b = l * 0.025_904_037_1 + m * 0.782_771_766_2 - s * 0.808_675_766_0;

    let chroma = (&a * &a + &b * &b).sqrt();
    let hue = (atan2(b, a) * (180.0 / PI)).modulo(360.0);
    vec3(lightness, chroma, hue)
}

fn cube(x: &Expr) -> Expr {
    x * x * x
}

/// Real cube root, odd-symmetric so negative inputs stay finite.
fn cbrt(x: &Expr) -> Expr {
    x.sign() * x.abs().pow(1.0 / 3.0)
}

/// Rotate hue by `amount` turns through HSV, keeping value and saturation.
pub fn hue_shift(color: &Expr, amount: impl Into<Expr>) -> Expr {
    const K: [f64; 4] = [0.0, -1.0 / 3.0, 2.0 / 3.0, -1.0];
    let (r, g, b) = (color.x(), color.y(), color.z());
    let p = mix(
        vec4(&b, &g, K[3], K[2]),
        vec4(&g, &b, K[0], K[1]),
        step(&b, &g),
    );
    let q = mix(
        vec4(p.x(), p.y(), p.w(), &r),
        vec4(&r, p.y(), p.z(), p.x()),
        step(p.x(), &r),
    );
    let d = q.x() - min(q.w(), q.y());
    let e = 1.0e-10;
    let h = (q.z() + (q.w() - q.y()) / (&d * 6.0 + e)).abs();
    let s = d / max(q.x().abs() + e, EPSILON);
    let v = q.x();

    let h6 = (h + amount.into()).fract() * 6.0;
    let hue = clamp(
        vec3(
            (&h6 - 3.0).abs() - 1.0,
            2.0 - (&h6 - 2.0).abs(),
            2.0 - (h6 - 4.0).abs(),
        ),
        0.0,
        1.0,
    );
    v * mix(splat3(1.0), hue, s)
}

/// Warm (positive) or cool (negative) tint; `amount` in about `[-0.5, 0.5]`.
pub fn temperature(color: &Expr, amount: impl Into<Expr>) -> Expr {
    let tint = mix([0.7, 0.9, 1.0], [1.0, 0.9, 0.7], amount.into() + 0.5);
    color * tint
}

/// Saturation boost that favors muted colors.
pub fn vibrance(color: &Expr, amount: impl Into<Expr>) -> Expr {
    let average = (color.x() + color.y() + color.z()) / 3.0;
    let hi = max(max(color.x(), color.y()), color.z());
    let saturation = (hi - &average) * 3.0;
    let scale = amount.into() * saturation.one_minus() + 1.0;
    mix(splat3(average), color, scale)
}

/// Reduce each channel to `levels` steps in `[0, 1]`.
pub fn posterize(color: &Expr, levels: impl Into<Expr>) -> Expr {
    let levels = max(levels.into(), 2.0);
    let steps = &levels - 1.0;
    clamp((clamp(color, 0.0, 1.0) * &steps + 0.5).floor() / steps, 0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/library/color.rs"]
mod tests;
