//! Fractal sums over a base noise: fbm, ridged, turbulence, domain warping and curl.

use crate::expr::{Expr, cross, float, vec2, vec3};
use crate::library::math::{EPSILON, safe_normalize};
use crate::library::noise::{
    gradient_noise2, gradient_noise3, perlin3, simplex2, simplex3, simplex4, value_noise,
};

/// Upper bound on octave counts; each octave adds a full noise evaluation to the program.
pub const MAX_OCTAVES: u32 = 16;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
/// Base noise summed by the fractal functions. The coordinate width must match.
pub enum NoiseBasis {
    /// [`simplex2`], vec2 coordinates.
    #[default]
    Simplex2,
    /// [`simplex3`], vec3 coordinates.
    Simplex3,
    /// [`simplex4`], vec4 coordinates.
    Simplex4,
    /// [`gradient_noise2`], vec2 coordinates.
    Gradient2,
    /// [`gradient_noise3`], vec3 coordinates.
    Gradient3,
    /// [`value_noise`], vec2 coordinates.
    Value2,
    /// [`perlin3`], vec3 coordinates.
    Perlin3,
}

impl NoiseBasis {
    /// Sample the base noise at `p`.
    pub fn sample(self, p: &Expr) -> Expr {
        match self {
            Self::Simplex2 => simplex2(p),
            Self::Simplex3 => simplex3(p),
            Self::Simplex4 => simplex4(p),
            Self::Gradient2 => gradient_noise2(p),
            Self::Gradient3 => gradient_noise3(p),
            Self::Value2 => value_noise(p),
            Self::Perlin3 => perlin3(p),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Octave schedule shared by every fractal function.
pub struct FractalOptions {
    /// Number of octaves, clamped to `1..=MAX_OCTAVES`.
    pub octaves: u32,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Amplitude multiplier per octave, clamped to `>= 0`.
    pub gain: f64,
    /// Weight of the first octave, clamped to `>= 0`.
    pub amplitude: f64,
    /// Frequency of the first octave.
    pub frequency: f64,
    /// Noise being summed.
    pub basis: NoiseBasis,
}

impl Default for FractalOptions {
    fn default() -> Self {
        Self {
            octaves: 5,
            lacunarity: 2.0,
            gain: 0.5,
            amplitude: 0.5,
            frequency: 1.0,
            basis: NoiseBasis::Simplex2,
        }
    }
}

impl FractalOptions {
    /// Defaults for [`fbm_normalized`]: four octaves of 3D simplex starting at weight 1.
    pub fn normalized() -> Self {
        Self {
            octaves: 4,
            amplitude: 1.0,
            basis: NoiseBasis::Simplex3,
            ..Self::default()
        }
    }

    /// Set the octave count.
    pub fn with_octaves(self, octaves: u32) -> Self {
        Self { octaves, ..self }
    }

    /// Set the base noise.
    pub fn with_basis(self, basis: NoiseBasis) -> Self {
        Self { basis, ..self }
    }

    /// Set the first-octave frequency.
    pub fn with_frequency(self, frequency: f64) -> Self {
        Self { frequency, ..self }
    }

    /// Set the first-octave amplitude.
    pub fn with_amplitude(self, amplitude: f64) -> Self {
        Self { amplitude, ..self }
    }

    /// Set the per-octave amplitude multiplier.
    pub fn with_gain(self, gain: f64) -> Self {
        Self { gain, ..self }
    }

    /// Set the per-octave frequency multiplier.
    pub fn with_lacunarity(self, lacunarity: f64) -> Self {
        Self { lacunarity, ..self }
    }

    /// Copy with out-of-range fields clamped to safe values.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        let out = Self {
            octaves: self.octaves.clamp(1, MAX_OCTAVES),
            lacunarity: finite_or(self.lacunarity, defaults.lacunarity),
            gain: finite_or(self.gain, defaults.gain).max(0.0),
            amplitude: finite_or(self.amplitude, defaults.amplitude).max(0.0),
            frequency: finite_or(self.frequency, defaults.frequency),
            basis: self.basis,
        };
        if out != *self {
            tracing::debug!(requested = ?self, used = ?out, "clamped fractal options");
        }
        out
    }

    /// `(frequency, amplitude)` per octave.
    fn schedule(&self) -> Vec<(f64, f64)> {
        let mut freq = self.frequency;
        let mut amp = self.amplitude;
        let mut out = Vec::with_capacity(self.octaves as usize);
        for _ in 0..self.octaves {
            out.push((freq, amp));
            freq *= self.lacunarity;
            amp *= self.gain;
        }
        out
    }

    fn total_weight(schedule: &[(f64, f64)]) -> f64 {
        schedule.iter().map(|(_, amp)| amp).sum::<f64>().max(EPSILON)
    }
}

fn weighted_sum(p: &Expr, opts: &FractalOptions, shape: impl Fn(Expr) -> Expr) -> (Expr, f64) {
    let opts = opts.sanitized();
    let schedule = opts.schedule();
    let mut octaves = schedule
        .iter()
        .map(|&(freq, amp)| amp * shape(opts.basis.sample(&(p * freq))));
    let first = octaves.next().unwrap_or_else(|| float(0.0));
    let sum = octaves.fold(first, |acc, term| acc + term);
    (sum, FractalOptions::total_weight(&schedule))
}

/// Unnormalized fractal Brownian motion: `sum(amp_i * noise(p * freq_i))`.
///
/// With one octave this is exactly `amplitude * noise(p * frequency)`.
pub fn fbm(p: &Expr, opts: &FractalOptions) -> Expr {
    weighted_sum(p, opts, |n| n).0
}

/// Fractal Brownian motion divided by the cumulative amplitude, keeping the base noise's
/// range regardless of octave count.
pub fn fbm_normalized(p: &Expr, opts: &FractalOptions) -> Expr {
    let (sum, total) = weighted_sum(p, opts, |n| n);
    sum / total
}

/// Ridged multifractal: each octave contributes `(1 - |n|)^2`, normalized. Range `[0, 1]`.
pub fn ridged_fbm(p: &Expr, opts: &FractalOptions) -> Expr {
    let (sum, total) = weighted_sum(p, opts, |n| n.abs().one_minus().square());
    sum / total
}

/// Sum of weighted absolute noise, unnormalized and without ridge inversion.
pub fn turbulence(p: &Expr, opts: &FractalOptions) -> Expr {
    weighted_sum(p, opts, |n| n.abs()).0
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Parameters for [`domain_warp`].
pub struct DomainWarpOptions {
    /// Weight of the second-level offset in the final sample.
    pub strength: f64,
    /// Weight of the first-level offset when building the second level.
    pub scale: f64,
    /// Octave schedule used for all five fbm evaluations.
    pub fractal: FractalOptions,
}

impl Default for DomainWarpOptions {
    fn default() -> Self {
        Self {
            strength: 0.5,
            scale: 2.0,
            fractal: FractalOptions::default(),
        }
    }
}

/// Two-level domain warp of a 2D coordinate.
///
/// `q` samples fbm at two offsets of `p`, `r` samples fbm at `p + q * scale` and the result is
/// `fbm(p + r * strength)`. The basis must take vec2 coordinates.
pub fn domain_warp(p: &Expr, opts: &DomainWarpOptions) -> Expr {
    let f = &opts.fractal;
    let q = vec2(fbm(p, f), fbm(&(p + [5.2, 1.3]), f));
    let pq = p + q * opts.scale;
    let r = vec2(fbm(&(&pq + [1.7, 9.2]), f), fbm(&(&pq + [8.3, 2.8]), f));
    fbm(&(p + r * opts.strength), f)
}

/// Divergence-free vec3 field from the cross product of two independent simplex gradients.
///
/// Gradients are forward differences; every normalization is guarded so the result is finite
/// even where a gradient vanishes.
pub fn curl_noise(p: &Expr) -> Expr {
    const STEP: f64 = 1e-4;
    let gradient = |q: Expr| {
        let n = simplex3(&q);
        let d = |offset: [f64; 3]| (simplex3(&(&q + offset)) - &n) / STEP;
        vec3(
            d([STEP, 0.0, 0.0]),
            d([0.0, STEP, 0.0]),
            d([0.0, 0.0, STEP]),
        )
    };
    let a = safe_normalize(&gradient(p.clone()));
    let b = safe_normalize(&gradient(p + 3.5));
    safe_normalize(&cross(a, b))
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Parameters for [`warped_fbm_coords`].
pub struct WarpedFbmOptions {
    /// Frequency of the final simplex sample.
    pub frequency: f64,
    /// Lane offset for the first-level y warp.
    pub offset1: f64,
    /// Lane offset for the second-level y warp.
    pub offset2: f64,
    /// Coordinate scale of the first warp level.
    pub oscillation1: f64,
    /// Coordinate scale of the second warp level.
    pub oscillation2: f64,
    /// Weight of the first warp.
    pub contribution1: f64,
    /// Weight of the second warp.
    pub contribution2: f64,
}

impl Default for WarpedFbmOptions {
    fn default() -> Self {
        Self {
            frequency: 25.0,
            offset1: 25.0,
            offset2: 75.0,
            oscillation1: 10.0,
            oscillation2: 3.0,
            contribution1: 0.2,
            contribution2: 0.1,
        }
    }
}

/// Animated two-level warp of a 2D coordinate through time, sampled with 3D simplex.
///
/// Warp layers use 3D gradient fbm with `time` (halved for the second layer) as the third
/// coordinate.
pub fn warped_fbm_coords(uv: &Expr, time: &Expr, opts: &WarpedFbmOptions) -> Expr {
    let fractal = FractalOptions::default().with_basis(NoiseBasis::Gradient3);
    let layer = |coords: &Expr, oscillation: f64, offset: f64, t: &Expr, weight: f64| {
        let scaled = coords * oscillation;
        let wx = fbm(&scaled.extend(t), &fractal);
        let wy = fbm(&(&scaled + offset).extend(t), &fractal);
        coords + (vec2(wx, wy) - 0.5) * weight
    };
    let warped1 = layer(uv, opts.oscillation1, opts.offset1, time, opts.contribution1);
    let half_time = time * 0.5;
    let warped2 = layer(
        &warped1,
        opts.oscillation2,
        opts.offset2,
        &half_time,
        opts.contribution2,
    );
    simplex3(&(warped2 * opts.frequency).extend(time))
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Parameters for [`turbulence_rotational`].
pub struct RotationalTurbulenceOptions {
    /// Number of wave layers, clamped to `1..=MAX_OCTAVES`.
    pub octaves: u32,
    /// Offset amplitude per layer.
    pub amplitude: f64,
    /// Scroll speed multiplied by time.
    pub speed: f64,
    /// Starting wave frequency.
    pub frequency: f64,
    /// Frequency multiplier per layer.
    pub exponent: f64,
}

impl Default for RotationalTurbulenceOptions {
    fn default() -> Self {
        Self {
            octaves: 10,
            amplitude: 0.7,
            speed: 0.3,
            frequency: 2.0,
            exponent: 1.4,
        }
    }
}

type Mat2 = [[f64; 2]; 2];

const TURB_ROTATION: Mat2 = [[0.6, -0.8], [0.8, 0.6]];

fn mat2_mul(a: Mat2, b: Mat2) -> Mat2 {
    let col = |c: [f64; 2]| {
        [
            a[0][0] * c[0] + a[1][0] * c[1],
            a[0][1] * c[0] + a[1][1] * c[1],
        ]
    };
    [col(b[0]), col(b[1])]
}

/// Layered sine offsets along successively rotated axes, returning the displaced coordinate.
///
/// Rotation matrices are column-major and folded on the host, so every layer compiles to a
/// dot product and a sine.
pub fn turbulence_rotational(p: &Expr, time: &Expr, opts: &RotationalTurbulenceOptions) -> Expr {
    let octaves = opts.octaves.clamp(1, MAX_OCTAVES);
    let frequency = if opts.frequency.abs() > EPSILON {
        opts.frequency
    } else {
        1.0
    };
    let mut pos = p.clone();
    let mut freq = frequency;
    let mut rot = TURB_ROTATION;
    for i in 0..octaves {
        let phase = freq * pos.dot(rot[1]) + time * opts.speed + f64::from(i);
        pos = &pos + Expr::from(rot[0]) * phase.sin() * (opts.amplitude / freq);
        rot = mat2_mul(rot, TURB_ROTATION);
        freq *= opts.exponent;
    }
    pos
}

#[cfg(test)]
#[path = "../../tests/unit/library/fractal.rs"]
mod tests;
