use std::f64::consts::PI;

use crate::expr::{Expr, clamp, greater_than, less_than, pow, select};
use crate::foundation::error::{WeaveError, WeaveResult};

const BACK_C1: f64 = 1.701_58;
const BACK_C2: f64 = BACK_C1 * 1.525;
const BACK_C3: f64 = BACK_C1 + 1.0;
const ELASTIC_C4: f64 = (2.0 * PI) / 3.0;
const BOUNCE_N1: f64 = 7.5625;
const BOUNCE_D1: f64 = 2.75;

#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Easing curve mapping linear progress in `[0, 1]` to eased progress.
///
/// Every curve maps 0 to 0 and 1 to 1. Back and elastic curves overshoot in between.
pub enum Ease {
    Linear,
    /// `t^2 (3 - 2t)`, the tween default.
    #[default]
    Smoothstep,
    Smootherstep,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InSine,
    OutSine,
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InBack,
    OutBack,
    InOutBack,
    InElastic,
    OutElastic,
    InBounce,
    OutBounce,
    /// Host-only curve. Cannot be serialized or lowered to an expression.
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

fn out_bounce(t: f64) -> f64 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984_375
    }
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
            Self::Smootherstep => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::InSine => 1.0 - (t * PI / 2.0).cos(),
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => (1.0 - (t * PI).cos()) / 2.0,
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::InOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Self::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::InOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Self::InBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Self::OutBack => {
                let u = t - 1.0;
                1.0 + BACK_C3 * u.powi(3) + BACK_C1 * u.powi(2)
            }
            Self::InOutBack => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2)
                        + 2.0)
                        / 2.0
                }
            }
            Self::InElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -(2f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            Self::OutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
                }
            }
            Self::InBounce => 1.0 - out_bounce(1.0 - t),
            Self::OutBounce => out_bounce(t),
            Self::Custom(f) => f(t),
        }
    }

    /// The same curve as an expression, for easing on the GPU (for example over a time node).
    ///
    /// `Custom` curves exist only on the host and are rejected.
    pub fn apply_expr(self, t: impl Into<Expr>) -> WeaveResult<Expr> {
        let t = clamp(t, 0.0, 1.0);
        let u = t.one_minus();
        let first_half = less_than(&t, 0.5);
        let e = match self {
            Self::Linear => t,
            Self::Smoothstep => &t * &t * (3.0 - &t * 2.0),
            Self::Smootherstep => &t * &t * &t * (&t * (&t * 6.0 - 15.0) + 10.0),
            Self::InQuad => t.square(),
            Self::OutQuad => 1.0 - u.square(),
            Self::InOutQuad => select(
                first_half,
                t.square() * 2.0,
                1.0 - (-&t * 2.0 + 2.0).square() / 2.0,
            ),
            Self::InCubic => &t * &t * &t,
            Self::OutCubic => 1.0 - &u * &u * &u,
            Self::InOutCubic => {
                let v = -&t * 2.0 + 2.0;
                select(first_half, &t * &t * &t * 4.0, 1.0 - &v * &v * &v / 2.0)
            }
            Self::InQuart => t.square().square(),
            Self::OutQuart => 1.0 - u.square().square(),
            Self::InOutQuart => select(
                first_half,
                t.square().square() * 8.0,
                1.0 - (-&t * 2.0 + 2.0).square().square() / 2.0,
            ),
            Self::InSine => 1.0 - (t * (PI / 2.0)).cos(),
            Self::OutSine => (t * (PI / 2.0)).sin(),
            Self::InOutSine => (1.0 - (t * PI).cos()) / 2.0,
            Self::InExpo => select(greater_than(&t, 0.0), pow(2.0, &t * 10.0 - 10.0), 0.0),
            Self::OutExpo => select(less_than(&t, 1.0), 1.0 - pow(2.0, &t * -10.0), 1.0),
            Self::InOutExpo => {
                let low = pow(2.0, &t * 20.0 - 10.0) / 2.0;
                let high = (2.0 - pow(2.0, &t * -20.0 + 10.0)) / 2.0;
                let inner = select(first_half, low, high);
                select(
                    greater_than(&t, 0.0),
                    select(less_than(&t, 1.0), inner, 1.0),
                    0.0,
                )
            }
            Self::InCirc => 1.0 - (1.0 - t.square()).sqrt(),
            Self::OutCirc => (1.0 - u.square()).sqrt(),
            Self::InOutCirc => select(
                first_half,
                (1.0 - (1.0 - (&t * 2.0).square()).sqrt()) / 2.0,
                ((1.0 - (-&t * 2.0 + 2.0).square()).sqrt() + 1.0) / 2.0,
            ),
            Self::InBack => &t * &t * (&t * BACK_C3 - BACK_C1),
            Self::OutBack => {
                let v = &t - 1.0;
                &v * &v * (&v * BACK_C3 + BACK_C1) + 1.0
            }
            Self::InOutBack => {
                let a = &t * 2.0;
                let b = &t * 2.0 - 2.0;
                select(
                    first_half,
                    a.square() * (&a * (BACK_C2 + 1.0) - BACK_C2) / 2.0,
                    (b.square() * (&b * (BACK_C2 + 1.0) + BACK_C2) + 2.0) / 2.0,
                )
            }
            Self::InElastic => {
                let wave = -pow(2.0, &t * 10.0 - 10.0) * ((&t * 10.0 - 10.75) * ELASTIC_C4).sin();
                elastic_ends(&t, wave)
            }
            Self::OutElastic => {
                let wave = pow(2.0, &t * -10.0) * ((&t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0;
                elastic_ends(&t, wave)
            }
            Self::InBounce => 1.0 - out_bounce_expr(&u),
            Self::OutBounce => out_bounce_expr(&t),
            Self::Custom(_) => {
                return Err(WeaveError::animation(
                    "custom easing curves cannot be lowered to an expression",
                ));
            }
        };
        Ok(e)
    }
}

fn elastic_ends(t: &Expr, wave: Expr) -> Expr {
    select(
        greater_than(t, 0.0),
        select(less_than(t, 1.0), wave, 1.0),
        0.0,
    )
}

fn out_bounce_expr(t: &Expr) -> Expr {
    let arc = |offset: f64, lift: f64| {
        let v = t - offset / BOUNCE_D1;
        &v * &v * BOUNCE_N1 + lift
    };
    select(
        less_than(t, 1.0 / BOUNCE_D1),
        t * t * BOUNCE_N1,
        select(
            less_than(t, 2.0 / BOUNCE_D1),
            arc(1.5, 0.75),
            select(
                less_than(t, 2.5 / BOUNCE_D1),
                arc(2.25, 0.9375),
                arc(2.625, 0.984_375),
            ),
        ),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
