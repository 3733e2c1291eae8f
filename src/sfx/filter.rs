//! Biquad filter — frequency shaping for effect voices.
//!
//! Coefficients follow the Audio EQ Cookbook formulas with a Butterworth
//! Q of 1/√2. Only the filter kinds the recipe table can express are
//! implemented.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Filter kinds a recipe stage may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Highpass,
    Lowpass,
}

/// Declarative filter description inside a recipe stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub cutoff_hz: f32,
}

/// A running biquad with its two-sample delay state.
#[derive(Debug, Clone)]
pub struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Build a biquad for `spec` at the given sample rate.
    pub fn from_spec(spec: FilterSpec, sample_rate: u32) -> Self {
        let q = FRAC_1_SQRT_2;
        let omega = 2.0 * PI * spec.cutoff_hz as f64 / sample_rate as f64;
        let alpha = omega.sin() / (2.0 * q);
        let cos_omega = omega.cos();

        let (b0, b1, b2) = match spec.kind {
            FilterKind::Highpass => {
                let b1 = -(1.0 + cos_omega);
                (-b1 / 2.0, b1, -b1 / 2.0)
            }
            FilterKind::Lowpass => {
                let b1 = 1.0 - cos_omega;
                (b1 / 2.0, b1, b1 / 2.0)
            }
        };
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Process one sample through the filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let x = input as f64;
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y as f32
    }
}
