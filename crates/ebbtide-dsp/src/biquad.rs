use std::f32::consts::{FRAC_1_SQRT_2, PI};

const TWO_PI: f32 = PI * 2.0;

pub const MIN_CUTOFF_HZ: f32 = 20.0;

/// Clamps a cutoff into the usable band below Nyquist.
#[inline]
pub fn clamp_cutoff(sample_rate: f32, cutoff_hz: f32) -> f32 {
    cutoff_hz.clamp(MIN_CUTOFF_HZ, 0.45 * sample_rate.max(1.0))
}

/// Normalized biquad coefficients (a0 divided out).
#[derive(Clone, Copy, Debug)]
pub struct BiquadCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoeffs {
    pub fn identity() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        }
    }

    pub fn low_pass(sample_rate: f32, cutoff_hz: f32) -> Self {
        Self::low_pass_q(sample_rate, cutoff_hz, FRAC_1_SQRT_2)
    }

    pub fn low_pass_q(sample_rate: f32, cutoff_hz: f32, q: f32) -> Self {
        let (cos, alpha) = warp(sample_rate, cutoff_hz, q);
        let b1 = 1.0 - cos;
        let b0 = b1 * 0.5;
        Self::normalized(b0, b1, b0, 1.0 + alpha, -2.0 * cos, 1.0 - alpha)
    }

    pub fn high_pass(sample_rate: f32, cutoff_hz: f32) -> Self {
        Self::high_pass_q(sample_rate, cutoff_hz, FRAC_1_SQRT_2)
    }

    pub fn high_pass_q(sample_rate: f32, cutoff_hz: f32, q: f32) -> Self {
        let (cos, alpha) = warp(sample_rate, cutoff_hz, q);
        let b0 = (1.0 + cos) * 0.5;
        let b1 = -(1.0 + cos);
        Self::normalized(b0, b1, b0, 1.0 + alpha, -2.0 * cos, 1.0 - alpha)
    }

    pub fn all_pass(sample_rate: f32, cutoff_hz: f32, q: f32) -> Self {
        let (cos, alpha) = warp(sample_rate, cutoff_hz, q);
        Self::normalized(
            1.0 - alpha,
            -2.0 * cos,
            1.0 + alpha,
            1.0 + alpha,
            -2.0 * cos,
            1.0 - alpha,
        )
    }

    fn normalized(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let inv_a0 = 1.0 / a0.max(1.0e-6);
        Self {
            b0: b0 * inv_a0,
            b1: b1 * inv_a0,
            b2: b2 * inv_a0,
            a1: a1 * inv_a0,
            a2: a2 * inv_a0,
        }
    }
}

#[inline]
fn warp(sample_rate: f32, cutoff_hz: f32, q: f32) -> (f32, f32) {
    let rate = sample_rate.max(1.0);
    let cutoff = clamp_cutoff(rate, cutoff_hz);
    let omega = TWO_PI * (cutoff / rate);
    let alpha = omega.sin() / (2.0 * q.max(0.05));
    (omega.cos(), alpha)
}

/// A single IIR stage: coefficients plus transposed direct form II state.
#[derive(Clone, Copy, Debug)]
pub struct Biquad {
    coeffs: BiquadCoeffs,
    z1: f32,
    z2: f32,
}

impl Biquad {
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// Swaps coefficients while keeping the filter state, so a retune does
    /// not restart the stage.
    pub fn set_coeffs(&mut self, coeffs: BiquadCoeffs) {
        self.coeffs = coeffs;
    }

    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.coeffs.b0 * input + self.z1;
        self.z1 = self.coeffs.b1 * input - self.coeffs.a1 * output + self.z2;
        self.z2 = self.coeffs.b2 * input - self.coeffs.a2 * output;
        output
    }
}
