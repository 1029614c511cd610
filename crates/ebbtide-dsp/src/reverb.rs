use std::f32::consts::TAU;

use crate::biquad::{Biquad, BiquadCoeffs};
use crate::delay::DelayLine;
use crate::smoothing::one_pole_coeff;

pub const TAP_COUNT: usize = 10;

/// Hand-tuned base delay times per tap, decorrelated between channels.
pub const BASE_TIMES_LEFT_MS: [f32; TAP_COUNT] = [
    182.20, 164.17, 149.06, 136.87, 127.59, 121.24, 117.80, 117.29, 119.69, 125.02,
];
pub const BASE_TIMES_RIGHT_MS: [f32; TAP_COUNT] = [
    184.03, 165.81, 150.55, 138.24, 128.87, 122.45, 118.98, 118.46, 120.89, 126.27,
];

/// Diffusion all-pass cutoffs and Qs, spread across the mid band.
const DIFFUSION_STAGES: [(f32, f32); 5] = [
    (500.0, 0.55),
    (1_500.0, 0.575),
    (2_500.0, 0.6),
    (4_000.0, 0.65),
    (5_000.0, 0.7),
];

const DAMP_CUTOFF_HZ: f32 = 3_277.0;
const TAP_DECAY_START: f32 = 0.9;
const TAP_DECAY_STEP: f32 = 0.01;
const TAP_RAMP_SECONDS: f32 = 0.7;
const TAP_GLIDE_SECONDS: f32 = 0.01;
const MAX_TAP_DELAY_S: f32 = 0.5;

pub const LFO_RATE_HZ: f32 = 0.005;
pub const LFO_DEPTH_MS: f32 = 0.005;

/// Feedback gain of a tap; earlier taps recirculate harder, which shapes
/// the tail into a natural decay without a reverb-time parameter.
#[inline]
pub fn tap_decay(index: usize) -> f32 {
    TAP_DECAY_START - TAP_DECAY_STEP * index as f32
}

/// Sub-audio oscillator shared by both channels' banks; its drift keeps
/// the tail from sounding static.
#[derive(Clone, Debug)]
pub struct ReverbLfo {
    phase: f32,
    increment: f32,
    depth: f32,
}

impl ReverbLfo {
    pub fn new(sample_rate: f32) -> Self {
        let rate = sample_rate.max(1.0);
        Self {
            phase: 0.0,
            increment: TAU * LFO_RATE_HZ / rate,
            depth: LFO_DEPTH_MS / 1_000.0 * rate,
        }
    }

    /// Advances one step and returns the delay-time perturbation.
    #[inline]
    pub fn next(&mut self) -> f32 {
        self.phase = (self.phase + self.increment).rem_euclid(TAU);
        self.phase.sin() * self.depth
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[derive(Clone, Debug)]
struct ReverbTap {
    delay: DelayLine,
    diffusion: [Biquad; 5],
    damping: Biquad,
    base_ms: f32,
    decay: f32,
}

impl ReverbTap {
    fn new(sample_rate: f32, base_ms: f32, index: usize) -> Self {
        let diffusion = DIFFUSION_STAGES
            .map(|(cutoff, q)| Biquad::new(BiquadCoeffs::all_pass(sample_rate, cutoff, q)));
        Self {
            delay: DelayLine::new(sample_rate, MAX_TAP_DELAY_S, TAP_RAMP_SECONDS),
            diffusion,
            damping: Biquad::new(BiquadCoeffs::low_pass(sample_rate, DAMP_CUTOFF_HZ)),
            base_ms,
            decay: tap_decay(index),
        }
    }

    fn clear(&mut self) {
        self.delay.clear();
        for stage in &mut self.diffusion {
            stage.reset();
        }
        self.damping.reset();
    }
}

/// Ten parallel modulated delay taps for one channel, each diffused by
/// five all-pass stages and damped by a fixed low-pass.
#[derive(Clone, Debug)]
pub struct ReverbBank {
    taps: Vec<ReverbTap>,
    glide_coeff: f32,
}

impl ReverbBank {
    pub fn new(sample_rate: f32, base_times_ms: &[f32; TAP_COUNT]) -> Self {
        let taps = base_times_ms
            .iter()
            .enumerate()
            .map(|(index, &base_ms)| ReverbTap::new(sample_rate, base_ms, index))
            .collect();
        Self {
            taps,
            glide_coeff: one_pole_coeff(sample_rate, TAP_GLIDE_SECONDS),
        }
    }

    /// Once per block: aim every tap back at its fixed base time. The base
    /// times never change; this keeps the ramps centered while the LFO
    /// perturbs the instantaneous reads.
    pub fn set_targets(&mut self) {
        for tap in &mut self.taps {
            tap.delay.set_target_ms(tap.base_ms);
        }
    }

    /// One sample through all ten taps; `lfo_mod` perturbs every tap
    /// together, while each tap's own glide supplies per-tap drift.
    pub fn process(&mut self, input: f32, level: f32, lfo_mod: f32) -> f32 {
        let mut combined = 0.0;
        for tap in &mut self.taps {
            tap.delay.glide(lfo_mod, self.glide_coeff);
            let mut sample = tap.delay.read();
            for stage in &mut tap.diffusion {
                sample = stage.process(sample);
            }
            sample = tap.damping.process(sample);
            tap.delay.write(input, tap.decay, sample);
            combined += level * sample;
        }
        combined
    }

    pub fn clear(&mut self) {
        for tap in &mut self.taps {
            tap.clear();
        }
    }

    pub fn decays(&self) -> Vec<f32> {
        self.taps.iter().map(|tap| tap.decay).collect()
    }
}
