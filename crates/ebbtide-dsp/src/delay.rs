use std::f32::consts::TAU;

use crate::ring::RingBuffer;
use crate::smoothing::{one_pole, LinearRamp};

/// Chorus excursion in milliseconds of delay time.
pub const CHORUS_DEPTH_MS: f32 = 0.75;

/// Feedback delay line with a smoothed delay-time target and a chorus LFO.
///
/// The delay time is retargeted per sample and glides through a linear ramp
/// plus a one-pole step, so parameter jumps never land on the read position
/// directly. The ring buffer owns the only write index.
#[derive(Clone, Debug)]
pub struct DelayLine {
    ring: RingBuffer,
    ramp: LinearRamp,
    time_ms: f32,
    sample_rate: f32,
    chorus_phase: f32,
}

impl DelayLine {
    /// Sizes the buffer for `max_delay_s` seconds; callers pass at least
    /// twice the longest delay they expose.
    pub fn new(sample_rate: f32, max_delay_s: f32, ramp_seconds: f32) -> Self {
        let rate = sample_rate.max(1.0);
        let samples = (rate * max_delay_s.max(0.001)).ceil() as usize;
        Self {
            ring: RingBuffer::with_capacity(samples),
            ramp: LinearRamp::new(rate, ramp_seconds),
            time_ms: 0.0,
            sample_rate: rate,
            chorus_phase: 0.0,
        }
    }

    /// Flushes the buffer and rewinds the modulation state; the current
    /// delay time is kept so a reset does not retrigger a glide.
    pub fn clear(&mut self) {
        self.ring.clear();
        self.chorus_phase = 0.0;
    }

    #[inline]
    pub fn time_ms(&self) -> f32 {
        self.time_ms
    }

    /// Sets the instantaneous delay time used by the next read.
    #[inline]
    pub fn set_time_ms(&mut self, ms: f32) {
        self.time_ms = ms.max(0.0);
    }

    #[inline]
    pub fn set_target_ms(&mut self, ms: f32) {
        self.ramp.set_target(ms);
    }

    #[inline]
    pub fn ramp_current(&self) -> f32 {
        self.ramp.current()
    }

    /// Advances the delay-time glide for one sample. The LFO runs free and
    /// wraps by modulo; modulation is suppressed entirely while the target
    /// is zero, and the audible term scales with the chorus crossfade mix.
    pub fn chorus_step(&mut self, target_ms: f32, chorus_mix: f32, rate_hz: f32, coeff: f32) -> f32 {
        let modulation = CHORUS_DEPTH_MS * self.chorus_phase.sin();
        self.chorus_phase = (self.chorus_phase + TAU * rate_hz / self.sample_rate).rem_euclid(TAU);

        if target_ms != self.ramp.current() && target_ms != 0.0 {
            self.ramp.set_target(target_ms + modulation);
        } else {
            self.ramp.set_target(target_ms);
        }

        let mut time = one_pole(self.time_ms, self.ramp.next(), coeff);
        if target_ms != 0.0 {
            time += modulation * chorus_mix;
        }
        self.time_ms = time.max(0.0);
        self.time_ms
    }

    /// Unmodulated glide with an external perturbation, used by the reverb
    /// taps which share one LFO.
    pub fn glide(&mut self, offset: f32, coeff: f32) -> f32 {
        let time = one_pole(self.time_ms + offset, self.ramp.next(), coeff);
        self.time_ms = time.max(0.0);
        self.time_ms
    }

    /// Fractionally delayed sample at the current delay time.
    #[inline]
    pub fn read(&self) -> f32 {
        self.ring
            .read_fractional(self.time_ms * self.sample_rate / 1_000.0)
    }

    /// Writes the input plus the feedback term and advances the line. The
    /// feedback path is what turns the line into an echo.
    #[inline]
    pub fn write(&mut self, input: f32, feedback: f32, delayed: f32) {
        self.ring.write(input + feedback * delayed);
    }
}
