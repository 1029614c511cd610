use std::sync::atomic::{AtomicBool, Ordering};

use atomic_float::AtomicF32;

/// Parameter ranges enforced on the writer side. The audio thread never
/// rejects a value; out-of-range writes are clamped where they enter.
pub mod range {
    use std::ops::RangeInclusive;

    pub const DELAY_MS: RangeInclusive<f32> = 0.0..=2_000.0;
    pub const FEEDBACK: RangeInclusive<f32> = 0.0..=1.0;
    pub const DRY_WET: RangeInclusive<f32> = 0.0..=1.0;
    pub const CHORUS_RATE_HZ: RangeInclusive<f32> = 0.1..=3.0;
    pub const LOW_PASS_HZ: RangeInclusive<f32> = 20.0..=7_000.0;
    pub const HIGH_PASS_HZ: RangeInclusive<f32> = 20.0..=1_000.0;
    pub const REVERB_LEVEL: RangeInclusive<f32> = 0.0..=1.0;
}

/// Read-only snapshot of every user parameter, taken once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSettings {
    pub delay_left_ms: f32,
    pub delay_right_ms: f32,
    pub feedback: f32,
    pub dry_wet: f32,
    pub dual_delay: bool,
    pub chorus: bool,
    pub chorus_rate_hz: f32,
    pub low_pass: bool,
    pub low_pass_hz: f32,
    pub high_pass: bool,
    pub high_pass_hz: f32,
    pub reverb: bool,
    pub reverb_level: f32,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            delay_left_ms: 320.0,
            delay_right_ms: 320.0,
            feedback: 0.25,
            dry_wet: 0.5,
            dual_delay: false,
            chorus: false,
            chorus_rate_hz: 0.45,
            low_pass: false,
            low_pass_hz: 2_000.0,
            high_pass: false,
            high_pass_hz: 500.0,
            reverb: false,
            reverb_level: 0.5,
        }
    }
}

/// Lock-free parameter storage shared between the UI/automation thread and
/// the audio thread.
///
/// One atomic per parameter, single writer, single reader; no
/// cross-parameter atomicity is needed since each value is smoothed
/// independently on the audio side.
#[derive(Debug)]
pub struct ParameterStore {
    delay_left_ms: AtomicF32,
    delay_right_ms: AtomicF32,
    feedback: AtomicF32,
    dry_wet: AtomicF32,
    dual_delay: AtomicBool,
    chorus: AtomicBool,
    chorus_rate_hz: AtomicF32,
    low_pass: AtomicBool,
    low_pass_hz: AtomicF32,
    high_pass: AtomicBool,
    high_pass_hz: AtomicF32,
    reverb: AtomicBool,
    reverb_level: AtomicF32,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(ChainSettings::default())
    }
}

impl ParameterStore {
    pub fn new(settings: ChainSettings) -> Self {
        Self {
            delay_left_ms: AtomicF32::new(settings.delay_left_ms),
            delay_right_ms: AtomicF32::new(settings.delay_right_ms),
            feedback: AtomicF32::new(settings.feedback),
            dry_wet: AtomicF32::new(settings.dry_wet),
            dual_delay: AtomicBool::new(settings.dual_delay),
            chorus: AtomicBool::new(settings.chorus),
            chorus_rate_hz: AtomicF32::new(settings.chorus_rate_hz),
            low_pass: AtomicBool::new(settings.low_pass),
            low_pass_hz: AtomicF32::new(settings.low_pass_hz),
            high_pass: AtomicBool::new(settings.high_pass),
            high_pass_hz: AtomicF32::new(settings.high_pass_hz),
            reverb: AtomicBool::new(settings.reverb),
            reverb_level: AtomicF32::new(settings.reverb_level),
        }
    }

    pub fn snapshot(&self) -> ChainSettings {
        ChainSettings {
            delay_left_ms: self.delay_left_ms.load(Ordering::Relaxed),
            delay_right_ms: self.delay_right_ms.load(Ordering::Relaxed),
            feedback: self.feedback.load(Ordering::Relaxed),
            dry_wet: self.dry_wet.load(Ordering::Relaxed),
            dual_delay: self.dual_delay.load(Ordering::Relaxed),
            chorus: self.chorus.load(Ordering::Relaxed),
            chorus_rate_hz: self.chorus_rate_hz.load(Ordering::Relaxed),
            low_pass: self.low_pass.load(Ordering::Relaxed),
            low_pass_hz: self.low_pass_hz.load(Ordering::Relaxed),
            high_pass: self.high_pass.load(Ordering::Relaxed),
            high_pass_hz: self.high_pass_hz.load(Ordering::Relaxed),
            reverb: self.reverb.load(Ordering::Relaxed),
            reverb_level: self.reverb_level.load(Ordering::Relaxed),
        }
    }

    pub fn set_delay_left_ms(&self, ms: f32) {
        self.delay_left_ms.store(clamp(ms, range::DELAY_MS), Ordering::Relaxed);
    }

    pub fn set_delay_right_ms(&self, ms: f32) {
        self.delay_right_ms.store(clamp(ms, range::DELAY_MS), Ordering::Relaxed);
    }

    pub fn set_feedback(&self, feedback: f32) {
        self.feedback.store(clamp(feedback, range::FEEDBACK), Ordering::Relaxed);
    }

    pub fn set_dry_wet(&self, dry_wet: f32) {
        self.dry_wet.store(clamp(dry_wet, range::DRY_WET), Ordering::Relaxed);
    }

    pub fn set_dual_delay(&self, enabled: bool) {
        self.dual_delay.store(enabled, Ordering::Relaxed);
    }

    pub fn set_chorus(&self, enabled: bool) {
        self.chorus.store(enabled, Ordering::Relaxed);
    }

    pub fn set_chorus_rate_hz(&self, rate: f32) {
        self.chorus_rate_hz.store(clamp(rate, range::CHORUS_RATE_HZ), Ordering::Relaxed);
    }

    pub fn set_low_pass(&self, enabled: bool) {
        self.low_pass.store(enabled, Ordering::Relaxed);
    }

    pub fn set_low_pass_hz(&self, cutoff: f32) {
        self.low_pass_hz.store(clamp(cutoff, range::LOW_PASS_HZ), Ordering::Relaxed);
    }

    pub fn set_high_pass(&self, enabled: bool) {
        self.high_pass.store(enabled, Ordering::Relaxed);
    }

    pub fn set_high_pass_hz(&self, cutoff: f32) {
        self.high_pass_hz.store(clamp(cutoff, range::HIGH_PASS_HZ), Ordering::Relaxed);
    }

    pub fn set_reverb(&self, enabled: bool) {
        self.reverb.store(enabled, Ordering::Relaxed);
    }

    pub fn set_reverb_level(&self, level: f32) {
        self.reverb_level.store(clamp(level, range::REVERB_LEVEL), Ordering::Relaxed);
    }
}

fn clamp(value: f32, range: std::ops::RangeInclusive<f32>) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        *range.start()
    }
}
