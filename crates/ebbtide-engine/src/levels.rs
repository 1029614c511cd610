use std::sync::atomic::{AtomicU32, Ordering};

/// Peak input/output magnitudes of the most recent block, published for an
/// external meter. Bit-cast through `AtomicU32` so the audio thread never
/// locks; readers see whole floats, never torn values.
#[derive(Debug, Default)]
pub struct SignalLevels {
    input_peak: AtomicU32,
    output_peak: AtomicU32,
}

impl SignalLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, input_peak: f32, output_peak: f32) {
        self.input_peak
            .store(input_peak.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
        self.output_peak
            .store(output_peak.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    pub fn input_peak(&self) -> f32 {
        f32::from_bits(self.input_peak.load(Ordering::Relaxed))
    }

    pub fn output_peak(&self) -> f32 {
        f32::from_bits(self.output_peak.load(Ordering::Relaxed))
    }
}
