use std::f32::consts::TAU;
use std::sync::Arc;

use ebbtide_engine::{
    AudioBuffer, AudioProcessor, BufferConfig, ChannelLayout, EbbtideProcessor, ParameterStore,
};

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK: usize = 512;
const TONE_HZ: f32 = 220.0;

struct ToneSource {
    position: u64,
}

impl ToneSource {
    fn fill(&mut self, buffer: &mut AudioBuffer) {
        let start = self.position;
        for channel in buffer.as_mut_slice() {
            for (offset, sample) in channel.iter_mut().enumerate() {
                let n = (start + offset as u64) as f32;
                *sample = 0.5 * (TAU * TONE_HZ * n / SAMPLE_RATE).sin();
            }
        }
        self.position = start + BLOCK as u64;
    }
}

/// Largest sample-to-sample step across `blocks` blocks of steady tone.
fn max_delta(
    processor: &mut EbbtideProcessor,
    source: &mut ToneSource,
    previous: &mut f32,
    blocks: usize,
) -> f32 {
    let mut buffer = AudioBuffer::new(2, BLOCK);
    let mut delta = 0.0f32;
    for _ in 0..blocks {
        source.fill(&mut buffer);
        processor.process(&mut buffer).expect("process");
        for sample in buffer.channel(0) {
            assert!(sample.is_finite());
            delta = delta.max((sample - *previous).abs());
            *previous = *sample;
        }
    }
    delta
}

#[test]
fn low_pass_toggle_fades_instead_of_clicking() {
    let params = Arc::new(ParameterStore::default());
    params.set_delay_left_ms(250.0);
    params.set_feedback(0.3);
    params.set_dry_wet(0.5);
    params.set_low_pass_hz(800.0);

    let mut processor = EbbtideProcessor::new(Arc::clone(&params));
    processor
        .prepare(&BufferConfig::new(SAMPLE_RATE, BLOCK, ChannelLayout::Stereo))
        .expect("prepare");

    let mut source = ToneSource { position: 0 };
    let mut previous = 0.0;

    // Settle the echo network on the steady tone.
    max_delta(&mut processor, &mut source, &mut previous, 400);
    let baseline = max_delta(&mut processor, &mut source, &mut previous, 40);
    assert!(baseline > 0.0);

    params.set_low_pass(true);
    let transition = max_delta(&mut processor, &mut source, &mut previous, 100);

    assert!(
        transition < baseline * 2.0 + 0.02,
        "toggle produced a discontinuity: {transition} vs baseline {baseline}"
    );
}
