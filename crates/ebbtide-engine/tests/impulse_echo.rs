use std::sync::Arc;

use ebbtide_engine::{
    AudioBuffer, AudioProcessor, BufferConfig, ChannelLayout, EbbtideProcessor, ParameterStore,
};

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK: usize = 512;

fn run_silence(processor: &mut EbbtideProcessor, blocks: usize) {
    let mut buffer = AudioBuffer::new(2, BLOCK);
    for _ in 0..blocks {
        buffer.clear();
        processor.process(&mut buffer).expect("process");
    }
}

fn render_impulse(processor: &mut EbbtideProcessor, blocks: usize) -> Vec<f32> {
    let mut output = Vec::with_capacity(blocks * BLOCK);
    let mut buffer = AudioBuffer::new(2, BLOCK);
    for block in 0..blocks {
        buffer.clear();
        if block == 0 {
            buffer.channel_mut(0)[0] = 1.0;
            buffer.channel_mut(1)[0] = 1.0;
        }
        processor.process(&mut buffer).expect("process");
        output.extend_from_slice(buffer.channel(0));
    }
    output
}

fn peak(window: &[f32]) -> f32 {
    window.iter().map(|x| x.abs()).fold(0.0, f32::max)
}

#[test]
fn feedback_echo_train_decays() {
    let params = Arc::new(ParameterStore::default());
    params.set_delay_left_ms(500.0);
    params.set_feedback(0.5);
    params.set_dry_wet(1.0);

    let mut processor = EbbtideProcessor::new(Arc::clone(&params));
    processor
        .prepare(&BufferConfig::new(SAMPLE_RATE, BLOCK, ChannelLayout::Stereo))
        .expect("prepare");

    // Let the delay-time and level smoothers reach steady state first.
    run_silence(&mut processor, 800);
    let output = render_impulse(&mut processor, 110);

    // At dry/wet 1.0 the dry sample is attenuated by the wet scale.
    assert!(
        (output[0] - 0.5).abs() < 0.01,
        "dry pass-through was {}",
        output[0]
    );

    let between = peak(&output[200..23_000]);
    assert!(between < 0.02, "energy between echoes: {between}");

    let first = peak(&output[23_800..24_300]);
    assert!(first > 0.2 && first < 0.6, "first echo peak {first}");

    let second = peak(&output[47_700..48_400]);
    assert!(second > 0.02, "second echo missing: {second}");
    assert!(
        second < first * 0.75,
        "echo train not decaying: {second} vs {first}"
    );

    for sample in &output {
        assert!(sample.is_finite());
    }
}
