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

fn render_impulse(processor: &mut EbbtideProcessor, blocks: usize) -> (Vec<f32>, Vec<f32>) {
    let mut left = Vec::with_capacity(blocks * BLOCK);
    let mut right = Vec::with_capacity(blocks * BLOCK);
    let mut buffer = AudioBuffer::new(2, BLOCK);
    for block in 0..blocks {
        buffer.clear();
        if block == 0 {
            buffer.channel_mut(0)[0] = 1.0;
            buffer.channel_mut(1)[0] = 1.0;
        }
        processor.process(&mut buffer).expect("process");
        left.extend_from_slice(buffer.channel(0));
        right.extend_from_slice(buffer.channel(1));
    }
    (left, right)
}

fn peak(window: &[f32]) -> f32 {
    window.iter().map(|x| x.abs()).fold(0.0, f32::max)
}

fn delay_params() -> Arc<ParameterStore> {
    let params = Arc::new(ParameterStore::default());
    params.set_delay_left_ms(300.0);
    params.set_delay_right_ms(1_400.0);
    params.set_feedback(0.4);
    params.set_dry_wet(1.0);
    params
}

#[test]
fn right_channel_tracks_left_without_dual_delay() {
    let params = delay_params();
    let mut processor = EbbtideProcessor::new(Arc::clone(&params));
    processor
        .prepare(&BufferConfig::new(SAMPLE_RATE, BLOCK, ChannelLayout::Stereo))
        .expect("prepare");

    run_silence(&mut processor, 800);
    let (left, right) = render_impulse(&mut processor, 150);

    for (index, (l, r)) in left.iter().zip(right.iter()).enumerate() {
        assert!(
            (l - r).abs() < 1e-6,
            "channels diverged at sample {index}: {l} vs {r}"
        );
    }

    // Both channels echo at the left delay time, 300 ms.
    assert!(peak(&left[14_200..14_700]) > 0.2, "left echo missing");
    assert!(peak(&right[14_200..14_700]) > 0.2, "right echo missing");
    // Nothing arrives at the ignored right delay time.
    assert!(
        peak(&right[66_900..67_600]) < 0.05,
        "right delay time leaked through"
    );
}

#[test]
fn dual_delay_gives_the_right_channel_its_own_time() {
    let params = delay_params();
    params.set_dual_delay(true);
    let mut processor = EbbtideProcessor::new(Arc::clone(&params));
    processor
        .prepare(&BufferConfig::new(SAMPLE_RATE, BLOCK, ChannelLayout::Stereo))
        .expect("prepare");

    run_silence(&mut processor, 800);
    let (left, right) = render_impulse(&mut processor, 150);

    assert!(peak(&left[14_200..14_700]) > 0.2, "left echo missing");
    assert!(
        peak(&right[14_200..14_700]) < 0.05,
        "right channel echoed at the left time"
    );
    assert!(
        peak(&right[66_900..67_600]) > 0.15,
        "right echo missing at its own time"
    );
}
