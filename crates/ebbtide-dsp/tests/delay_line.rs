use ebbtide_dsp::delay::{DelayLine, CHORUS_DEPTH_MS};
use ebbtide_dsp::smoothing::one_pole_coeff;

#[test]
fn impulse_reappears_at_the_delay_time() {
    let mut line = DelayLine::new(1_000.0, 2.0, 0.0);
    line.write(1.0, 0.0, 0.0);
    for _ in 0..100 {
        line.write(0.0, 0.0, 0.0);
    }
    line.set_time_ms(100.0);
    assert_eq!(line.read(), 1.0);
}

#[test]
fn feedback_term_enters_the_buffer() {
    let mut line = DelayLine::new(1_000.0, 2.0, 0.0);
    line.write(0.5, 0.5, 1.0);
    line.set_time_ms(0.0);
    assert!((line.read() - 1.0).abs() < 1e-6);
}

#[test]
fn chorus_is_suppressed_at_zero_target() {
    let coeff = one_pole_coeff(48_000.0, 0.01);
    let mut line = DelayLine::new(48_000.0, 2.0, 0.0);
    for _ in 0..2_000 {
        let time = line.chorus_step(0.0, 1.0, 2.0, coeff);
        assert_eq!(time, 0.0, "zero target must not be modulated");
    }
}

#[test]
fn chorus_modulates_a_steady_nonzero_target() {
    let mut line = DelayLine::new(1_000.0, 2.0, 0.0);
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for _ in 0..1_000 {
        let time = line.chorus_step(100.0, 1.0, 5.0, 0.0);
        min = min.min(time);
        max = max.max(time);
    }
    // Full-depth excursion around the target once the ramp has settled.
    assert!(max > 100.0 + CHORUS_DEPTH_MS * 0.9, "max {max}");
    assert!(min < 100.0 - CHORUS_DEPTH_MS * 0.9, "min {min}");
}

#[test]
fn glide_approaches_the_ramp_target() {
    let coeff = one_pole_coeff(1_000.0, 0.01);
    let mut line = DelayLine::new(1_000.0, 2.0, 0.05);
    line.set_target_ms(40.0);
    let mut last = 0.0;
    for _ in 0..200 {
        last = line.glide(0.0, coeff);
    }
    assert!((last - 40.0).abs() < 1e-3, "settled at {last}");
}
