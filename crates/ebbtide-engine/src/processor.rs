use std::sync::Arc;

use ebbtide_dsp::biquad::{clamp_cutoff, Biquad, BiquadCoeffs};
use ebbtide_dsp::delay::DelayLine;
use ebbtide_dsp::reverb::{ReverbBank, ReverbLfo, BASE_TIMES_LEFT_MS, BASE_TIMES_RIGHT_MS};
use ebbtide_dsp::smoothing::{LinearRamp, SmoothingCoeffs};

use crate::buffer::{AudioBuffer, BufferConfig};
use crate::levels::SignalLevels;
use crate::params::{ChainSettings, ParameterStore};
use crate::plugin::{AudioProcessor, PluginDescriptor, PluginError};

const MAX_DELAY_SECONDS: f32 = 4.0;
const DELAY_RAMP_SECONDS: f32 = 0.7;
const LEVEL_RAMP_SECONDS: f32 = 0.005;
const REVERB_LEVEL_RAMP_SECONDS: f32 = 0.0075;
const MIX_RAMP_SECONDS: f32 = 0.7;
const FREQ_RAMP_SECONDS: f32 = 0.0075;
const FIXED_LOW_PASS_HZ: f32 = 7_000.0;

/// A user-toggleable filter stage: the filter runs continuously and the
/// toggle only moves the crossfade, so engaging it never pops.
struct ToneStage {
    filter: Biquad,
    mix: LinearRamp,
}

impl ToneStage {
    fn new(sample_rate: f32, coeffs: BiquadCoeffs) -> Self {
        Self {
            filter: Biquad::new(coeffs),
            mix: LinearRamp::new(sample_rate, MIX_RAMP_SECONDS),
        }
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let mix = self.mix.next();
        let filtered = self.filter.process(input);
        (1.0 - mix) * input + mix * filtered
    }
}

/// Everything one channel owns. Channels never share signal state; the
/// block snapshot and the reverb LFO are the only cross-channel inputs.
struct ChannelState {
    delay: DelayLine,
    low_pass: ToneStage,
    high_pass: ToneStage,
    fixed_low: Biquad,
    chorus_mix: LinearRamp,
    reverb_mix: LinearRamp,
    reverb: ReverbBank,
    dry_wet: LinearRamp,
    dry_wet_current: f32,
}

impl ChannelState {
    fn new(sample_rate: f32, settings: &ChainSettings, base_times_ms: &[f32; 10]) -> Self {
        Self {
            delay: DelayLine::new(sample_rate, MAX_DELAY_SECONDS, DELAY_RAMP_SECONDS),
            low_pass: ToneStage::new(
                sample_rate,
                BiquadCoeffs::low_pass(sample_rate, settings.low_pass_hz),
            ),
            high_pass: ToneStage::new(
                sample_rate,
                BiquadCoeffs::high_pass(sample_rate, settings.high_pass_hz),
            ),
            fixed_low: Biquad::new(BiquadCoeffs::low_pass(sample_rate, FIXED_LOW_PASS_HZ)),
            chorus_mix: LinearRamp::new(sample_rate, MIX_RAMP_SECONDS),
            reverb_mix: LinearRamp::new(sample_rate, MIX_RAMP_SECONDS),
            reverb: ReverbBank::new(sample_rate, base_times_ms),
            dry_wet: LinearRamp::new(sample_rate, LEVEL_RAMP_SECONDS),
            dry_wet_current: 0.0,
        }
    }

    fn clear(&mut self) {
        self.delay.clear();
        self.low_pass.filter.reset();
        self.high_pass.filter.reset();
        self.fixed_low.reset();
        self.reverb.clear();
    }
}

/// Cutoff glide with recompute-on-change: coefficients are rebuilt only
/// while the smoothed frequency still differs from the last applied value.
struct SmoothedCutoff {
    ramp: LinearRamp,
    applied: f32,
}

impl SmoothedCutoff {
    fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut ramp = LinearRamp::new(sample_rate, FREQ_RAMP_SECONDS);
        ramp.snap_to(cutoff_hz);
        Self {
            ramp,
            applied: cutoff_hz,
        }
    }

    fn step(&mut self, requested: f32, coeff: f32, sample_rate: f32) -> Option<f32> {
        if !requested.is_finite() || requested == self.applied {
            return None;
        }
        let cutoff = clamp_cutoff(sample_rate, self.ramp.glide_to(requested, coeff));
        self.applied = cutoff;
        Some(cutoff)
    }
}

/// The stereo delay/echo effect: chorus-modulated feedback delay, tone
/// filters with crossfaded bypass, and a ten-tap reverb network.
pub struct EbbtideProcessor {
    params: Arc<ParameterStore>,
    levels: Arc<SignalLevels>,
    sample_rate: f32,
    coeffs: SmoothingCoeffs,
    channels: Vec<ChannelState>,
    reverb_lfo: ReverbLfo,
    low_pass_cutoff: SmoothedCutoff,
    high_pass_cutoff: SmoothedCutoff,
    feedback_ramp: LinearRamp,
    feedback_current: f32,
    reverb_level_ramp: LinearRamp,
    reverb_level_current: f32,
    prepared: bool,
}

impl EbbtideProcessor {
    pub fn new(params: Arc<ParameterStore>) -> Self {
        let sample_rate = 48_000.0;
        let settings = params.snapshot();
        Self {
            params,
            levels: Arc::new(SignalLevels::new()),
            sample_rate,
            coeffs: SmoothingCoeffs::new(sample_rate),
            channels: Vec::new(),
            reverb_lfo: ReverbLfo::new(sample_rate),
            low_pass_cutoff: SmoothedCutoff::new(sample_rate, settings.low_pass_hz),
            high_pass_cutoff: SmoothedCutoff::new(sample_rate, settings.high_pass_hz),
            feedback_ramp: LinearRamp::new(sample_rate, LEVEL_RAMP_SECONDS),
            feedback_current: 0.0,
            reverb_level_ramp: LinearRamp::new(sample_rate, REVERB_LEVEL_RAMP_SECONDS),
            reverb_level_current: 0.0,
            prepared: false,
        }
    }

    pub fn params(&self) -> &Arc<ParameterStore> {
        &self.params
    }

    /// Peak meters updated once per processed block.
    pub fn levels(&self) -> &Arc<SignalLevels> {
        &self.levels
    }

    /// Block-level smoothing and coefficient updates; everything here runs
    /// once per block, never per sample.
    fn update_block_state(&mut self, settings: &ChainSettings) {
        let coeffs = self.coeffs;
        let sample_rate = self.sample_rate;

        self.feedback_current = self.feedback_ramp.glide_to(settings.feedback, coeffs.fast);
        self.reverb_level_current = self
            .reverb_level_ramp
            .glide_to(settings.reverb_level, coeffs.fast);

        if let Some(cutoff) = self
            .low_pass_cutoff
            .step(settings.low_pass_hz, coeffs.general, sample_rate)
        {
            let low = BiquadCoeffs::low_pass(sample_rate, cutoff);
            for channel in &mut self.channels {
                channel.low_pass.filter.set_coeffs(low);
            }
        }
        if let Some(cutoff) = self
            .high_pass_cutoff
            .step(settings.high_pass_hz, coeffs.general, sample_rate)
        {
            let high = BiquadCoeffs::high_pass(sample_rate, cutoff);
            for channel in &mut self.channels {
                channel.high_pass.filter.set_coeffs(high);
            }
        }

        let low_mix = if settings.low_pass { 1.0 } else { 0.0 };
        let high_mix = if settings.high_pass { 1.0 } else { 0.0 };
        let chorus_mix = if settings.chorus { 1.0 } else { 0.0 };
        let reverb_mix = if settings.reverb { 1.0 } else { 0.0 };

        for (index, channel) in self.channels.iter_mut().enumerate() {
            channel.low_pass.mix.set_target(low_mix);
            channel.high_pass.mix.set_target(high_mix);
            channel.chorus_mix.set_target(chorus_mix);
            channel.reverb_mix.set_target(reverb_mix);
            channel.reverb.set_targets();

            // Delay at zero bypasses the wet path; the slow coefficient
            // stretches that fade so the bypass itself cannot click.
            let target_ms = delay_target_ms(settings, index);
            let (wet_target, coeff) = if target_ms == 0.0 {
                (0.0, coeffs.slow)
            } else {
                (settings.dry_wet, coeffs.fast)
            };
            channel.dry_wet_current = channel.dry_wet.glide_to(wet_target, coeff);
        }
    }
}

impl Default for EbbtideProcessor {
    fn default() -> Self {
        Self::new(Arc::new(ParameterStore::default()))
    }
}

#[inline]
fn delay_target_ms(settings: &ChainSettings, channel: usize) -> f32 {
    if channel == 0 || !settings.dual_delay {
        settings.delay_left_ms
    } else {
        settings.delay_right_ms
    }
}

impl AudioProcessor for EbbtideProcessor {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("ebbtide.effects.echo", "Ebbtide Echo", "Ebbtide Audio")
    }

    fn prepare(&mut self, config: &BufferConfig) -> anyhow::Result<()> {
        if !config.sample_rate.is_finite() || config.sample_rate <= 0.0 {
            return Err(PluginError::InvalidConfig(format!(
                "sample rate {} Hz",
                config.sample_rate
            ))
            .into());
        }
        if config.block_size == 0 {
            return Err(PluginError::InvalidConfig("zero block size".into()).into());
        }
        if !self.supports_layout(config.layout) {
            return Err(PluginError::UnsupportedLayout(config.layout).into());
        }

        let sample_rate = config.sample_rate;
        let settings = self.params.snapshot();

        self.sample_rate = sample_rate;
        self.coeffs = SmoothingCoeffs::new(sample_rate);
        self.channels = (0..config.layout.channels())
            .map(|index| {
                let base_times = if index == 0 {
                    &BASE_TIMES_LEFT_MS
                } else {
                    &BASE_TIMES_RIGHT_MS
                };
                ChannelState::new(sample_rate, &settings, base_times)
            })
            .collect();
        self.reverb_lfo = ReverbLfo::new(sample_rate);
        self.low_pass_cutoff = SmoothedCutoff::new(sample_rate, settings.low_pass_hz);
        self.high_pass_cutoff = SmoothedCutoff::new(sample_rate, settings.high_pass_hz);
        self.feedback_ramp = LinearRamp::new(sample_rate, LEVEL_RAMP_SECONDS);
        self.feedback_current = 0.0;
        self.reverb_level_ramp = LinearRamp::new(sample_rate, REVERB_LEVEL_RAMP_SECONDS);
        self.reverb_level_current = 0.0;
        self.prepared = true;

        log::debug!(
            "prepared {} at {} Hz, {} channel(s), block {}",
            self.descriptor().id,
            sample_rate,
            config.layout.channels(),
            config.block_size
        );
        Ok(())
    }

    fn process(&mut self, buffer: &mut AudioBuffer) -> anyhow::Result<()> {
        if !self.prepared {
            return Err(PluginError::NotPrepared.into());
        }

        let settings = self.params.snapshot();
        self.update_block_state(&settings);

        let coeffs = self.coeffs;
        let feedback = self.feedback_current;
        let reverb_level = self.reverb_level_current;
        let chorus_rate = settings.chorus_rate_hz;

        let mut input_peak = 0.0f32;
        let mut output_peak = 0.0f32;

        let lfo = &mut self.reverb_lfo;
        for (index, (samples, channel)) in buffer
            .as_mut_slice()
            .iter_mut()
            .zip(self.channels.iter_mut())
            .enumerate()
        {
            let target_ms = delay_target_ms(&settings, index);
            let dry_wet = channel.dry_wet_current;
            let wet_scale = (1.0 - dry_wet) + dry_wet * 0.5;
            let reverb_scale = (1.0 - reverb_level) + reverb_level * 0.5;

            for sample in samples.iter_mut() {
                let dry = *sample;
                input_peak = input_peak.max(dry.abs());

                let chorus_mix = channel.chorus_mix.next();
                channel
                    .delay
                    .chorus_step(target_ms, chorus_mix, chorus_rate, coeffs.fast);
                let delayed = channel.delay.read();

                let delayed = channel.low_pass.process(delayed);
                let delayed = channel.high_pass.process(delayed);
                let delayed = channel.fixed_low.process(delayed);

                channel.delay.write(dry, feedback, delayed);
                let mut out = wet_scale * dry + dry_wet * delayed;

                let combined = channel.reverb.process(dry, reverb_level, lfo.next());
                let blend = reverb_scale * out + reverb_level * combined;
                let reverb_mix = channel.reverb_mix.next();
                out = (1.0 - reverb_mix) * out + reverb_mix * blend;

                output_peak = output_peak.max(out.abs());
                *sample = out;
            }
        }

        self.levels.store(input_peak, output_peak);
        Ok(())
    }

    fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.clear();
        }
        self.reverb_lfo.reset();
        log::debug!("reset {}", self.descriptor().id);
    }
}
