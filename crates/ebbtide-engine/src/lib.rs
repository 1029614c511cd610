//! Ebbtide engine
//! ==============
//!
//! Block processor and host-facing surface for the Ebbtide stereo
//! delay/echo effect. The DSP primitives live in [`ebbtide_dsp`]; this
//! crate owns the audio buffer plumbing, the lock-free parameter store,
//! the peak meters, and the per-block orchestrator.

pub mod buffer;
pub mod levels;
pub mod params;
pub mod plugin;
pub mod processor;

pub use buffer::{AudioBuffer, BufferConfig, ChannelLayout};
pub use levels::SignalLevels;
pub use params::{ChainSettings, ParameterStore};
pub use plugin::{AudioProcessor, PluginDescriptor, PluginError};
pub use processor::EbbtideProcessor;
