use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{AudioBuffer, BufferConfig, ChannelLayout};

/// Metadata describing a processor instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub id: String,
    pub name: String,
    pub vendor: String,
    pub version: Option<String>,
}

impl PluginDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vendor: vendor.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.vendor)
    }
}

/// Errors surfaced by the processor lifecycle.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("invalid stream configuration: {0}")]
    InvalidConfig(String),
    #[error("unsupported channel layout: {0:?}")]
    UnsupportedLayout(ChannelLayout),
    #[error("processor is not prepared")]
    NotPrepared,
}

/// Audio processor driven one block at a time by the host callback.
///
/// `prepare` is the only place allowed to allocate; `process` runs to
/// completion before the next block arrives and must never block.
pub trait AudioProcessor: Send + Sync {
    fn descriptor(&self) -> PluginDescriptor;

    /// Allocates buffers and resets all state for the given stream
    /// configuration. Must be called before the first `process` and again
    /// on any sample-rate change.
    fn prepare(&mut self, config: &BufferConfig) -> anyhow::Result<()>;

    /// Processes one block in place. Block length may vary call to call.
    fn process(&mut self, buffer: &mut AudioBuffer) -> anyhow::Result<()>;

    /// Flushes delay buffers and filter state without reallocating.
    fn reset(&mut self) {}

    fn supports_layout(&self, layout: ChannelLayout) -> bool {
        matches!(layout, ChannelLayout::Mono | ChannelLayout::Stereo)
    }

    /// Processing latency in samples introduced by the processor.
    fn latency_samples(&self) -> usize {
        0
    }
}
