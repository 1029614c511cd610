pub mod biquad;
pub mod delay;
pub mod reverb;
pub mod ring;
pub mod smoothing;

pub use biquad::{Biquad, BiquadCoeffs};
pub use delay::DelayLine;
pub use reverb::{ReverbBank, ReverbLfo};
pub use ring::RingBuffer;
pub use smoothing::{LinearRamp, SmoothingCoeffs};
