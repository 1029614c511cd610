/// Power-of-two circular sample buffer with fractionally delayed reads.
///
/// The write index wraps with a bitmask, so every read index is valid by
/// construction. Callers size the buffer for at least twice the longest
/// delay they intend to read; an undersized buffer wraps into stale samples
/// without any error.
#[derive(Clone, Debug)]
pub struct RingBuffer {
    buffer: Vec<f32>,
    write: usize,
    mask: usize,
    interpolate: bool,
}

impl RingBuffer {
    /// Allocates a buffer of the smallest power of two >= `min_len`,
    /// flushed to silence.
    pub fn with_capacity(min_len: usize) -> Self {
        let capacity = min_len.max(1).next_power_of_two();
        Self {
            buffer: vec![0.0; capacity],
            write: 0,
            mask: capacity - 1,
            interpolate: true,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write = 0;
    }

    /// Stores `sample` and advances the write index.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write] = sample;
        self.write = (self.write + 1) & self.mask;
    }

    /// Sample written `delay` steps ago; delay 0 is the most recent write.
    #[inline]
    pub fn read(&self, delay: usize) -> f32 {
        let index = self.write.wrapping_sub(1).wrapping_sub(delay) & self.mask;
        self.buffer[index]
    }

    /// Linearly interpolated read; the fraction blends toward the older
    /// neighbour as it grows.
    #[inline]
    pub fn read_fractional(&self, delay: f32) -> f32 {
        let delay = delay.max(0.0);
        let whole = delay as usize;
        let y1 = self.read(whole);
        if !self.interpolate {
            return y1;
        }
        let frac = delay - whole as f32;
        let y2 = self.read(whole + 1);
        if frac < 1.0 {
            frac * y2 + (1.0 - frac) * y1
        } else {
            y2
        }
    }

    pub fn set_interpolate(&mut self, on: bool) {
        self.interpolate = on;
    }
}
