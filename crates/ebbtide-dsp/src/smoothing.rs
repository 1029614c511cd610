/// Fixed-length linear ramp toward a target value.
///
/// Setting a new target restarts the countdown from the current value, so
/// repeated per-sample retargeting behaves like a slew limiter rather than
/// a jump.
#[derive(Clone, Copy, Debug)]
pub struct LinearRamp {
    current: f32,
    target: f32,
    step: f32,
    steps: u32,
    countdown: u32,
}

impl LinearRamp {
    pub fn new(sample_rate: f32, ramp_seconds: f32) -> Self {
        let mut ramp = Self {
            current: 0.0,
            target: 0.0,
            step: 0.0,
            steps: 0,
            countdown: 0,
        };
        ramp.reset(sample_rate, ramp_seconds);
        ramp
    }

    /// Reconfigures the ramp length and snaps the target to the current
    /// value.
    pub fn reset(&mut self, sample_rate: f32, ramp_seconds: f32) {
        let rate = sample_rate.max(1.0);
        self.steps = (ramp_seconds.max(0.0) * rate) as u32;
        self.target = self.current;
        self.step = 0.0;
        self.countdown = 0;
    }

    pub fn snap_to(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.countdown = 0;
    }

    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.target = target;
        if self.steps == 0 || target == self.current {
            self.snap_to(target);
            return;
        }
        self.countdown = self.steps;
        self.step = (target - self.current) / self.steps as f32;
    }

    /// Advances one step and returns the new current value.
    #[inline]
    pub fn next(&mut self) -> f32 {
        if self.countdown == 0 {
            self.current = self.target;
            return self.current;
        }
        self.countdown -= 1;
        if self.countdown == 0 {
            self.current = self.target;
        } else {
            self.current += self.step;
        }
        self.current
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn skip(&mut self, steps: u32) -> f32 {
        for _ in 0..steps {
            self.next();
        }
        self.current
    }

    /// One block-level smoothing step: retarget the ramp, advance it once,
    /// and soften the move with a one-pole glide.
    #[inline]
    pub fn glide_to(&mut self, target: f32, coeff: f32) -> f32 {
        self.set_target(target);
        let current = self.current;
        let next = self.next();
        one_pole(current, next, coeff)
    }
}

/// Stateless one-pole step, `next + (next - current) * coeff`.
#[inline]
pub fn one_pole(current: f32, next: f32, coeff: f32) -> f32 {
    next + (next - current) * coeff
}

/// One-pole coefficient for a time constant of `tau_seconds`.
#[inline]
pub fn one_pole_coeff(sample_rate: f32, tau_seconds: f32) -> f32 {
    let rate = sample_rate.max(1.0);
    let tau = tau_seconds.max(1.0e-6) * rate;
    if tau <= 1.0 {
        1.0
    } else {
        1.0 - (-1.0 / tau).exp()
    }
}

/// The three smoothing time constants used across the effect.
#[derive(Clone, Copy, Debug)]
pub struct SmoothingCoeffs {
    /// 100 ms, filter cutoff glides.
    pub general: f32,
    /// 10 ms, delay time / feedback / reverb level.
    pub fast: f32,
    /// 500 ms, dry/wet fade-out when the delay time reaches zero.
    pub slow: f32,
}

impl SmoothingCoeffs {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            general: one_pole_coeff(sample_rate, 0.1),
            fast: one_pole_coeff(sample_rate, 0.01),
            slow: one_pole_coeff(sample_rate, 0.5),
        }
    }
}
