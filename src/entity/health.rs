/// Health pool clamped to `0.0..=max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    /// Create a full health pool with the specified max health
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Health { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Deal damage, returning true if health reached zero.
    ///
    /// NaN amounts are ignored; negative amounts heal, still capped at max.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !amount.is_nan() {
            self.current = (self.current - amount).clamp(0.0, self.max);
        }
        self.is_depleted()
    }

    /// Drain health at `rate` per second over `delta_time` seconds.
    /// Returns true if health reached zero.
    pub fn drain(&mut self, rate: f32, delta_time: f32) -> bool {
        self.take_damage(rate * delta_time)
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}
