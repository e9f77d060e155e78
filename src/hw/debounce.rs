/// Converts raw encoder pulse counts into detent steps.
///
/// Partial steps are carried over to the next reading so that slow rotations
/// still produce steps.
#[derive(Clone, Copy, Debug)]
pub struct Detent {
    pulses_per_step: i32,
    last: i32,
}

impl Default for Detent {
    fn default() -> Self {
        Self::new(Self::PULSES_PER_STEP)
    }
}

impl Detent {
    /// Quadrature pulses between two detents of the pedal's encoders.
    pub const PULSES_PER_STEP: i32 = 8;

    #[track_caller]
    pub fn new(pulses_per_step: i32) -> Self {
        assert!(pulses_per_step > 0);

        Detent {
            pulses_per_step,
            last: 0,
        }
    }

    pub fn pulses_per_step(&self) -> i32 {
        self.pulses_per_step
    }

    /// Returns the signed number of whole steps since the previous reading.
    pub fn steps(&mut self, position: i32) -> i32 {
        let steps = position.wrapping_sub(self.last) / self.pulses_per_step;
        self.last = self.last.wrapping_add(steps * self.pulses_per_step);

        steps
    }
}
