use crate::pedal::Error;

/// A display value (0.0..=100.0) based on an `f32`.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Percent(f32);

impl Percent {
    pub const MIN: Percent = Percent(0.0);
    pub const CENTER: Percent = Percent(50.0);
    pub const MAX: Percent = Percent(100.0);

    /// Display resolution.
    pub const QUANTUM: f32 = 0.5;

    /// Builds a `Percent` from `value`, clamping it to the display range.
    ///
    /// `NaN` is mapped to `MIN`.
    pub fn clamped(value: f32) -> Self {
        if value.is_nan() {
            return Percent::MIN;
        }

        Percent(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    #[inline]
    pub fn as_f32(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn as_ratio(self) -> f32 {
        self.0 / Self::MAX.0
    }

    /// Returns this `Percent` snapped to the display resolution.
    pub fn snapped(self) -> Self {
        Percent((self.0 / Self::QUANTUM).round() * Self::QUANTUM)
    }
}

impl From<Percent> for f32 {
    fn from(percent: Percent) -> f32 {
        percent.as_f32()
    }
}

impl TryFrom<f32> for Percent {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(Error::PercentOutOfRange(value));
        }

        Ok(Percent(value))
    }
}

/// Conversion between an engineering value and its display `Percent`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mapping {
    /// Linear mapping between the values displayed at 0% and at 100%.
    ///
    /// `at_0` can be greater than `at_100`, e.g. for a threshold
    /// which shows a full slider at its lowest level.
    Linear { at_0: f32, at_100: f32 },
    /// VU-style logarithmic compression: `ln(1 + value) * scale`.
    Log { scale: f32 },
}

impl Mapping {
    pub fn to_display(self, value: f32) -> Percent {
        let percent = match self {
            Mapping::Linear { at_0, at_100 } => (value - at_0) / (at_100 - at_0) * Percent::MAX.0,
            Mapping::Log { scale } => value.max(0.0).ln_1p() * scale,
        };

        Percent::clamped(percent).snapped()
    }

    pub fn from_display(self, percent: Percent) -> f32 {
        match self {
            Mapping::Linear { at_0, at_100 } => at_0 + percent.as_ratio() * (at_100 - at_0),
            Mapping::Log { scale } => (percent.as_f32() / scale).exp_m1(),
        }
    }
}
