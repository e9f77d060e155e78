/// A closed range of engineering values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    min: f32,
    max: f32,
}

impl ValueRange {
    pub const UNIT: ValueRange = ValueRange { min: 0.0, max: 1.0 };

    #[track_caller]
    pub fn new(min: f32, max: f32) -> Self {
        assert!(min < max, "invalid range {min}..={max}");

        ValueRange { min, max }
    }

    pub fn min(self) -> f32 {
        self.min
    }

    pub fn max(self) -> f32 {
        self.max
    }

    pub fn span(self) -> f32 {
        self.max - self.min
    }

    pub fn contains(self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Returns `value` clamped to this range.
    ///
    /// `NaN` values are mapped to `min`.
    pub fn clamp(self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }

        value.clamp(self.min, self.max)
    }
}

impl From<std::ops::RangeInclusive<f32>> for ValueRange {
    #[track_caller]
    fn from(range: std::ops::RangeInclusive<f32>) -> Self {
        ValueRange::new(*range.start(), *range.end())
    }
}
