mod display;
pub use display::{Mapping, Percent};

mod range;
pub use range::ValueRange;

use crate::pedal::data::{
    settings::{Field, Settings},
    Record,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueStatus {
    Changed,
    Unchanged,
}

impl ValueStatus {
    pub fn has_changed(self) -> bool {
        matches!(self, ValueStatus::Changed)
    }
}

impl std::ops::BitOr for ValueStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        if self.has_changed() || rhs.has_changed() {
            ValueStatus::Changed
        } else {
            ValueStatus::Unchanged
        }
    }
}

/// The widget used to present a `Parameter`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    Slider,
    /// Mutually exclusive choices, the engineering value being the index of the label.
    Choices(&'static [&'static str]),
}

/// An adjustable setting, bound to a field of the `Settings` record.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    field: Field,
    name: &'static str,
    range: ValueRange,
    step: f32,
    mapping: Mapping,
    control: Control,
}

impl Parameter {
    /// Builds a slider `Parameter` for `field`, using the field's range.
    ///
    /// The display mapping is linear, `min` being shown at 0%.
    #[track_caller]
    pub fn slider(field: Field, name: &'static str, step: f32) -> Self {
        let range = Settings::range(field).unwrap_or(ValueRange::UNIT);

        Parameter {
            field,
            name,
            range,
            step,
            mapping: Mapping::Linear {
                at_0: range.min(),
                at_100: range.max(),
            },
            control: Control::Slider,
        }
    }

    /// Builds a `Parameter` for `field` with one choice per label.
    #[track_caller]
    pub fn choices(field: Field, name: &'static str, labels: &'static [&'static str]) -> Self {
        assert!(labels.len() > 1, "{name}: expected at least 2 choices");

        let range = ValueRange::new(0.0, (labels.len() - 1) as f32);

        Parameter {
            field,
            name,
            range,
            step: 1.0,
            mapping: Mapping::Linear {
                at_0: range.min(),
                at_100: range.max(),
            },
            control: Control::Choices(labels),
        }
    }

    /// Restricts the range of this `Parameter`, resetting its mapping accordingly.
    #[track_caller]
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.range = ValueRange::new(min, max);
        self.mapping = Mapping::Linear {
            at_0: min,
            at_100: max,
        };

        self
    }

    pub fn with_mapping(mut self, mapping: Mapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn mapping(&self) -> Mapping {
        self.mapping
    }

    pub fn control(&self) -> Control {
        self.control
    }

    pub fn get(&self, settings: &Settings) -> f32 {
        settings.get(self.field)
    }

    /// Sets the engineering value, clamped to the `Parameter`'s range.
    pub fn set(&self, settings: &mut Settings, value: f32) -> ValueStatus {
        settings.set(self.field, self.range.clamp(value))
    }

    /// Moves the value by one `step` in the direction of `sign`.
    ///
    /// Only the sign of `sign` is considered.
    pub fn step_by(&self, settings: &mut Settings, sign: i32) -> ValueStatus {
        let value = self.get(settings) + sign.signum() as f32 * self.step;
        self.set(settings, value)
    }

    pub fn display(&self, settings: &Settings) -> Percent {
        self.mapping.to_display(self.get(settings))
    }

    pub fn set_display(&self, settings: &mut Settings, percent: Percent) -> ValueStatus {
        self.set(settings, self.mapping.from_display(percent))
    }

    /// Returns the index of the selected label for `Control::Choices` `Parameter`s.
    pub fn choice(&self, settings: &Settings) -> Option<usize> {
        match self.control {
            Control::Choices(labels) => {
                let idx = self.get(settings).round().max(0.0) as usize;
                Some(idx.min(labels.len() - 1))
            }
            Control::Slider => None,
        }
    }
}

/// An ordered sequence of `Parameter`s presented on one screen.
pub trait ParameterSet {
    fn parameters(&self) -> &[Parameter];

    fn count(&self) -> usize {
        self.parameters().len()
    }

    fn parameter(&self, idx: usize) -> Option<&Parameter> {
        self.parameters().get(idx)
    }

    fn value(&self, idx: usize, settings: &Settings) -> Option<f32> {
        self.parameter(idx).map(|param| param.get(settings))
    }

    fn set_value(&self, idx: usize, settings: &mut Settings, value: f32) -> Option<ValueStatus> {
        self.parameter(idx).map(|param| param.set(settings, value))
    }
}

impl ParameterSet for [Parameter] {
    fn parameters(&self) -> &[Parameter] {
        self
    }
}

impl<const N: usize> ParameterSet for [Parameter; N] {
    fn parameters(&self) -> &[Parameter] {
        self
    }
}

impl ParameterSet for Vec<Parameter> {
    fn parameters(&self) -> &[Parameter] {
        self
    }
}
