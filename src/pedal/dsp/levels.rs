use once_cell::sync::Lazy;

use crate::pedal::{
    audio::{AudioSink, EffectChannel, ParameterId},
    data::{settings::Field, Parameter, ParameterSet, Settings, ValueStatus},
    dsp::{Effect, EffectKind},
};

static PARAMETERS: Lazy<[Parameter; 1]> =
    Lazy::new(|| [Parameter::slider(Field::InputLevel, "Input", 1.0)]);

/// Line input level of the audio codec.
#[derive(Debug, Default)]
pub struct Levels;

impl Levels {
    pub fn set_values(
        &self,
        settings: &mut Settings,
        audio: &mut dyn AudioSink,
        input_level: u8,
    ) -> ValueStatus {
        let status = settings.set_input_level(input_level);

        if status.has_changed() {
            self.update(settings, audio);
        }

        status
    }
}

impl ParameterSet for Levels {
    fn parameters(&self) -> &[Parameter] {
        PARAMETERS.as_slice()
    }
}

impl Effect for Levels {
    fn kind(&self) -> EffectKind {
        EffectKind::Levels
    }

    fn title(&self) -> &'static str {
        "Audio Levels"
    }

    fn update(&self, settings: &Settings, audio: &mut dyn AudioSink) {
        audio.set_parameter(
            EffectChannel::LineIn,
            ParameterId::Level,
            f32::from(settings.input_level()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedal::audio::RecordingSink;

    #[test]
    fn input_level() {
        let mut settings = Settings::default();
        let mut audio = RecordingSink::default();

        assert_eq!(
            Levels.set_values(&mut settings, &mut audio, 20),
            ValueStatus::Changed
        );
        assert_eq!(
            audio.parameter(EffectChannel::LineIn, ParameterId::Level),
            Some(15.0)
        );
    }
}
