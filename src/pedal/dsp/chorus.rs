use once_cell::sync::Lazy;

use crate::pedal::{
    audio::{AudioSink, EffectChannel, MixerChannel, ParameterId},
    data::{settings::Field, Parameter, ParameterSet, Settings, ValueStatus},
    dsp::{Effect, EffectKind},
};

static PARAMETERS: Lazy<[Parameter; 2]> = Lazy::new(|| {
    [
        Parameter::slider(Field::ChorusVoices, "Voices", 1.0),
        Parameter::slider(Field::ChorusVolume, "Volume", 0.04),
    ]
});

#[derive(Debug, Default)]
pub struct Chorus;

impl Chorus {
    pub fn set_values(
        &self,
        settings: &mut Settings,
        audio: &mut dyn AudioSink,
        voices: u8,
        volume: f32,
    ) -> ValueStatus {
        let status = settings.set_chorus_voices(voices) | settings.set_chorus_volume(volume);

        if status.has_changed() {
            self.update(settings, audio);
        }

        status
    }
}

impl ParameterSet for Chorus {
    fn parameters(&self) -> &[Parameter] {
        PARAMETERS.as_slice()
    }
}

impl Effect for Chorus {
    fn kind(&self) -> EffectKind {
        EffectKind::Chorus
    }

    fn title(&self) -> &'static str {
        "Chorus"
    }

    fn update(&self, settings: &Settings, audio: &mut dyn AudioSink) {
        audio.set_parameter(
            EffectChannel::Chorus,
            ParameterId::Voices,
            f32::from(settings.chorus_voices()),
        );

        let level = if self.is_enabled(settings) {
            settings.chorus_volume()
        } else {
            0.0
        };
        audio.set_gain(MixerChannel::Chorus, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedal::{audio::RecordingSink, data::Percent};

    #[test]
    fn voices() {
        let voices = &Chorus.parameters()[0];
        let mut settings = Settings::default();

        // 20% per voice
        assert_eq!(voices.display(&settings), Percent::try_from(40.0).unwrap());

        let mut audio = RecordingSink::default();
        Chorus.set_values(&mut settings, &mut audio, 9, 0.25);
        assert_eq!(voices.display(&settings), Percent::MAX);
        assert_eq!(
            audio.parameter(EffectChannel::Chorus, ParameterId::Voices),
            Some(5.0)
        );
    }
}
