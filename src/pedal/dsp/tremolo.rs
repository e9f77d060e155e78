use once_cell::sync::Lazy;

use crate::pedal::{
    audio::{AudioSink, EffectChannel, MixerChannel, ParameterId},
    data::{settings::Field, Parameter, ParameterSet, Settings, ValueStatus},
    dsp::{Effect, EffectKind},
};

static PARAMETERS: Lazy<[Parameter; 3]> = Lazy::new(|| {
    [
        Parameter::slider(Field::TremoloVolume, "Volume", 0.04),
        Parameter::slider(Field::TremoloSpeed, "Speed", 0.3),
        Parameter::slider(Field::TremoloDepth, "Depth", 0.04),
    ]
});

/// Amplitude modulation by a sine wave.
#[derive(Debug, Default)]
pub struct Tremolo;

impl Tremolo {
    pub fn set_values(
        &self,
        settings: &mut Settings,
        audio: &mut dyn AudioSink,
        volume: f32,
        speed: f32,
        depth: f32,
    ) -> ValueStatus {
        let status = settings.set_tremolo_volume(volume)
            | settings.set_tremolo_speed(speed)
            | settings.set_tremolo_depth(depth);

        if status.has_changed() {
            self.update(settings, audio);
        }

        status
    }
}

impl ParameterSet for Tremolo {
    fn parameters(&self) -> &[Parameter] {
        PARAMETERS.as_slice()
    }
}

impl Effect for Tremolo {
    fn kind(&self) -> EffectKind {
        EffectKind::Tremolo
    }

    fn title(&self) -> &'static str {
        "Tremolo"
    }

    fn update(&self, settings: &Settings, audio: &mut dyn AudioSink) {
        audio.set_parameter(
            EffectChannel::Tremolo,
            ParameterId::Frequency,
            settings.tremolo_speed(),
        );
        audio.set_parameter(
            EffectChannel::Tremolo,
            ParameterId::Amplitude,
            settings.tremolo_depth(),
        );

        let level = if self.is_enabled(settings) {
            settings.tremolo_volume()
        } else {
            0.0
        };
        audio.set_gain(MixerChannel::Tremolo, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedal::{audio::RecordingSink, data::EffectFlags};

    #[test]
    fn speed_range() {
        let mut settings = Settings::default();
        let mut audio = RecordingSink::default();
        settings.set_enabled(EffectFlags::TREMOLO, true);

        Tremolo.set_values(&mut settings, &mut audio, 0.5, 0.1, 0.6);
        assert_eq!(settings.tremolo_speed(), 0.5);
        assert_eq!(
            audio.parameter(EffectChannel::Tremolo, ParameterId::Frequency),
            Some(0.5)
        );
        assert_eq!(audio.gain(MixerChannel::Tremolo), Some(0.5));
    }
}
