use once_cell::sync::Lazy;

use crate::pedal::{
    audio::{AudioSink, EffectChannel, MixerChannel, ParameterId},
    data::{settings::Field, Parameter, ParameterSet, Settings, ValueStatus},
    dsp::{Effect, EffectKind},
};

static PARAMETERS: Lazy<[Parameter; 3]> = Lazy::new(|| {
    [
        Parameter::slider(Field::ReverbVolume, "Volume", 0.04),
        Parameter::slider(Field::ReverbRoomsize, "Room", 0.04),
        Parameter::slider(Field::ReverbDamping, "Damping", 0.04),
    ]
});

#[derive(Debug, Default)]
pub struct Reverb;

impl Reverb {
    pub fn set_values(
        &self,
        settings: &mut Settings,
        audio: &mut dyn AudioSink,
        volume: f32,
        roomsize: f32,
        damping: f32,
    ) -> ValueStatus {
        let status = settings.set_reverb_volume(volume)
            | settings.set_reverb_roomsize(roomsize)
            | settings.set_reverb_damping(damping);

        if status.has_changed() {
            self.update(settings, audio);
        }

        status
    }
}

impl ParameterSet for Reverb {
    fn parameters(&self) -> &[Parameter] {
        PARAMETERS.as_slice()
    }
}

impl Effect for Reverb {
    fn kind(&self) -> EffectKind {
        EffectKind::Reverb
    }

    fn title(&self) -> &'static str {
        "Reverb"
    }

    fn update(&self, settings: &Settings, audio: &mut dyn AudioSink) {
        audio.set_parameter(
            EffectChannel::Reverb,
            ParameterId::RoomSize,
            settings.reverb_roomsize(),
        );
        audio.set_parameter(
            EffectChannel::Reverb,
            ParameterId::Damping,
            settings.reverb_damping(),
        );

        let level = if self.is_enabled(settings) {
            settings.reverb_volume()
        } else {
            0.0
        };
        audio.set_gain(MixerChannel::Reverb, level);
    }
}
