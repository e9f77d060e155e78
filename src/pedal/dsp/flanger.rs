use once_cell::sync::Lazy;

use crate::pedal::{
    audio::{AudioSink, EffectChannel, MixerChannel, ParameterId},
    data::{settings::Field, Parameter, ParameterSet, Settings, ValueStatus},
    dsp::{Effect, EffectKind},
};

static PARAMETERS: Lazy<[Parameter; 2]> = Lazy::new(|| {
    [
        Parameter::slider(Field::FlangerSpeed, "Speed", 0.1),
        Parameter::slider(Field::FlangerDepth, "Depth", 4.0),
    ]
});

#[derive(Debug, Default)]
pub struct Flanger;

impl Flanger {
    pub fn set_values(
        &self,
        settings: &mut Settings,
        audio: &mut dyn AudioSink,
        speed: f32,
        depth: i16,
    ) -> ValueStatus {
        let status = settings.set_flanger_speed(speed) | settings.set_flanger_depth(depth);

        if status.has_changed() {
            self.update(settings, audio);
        }

        status
    }
}

impl ParameterSet for Flanger {
    fn parameters(&self) -> &[Parameter] {
        PARAMETERS.as_slice()
    }
}

impl Effect for Flanger {
    fn kind(&self) -> EffectKind {
        EffectKind::Flanger
    }

    fn title(&self) -> &'static str {
        "Flanger"
    }

    fn update(&self, settings: &Settings, audio: &mut dyn AudioSink) {
        audio.set_parameter(
            EffectChannel::Flanger,
            ParameterId::Speed,
            settings.flanger_speed(),
        );
        audio.set_parameter(
            EffectChannel::Flanger,
            ParameterId::Depth,
            f32::from(settings.flanger_depth()),
        );

        // The flanger is either fully in or out of the mix.
        let level = if self.is_enabled(settings) { 1.0 } else { 0.0 };
        audio.set_gain(MixerChannel::Flanger, level);
    }
}
