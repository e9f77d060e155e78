use once_cell::sync::Lazy;

use crate::pedal::{
    audio::{AudioSink, EffectChannel, ParameterId},
    data::{settings::Field, Mapping, Parameter, ParameterSet, Settings, ValueStatus},
    dsp::{Effect, EffectKind},
};

pub const GAIN_LABELS: [&str; 3] = ["0dB", "6dB", "12dB"];
pub const RESPONSE_LABELS: [&str; 4] = ["0ms", "25ms", "50ms", "100ms"];

/// The hard limiter is only set from the console, it has no widget.
static PARAMETERS: Lazy<[Parameter; 5]> = Lazy::new(|| {
    [
        Parameter::choices(Field::CompGain, "Gain", &GAIN_LABELS),
        Parameter::choices(Field::CompResponse, "Response", &RESPONSE_LABELS),
        // A full slider stands for the lowest threshold.
        Parameter::slider(Field::CompThreshold, "Threshold", 1.0).with_mapping(Mapping::Linear {
            at_0: 0.0,
            at_100: -96.0,
        }),
        Parameter::slider(Field::CompAttack, "Attack", 1.0),
        Parameter::slider(Field::CompDecay, "Decay", 1.0),
    ]
});

/// Automatic volume control of the audio codec.
#[derive(Debug, Default)]
pub struct Compressor;

impl Compressor {
    #[allow(clippy::too_many_arguments)]
    pub fn set_values(
        &self,
        settings: &mut Settings,
        audio: &mut dyn AudioSink,
        gain: u8,
        response: u8,
        limit: bool,
        threshold: f32,
        attack: f32,
        decay: f32,
    ) -> ValueStatus {
        let status = settings.set_comp_gain(gain)
            | settings.set_comp_response(response)
            | settings.set_comp_limit(limit)
            | settings.set_comp_threshold(threshold)
            | settings.set_comp_attack(attack)
            | settings.set_comp_decay(decay);

        if status.has_changed() {
            self.update(settings, audio);
        }

        status
    }
}

impl ParameterSet for Compressor {
    fn parameters(&self) -> &[Parameter] {
        PARAMETERS.as_slice()
    }
}

impl Effect for Compressor {
    fn kind(&self) -> EffectKind {
        EffectKind::Compressor
    }

    fn title(&self) -> &'static str {
        "Compressor"
    }

    fn update(&self, settings: &Settings, audio: &mut dyn AudioSink) {
        use ParameterId::*;
        const CHANNEL: EffectChannel = EffectChannel::Compressor;

        audio.set_parameter(CHANNEL, MaxGain, f32::from(settings.comp_gain()));
        audio.set_parameter(CHANNEL, Response, f32::from(settings.comp_response()));
        audio.set_parameter(CHANNEL, HardLimit, f32::from(u8::from(settings.comp_limit())));
        audio.set_parameter(CHANNEL, Threshold, settings.comp_threshold());
        audio.set_parameter(CHANNEL, Attack, settings.comp_attack());
        audio.set_parameter(CHANNEL, Decay, settings.comp_decay());

        let is_enabled = f32::from(u8::from(self.is_enabled(settings)));
        audio.set_parameter(CHANNEL, Enabled, is_enabled);
    }
}
