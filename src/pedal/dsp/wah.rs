use crate::pedal::{
    audio::{AudioSink, EffectChannel, MixerChannel, ParameterId},
    data::{Parameter, ParameterSet, Settings},
    dsp::{Effect, EffectKind},
};

pub const CENTER_FREQUENCY: f32 = 500.0;
pub const GAIN: f32 = 4.0;
pub const OCTAVES: f32 = 2.0;

/// Wah-wah with a fixed filter, only switched on and off.
#[derive(Debug, Default)]
pub struct WahWah;

impl ParameterSet for WahWah {
    fn parameters(&self) -> &[Parameter] {
        &[]
    }
}

impl Effect for WahWah {
    fn kind(&self) -> EffectKind {
        EffectKind::WahWah
    }

    fn title(&self) -> &'static str {
        "Wah-wah"
    }

    fn update(&self, settings: &Settings, audio: &mut dyn AudioSink) {
        use ParameterId::*;
        const CHANNEL: EffectChannel = EffectChannel::WahWah;

        audio.set_parameter(CHANNEL, CenterFrequency, CENTER_FREQUENCY);
        audio.set_parameter(CHANNEL, Gain, GAIN);
        audio.set_parameter(CHANNEL, Octaves, OCTAVES);

        let level = if self.is_enabled(settings) { 1.0 } else { 0.0 };
        audio.set_gain(MixerChannel::WahWah, level);
    }
}
