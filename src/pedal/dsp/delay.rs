use once_cell::sync::Lazy;

use crate::pedal::{
    audio::{AudioSink, DelayTap, EffectChannel, MixerChannel, ParameterId},
    data::{settings::Field, Parameter, ParameterSet, Settings, ValueStatus},
    dsp::{Effect, EffectKind},
};

static PARAMETERS: Lazy<[Parameter; 5]> = Lazy::new(|| {
    [
        Parameter::slider(Field::DelayTime1, "Delay 1", 10.0),
        Parameter::slider(Field::DelayVolume1, "Level 1", 0.04),
        Parameter::slider(Field::DelayTime2, "Delay 2", 10.0),
        Parameter::slider(Field::DelayVolume2, "Level 2", 0.04),
        Parameter::slider(Field::Recirculate, "Feedback", 0.04),
    ]
});

/// Two taps delay line with feedback.
#[derive(Debug, Default)]
pub struct Delay;

impl Delay {
    pub fn time(settings: &Settings, tap: DelayTap) -> f32 {
        match tap {
            DelayTap::First => settings.delay_time_1(),
            DelayTap::Second => settings.delay_time_2(),
        }
    }

    pub fn volume(settings: &Settings, tap: DelayTap) -> f32 {
        match tap {
            DelayTap::First => settings.delay_volume_1(),
            DelayTap::Second => settings.delay_volume_2(),
        }
    }

    pub fn set_values(
        &self,
        settings: &mut Settings,
        audio: &mut dyn AudioSink,
        times: [f32; 2],
        volumes: [f32; 2],
        recirculate: f32,
    ) -> ValueStatus {
        let status = settings.set_delay_time_1(times[0])
            | settings.set_delay_time_2(times[1])
            | settings.set_delay_volume_1(volumes[0])
            | settings.set_delay_volume_2(volumes[1])
            | settings.set_recirculate(recirculate);

        if status.has_changed() {
            self.update(settings, audio);
        }

        status
    }
}

impl ParameterSet for Delay {
    fn parameters(&self) -> &[Parameter] {
        PARAMETERS.as_slice()
    }
}

impl Effect for Delay {
    fn kind(&self) -> EffectKind {
        EffectKind::Delay
    }

    fn title(&self) -> &'static str {
        "Delay"
    }

    fn update(&self, settings: &Settings, audio: &mut dyn AudioSink) {
        for tap in DelayTap::ALL {
            let time = Self::time(settings, tap);
            // A tap with a 0 ms delay is muted.
            if time > 0.0 {
                audio.set_parameter(EffectChannel::Delay, ParameterId::Time(tap), time);
                audio.set_gain(MixerChannel::DelayOut(tap), Self::volume(settings, tap));
            } else {
                audio.set_gain(MixerChannel::DelayOut(tap), 0.0);
            }
        }

        if self.is_enabled(settings) {
            audio.set_gain(MixerChannel::DelayFeedback, settings.recirculate());
            audio.set_gain(MixerChannel::Delay, 1.0);
        } else {
            audio.set_gain(MixerChannel::DelayFeedback, 0.0);
            audio.set_gain(MixerChannel::Delay, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedal::{audio::RecordingSink, data::EffectFlags};

    #[test]
    fn taps() {
        let mut settings = Settings::default();
        let mut audio = RecordingSink::default();
        settings.set_enabled(EffectFlags::DELAY, true);

        Delay.update(&settings, &mut audio);
        assert_eq!(
            audio.parameter(EffectChannel::Delay, ParameterId::Time(DelayTap::First)),
            Some(200.0)
        );
        assert_eq!(audio.gain(MixerChannel::DelayOut(DelayTap::First)), Some(0.8));
        assert_eq!(
            audio.parameter(EffectChannel::Delay, ParameterId::Time(DelayTap::Second)),
            None
        );
        assert_eq!(audio.gain(MixerChannel::DelayOut(DelayTap::Second)), Some(0.0));
        assert_eq!(audio.gain(MixerChannel::Delay), Some(1.0));

        Delay.set_values(&mut settings, &mut audio, [1200.0, 350.0], [0.5, 0.6], 0.3);
        assert_eq!(settings.delay_time_1(), 1000.0);
        assert_eq!(audio.gain(MixerChannel::DelayOut(DelayTap::Second)), Some(0.6));
        assert_eq!(audio.gain(MixerChannel::DelayFeedback), Some(0.3));
    }

    #[test]
    fn time_steps() {
        let time = &Delay.parameters()[0];
        let mut settings = Settings::default();

        time.step_by(&mut settings, -1);
        assert_eq!(settings.delay_time_1(), 190.0);
    }
}
