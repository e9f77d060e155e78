use once_cell::sync::Lazy;

use crate::pedal::{
    audio::{AudioSink, EffectChannel, ParameterId},
    data::{EqBand, Parameter, ParameterSet, Settings, ValueStatus},
    dsp::{Effect, EffectKind},
};

static PARAMETERS: Lazy<[Parameter; 5]> =
    Lazy::new(|| EqBand::ALL.map(|band| Parameter::slider(band.field(), band.label(), 0.08)));

/// 5 bands graphic equalizer.
#[derive(Debug, Default)]
pub struct Equalizer;

impl Equalizer {
    pub fn set_values(
        &self,
        settings: &mut Settings,
        audio: &mut dyn AudioSink,
        bands: [f32; 5],
    ) -> ValueStatus {
        let status = EqBand::ALL
            .into_iter()
            .zip(bands)
            .fold(ValueStatus::Unchanged, |status, (band, value)| {
                status | settings.set_eq_band(band, value)
            });

        if status.has_changed() {
            self.update(settings, audio);
        }

        status
    }

    /// Returns the gain factor of the loudest band, or 1.0 if no band is boosted.
    pub fn gain_adjustment(settings: &Settings) -> f32 {
        let max_db = EqBand::ALL
            .into_iter()
            .map(|band| settings.eq_band(band))
            .fold(0.0f32, f32::max);

        10f32.powf(max_db / 20.0)
    }
}

impl ParameterSet for Equalizer {
    fn parameters(&self) -> &[Parameter] {
        PARAMETERS.as_slice()
    }
}

impl Effect for Equalizer {
    fn kind(&self) -> EffectKind {
        EffectKind::Equalizer
    }

    fn title(&self) -> &'static str {
        "Equalizer"
    }

    fn update(&self, settings: &Settings, audio: &mut dyn AudioSink) {
        for band in EqBand::ALL {
            audio.set_parameter(
                EffectChannel::Equalizer,
                ParameterId::BandFrequency(band),
                band.frequency(),
            );
            audio.set_parameter(
                EffectChannel::Equalizer,
                ParameterId::Band(band),
                settings.eq_band(band),
            );
        }

        let is_enabled = f32::from(u8::from(self.is_enabled(settings)));
        audio.set_parameter(EffectChannel::Equalizer, ParameterId::Enabled, is_enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedal::audio::RecordingSink;

    #[test]
    fn bands() {
        let names = Equalizer
            .parameters()
            .iter()
            .map(Parameter::name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["100", "250", "600", "1300", "3000"]);
    }

    #[test]
    fn gain_adjustment() {
        let mut settings = Settings::default();
        assert_eq!(Equalizer::gain_adjustment(&settings), 1.0);

        settings.set_eq_band(EqBand::Bass, -1.0);
        assert_eq!(Equalizer::gain_adjustment(&settings), 1.0);

        settings.set_eq_band(EqBand::Midrange, 0.5);
        settings.set_eq_band(EqBand::Treble, 1.0);
        let adjustment = Equalizer::gain_adjustment(&settings);
        assert!((adjustment - 1.122_018_5).abs() < 1e-6, "{adjustment}");
    }

    #[test]
    fn set_values() {
        let mut settings = Settings::default();
        let mut audio = RecordingSink::default();

        let status = Equalizer.set_values(&mut settings, &mut audio, [0.5, 0.0, -2.0, 0.0, 0.0]);
        assert_eq!(status, ValueStatus::Changed);
        assert_eq!(settings.eq_band(EqBand::Midrange), -1.0);
        assert_eq!(
            audio.parameter(EffectChannel::Equalizer, ParameterId::Band(EqBand::Bass)),
            Some(0.5)
        );
        assert_eq!(
            audio.parameter(EffectChannel::Equalizer, ParameterId::Enabled),
            Some(1.0)
        );
    }

    #[test]
    fn band_frequencies() {
        let settings = Settings::default();
        let mut audio = RecordingSink::default();

        Equalizer.update(&settings, &mut audio);
        for (band, freq) in EqBand::ALL.into_iter().zip([100.0, 250.0, 600.0, 1300.0, 3000.0]) {
            assert_eq!(
                audio.parameter(EffectChannel::Equalizer, ParameterId::BandFrequency(band)),
                Some(freq)
            );
        }
    }
}
