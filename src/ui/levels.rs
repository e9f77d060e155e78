use crate::pedal::{
    audio::{LevelProbe, Probe},
    data::{Mapping, Percent, Settings},
    dsp::Equalizer,
};
use crate::ui::widget::{
    DisplaySink, MeterZone, Widget, LABEL_WIDTH, METER_WIDTH, ROW_HEIGHT, TITLE_HEIGHT,
};

/// Height of the meters on the pedal's screen in pixels.
const METER_HEIGHT: f32 = 184.0;
const WARNING_HEIGHT: f32 = 90.0;
const CLIP_HEIGHT: f32 = 140.0;

/// Share of the previous peak retained on each tick.
pub const PEAK_HOLD: f32 = 0.92;

/// `ln(1 + level) * 100` pixels, scaled to the meter height.
const VU: Mapping = Mapping::Log {
    scale: 100.0 / METER_HEIGHT * 100.0,
};

/// Input & output level meters with peak hold.
#[derive(Debug, Default)]
pub struct VuMeter {
    input_peak: f32,
    output_peak: f32,
}

impl VuMeter {
    pub fn input_peak(&self) -> f32 {
        self.input_peak
    }

    pub fn output_peak(&self) -> f32 {
        self.output_peak
    }

    /// Reads the probes and draws both meters below the screen parameters.
    pub fn tick(
        &mut self,
        settings: &Settings,
        probe: &mut dyn LevelProbe,
        display: &mut dyn DisplaySink,
    ) {
        // The equalizer boost isn't visible on the probes but can lead to clipping.
        let eq_adjustment = Equalizer::gain_adjustment(settings);

        let input = probe.peak_to_peak(Probe::Input).unwrap_or(0.0) * eq_adjustment;
        Self::hold(&mut self.input_peak, input);

        let output = probe.peak_to_peak(Probe::Output).unwrap_or(0.0) * eq_adjustment;
        Self::hold(&mut self.output_peak, output);

        let y = TITLE_HEIGHT + 2 * ROW_HEIGHT;
        display.draw(&Self::meter(LABEL_WIDTH, y, self.input_peak));
        display.draw(&Self::meter(LABEL_WIDTH + 2 * METER_WIDTH, y, self.output_peak));
    }

    fn hold(peak: &mut f32, level: f32) {
        if level > *peak {
            *peak = level;
        } else {
            *peak *= PEAK_HOLD;
        }
    }

    pub fn percent(level: f32) -> Percent {
        // At least one pixel is always lit.
        Percent::clamped(VU.to_display(level).as_f32().max(100.0 / METER_HEIGHT))
    }

    pub fn zone(percent: Percent) -> MeterZone {
        let height = percent.as_ratio() * METER_HEIGHT;
        if height > CLIP_HEIGHT {
            MeterZone::Clip
        } else if height > WARNING_HEIGHT {
            MeterZone::Warning
        } else {
            MeterZone::Normal
        }
    }

    fn meter(x: u16, y: u16, level: f32) -> Widget {
        let percent = Self::percent(level);

        Widget::Meter {
            x,
            y,
            percent,
            zone: Self::zone(percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedal::audio::RecordingSink;
    use crate::ui::widget::RecordingDisplay;

    #[test]
    fn zones() {
        assert_eq!(VuMeter::zone(VuMeter::percent(0.0)), MeterZone::Normal);
        // ln(1.5) * 100 = 40.5 px
        assert_eq!(VuMeter::zone(VuMeter::percent(0.5)), MeterZone::Normal);
        // ln(2.0) * 100 = 69.3 px
        assert_eq!(VuMeter::zone(VuMeter::percent(1.0)), MeterZone::Normal);
        // ln(3.0) * 100 = 109.9 px
        assert_eq!(VuMeter::zone(VuMeter::percent(2.0)), MeterZone::Warning);
        // ln(6.0) * 100 = 179.2 px
        assert_eq!(VuMeter::zone(VuMeter::percent(5.0)), MeterZone::Clip);
        assert_eq!(VuMeter::percent(100.0), Percent::MAX);
    }

    #[test]
    fn peak_hold() {
        let settings = Settings::default();
        let mut probe = RecordingSink::default();
        let mut display = RecordingDisplay::default();
        let mut meter = VuMeter::default();

        probe.peaks.push_back((Probe::Input, 1.0));
        probe.peaks.push_back((Probe::Output, 0.5));
        meter.tick(&settings, &mut probe, &mut display);
        assert_eq!(meter.input_peak(), 1.0);
        assert_eq!(meter.output_peak(), 0.5);
        assert_eq!(display.widgets.len(), 2);

        // No measurement available
        meter.tick(&settings, &mut probe, &mut display);
        assert!((meter.input_peak() - PEAK_HOLD).abs() < 1e-6);
        assert!((meter.output_peak() - 0.5 * PEAK_HOLD).abs() < 1e-6);

        probe.peaks.push_back((Probe::Input, 0.1));
        meter.tick(&settings, &mut probe, &mut display);
        assert!((meter.input_peak() - PEAK_HOLD * PEAK_HOLD).abs() < 1e-6);
    }

    #[test]
    fn eq_boost() {
        let mut settings = Settings::default();
        settings.set_eq_bass(1.0);
        let mut probe = RecordingSink::default();
        let mut display = RecordingDisplay::default();
        let mut meter = VuMeter::default();

        probe.peaks.push_back((Probe::Input, 1.0));
        meter.tick(&settings, &mut probe, &mut display);
        assert!((meter.input_peak() - 10f32.powf(1.0 / 20.0)).abs() < 1e-6);
    }
}
