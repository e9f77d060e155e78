use std::fmt;

use pedal_derive::Record;

use crate::pedal::data::{Record, ValueStatus};

bitflags::bitflags! {
    /// Effects enabled in the audio chain.
    pub struct EffectFlags: u8 {
        const COMPRESSOR = 0b0000_0001;
        const EQUALIZER = 0b0000_0010;
        const REVERB = 0b0000_0100;
        const TREMOLO = 0b0000_1000;
        const FLANGER = 0b0001_0000;
        const CHORUS = 0b0010_0000;
        const DELAY = 0b0100_0000;
        const WAH_WAH = 0b1000_0000;
    }
}

/// The persisted configuration of the pedal.
#[derive(Clone, Debug, PartialEq, Record)]
pub struct Settings {
    #[field(flags, default = EffectFlags::EQUALIZER)]
    effects: EffectFlags,

    #[field(default = 0.0, min = -1.0, max = 1.0)]
    eq_bass: f32,
    #[field(default = 0.0, min = -1.0, max = 1.0)]
    eq_mid_bass: f32,
    #[field(default = 0.0, min = -1.0, max = 1.0)]
    eq_midrange: f32,
    #[field(default = 0.0, min = -1.0, max = 1.0)]
    eq_mid_treble: f32,
    #[field(default = 0.0, min = -1.0, max = 1.0)]
    eq_treble: f32,

    // 0 dB, 6 dB, 12 dB
    #[field(default = 1, min = 0, max = 2)]
    comp_gain: u8,
    // 0 ms, 25 ms, 50 ms, 100 ms
    #[field(default = 1, min = 0, max = 3)]
    comp_response: u8,
    #[field(default = false)]
    comp_limit: bool,
    #[field(default = -20.0, min = -96.0, max = 0.0)]
    comp_threshold: f32,
    #[field(default = 3.0, min = 0.0, max = 100.0)]
    comp_attack: f32,
    #[field(default = 4.0, min = 0.0, max = 100.0)]
    comp_decay: f32,

    #[field(default = 0.8, min = 0.0, max = 1.0)]
    tremolo_volume: f32,
    #[field(default = 3.0, min = 0.5, max = 8.0)]
    tremolo_speed: f32,
    #[field(default = 0.4, min = 0.0, max = 1.0)]
    tremolo_depth: f32,

    #[field(default = 1.6, min = 0.15, max = 4.0)]
    flanger_speed: f32,
    // samples
    #[field(default = 128, min = 48, max = 256)]
    flanger_depth: i16,

    #[field(default = 0.7, min = 0.0, max = 1.0)]
    reverb_volume: f32,
    #[field(default = 0.5, min = 0.0, max = 1.0)]
    reverb_roomsize: f32,
    #[field(default = 0.3, min = 0.0, max = 1.0)]
    reverb_damping: f32,

    // ms, 0 disables the tap
    #[field(default = 200.0, min = 0.0, max = 1000.0)]
    delay_time_1: f32,
    #[field(default = 0.0, min = 0.0, max = 1000.0)]
    delay_time_2: f32,
    #[field(default = 0.8, min = 0.0, max = 1.0)]
    delay_volume_1: f32,
    #[field(default = 0.0, min = 0.0, max = 1.0)]
    delay_volume_2: f32,
    #[field(default = 0.0, min = 0.0, max = 1.0)]
    recirculate: f32,

    #[field(default = 2, min = 0, max = 5)]
    chorus_voices: u8,
    #[field(default = 0.5, min = 0.0, max = 1.0)]
    chorus_volume: f32,

    #[field(default = 5, min = 0, max = 15)]
    input_level: u8,

    #[field(default = 0, min = 0, max = 7)]
    last_menu: u8,
}

impl Settings {
    pub fn is_enabled(&self, flag: EffectFlags) -> bool {
        self.effects.contains(flag)
    }

    pub fn set_enabled(&mut self, flag: EffectFlags, enabled: bool) -> ValueStatus {
        let mut effects = self.effects;
        effects.set(flag, enabled);

        self.set_effects(effects)
    }

    pub fn comp_enabled(&self) -> bool {
        self.is_enabled(EffectFlags::COMPRESSOR)
    }

    pub fn eq_band(&self, band: EqBand) -> f32 {
        self.get(band.field())
    }

    pub fn set_eq_band(&mut self, band: EqBand, value: f32) -> ValueStatus {
        self.set(band.field(), value)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<16}= {:?}", Field::Effects.name(), self.effects)?;
        for field in Field::ALL.iter().filter(|field| **field != Field::Effects) {
            writeln!(f, "{:<16}= {}", field.name(), self.get(*field))?;
        }

        Ok(())
    }
}

/// The bands of the graphic equalizer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EqBand {
    Bass,
    MidBass,
    Midrange,
    MidTreble,
    Treble,
}

impl EqBand {
    pub const ALL: [EqBand; 5] = [
        EqBand::Bass,
        EqBand::MidBass,
        EqBand::Midrange,
        EqBand::MidTreble,
        EqBand::Treble,
    ];

    /// Center frequency in Hz.
    pub fn frequency(self) -> f32 {
        match self {
            EqBand::Bass => 100.0,
            EqBand::MidBass => 250.0,
            EqBand::Midrange => 600.0,
            EqBand::MidTreble => 1300.0,
            EqBand::Treble => 3000.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EqBand::Bass => "100",
            EqBand::MidBass => "250",
            EqBand::Midrange => "600",
            EqBand::MidTreble => "1300",
            EqBand::Treble => "3000",
        }
    }

    pub fn field(self) -> Field {
        match self {
            EqBand::Bass => Field::EqBass,
            EqBand::MidBass => Field::EqMidBass,
            EqBand::Midrange => Field::EqMidrange,
            EqBand::MidTreble => Field::EqMidTreble,
            EqBand::Treble => Field::EqTreble,
        }
    }
}

/// Access to the single `Settings` instance.
pub trait SettingsProvider {
    fn settings(&self) -> &Settings;
    fn settings_mut(&mut self) -> &mut Settings;
}

impl SettingsProvider for Settings {
    fn settings(&self) -> &Settings {
        self
    }

    fn settings_mut(&mut self) -> &mut Settings {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Offset of `comp_threshold` in the serialized record.
    const COMP_THRESHOLD_OFFSET: usize = 1 + 5 * 4 + 3;

    #[test]
    fn defaults() {
        let settings = Settings::default();

        assert_eq!(settings.effects(), EffectFlags::EQUALIZER);
        assert!(!settings.comp_enabled());
        assert_eq!(settings.comp_gain(), 1);
        assert_eq!(settings.comp_response(), 1);
        assert!(!settings.comp_limit());
        assert_eq!(settings.comp_threshold(), -20.0);
        assert_eq!(settings.comp_attack(), 3.0);
        assert_eq!(settings.comp_decay(), 4.0);
        for band in EqBand::ALL {
            assert_eq!(settings.eq_band(band), 0.0);
        }
        assert_eq!(settings.tremolo_volume(), 0.8);
        assert_eq!(settings.tremolo_speed(), 3.0);
        assert_eq!(settings.tremolo_depth(), 0.4);
        assert_eq!(settings.flanger_speed(), 1.6);
        assert_eq!(settings.flanger_depth(), 128);
        assert_eq!(settings.reverb_volume(), 0.7);
        assert_eq!(settings.reverb_roomsize(), 0.5);
        assert_eq!(settings.reverb_damping(), 0.3);
        assert_eq!(settings.delay_time_1(), 200.0);
        assert_eq!(settings.delay_time_2(), 0.0);
        assert_eq!(settings.delay_volume_1(), 0.8);
        assert_eq!(settings.delay_volume_2(), 0.0);
        assert_eq!(settings.recirculate(), 0.0);
        assert_eq!(settings.chorus_voices(), 2);
        assert_eq!(settings.chorus_volume(), 0.5);
        assert_eq!(settings.input_level(), 5);
        assert_eq!(settings.last_menu(), 0);
    }

    #[test]
    fn field_names() {
        assert_eq!(Field::ALL.len(), 29);
        assert_eq!(Field::CompThreshold.name(), "comp_threshold");
        assert_eq!(Field::DelayTime1.to_string(), "delay_time_1");
        assert_eq!(Field::from_name("eq_mid_bass"), Some(Field::EqMidBass));
        assert_eq!(Field::from_name("unknown"), None);
    }

    #[test]
    fn clamped_set() {
        let mut settings = Settings::default();

        assert_eq!(settings.set_comp_threshold(-120.0), ValueStatus::Changed);
        assert_eq!(settings.comp_threshold(), -96.0);

        assert_eq!(settings.set(Field::ChorusVoices, 7.0), ValueStatus::Changed);
        assert_eq!(settings.chorus_voices(), 5);
        assert_eq!(settings.set(Field::ChorusVoices, 4.6), ValueStatus::Unchanged);

        assert_eq!(settings.set_flanger_depth(12), ValueStatus::Changed);
        assert_eq!(settings.flanger_depth(), 48);

        assert_eq!(settings.set(Field::TremoloSpeed, f32::NAN), ValueStatus::Unchanged);
        assert_eq!(settings.tremolo_speed(), 3.0);

        assert_eq!(Settings::range(Field::InputLevel).unwrap().max(), 15.0);
        assert_eq!(Settings::range(Field::Effects), None);
    }

    #[test]
    fn flags() {
        let mut settings = Settings::default();

        assert_eq!(
            settings.set_enabled(EffectFlags::COMPRESSOR, true),
            ValueStatus::Changed
        );
        assert!(settings.comp_enabled());
        assert!(settings.is_enabled(EffectFlags::EQUALIZER));
        assert_eq!(
            settings.set_enabled(EffectFlags::COMPRESSOR, true),
            ValueStatus::Unchanged
        );

        settings.set_enabled(EffectFlags::EQUALIZER, false);
        assert_eq!(settings.get(Field::Effects), 1.0);
    }

    #[test]
    fn serialize() {
        let mut settings = Settings::default();
        settings.set_comp_threshold(-95.5);
        settings.set_enabled(EffectFlags::DELAY, true);

        let buf = settings.serialize();
        assert_eq!(buf.len(), Settings::LEN);
        assert_eq!(Settings::LEN, 93);
        assert!(!buf.spilled());

        assert_eq!(
            buf[0],
            (EffectFlags::EQUALIZER | EffectFlags::DELAY).bits()
        );
        assert_eq!(
            buf[COMP_THRESHOLD_OFFSET..COMP_THRESHOLD_OFFSET + 4],
            (-95.5f32).to_le_bytes(),
        );

        let (rem, parsed) = Settings::parse(&buf).unwrap();
        assert!(rem.is_empty());
        assert_eq!(parsed, settings);
        assert_eq!(parsed.serialize(), buf);
    }

    #[test]
    fn parse_clamps() {
        let mut buf = Settings::default().serialize();
        buf[COMP_THRESHOLD_OFFSET..COMP_THRESHOLD_OFFSET + 4]
            .copy_from_slice(&50.0f32.to_le_bytes());

        let (_, parsed) = Settings::parse(&buf).unwrap();
        assert_eq!(parsed.comp_threshold(), 0.0);

        buf[COMP_THRESHOLD_OFFSET..COMP_THRESHOLD_OFFSET + 4]
            .copy_from_slice(&f32::NAN.to_le_bytes());

        let (_, parsed) = Settings::parse(&buf).unwrap();
        assert_eq!(parsed.comp_threshold(), -20.0);
    }

    #[test]
    fn parse_short() {
        let buf = Settings::default().serialize();
        assert!(Settings::parse(&buf[..Settings::LEN - 1]).is_err());
    }

    #[test]
    fn display() {
        let dump = Settings::default().to_string();

        assert!(dump.starts_with("effects         = EQUALIZER\n"));
        assert!(dump.contains("comp_threshold  = -20\n"));
        assert_eq!(dump.lines().count(), Field::ALL.len());
    }
}
