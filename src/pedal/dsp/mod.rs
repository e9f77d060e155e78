use crate::pedal::{
    audio::AudioSink,
    data::{EffectFlags, ParameterSet, Settings, ValueStatus},
};

pub mod chorus;
pub use chorus::Chorus;

pub mod compressor;
pub use compressor::Compressor;

pub mod delay;
pub use delay::Delay;

pub mod equalizer;
pub use equalizer::Equalizer;

pub mod flanger;
pub use flanger::Flanger;

pub mod levels;
pub use levels::Levels;

pub mod reverb;
pub use reverb::Reverb;

pub mod tremolo;
pub use tremolo::Tremolo;

pub mod wah;
pub use wah::WahWah;

/// A stage of the audio chain, configured from the `Settings`.
pub trait Effect: ParameterSet {
    fn kind(&self) -> EffectKind;

    fn title(&self) -> &'static str;

    /// Pushes the current settings to the audio chain.
    fn update(&self, settings: &Settings, audio: &mut dyn AudioSink);

    /// Whether the effect is active in the audio chain.
    ///
    /// Effects which can't be switched are always enabled.
    fn is_enabled(&self, settings: &Settings) -> bool {
        self.kind()
            .flag()
            .map_or(true, |flag| settings.is_enabled(flag))
    }

    fn enable(&self, settings: &mut Settings, audio: &mut dyn AudioSink) -> ValueStatus {
        self.switch(settings, audio, true)
    }

    fn disable(&self, settings: &mut Settings, audio: &mut dyn AudioSink) -> ValueStatus {
        self.switch(settings, audio, false)
    }

    /// Toggles the effect and returns its new state.
    fn toggle(&self, settings: &mut Settings, audio: &mut dyn AudioSink) -> bool {
        let is_enabled = !self.is_enabled(settings);
        self.switch(settings, audio, is_enabled);

        self.is_enabled(settings)
    }

    fn switch(
        &self,
        settings: &mut Settings,
        audio: &mut dyn AudioSink,
        is_enabled: bool,
    ) -> ValueStatus {
        let flag = match self.kind().flag() {
            Some(flag) => flag,
            None => return ValueStatus::Unchanged,
        };

        let status = settings.set_enabled(flag, is_enabled);
        if status.has_changed() {
            log::info!(
                "{} {}",
                self.title(),
                if is_enabled { "enabled" } else { "disabled" },
            );
            self.update(settings, audio);
        }

        status
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EffectKind {
    Equalizer,
    Compressor,
    Reverb,
    Tremolo,
    Flanger,
    Chorus,
    Delay,
    Levels,
    WahWah,
}

impl EffectKind {
    pub const ALL: [EffectKind; 9] = [
        EffectKind::Equalizer,
        EffectKind::Compressor,
        EffectKind::Reverb,
        EffectKind::Tremolo,
        EffectKind::Flanger,
        EffectKind::Chorus,
        EffectKind::Delay,
        EffectKind::Levels,
        EffectKind::WahWah,
    ];

    /// Effects with a screen, in menu order.
    pub const MENU: [EffectKind; 8] = [
        EffectKind::Equalizer,
        EffectKind::Compressor,
        EffectKind::Reverb,
        EffectKind::Tremolo,
        EffectKind::Flanger,
        EffectKind::Chorus,
        EffectKind::Delay,
        EffectKind::Levels,
    ];

    pub fn effect(self) -> &'static dyn Effect {
        match self {
            EffectKind::Equalizer => &Equalizer,
            EffectKind::Compressor => &Compressor,
            EffectKind::Reverb => &Reverb,
            EffectKind::Tremolo => &Tremolo,
            EffectKind::Flanger => &Flanger,
            EffectKind::Chorus => &Chorus,
            EffectKind::Delay => &Delay,
            EffectKind::Levels => &Levels,
            EffectKind::WahWah => &WahWah,
        }
    }

    pub fn flag(self) -> Option<EffectFlags> {
        match self {
            EffectKind::Equalizer => Some(EffectFlags::EQUALIZER),
            EffectKind::Compressor => Some(EffectFlags::COMPRESSOR),
            EffectKind::Reverb => Some(EffectFlags::REVERB),
            EffectKind::Tremolo => Some(EffectFlags::TREMOLO),
            EffectKind::Flanger => Some(EffectFlags::FLANGER),
            EffectKind::Chorus => Some(EffectFlags::CHORUS),
            EffectKind::Delay => Some(EffectFlags::DELAY),
            EffectKind::Levels => None,
            EffectKind::WahWah => Some(EffectFlags::WAH_WAH),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Equalizer => "eq",
            EffectKind::Compressor => "compressor",
            EffectKind::Reverb => "reverb",
            EffectKind::Tremolo => "tremolo",
            EffectKind::Flanger => "flanger",
            EffectKind::Chorus => "chorus",
            EffectKind::Delay => "delay",
            EffectKind::Levels => "levels",
            EffectKind::WahWah => "wah",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Returns the menu entry at `idx`, wrapping around the menu.
    pub fn from_menu_index(idx: u8) -> Self {
        Self::MENU[usize::from(idx) % Self::MENU.len()]
    }

    pub fn menu_index(self) -> Option<u8> {
        Self::MENU
            .iter()
            .position(|kind| *kind == self)
            .map(|idx| idx as u8)
    }

    /// Returns the next menu entry, wrapping around the menu.
    pub fn next_menu(self) -> Self {
        match self.menu_index() {
            Some(idx) => Self::from_menu_index(idx + 1),
            None => Self::MENU[0],
        }
    }
}

/// Pushes the settings of all the effects to the audio chain.
pub fn update_all(settings: &Settings, audio: &mut dyn AudioSink) {
    for kind in EffectKind::ALL {
        kind.effect().update(settings, audio);
    }
}
