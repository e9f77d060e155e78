pub mod audio;
pub use audio::{AudioSink, EffectChannel, LevelProbe, MixerChannel, ParameterId};

pub mod data;
pub use data::{Settings, SettingsProvider};

pub mod dsp;
pub use dsp::{Effect, EffectKind};

mod error;
pub use error::Error;

pub mod navigator;
pub use navigator::{Navigator, Redraw};

pub mod store;
pub use store::{LoadOutcome, NonVolatile, SettingsStore};
