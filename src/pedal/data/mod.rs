pub mod parameter;
pub use parameter::{Control, Mapping, Parameter, ParameterSet, Percent, ValueRange, ValueStatus};

mod record;
pub use record::{Record, RecordBuf};

pub mod settings;
pub use settings::{EffectFlags, EqBand, Settings, SettingsProvider};
