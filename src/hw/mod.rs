//! Host-side stand-ins for the pedal hardware.

mod debounce;
pub use debounce::Detent;

mod eeprom;
pub use eeprom::{Eeprom, FileEeprom, EEPROM_SIZE};

pub mod input;
pub use input::{ConsoleInput, Event, InputSource};
