pub mod hw;
pub mod pedal;
pub mod ui;
