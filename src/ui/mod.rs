pub mod app;
pub use app::{App, Flow, TICK};

pub mod levels;
pub use levels::VuMeter;

pub mod screen;
pub use screen::Screen;

pub mod widget;
pub use widget::{DisplaySink, MeterZone, TextDisplay, Widget};
