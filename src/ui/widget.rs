use std::io;

use crate::pedal::data::Percent;

pub const TITLE_HEIGHT: u16 = 30;
pub const ROW_HEIGHT: u16 = 30;
pub const LABEL_WIDTH: u16 = 90;
pub const STATUS_X: u16 = 260;
pub const METER_WIDTH: u16 = 40;

/// Color zones of a level meter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MeterZone {
    Normal,
    Warning,
    Clip,
}

/// An element drawn on the display.
///
/// Coordinates are pixels from the top left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Widget {
    Clear,
    Title(&'static str),
    Label {
        x: u16,
        y: u16,
        text: &'static str,
        selected: bool,
    },
    Slider {
        x: u16,
        y: u16,
        percent: Percent,
        focused: bool,
    },
    RadioGroup {
        x: u16,
        y: u16,
        labels: &'static [&'static str],
        selected: usize,
        focused: bool,
    },
    Meter {
        x: u16,
        y: u16,
        percent: Percent,
        zone: MeterZone,
    },
}

pub trait DisplaySink {
    fn draw(&mut self, widget: &Widget);
}

/// A `DisplaySink` rendering the widgets as text lines.
pub struct TextDisplay<W> {
    out: W,
    is_broken: bool,
}

impl<W: io::Write> TextDisplay<W> {
    const BAR_LEN: usize = 20;

    pub fn new(out: W) -> Self {
        TextDisplay {
            out,
            is_broken: false,
        }
    }

    fn bar(percent: Percent, fill: char) -> String {
        let filled = (percent.as_ratio() * Self::BAR_LEN as f32).round() as usize;
        let mut bar = String::with_capacity(Self::BAR_LEN + 2);
        bar.push('[');
        bar.extend(std::iter::repeat(fill).take(filled));
        bar.extend(std::iter::repeat('.').take(Self::BAR_LEN - filled));
        bar.push(']');

        bar
    }

    fn render(widget: &Widget) -> String {
        use Widget::*;

        match *widget {
            Clear => String::new(),
            Title(text) => format!("=== {text} ==="),
            Label { text, selected, .. } => {
                format!("{} {text}", if selected { '>' } else { ' ' })
            }
            Slider {
                percent, focused, ..
            } => {
                let fill = if focused { '#' } else { '=' };
                format!("    {} {:5.1}%", Self::bar(percent, fill), percent.as_f32())
            }
            RadioGroup {
                labels,
                selected,
                focused,
                ..
            } => {
                let mut line = String::from("   ");
                for (idx, label) in labels.iter().enumerate() {
                    let mark = match (idx == selected, focused) {
                        (true, true) => '#',
                        (true, false) => 'o',
                        (false, _) => ' ',
                    };
                    line.push_str(&format!(" ({mark}) {label}"));
                }

                line
            }
            Meter { percent, zone, .. } => {
                let fill = match zone {
                    MeterZone::Normal => '|',
                    MeterZone::Warning => '+',
                    MeterZone::Clip => '!',
                };
                format!("    {}", Self::bar(percent, fill))
            }
        }
    }
}

impl<W: io::Write> DisplaySink for TextDisplay<W> {
    fn draw(&mut self, widget: &Widget) {
        if self.is_broken {
            return;
        }

        if let Err(err) = writeln!(self.out, "{}", Self::render(widget)) {
            log::error!("Display output failed: {err}");
            self.is_broken = true;
        }
    }
}

/// A `DisplaySink` keeping the drawn widgets.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub widgets: Vec<Widget>,
}

#[cfg(test)]
impl DisplaySink for RecordingDisplay {
    fn draw(&mut self, widget: &Widget) {
        self.widgets.push(*widget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rendering() {
        let mut out = Vec::new();
        let mut display = TextDisplay::new(&mut out);

        display.draw(&Widget::Title("Reverb"));
        display.draw(&Widget::Label {
            x: 0,
            y: TITLE_HEIGHT,
            text: "Volume",
            selected: true,
        });
        display.draw(&Widget::Slider {
            x: LABEL_WIDTH,
            y: TITLE_HEIGHT,
            percent: Percent::CENTER,
            focused: false,
        });
        display.draw(&Widget::RadioGroup {
            x: LABEL_WIDTH,
            y: TITLE_HEIGHT + ROW_HEIGHT,
            labels: &["0dB", "6dB"],
            selected: 1,
            focused: true,
        });

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("=== Reverb ==="));
        assert_eq!(lines.next(), Some("> Volume"));
        assert_eq!(
            lines.next(),
            Some("    [==========..........]  50.0%")
        );
        assert_eq!(lines.next(), Some("    ( ) 0dB (#) 6dB"));
        assert_eq!(lines.next(), None);
    }
}
