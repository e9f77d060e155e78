use std::{collections::VecDeque, io, sync::Arc, thread};

use crate::hw::Detent;
use crate::pedal::{data::settings::Field, EffectKind, Error};

/// Actions triggered besides the encoders rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    Save,
    NextMenu,
    /// Toggles the given effect, or the effect of the current menu.
    Toggle(Option<EffectKind>),
    Set(Field, f32),
    Clear,
    Dump,
    Show,
    Quit,
}

/// Source of the user input.
///
/// Deltas are signed step counts since the previous reading, already debounced.
pub trait InputSource {
    fn read_selector_delta(&mut self) -> i32;
    fn read_value_delta(&mut self) -> i32;
    fn poll_event(&mut self) -> Option<Event>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Line {
    Selector(i32),
    Value(i32),
    Event(Event),
}

/// Parses a console line.
///
/// Encoders are rotated with `s+`, `s-`, `v+` and `v-`, optionally followed by a step count.
pub fn parse_line(line: &str) -> Result<Option<Line>, Error> {
    let unknown = || Error::UnknownCommand(Arc::from(line.trim()));

    let mut words = line.split_whitespace();
    let cmd = match words.next() {
        Some(cmd) => cmd,
        None => return Ok(None),
    };

    let line = match cmd {
        "save" => Line::Event(Event::Save),
        "next" | "menu" => Line::Event(Event::NextMenu),
        "toggle" => match words.next() {
            Some(name) => {
                let kind = EffectKind::from_name(name).ok_or_else(unknown)?;
                Line::Event(Event::Toggle(Some(kind)))
            }
            None => Line::Event(Event::Toggle(None)),
        },
        "set" => {
            let name = words.next().ok_or_else(unknown)?;
            let field =
                Field::from_name(name).ok_or_else(|| Error::UnknownField(Arc::from(name)))?;
            let value = words
                .next()
                .and_then(|value| value.parse::<f32>().ok())
                .ok_or_else(unknown)?;

            Line::Event(Event::Set(field, value))
        }
        "clear" => Line::Event(Event::Clear),
        "dump" => Line::Event(Event::Dump),
        "show" => Line::Event(Event::Show),
        "quit" | "q" => Line::Event(Event::Quit),
        rotation => {
            let (to_line, steps): (fn(i32) -> Line, &str) =
                if let Some(steps) = rotation.strip_prefix('s') {
                    (Line::Selector, steps)
                } else if let Some(steps) = rotation.strip_prefix('v') {
                    (Line::Value, steps)
                } else {
                    return Err(unknown());
                };

            let (sign, count) = if let Some(count) = steps.strip_prefix('+') {
                (1, count)
            } else if let Some(count) = steps.strip_prefix('-') {
                (-1, count)
            } else {
                return Err(unknown());
            };

            let count = if count.is_empty() {
                1
            } else {
                i32::from(count.parse::<u16>().map_err(|_| unknown())?)
            };

            to_line(sign * count)
        }
    };

    if words.next().is_some() {
        return Err(unknown());
    }

    Ok(Some(line))
}

/// Simulated encoder counting raw pulses.
#[derive(Debug)]
struct Encoder {
    position: i32,
    detent: Detent,
}

impl Encoder {
    fn new(detent: Detent) -> Self {
        Encoder {
            position: 0,
            detent,
        }
    }

    fn rotate(&mut self, steps: i32) {
        self.position = self
            .position
            .wrapping_add(steps.wrapping_mul(self.detent.pulses_per_step()));
    }

    fn read(&mut self) -> i32 {
        self.detent.steps(self.position)
    }
}

/// An `InputSource` fed by console lines.
pub struct ConsoleInput {
    line_rx: flume::Receiver<Line>,
    selector: Encoder,
    value: Encoder,
    events: VecDeque<Event>,
    is_disconnected: bool,
}

impl ConsoleInput {
    pub fn new(line_rx: flume::Receiver<Line>) -> Self {
        Self::with_detent(line_rx, Detent::default())
    }

    /// Builds a `ConsoleInput` whose encoders step according to `detent`.
    pub fn with_detent(line_rx: flume::Receiver<Line>, detent: Detent) -> Self {
        ConsoleInput {
            line_rx,
            selector: Encoder::new(detent),
            value: Encoder::new(detent),
            events: VecDeque::new(),
            is_disconnected: false,
        }
    }

    /// Spawns a thread reading commands from `stdin`.
    pub fn spawn() -> Result<Self, Error> {
        let (line_tx, line_rx) = flume::bounded(10);

        thread::Builder::new()
            .name("console input".into())
            .spawn(move || read_lines(io::stdin().lock(), line_tx))
            .map_err(|err| Error::with_context("Couldn't spawn console input thread", err))?;

        Ok(Self::new(line_rx))
    }

    fn pump(&mut self) {
        loop {
            match self.line_rx.try_recv() {
                Ok(Line::Selector(steps)) => self.selector.rotate(steps),
                Ok(Line::Value(steps)) => self.value.rotate(steps),
                Ok(Line::Event(event)) => self.events.push_back(event),
                Err(flume::TryRecvError::Empty) => break,
                Err(flume::TryRecvError::Disconnected) => {
                    if !self.is_disconnected {
                        log::debug!("Console input closed");
                        self.is_disconnected = true;
                        self.events.push_back(Event::Quit);
                    }
                    break;
                }
            }
        }
    }
}

impl InputSource for ConsoleInput {
    fn read_selector_delta(&mut self) -> i32 {
        self.pump();
        self.selector.read()
    }

    fn read_value_delta(&mut self) -> i32 {
        self.pump();
        self.value.read()
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.pump();
        self.events.pop_front()
    }
}

fn read_lines(input: impl io::BufRead, line_tx: flume::Sender<Line>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("Error reading console input: {err}");
                break;
            }
        };

        match parse_line(&line) {
            Ok(Some(parsed)) => {
                if line_tx.send(parsed).is_err() {
                    break;
                }
            }
            Ok(None) => (),
            Err(err) => log::warn!("{err}"),
        }
    }
}
