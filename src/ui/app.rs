use std::{thread, time::Duration};

use crate::hw::{Event, InputSource};
use crate::pedal::{
    audio::{AudioSink, LevelProbe},
    data::{settings::Field, ParameterSet, Record, SettingsProvider},
    dsp,
    store::{hex_dump, NonVolatile, SettingsStore},
    EffectKind, Error,
};
use crate::ui::{levels::VuMeter, screen::Screen, widget::DisplaySink};

/// Period of the controller loop.
pub const TICK: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The controller loop: input, screens and persistence.
pub struct App<S, A, D, I> {
    store: SettingsStore<S>,
    audio: A,
    display: D,
    input: I,
    screen: Screen,
    vu_meter: VuMeter,
}

impl<S, A, D, I> App<S, A, D, I>
where
    S: NonVolatile,
    A: AudioSink + LevelProbe,
    D: DisplaySink,
    I: InputSource,
{
    /// Loads the settings, configures the audio chain and shows the last selected menu.
    pub fn new(
        mut store: SettingsStore<S>,
        mut audio: A,
        mut display: D,
        input: I,
    ) -> Result<Self, Error> {
        let outcome = store.load();
        log::info!("Settings loaded from {outcome:?}");

        dsp::update_all(store.settings(), &mut audio);

        let kind = EffectKind::from_menu_index(store.settings().last_menu());
        let mut screen = Screen::try_new(kind)?;
        screen.enter(store.settings(), &mut display);

        Ok(App {
            store,
            audio,
            display,
            input,
            screen,
            vu_meter: VuMeter::default(),
        })
    }

    pub fn store(&self) -> &SettingsStore<S> {
        &self.store
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn run(mut self) {
        while self.step() == Flow::Continue {
            thread::sleep(TICK);
        }

        log::info!("Exiting");
    }

    /// Handles pending events, then the encoders.
    pub fn step(&mut self) -> Flow {
        while let Some(event) = self.input.poll_event() {
            if self.handle_event(event) == Flow::Quit {
                return Flow::Quit;
            }
        }

        let selector_delta = self.input.read_selector_delta();
        let value_delta = self.input.read_value_delta();
        self.screen.tick(
            &mut self.store,
            selector_delta,
            value_delta,
            &mut self.display,
            &mut self.audio,
        );

        if self.screen.kind() == EffectKind::Levels {
            self.vu_meter
                .tick(self.store.settings(), &mut self.audio, &mut self.display);
        }

        Flow::Continue
    }

    fn handle_event(&mut self, event: Event) -> Flow {
        use Event::*;

        log::debug!("Handling {event:?}");
        match event {
            Save => {
                if self.store.save() {
                    log::info!("Settings saved");
                }
            }
            NextMenu => self.show_menu(self.screen.kind().next_menu()),
            Toggle(kind) => {
                let kind = kind.unwrap_or_else(|| self.screen.kind());
                let effect = kind.effect();
                if kind.flag().is_none() {
                    log::warn!("{} can't be switched", effect.title());
                } else {
                    effect.toggle(self.store.settings_mut(), &mut self.audio);
                    if kind == self.screen.kind() {
                        self.redraw();
                    }
                }
            }
            Set(field, value) => self.set_field(field, value),
            Clear => {
                if let Err(err) = self.store.clear() {
                    log::error!("{err}");
                }
            }
            Dump => match self.store.dump() {
                Ok(bytes) => log::debug!("Storage:\n{}", hex_dump(&bytes)),
                Err(err) => log::error!("Failed to dump storage: {err}"),
            },
            Show => log::info!("Settings:\n{}", self.store.settings()),
            Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    fn show_menu(&mut self, kind: EffectKind) {
        match Screen::try_new(kind) {
            Ok(screen) => self.screen = screen,
            Err(err) => {
                log::error!("{err}");
                return;
            }
        }

        if let Some(idx) = kind.menu_index() {
            self.store.settings_mut().set_last_menu(idx);
        }

        self.screen.enter(self.store.settings(), &mut self.display);
    }

    fn set_field(&mut self, field: Field, value: f32) {
        let settings = self.store.settings_mut();
        if !settings.set(field, value).has_changed() {
            return;
        }
        log::info!("{field} = {}", settings.get(field));

        match field {
            Field::Effects => dsp::update_all(self.store.settings(), &mut self.audio),
            Field::LastMenu => {
                let kind = EffectKind::from_menu_index(self.store.settings().last_menu());
                self.show_menu(kind);
                return;
            }
            _ => {
                for kind in EffectKind::ALL {
                    let effect = kind.effect();
                    if effect.parameters().iter().any(|param| param.field() == field) {
                        effect.update(self.store.settings(), &mut self.audio);
                    }
                }
            }
        }

        self.redraw();
    }

    fn redraw(&mut self) {
        self.screen.draw_all(self.store.settings(), &mut self.display);
    }
}
