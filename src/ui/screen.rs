use crate::pedal::{
    audio::AudioSink,
    data::{Control, Parameter, ParameterSet, Settings, SettingsProvider},
    Effect, EffectKind, Error, Navigator, Redraw,
};
use crate::ui::widget::{DisplaySink, Widget, LABEL_WIDTH, ROW_HEIGHT, STATUS_X, TITLE_HEIGHT};

/// The parameters screen of an effect.
#[derive(Debug)]
pub struct Screen {
    kind: EffectKind,
    navigator: Navigator,
}

impl Screen {
    pub fn try_new(kind: EffectKind) -> Result<Self, Error> {
        let navigator = Navigator::for_set(kind.effect())
            .map_err(|err| Error::with_context(format!("{} screen", kind.name()), err))?;

        Ok(Screen { kind, navigator })
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn effect(&self) -> &'static dyn Effect {
        self.kind.effect()
    }

    pub fn cursor(&self) -> usize {
        self.navigator.cursor()
    }

    /// Selects the first parameter and draws the whole screen.
    pub fn enter(&mut self, settings: &Settings, display: &mut dyn DisplaySink) {
        log::debug!("Entering {} screen", self.effect().title());
        self.navigator.reset();
        self.draw_all(settings, display);
    }

    /// Handles the encoders deltas and refreshes the screen and the audio chain accordingly.
    pub fn tick<P>(
        &mut self,
        provider: &mut P,
        selector_delta: i32,
        value_delta: i32,
        display: &mut dyn DisplaySink,
        audio: &mut dyn AudioSink,
    ) -> Option<Redraw>
    where
        P: SettingsProvider + ?Sized,
    {
        let effect = self.effect();
        let redraw = self
            .navigator
            .tick(effect, provider, selector_delta, value_delta)?;

        let settings = provider.settings();
        match redraw {
            Redraw::All => self.draw_all(settings, display),
            Redraw::One(idx) => {
                effect.update(settings, audio);
                if let Some(param) = effect.parameter(idx) {
                    Self::draw_parameter(param, idx, settings, true, display);
                }
            }
        }
        self.navigator.acknowledge();

        Some(redraw)
    }

    /// Draws the whole screen.
    pub fn draw_all(&self, settings: &Settings, display: &mut dyn DisplaySink) {
        let effect = self.effect();

        display.draw(&Widget::Clear);
        display.draw(&Widget::Title(effect.title()));
        if self.kind.flag().is_some() {
            display.draw(&Widget::Label {
                x: STATUS_X,
                y: 0,
                text: if effect.is_enabled(settings) {
                    "ON"
                } else {
                    "OFF"
                },
                selected: false,
            });
        }

        let cursor = self.navigator.cursor();
        for (idx, param) in effect.parameters().iter().enumerate() {
            Self::draw_parameter(param, idx, settings, idx == cursor, display);
        }
    }

    fn draw_parameter(
        param: &Parameter,
        idx: usize,
        settings: &Settings,
        is_selected: bool,
        display: &mut dyn DisplaySink,
    ) {
        let y = TITLE_HEIGHT + ROW_HEIGHT * idx as u16;

        display.draw(&Widget::Label {
            x: 0,
            y,
            text: param.name(),
            selected: is_selected,
        });

        let widget = match param.control() {
            Control::Slider => Widget::Slider {
                x: LABEL_WIDTH,
                y,
                percent: param.display(settings),
                focused: is_selected,
            },
            Control::Choices(labels) => Widget::RadioGroup {
                x: LABEL_WIDTH,
                y,
                labels,
                selected: param.choice(settings).unwrap_or_default(),
                focused: is_selected,
            },
        };
        display.draw(&widget);
    }
}
