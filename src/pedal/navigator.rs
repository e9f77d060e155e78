use crate::pedal::{
    data::{ParameterSet, SettingsProvider},
    Error,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum State {
    #[default]
    Idle,
    /// The selection moved: all the widgets must be redrawn.
    SelectionChanged,
    /// The value of the selected parameter changed: only its widget must be redrawn.
    ValueChanged,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Redraw {
    All,
    One(usize),
}

/// Two encoders navigation over a `ParameterSet`.
///
/// The selector encoder moves the cursor, wrapping around the set,
/// the value encoder adjusts the parameter under the cursor.
#[derive(Debug)]
pub struct Navigator {
    cursor: usize,
    len: usize,
    state: State,
}

impl Navigator {
    /// Builds a `Navigator` for a set of `len` parameters.
    ///
    /// Returns an error if `len` is 0.
    pub fn try_new(len: usize) -> Result<Self, Error> {
        if len == 0 {
            return Err(Error::EmptyParameterSet);
        }

        Ok(Navigator {
            cursor: 0,
            len,
            state: State::Idle,
        })
    }

    pub fn for_set<P: ParameterSet + ?Sized>(set: &P) -> Result<Self, Error> {
        Self::try_new(set.count())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Moves the cursor back to the first parameter, e.g. when entering the screen.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.state = State::Idle;
    }

    /// Handles the deltas read from the encoders since previous tick.
    ///
    /// Only the sign of the deltas is considered. A selection change takes
    /// precedence: the value delta is then ignored.
    pub fn tick<P, S>(
        &mut self,
        set: &P,
        settings: &mut S,
        selector_delta: i32,
        value_delta: i32,
    ) -> Option<Redraw>
    where
        P: ParameterSet + ?Sized,
        S: SettingsProvider + ?Sized,
    {
        if selector_delta != 0 {
            self.cursor = if selector_delta > 0 {
                (self.cursor + 1) % self.len
            } else {
                (self.cursor + self.len - 1) % self.len
            };
            self.state = State::SelectionChanged;
            log::trace!("selected parameter {}", self.cursor);

            return Some(Redraw::All);
        }

        if value_delta != 0 {
            let param = match set.parameter(self.cursor) {
                Some(param) => param,
                None => {
                    log::error!(
                        "No parameter {} in a set of {}, expected {}",
                        self.cursor,
                        set.count(),
                        self.len,
                    );
                    self.state = State::Idle;

                    return None;
                }
            };

            let settings = settings.settings_mut();
            param.step_by(settings, value_delta);
            log::trace!("{} = {}", param.name(), param.get(settings));
            self.state = State::ValueChanged;

            return Some(Redraw::One(self.cursor));
        }

        self.state = State::Idle;

        None
    }

    /// Acknowledges the redraw requested by the last `tick`.
    pub fn acknowledge(&mut self) {
        self.state = State::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedal::data::{settings::Field, Mapping, Parameter, Percent, Settings};

    fn threshold_attack() -> [Parameter; 2] {
        [
            Parameter::slider(Field::CompThreshold, "Threshold", 0.5).with_mapping(Mapping::Linear {
                at_0: 0.0,
                at_100: -96.0,
            }),
            Parameter::slider(Field::CompAttack, "Attack", 0.1).with_range(0.0, 1.0),
        ]
    }

    #[test]
    fn empty_set() {
        let set: [Parameter; 0] = [];
        assert!(matches!(
            Navigator::for_set(&set).unwrap_err(),
            Error::EmptyParameterSet
        ));
    }

    #[test]
    fn scenario() {
        let set = threshold_attack();
        let mut settings = Settings::default();
        settings.set_comp_threshold(-96.0);
        let mut nav = Navigator::for_set(&set).unwrap();
        assert_eq!(nav.cursor(), 0);
        assert_eq!(nav.state(), State::Idle);

        assert_eq!(nav.tick(&set, &mut settings, 0, 1), Some(Redraw::One(0)));
        assert_eq!(nav.state(), State::ValueChanged);
        assert_eq!(settings.comp_threshold(), -95.5);
        assert_eq!(set[0].display(&settings), Percent::try_from(99.5).unwrap());
        nav.acknowledge();
        assert_eq!(nav.state(), State::Idle);

        assert_eq!(nav.tick(&set, &mut settings, 1, 0), Some(Redraw::All));
        assert_eq!(nav.state(), State::SelectionChanged);
        assert_eq!(nav.cursor(), 1);
        assert_eq!(settings.comp_threshold(), -95.5);
        nav.acknowledge();

        assert_eq!(nav.tick(&set, &mut settings, -1, 0), Some(Redraw::All));
        assert_eq!(nav.cursor(), 0);

        assert_eq!(nav.tick(&set, &mut settings, 0, 0), None);
        assert_eq!(nav.state(), State::Idle);
    }

    #[test]
    fn wraparound() {
        let set = [
            Parameter::slider(Field::ReverbVolume, "Volume", 0.04),
            Parameter::slider(Field::ReverbRoomsize, "Room", 0.04),
            Parameter::slider(Field::ReverbDamping, "Damping", 0.04),
        ];
        let mut settings = Settings::default();
        let mut nav = Navigator::for_set(&set).unwrap();

        for _ in 0..set.len() {
            nav.tick(&set, &mut settings, 1, 0);
        }
        assert_eq!(nav.cursor(), 0);

        nav.tick(&set, &mut settings, -1, 0);
        assert_eq!(nav.cursor(), set.len() - 1);

        // magnitude is ignored
        nav.tick(&set, &mut settings, 5, 0);
        assert_eq!(nav.cursor(), 0);
        nav.tick(&set, &mut settings, -7, 0);
        assert_eq!(nav.cursor(), 2);
    }

    #[test]
    fn single_parameter() {
        let set = [Parameter::slider(Field::InputLevel, "Input", 1.0)];
        let mut settings = Settings::default();
        let mut nav = Navigator::for_set(&set[..]).unwrap();

        assert_eq!(nav.tick(&set[..], &mut settings, -1, 0), Some(Redraw::All));
        assert_eq!(nav.cursor(), 0);
    }

    #[test]
    fn selector_priority() {
        let set = threshold_attack();
        let mut settings = Settings::default();
        let mut nav = Navigator::for_set(&set).unwrap();

        assert_eq!(nav.tick(&set, &mut settings, 1, 1), Some(Redraw::All));
        assert_eq!(nav.cursor(), 1);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn clamping() {
        let set = threshold_attack();
        let mut settings = Settings::default();
        let mut nav = Navigator::for_set(&set).unwrap();

        for _ in 0..300 {
            nav.tick(&set, &mut settings, 0, -3);
            let threshold = settings.comp_threshold();
            assert!((-96.0..=0.0).contains(&threshold), "{threshold}");
        }
        assert_eq!(settings.comp_threshold(), -96.0);

        for _ in 0..300 {
            nav.tick(&set, &mut settings, 0, 1);
        }
        assert_eq!(settings.comp_threshold(), 0.0);
        assert_eq!(nav.tick(&set, &mut settings, 0, 1), Some(Redraw::One(0)));
        assert_eq!(settings.comp_threshold(), 0.0);

        nav.tick(&set, &mut settings, 1, 0);
        for delta in [1, 1, -1, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, -9] {
            nav.tick(&set, &mut settings, 0, delta);
            let attack = settings.comp_attack();
            assert!((0.0..=1.0).contains(&attack), "{attack}");
        }
    }

    #[test]
    fn settings_provider() {
        use crate::{hw::Eeprom, pedal::SettingsStore};

        let set = threshold_attack();
        let mut store = SettingsStore::new(Eeprom::new());
        store.load();
        let mut nav = Navigator::for_set(&set).unwrap();

        nav.tick(&set, &mut store, 0, -1);
        assert_eq!(store.settings().comp_threshold(), -20.5);
    }

    #[test]
    fn mismatched_set() {
        let set = threshold_attack();
        let mut settings = Settings::default();
        let mut nav = Navigator::try_new(3).unwrap();

        nav.tick(&set, &mut settings, -1, 0);
        assert_eq!(nav.cursor(), 2);

        assert_eq!(nav.tick(&set, &mut settings, 0, 1), None);
        assert_eq!(nav.state(), State::Idle);
        assert_eq!(settings, Settings::default());
    }
}
