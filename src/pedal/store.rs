use nom::{bytes::complete::tag, IResult};

use crate::pedal::{
    data::{Record, RecordBuf, Settings, SettingsProvider},
    Error,
};

/// Version of the settings record layout expected by this build.
pub const RECORD_VERSION: u8 = 183;
/// Address of the record in the non-volatile storage.
pub const RECORD_ADDR: usize = 0;
/// Expected version which disables persistence: defaults are always used and `save` fails.
pub const PERSISTENCE_DISABLED: u8 = 0;

/// Value of erased storage bytes.
pub const ERASED: u8 = 0xff;

/// Byte addressable non-volatile storage.
pub trait NonVolatile {
    fn size(&self) -> usize;

    /// Fills `buf` with the bytes stored from `addr`.
    fn read(&self, addr: usize, buf: &mut [u8]) -> Result<(), Error>;

    fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), Error>;

    fn fill(&mut self, value: u8) -> Result<(), Error> {
        let data = vec![value; self.size()];
        self.write(0, &data)
    }
}

impl<T: NonVolatile + ?Sized> NonVolatile for Box<T> {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn read(&self, addr: usize, buf: &mut [u8]) -> Result<(), Error> {
        (**self).read(addr, buf)
    }

    fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), Error> {
        (**self).write(addr, data)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadOutcome {
    Storage,
    Defaults,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StoreState {
    Unloaded,
    Loaded(LoadOutcome),
}

/// Owner of the `Settings` and of their persisted form.
pub struct SettingsStore<S> {
    storage: S,
    version: u8,
    settings: Settings,
    state: StoreState,
}

impl<S: NonVolatile> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_version(storage, RECORD_VERSION)
    }

    /// Builds a `SettingsStore` expecting records tagged with `version`.
    ///
    /// Use `PERSISTENCE_DISABLED` to always start from defaults and never write the storage.
    pub fn with_version(storage: S, version: u8) -> Self {
        SettingsStore {
            storage,
            version,
            settings: Settings::default(),
            state: StoreState::Unloaded,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Loads the settings from the storage.
    ///
    /// Defaults are used when the storage doesn't hold a record with the expected version
    /// or when it can't be read.
    pub fn load(&mut self) -> LoadOutcome {
        self.settings.reset();

        let outcome = match self.read_record() {
            Ok(settings) => {
                log::debug!("Loaded settings from storage (version {})", self.version);
                self.settings = settings;

                LoadOutcome::Storage
            }
            Err(Error::PersistenceDisabled) => {
                log::info!("Persistence disabled, using default settings");
                LoadOutcome::Defaults
            }
            Err(err) if err.is_version_mismatch() => {
                log::warn!("{err}, using default settings");
                LoadOutcome::Defaults
            }
            Err(err) => {
                log::error!("Failed to load settings: {err}, using default settings");
                LoadOutcome::Defaults
            }
        };

        self.state = StoreState::Loaded(outcome);

        outcome
    }

    fn read_record(&self) -> Result<Settings, Error> {
        if self.version == PERSISTENCE_DISABLED {
            return Err(Error::PersistenceDisabled);
        }

        let mut found = [0u8];
        self.storage.read(RECORD_ADDR, &mut found)?;
        if found[0] != self.version {
            return Err(Error::RecordVersion {
                found: found[0],
                expected: self.version,
            });
        }

        let mut buf = RecordBuf::from_elem(0, 1 + Settings::LEN);
        self.storage.read(RECORD_ADDR, &mut buf)?;

        let (_, settings) = parse_record(&buf, self.version).map_err(|err| {
            log::error!("{err}");
            Error::RecordParse
        })?;

        Ok(settings)
    }

    /// Writes the version tag followed by the settings record.
    ///
    /// Returns `false` if persistence is disabled or if the storage rejected the record.
    pub fn save(&mut self) -> bool {
        if self.version == PERSISTENCE_DISABLED {
            log::warn!("Persistence disabled, settings not saved");
            return false;
        }

        let mut buf = RecordBuf::new();
        buf.push(self.version);
        buf.extend_from_slice(&self.settings.serialize());

        match self.storage.write(RECORD_ADDR, &buf) {
            Ok(()) => {
                log::debug!("Saved settings ({} bytes)", buf.len());
                true
            }
            Err(err) => {
                log::error!("Failed to save settings: {err}");
                false
            }
        }
    }

    /// Erases the whole storage.
    ///
    /// The in-memory settings are left untouched.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.storage
            .fill(ERASED)
            .map_err(|err| Error::with_context("Clearing storage", err))?;

        log::info!("Cleared {} storage bytes", self.storage.size());

        Ok(())
    }

    /// Returns a copy of the whole storage.
    pub fn dump(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = vec![0; self.storage.size()];
        self.storage.read(0, &mut bytes)?;

        Ok(bytes)
    }
}

impl<S> SettingsProvider for SettingsStore<S> {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

fn parse_record(i: &[u8], version: u8) -> IResult<&[u8], Settings> {
    let (i, _) = tag([version])(i)?;

    Settings::parse(i)
}

/// Formats `bytes` as lines of 16 hexadecimal bytes prefixed with their address.
pub fn hex_dump(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut dump = String::with_capacity(bytes.len() * 3 + bytes.len() / 16 * 6);
    for (idx, line) in bytes.chunks(16).enumerate() {
        let _ = write!(dump, "{:04x}:", idx * 16);
        for byte in line {
            let _ = write!(dump, " {byte:02x}");
        }
        dump.push('\n');
    }

    dump
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::Eeprom;
    use crate::pedal::data::{EffectFlags, ValueStatus};

    struct ReadOnly(Eeprom);

    impl NonVolatile for ReadOnly {
        fn size(&self) -> usize {
            self.0.size()
        }

        fn read(&self, addr: usize, buf: &mut [u8]) -> Result<(), Error> {
            self.0.read(addr, buf)
        }

        fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), Error> {
            Err(Error::StorageOutOfBounds {
                addr,
                len: data.len(),
                size: 0,
            })
        }
    }

    fn tweak(settings: &mut Settings) {
        settings.set_comp_threshold(-95.5);
        settings.set_comp_gain(2);
        settings.set_comp_limit(true);
        settings.set_flanger_depth(200);
        settings.set_enabled(EffectFlags::COMPRESSOR, true);
        settings.set_last_menu(3);
    }

    #[test]
    fn blank_storage() {
        let mut store = SettingsStore::new(Eeprom::new());
        assert_eq!(store.state(), StoreState::Unloaded);

        assert_eq!(store.load(), LoadOutcome::Defaults);
        assert_eq!(store.state(), StoreState::Loaded(LoadOutcome::Defaults));
        assert_eq!(*store.settings(), Settings::default());
    }

    #[test]
    fn save_load() {
        let mut store = SettingsStore::new(Eeprom::new());
        store.load();
        tweak(store.settings_mut());
        assert!(store.save());

        let saved = store.settings().clone();
        let image = store.dump().unwrap();
        assert_eq!(image[RECORD_ADDR], RECORD_VERSION);
        assert_eq!(image[1 + Settings::LEN], ERASED);

        let mut store = SettingsStore::new(Eeprom::from_bytes(image));
        assert_eq!(store.load(), LoadOutcome::Storage);
        assert_eq!(store.state(), StoreState::Loaded(LoadOutcome::Storage));
        assert_eq!(*store.settings(), saved);
        assert_eq!(store.settings().serialize(), saved.serialize());
        assert!(store.settings().comp_enabled());
    }

    #[test]
    fn save_load_negative_zero() {
        let mut store = SettingsStore::new(Eeprom::new());
        store.load();
        store.settings_mut().set_eq_bass(0.5);
        assert_eq!(store.settings_mut().set_eq_bass(-0.0), ValueStatus::Changed);
        assert!(store.save());
        let saved = store.settings().serialize();

        let mut store = SettingsStore::new(Eeprom::from_bytes(store.dump().unwrap()));
        assert_eq!(store.load(), LoadOutcome::Storage);
        assert_eq!(store.settings().eq_bass().to_bits(), (-0.0f32).to_bits());
        assert_eq!(store.settings().serialize(), saved);
    }

    #[test]
    fn load_discards_pending_changes() {
        let mut store = SettingsStore::new(Eeprom::new());
        store.load();
        assert!(store.save());

        tweak(store.settings_mut());
        assert_eq!(store.load(), LoadOutcome::Storage);
        assert_eq!(*store.settings(), Settings::default());
    }

    #[test]
    fn version_gate() {
        let mut older = SettingsStore::with_version(Eeprom::new(), 100);
        older.load();
        tweak(older.settings_mut());
        assert!(older.save());

        let mut store = SettingsStore::new(Eeprom::from_bytes(older.dump().unwrap()));
        assert_eq!(store.load(), LoadOutcome::Defaults);

        let settings = store.settings();
        assert!(!settings.comp_enabled());
        assert_eq!(settings.comp_gain(), 1);
        assert_eq!(*settings, Settings::default());
    }

    #[test]
    fn persistence_disabled() {
        let mut image = vec![ERASED; 1 + Settings::LEN];
        image[0] = PERSISTENCE_DISABLED;
        image[1..].copy_from_slice(&Settings::default().serialize());

        let mut store =
            SettingsStore::with_version(Eeprom::from_bytes(image.clone()), PERSISTENCE_DISABLED);
        assert_eq!(store.load(), LoadOutcome::Defaults);

        tweak(store.settings_mut());
        assert!(!store.save());
        assert_eq!(store.storage().as_bytes(), image.as_slice());
    }

    #[test]
    fn clear() {
        let mut store = SettingsStore::new(Eeprom::new());
        store.load();
        assert!(store.save());

        store.clear().unwrap();
        assert!(store.dump().unwrap().iter().all(|byte| *byte == ERASED));
        assert_eq!(store.load(), LoadOutcome::Defaults);
    }

    #[test]
    fn short_storage() {
        let mut store = SettingsStore::new(Eeprom::with_size(Settings::LEN));
        store.load();
        assert!(!store.save());

        // version byte matches but the record doesn't fit
        let mut image = vec![ERASED; Settings::LEN];
        image[0] = RECORD_VERSION;
        let mut store = SettingsStore::new(Eeprom::from_bytes(image));
        assert_eq!(store.load(), LoadOutcome::Defaults);
        assert_eq!(*store.settings(), Settings::default());
    }

    #[test]
    fn storage_rejects_write() {
        let mut store = SettingsStore::new(ReadOnly(Eeprom::new()));
        store.load();
        assert_eq!(store.settings_mut().set_input_level(9), ValueStatus::Changed);
        assert!(!store.save());
        assert!(store.clear().is_err());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut image = vec![ERASED; 128];
        image[0] = RECORD_VERSION;
        image[1..=Settings::LEN].copy_from_slice(&Settings::default().serialize());
        // `input_level` is the next to last field
        image[Settings::LEN - 1] = 42;

        let mut store = SettingsStore::new(Eeprom::from_bytes(image));
        assert_eq!(store.load(), LoadOutcome::Storage);
        assert_eq!(store.settings().input_level(), 15);
    }

    #[test]
    fn dump_format() {
        let bytes = (0u8..18).collect::<Vec<_>>();
        assert_eq!(
            hex_dump(&bytes),
            "0000: 00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f\n0010: 10 11\n",
        );
    }
}
