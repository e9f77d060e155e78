use std::{env, io};

use pedal_controller::{
    hw::{ConsoleInput, Eeprom, FileEeprom},
    pedal::{audio::LogSink, store::RECORD_VERSION, Error, NonVolatile, SettingsStore},
    ui,
};

/// Path of the EEPROM image file. An in-memory EEPROM is used if not defined.
const EEPROM_ENV: &str = "PEDAL_EEPROM";
/// Expected settings record version. `0` disables persistence.
const RECORD_VERSION_ENV: &str = "PEDAL_RECORD_VERSION";

fn storage() -> Result<Box<dyn NonVolatile>, Error> {
    match env::var_os(EEPROM_ENV) {
        Some(path) => {
            let eeprom = FileEeprom::open(path)?;
            log::info!("Using EEPROM image {}", eeprom.path().display());

            Ok(Box::new(eeprom))
        }
        None => {
            log::info!("{EEPROM_ENV} not defined, settings won't survive restarts");

            Ok(Box::new(Eeprom::new()))
        }
    }
}

fn record_version() -> Result<u8, Error> {
    match env::var(RECORD_VERSION_ENV) {
        Ok(version) => version
            .trim()
            .parse::<u8>()
            .map_err(|err| Error::with_context(format!("{RECORD_VERSION_ENV}={version}"), err)),
        Err(_) => Ok(RECORD_VERSION),
    }
}

pub fn main() -> Result<(), Error> {
    env_logger::Builder::new()
        .filter_module("pedal_controller", log::LevelFilter::Debug)
        .init();

    let store = SettingsStore::with_version(storage()?, record_version()?);

    let app = ui::App::new(
        store,
        LogSink,
        ui::TextDisplay::new(io::stdout()),
        ConsoleInput::spawn()?,
    )?;
    app.run();

    Ok(())
}
