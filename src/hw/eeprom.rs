use std::{
    fs, io,
    ops::Range,
    path::{Path, PathBuf},
};

use crate::pedal::{store::ERASED, Error, NonVolatile};

pub const EEPROM_SIZE: usize = 4096;

fn checked_range(addr: usize, len: usize, size: usize) -> Result<Range<usize>, Error> {
    addr.checked_add(len)
        .filter(|end| *end <= size)
        .map(|end| addr..end)
        .ok_or(Error::StorageOutOfBounds { addr, len, size })
}

/// An in-memory EEPROM.
#[derive(Clone, Debug)]
pub struct Eeprom {
    bytes: Vec<u8>,
}

impl Default for Eeprom {
    fn default() -> Self {
        Self::new()
    }
}

impl Eeprom {
    /// Builds an erased `Eeprom` of `EEPROM_SIZE` bytes.
    pub fn new() -> Self {
        Self::with_size(EEPROM_SIZE)
    }

    pub fn with_size(size: usize) -> Self {
        Eeprom {
            bytes: vec![ERASED; size],
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Eeprom { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl NonVolatile for Eeprom {
    fn size(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, addr: usize, buf: &mut [u8]) -> Result<(), Error> {
        let range = checked_range(addr, buf.len(), self.bytes.len())?;
        buf.copy_from_slice(&self.bytes[range]);

        Ok(())
    }

    fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), Error> {
        let range = checked_range(addr, data.len(), self.bytes.len())?;
        self.bytes[range].copy_from_slice(data);

        Ok(())
    }
}

/// An `Eeprom` mirrored to an image file.
///
/// The image is loaded when opened and written back after each write.
#[derive(Debug)]
pub struct FileEeprom {
    path: PathBuf,
    image: Eeprom,
}

impl FileEeprom {
    /// Opens the image at `path`, creating an erased one if it doesn't exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();

        let image = match fs::read(&path) {
            Ok(bytes) if bytes.len() == EEPROM_SIZE => {
                log::debug!("Opened EEPROM image {}", path.display());
                Eeprom::from_bytes(bytes)
            }
            Ok(bytes) => {
                return Err(Error::StorageImageSize {
                    found: bytes.len(),
                    expected: EEPROM_SIZE,
                });
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("Creating EEPROM image {}", path.display());
                let image = Eeprom::new();
                flush(&path, &image)?;

                image
            }
            Err(err) => {
                return Err(Error::with_context(
                    format!("Couldn't read EEPROM image {}", path.display()),
                    err,
                ));
            }
        };

        Ok(FileEeprom { path, image })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn flush(path: &Path, image: &Eeprom) -> Result<(), Error> {
    fs::write(path, image.as_bytes()).map_err(|err| {
        Error::with_context(
            format!("Couldn't write EEPROM image {}", path.display()),
            err,
        )
    })
}

impl NonVolatile for FileEeprom {
    fn size(&self) -> usize {
        self.image.size()
    }

    fn read(&self, addr: usize, buf: &mut [u8]) -> Result<(), Error> {
        self.image.read(addr, buf)
    }

    fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), Error> {
        self.image.write(addr, data)?;
        flush(&self.path, &self.image)
    }
}
