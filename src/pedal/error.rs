use std::sync::Arc;

#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage access out of bounds: {} bytes at {} (size {})", .len, .addr, .size)]
    StorageOutOfBounds { addr: usize, len: usize, size: usize },

    #[error("Storage image size {} doesn't match expected {}", .found, .expected)]
    StorageImageSize { found: usize, expected: usize },

    #[error("Settings record version {} doesn't match expected {}", .found, .expected)]
    RecordVersion { found: u8, expected: u8 },

    #[error("Error parsing settings record")]
    RecordParse,

    #[error("Persistence is disabled")]
    PersistenceDisabled,

    #[error("Parameter set is empty")]
    EmptyParameterSet,

    #[error("Percent out of range: {}", .0)]
    PercentOutOfRange(f32),

    #[error("Unknown settings field {}", .0)]
    UnknownField(Arc<str>),

    #[error("Unknown command {}", .0)]
    UnknownCommand(Arc<str>),

    #[error("{}: {}", ctx, source)]
    WithContext {
        ctx: Arc<str>,
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub fn with_context<E>(ctx: impl Into<Arc<str>>, source: E) -> Self
    where
        E: 'static + std::error::Error + Send + Sync,
    {
        Error::WithContext {
            ctx: ctx.into(),
            source: Arc::new(source),
        }
    }

    pub fn is_version_mismatch(&self) -> bool {
        matches!(self, Error::RecordVersion { .. })
    }
}
