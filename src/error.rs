use std::io;
use thiserror::Error;

/// Errors for the checked hashing API, configuration and workers.
///
/// The unchecked C exports never produce these; see [`crate::ffi`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Input to a block hash was not exactly one block.
    #[error("input must be exactly 64 bytes, got {0}")]
    InvalidInputLength(usize),

    /// Output buffer cannot hold a digest.
    #[error("output must be at least 32 bytes, got {0}")]
    OutputTooSmall(usize),

    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Config file could not be parsed.
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),

    /// The CPU workers are turned off in the config.
    #[error("cpu workers are disabled")]
    WorkersDisabled,

    /// A worker thread could not be spawned.
    #[error("failed to spawn worker: {0}")]
    Spawn(io::Error),

    /// Other IO errors.
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller supplied buffer or value is unusable.
    InvalidArgument,
    /// Configuration is malformed or disables the requested feature.
    Config,
    /// Operating system or IO failure.
    Io,
}

impl Error {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            InvalidInputLength(_) | OutputTooSmall(_) | InvalidHex(_) => ErrorKind::InvalidArgument,
            Config(_) | WorkersDisabled => ErrorKind::Config,
            Spawn(_) | Io(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn length_errors_are_invalid_argument() {
        assert_eq!(Error::InvalidInputLength(63).kind(), ErrorKind::InvalidArgument);
        assert_eq!(Error::OutputTooSmall(31).kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn display() {
        assert_eq!(
            Error::InvalidInputLength(10).to_string(),
            "input must be exactly 64 bytes, got 10"
        );
        assert_eq!(
            Error::OutputTooSmall(8).to_string(),
            "output must be at least 32 bytes, got 8"
        );
    }

    #[test]
    fn config_from_serde() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = err.into();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
