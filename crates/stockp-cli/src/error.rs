use stockp_core::{CoreError, CoreErrorKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(CoreError::Config(_)) => 2,
            Self::Core(error) => match error.kind() {
                CoreErrorKind::FetchFailed => 3,
                CoreErrorKind::ParseSourceInvalid => 4,
                CoreErrorKind::EmptySeries => 5,
                CoreErrorKind::MalformedRecord | CoreErrorKind::Internal => 10,
            },
            Self::Serialization(_) => 10,
            Self::Io(_) => 10,
        }
    }
}
