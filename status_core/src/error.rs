use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Application { status: u16, message: String },

    /// A response arrived but its body could not be decoded.
    #[error("{message}")]
    MalformedBody { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StatusError {
    /// Status code recorded before the failure, if any response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StatusError::Application { status, .. } | StatusError::MalformedBody { status, .. } => {
                Some(*status)
            }
            StatusError::Transport(_) | StatusError::InvalidConfig(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StatusError>;
