//! Error types for API client operations

use std::{error::Error as StdError, fmt};

/// Error type for API client operations
#[derive(Debug)]
pub enum Error {
    /// The backend reported a failure through the response envelope
    Remote {
        /// Message from the envelope, or the operation's default
        message: String,
    },

    /// Non-success HTTP status without a parseable envelope
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Network or protocol failure
    Transport(reqwest::Error),

    /// Successful response whose body was not a valid envelope
    Decode(serde_json::Error),

    /// The envelope was successful but carried no payload
    MissingData {
        /// Operation that expected a payload
        operation: String,
    },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a remote error from an envelope message
    pub fn remote<S: Into<String>>(message: S) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Create a missing-data error for a named operation
    pub fn missing_data<S: Into<String>>(operation: S) -> Self {
        Self::MissingData {
            operation: operation.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { message } => write!(f, "{message}"),
            Self::Status { status } => write!(f, "Server returned status {status}"),
            Self::Transport(err) => write!(f, "Transport error: {err}"),
            Self::Decode(err) => write!(f, "Invalid response body: {err}"),
            Self::MissingData { operation } => {
                write!(f, "Server returned no data for {operation}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as StdError;

    #[test]
    fn test_remote_error_displays_bare_message() {
        let error = Error::remote("Failed to delete user");
        assert_eq!(format!("{}", error), "Failed to delete user");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_status_error() {
        let error = Error::Status { status: 502 };
        assert_eq!(format!("{}", error), "Server returned status 502");
    }

    #[test]
    fn test_missing_data_error() {
        let error = Error::missing_data("login");
        assert_eq!(format!("{}", error), "Server returned no data for login");
    }

    #[test]
    fn test_decode_error_preserves_source() {
        let json_error = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let error = Error::from(json_error);

        match &error {
            Error::Decode(_) => {}
            other => panic!("Expected Decode variant, got {other:?}"),
        }
        assert!(error.source().is_some());
    }
}
