use std::path::PathBuf;

use thiserror::Error;

pub const INVALID_PREFIX_MESSAGE: &str = "Prefix must be 1 to 3 characters long.";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}", INVALID_PREFIX_MESSAGE)]
    InvalidPrefix,
    #[error("failed to persist prefixes to {}: {source}", path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read prefixes from {}: {source}", path.display())]
    LoadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("prefix file {} is not a JSON object of strings: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of a chat command. Every variant is answered in the channel.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invoker lacks permission to {action}")]
    PermissionDenied { action: &'static str },
    #[error("missing argument: {reply}")]
    MissingArgument { reply: &'static str },
    #[error("invalid argument '{value}'")]
    InvalidArgument { value: String, reply: &'static str },
    #[error("target user is not a member of the guild")]
    TargetNotFound,
    #[error("platform call failed: {source}")]
    PlatformCallFailure {
        reply: &'static str,
        #[source]
        source: serenity::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CommandError {
    /// Text sent back to the channel.
    pub fn user_message(&self) -> String {
        match self {
            CommandError::PermissionDenied { action } => {
                format!("You do not have permission to {}.", action)
            }
            CommandError::MissingArgument { reply } => reply.to_string(),
            CommandError::InvalidArgument { reply, .. } => reply.to_string(),
            CommandError::TargetNotFound => "User not found in the server.".to_string(),
            CommandError::PlatformCallFailure { reply, .. } => reply.to_string(),
            CommandError::Store(StoreError::InvalidPrefix) => INVALID_PREFIX_MESSAGE.to_string(),
            CommandError::Store(_) => {
                "Sorry, I couldn't save the new prefix. Please try again.".to_string()
            }
        }
    }

    /// True for failures outside the invoker's control.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CommandError::PlatformCallFailure { .. }
                | CommandError::Store(StoreError::PersistenceFailure { .. })
                | CommandError::Store(StoreError::LoadFailure { .. })
                | CommandError::Store(StoreError::Corrupt { .. })
        )
    }
}
