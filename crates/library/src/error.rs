use shelve_common::FromMessage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested collection is not in the library right now.
    #[error("playlist '{name}' doesn't exist. Please enter correct name")]
    InvalidName { name: String },

    /// The library refused to take the item.
    #[error("failed to add to playlist '{collection}': {message}")]
    Placement { collection: String, message: String },

    /// Talking to the library failed (listing, spawning, timeouts).
    #[error("library bridge: {message}")]
    Bridge { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    #[must_use]
    pub fn placement(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Placement {
            collection: collection.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn bridge(message: impl Into<String>) -> Self {
        Self::Bridge {
            message: message.into(),
        }
    }
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Bridge { message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

shelve_common::impl_context!();
