use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry answered with a non-2xx status. The body is kept verbatim
    /// so it can be handed back to the HTTP caller untouched.
    #[error("Registry returned HTTP {status}")]
    Remote { status: u16, body: Value },

    #[error("Registry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Registry response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Registry returned no {resource} record for {id}")]
    MissingRecord { resource: &'static str, id: String },

    #[error("Registry returned a {resource} record that is not a JSON object")]
    MalformedRecord { resource: &'static str },

    /// A dot segment would let URL normalisation move the call to another resource
    #[error("Registry path {path} contains a dot segment")]
    InvalidPath { path: String },
}

impl RegistryError {
    /// HTTP status reported by the registry, if it answered at all
    pub fn remote_status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
