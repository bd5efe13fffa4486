//! Error types for tlsplan

use thiserror::Error;

/// Result type alias for tlsplan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tlsplan operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML tokenizer error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Document structure the tokenizer accepts but which is not well-formed
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Required attribute missing from an element
    #[error("<{element}> element is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// Phase duration that is not a number
    #[error("Invalid phase duration '{value}' in controller '{controller}'")]
    InvalidDuration { controller: String, value: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.into())
    }
}
