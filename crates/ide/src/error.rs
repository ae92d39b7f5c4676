use mqtt_types::LineRange;
use thiserror::Error;

/// Failure to execute a code action. No partial edit is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("code action belongs to module '{found}', expected '{expected}'")]
    ForeignProvider { expected: String, found: String },

    #[error("code action has no 'location' argument")]
    MissingLocation,

    #[error("malformed 'location' argument: {0}")]
    MalformedLocation(String),

    #[error("location {0} is outside the file")]
    LocationOutOfBounds(LineRange),

    #[error("no service matches location {0}; the file changed since validation")]
    StaleLocation(LineRange),

    #[error("edit at {0} overlaps another edit")]
    OverlappingEdits(LineRange),
}

pub type Result<T> = std::result::Result<T, ActionError>;
