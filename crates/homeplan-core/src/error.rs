use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomePlanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid limits: {field} — {reason}")]
    InvalidLimits { field: String, reason: String },

    #[error("Invalid region selection at {level}: {reason}")]
    InvalidSelection { level: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for HomePlanError {
    fn from(e: serde_json::Error) -> Self {
        HomePlanError::SerializationError(e.to_string())
    }
}
