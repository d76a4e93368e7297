use thiserror::Error;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";

/// Result type for the `struct_schema` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Errors raised while generating or serializing a schema
#[derive(Debug, Error)]
pub enum Error {
    /// A record type contains itself without end
    #[error("Cyclic type: {type_name} contains itself and cannot be inlined")]
    CyclicType {
        /// Identity of the record that was re-entered
        type_name: String,
    },

    /// The walk went deeper than the configured limit
    #[error("Maximum schema depth of {max_depth} exceeded at {type_name}")]
    DepthExceeded {
        /// Identity of the type being expanded when the limit was hit
        type_name: String,
        /// The configured limit
        max_depth: usize,
    },

    /// The schema tree could not be written as JSON
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Schema text could not be read back into a document
    #[error("Deserialization failed: {0}")]
    Deserialization(String),
}

impl Error {
    /// Create a "Failed to serialize X" error
    pub fn serialization_failed(what: &str, details: impl std::fmt::Display) -> Self {
        Self::Serialization(format!("{MSG_FAILED_TO_PREFIX} serialize {what}: {details}"))
    }

    /// Create a "Failed to parse X" error
    pub fn deserialization_failed(what: &str, details: impl std::fmt::Display) -> Self {
        Self::Deserialization(format!("{MSG_FAILED_TO_PREFIX} parse {what}: {details}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = Error::CyclicType {
            type_name: "app::Node".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cyclic type: app::Node contains itself and cannot be inlined"
        );

        let error = Error::serialization_failed("document", "invalid float");
        assert_eq!(
            error.to_string(),
            "Serialization failed: Failed to serialize document: invalid float"
        );
    }
}
