#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown template: '{0}'")]
    UnknownTemplate(String),

    #[error("Missing configuration: {}", .0.join(", "))]
    ConfigurationMissing(Vec<&'static str>),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why the customer directory could not be read.
///
/// Both variants take the same control path (an empty customer list);
/// the distinction only changes the diagnostic shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryUnavailable {
    #[error("Relation '{relation}' does not exist; the customer schema has not been initialized")]
    SchemaMissing { relation: &'static str },

    #[error("Customer store unreachable: {0}")]
    ConnectionFailed(String),
}
