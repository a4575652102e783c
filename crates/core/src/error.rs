/// Domain-level errors shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An edit referenced a field that does not exist in the active
    /// section's schema.
    #[error("Unknown field '{field}' in section '{section}'")]
    UnknownField {
        /// Section the edit was addressed to.
        section: String,
        /// The offending field name.
        field: String,
    },

    /// A section name could not be resolved against the known schema.
    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    /// A value failed a structural check (e.g. not JSON-serializable
    /// into the expected shape).
    #[error("Validation error: {0}")]
    Validation(String),
}
