use thiserror::Error;

/// Errors raised by filter editing operations and registry construction.
///
/// Parse problems in values are never reported here: a condition with a bad
/// number or a half-filled range is simply not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Field key is not in the registry
    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    /// Operator is not offered for the field's value type
    #[error("Operator '{operator}' is not applicable to field '{field}'")]
    OperatorNotApplicable { field: String, operator: String },

    /// Two descriptors share a key
    #[error("Duplicate filter field: {0}")]
    DuplicateField(String),

    /// Descriptor violates a registry invariant
    #[error("Invalid filter field '{key}': {reason}")]
    InvalidField { key: String, reason: String },
}
