use crate::types::RowId;
use crate::validation::FieldErrors;

/// Failure taxonomy shared by every layer that talks to a data collaborator.
///
/// The list controller only ever distinguishes three kinds: a local or
/// collaborator-side [`Validation`](CoreError::Validation) failure, a
/// vanished row ([`NotFound`](CoreError::NotFound)), and everything else
/// ([`Collaborator`](CoreError::Collaborator)). `Conflict` and `Internal` are
/// produced by the HTTP service and surface to the controller as collaborator
/// failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: RowId },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] on the given entity.
    pub fn not_found(entity: &'static str, id: impl Into<RowId>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The field-level messages carried by a validation failure, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_entity_and_id() {
        let err = CoreError::not_found("User", "U001");
        assert_eq!(err.to_string(), "Entity not found: User with id U001");
        assert!(err.is_not_found());
    }

    #[test]
    fn validation_exposes_field_errors() {
        let mut fields = FieldErrors::new();
        fields.insert("email", "Invalid email");
        let err = CoreError::Validation(fields);
        assert_eq!(err.field_errors().and_then(|f| f.get("email")), Some("Invalid email"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn collaborator_error_has_no_field_errors() {
        assert!(CoreError::Collaborator("offline".into()).field_errors().is_none());
    }
}
