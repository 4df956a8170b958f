use thiserror::Error;

/// Coarse classification of a failure, used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input the caller can fix.
    Validation,
    /// A referenced teacher or student does not exist.
    NotFound,
    /// A concurrent creation hit a unique constraint.
    Conflict,
    /// Anything else, typically a store failure.
    Internal,
}

/// Errors raised by record stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A row with the same unique email already exists.
    #[error("{entity} with email {email} already exists")]
    Duplicate { entity: &'static str, email: String },

    /// Backend failure, carried as-is.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn duplicate(entity: &'static str, email: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            email: email.into(),
        }
    }
}

/// Errors raised by the association service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Store(anyhow::Error),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => Self::Conflict(err.to_string()),
            StoreError::Backend(inner) => Self::Store(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_per_variant() {
        assert_eq!(ServiceError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(ServiceError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(
            ServiceError::Conflict("x".to_string()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            ServiceError::Store(anyhow::anyhow!("boom")).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_duplicate_becomes_conflict() {
        let err: ServiceError = StoreError::duplicate("student", "a@b.com").into();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "student with email a@b.com already exists");
    }

    #[test]
    fn test_backend_error_is_not_reinterpreted() {
        #[derive(Debug, Error)]
        #[error("connection reset")]
        struct Reset;

        let err: ServiceError = StoreError::Backend(anyhow::Error::new(Reset)).into();
        assert_eq!(err.kind(), ErrorKind::Internal);
        match err {
            ServiceError::Store(inner) => assert!(inner.downcast_ref::<Reset>().is_some()),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
