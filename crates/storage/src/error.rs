use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    pub fn is_check_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23514")
        )
    }

    /// Folds driver-level constraint failures into the domain variants.
    ///
    /// A record insert that trips the participant foreign key means the
    /// participant vanished, so it surfaces as `NotFound`.
    pub fn classify(self) -> Self {
        if self.is_foreign_key_violation() {
            StorageError::NotFound
        } else if self.is_unique_violation() || self.is_check_violation() {
            let msg = match &self {
                StorageError::Database(sqlx::Error::Database(e)) => e.message().to_string(),
                _ => self.to_string(),
            };
            StorageError::ConstraintViolation(msg)
        } else {
            self
        }
    }
}
