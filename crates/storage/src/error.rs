use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found")]
    NotFound,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Stable machine-readable code carried in error envelopes
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Database(_) | Self::Migration(_) => "DATABASE_ERROR",
            Self::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = error {
            match db_err.code().as_deref() {
                Some("23505") => return Self::Validation("Record already exists".to_string()),
                Some("23503") => {
                    return Self::Validation("Referenced record does not exist".to_string());
                }
                Some("23514") => return Self::Validation(db_err.message().to_string()),
                _ => {}
            }
        }
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }
        Self::Database(error.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        Self::Unexpected(format!("Malformed record: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(StorageError::NotFound.code(), "NOT_FOUND");
        assert_eq!(StorageError::validation("x").code(), "VALIDATION_ERROR");
        assert_eq!(StorageError::forbidden("x").code(), "FORBIDDEN");
        assert_eq!(
            StorageError::Database("boom".into()).code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            StorageError::from(sqlx::Error::RowNotFound),
            StorageError::NotFound
        ));
    }
}
