use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

// Postgres error codes: 23505 unique_violation, 23503 foreign_key_violation.
impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        if matches!(err, SqlxError::RowNotFound) {
            return RepositoryError::NotFound;
        }

        if let SqlxError::Database(db_err) = &err {
            let constraint = db_err.constraint().map(|c| c.to_string());

            match db_err.code().as_deref() {
                Some("23505") => {
                    return RepositoryError::AlreadyExists(
                        constraint.unwrap_or_else(|| "unique constraint".to_string()),
                    );
                }
                Some("23503") => {
                    return RepositoryError::ForeignKey(
                        constraint.unwrap_or_else(|| "foreign key".to_string()),
                    );
                }
                _ => {}
            }
        }

        RepositoryError::Sqlx(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = RepositoryError::from(SqlxError::RowNotFound);
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn other_errors_stay_wrapped() {
        let err = RepositoryError::from(SqlxError::PoolClosed);
        assert!(matches!(err, RepositoryError::Sqlx(_)));
    }
}
