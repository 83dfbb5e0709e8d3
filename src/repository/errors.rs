use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Car with ID '{0}' not found")]
    NotFound(i64),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
