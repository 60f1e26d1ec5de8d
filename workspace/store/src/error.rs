use thiserror::Error;

/// Error types for the store module
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error from the database operations. Not recovered from here; the
    /// caller surfaces it as an internal failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A uniqueness pre-check failed (duplicate username or email).
    /// The unique index remains the authoritative guard under races.
    #[error("Conflict on {field}: {message}")]
    Conflict {
        field: &'static str,
        message: String,
    },

    /// A field value is out of bounds (negative price, self-follow).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced row does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Error from password hashing
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

/// Type alias for Result with StoreError
pub type Result<T> = std::result::Result<T, StoreError>;
