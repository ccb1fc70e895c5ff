use thiserror::Error;
use tonic::Status;

use crate::proto;

/// In-band error codes carried in `Error.code`.
pub mod codes {
    pub const FORBIDDEN: &str = "403";
    pub const NOT_FOUND: &str = "404";
    pub const INTERNAL: &str = "500";
    pub const INVALID_PAGE: &str = "400-200";
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("You are not authenticated")]
    Unauthenticated,

    #[error("Not the owner of the photo")]
    NotOwner,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid page, returning results from scratch")]
    InvalidPage,

    #[error("Authentication failed: {0}")]
    SignIn(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The in-band `Error` message sent back to clients. Store failures are
    /// reported without their details.
    pub fn to_proto(&self) -> proto::Error {
        let (code, details) = match self {
            AppError::Unauthenticated | AppError::NotOwner => (codes::FORBIDDEN, self.to_string()),
            AppError::NotFound(msg) => (codes::NOT_FOUND, msg.clone()),
            AppError::InvalidPage => (codes::INVALID_PAGE, self.to_string()),
            AppError::SignIn(msg) => (codes::INTERNAL, msg.clone()),
            AppError::Storage(_) => {
                (codes::INTERNAL, "Impossible to start file upload".to_string())
            }
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Token(_)
            | AppError::Internal(_) => (codes::INTERNAL, "Database error".to_string()),
        };
        proto::Error {
            code: code.to_string(),
            details,
        }
    }
}

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Database(e) => Status::internal(format!("Database error: {}", e)),
            AppError::Migration(e) => Status::internal(format!("Migration error: {}", e)),
            AppError::Unauthenticated => Status::unauthenticated("You are not authenticated"),
            AppError::NotOwner => Status::permission_denied("Not the owner of the photo"),
            AppError::NotFound(msg) => Status::not_found(msg),
            AppError::InvalidPage => {
                Status::invalid_argument("Invalid page, returning results from scratch")
            }
            AppError::SignIn(msg) => Status::unauthenticated(msg),
            AppError::Token(e) => Status::unauthenticated(format!("Token error: {}", e)),
            AppError::Storage(msg) => Status::internal(format!("Storage error: {}", msg)),
            AppError::Internal(msg) => Status::internal(msg),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
