//! The module contains the error the directory can throw.
//!
//! The directory has no validation of its own: malformed criteria are handed
//! to the storage as they are, so every failure is a [`Database`] error.
//!
//!  [`Database`]: DirectoryError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Directory custom errors.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error(transparent)]
    Database(#[from] DbErr),
}
