pub mod product_repository;
pub mod user_repository;

use mongodb::error::{Error, ErrorKind, WriteError, WriteFailure};

/// A unique-index violation. Conflicting concurrent writes are serialized by
/// the index, so the losing insert surfaces here.
pub(crate) fn is_duplicate_key(err: &Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(WriteError { code: 11000, .. }))
    )
}
