//! Error type shared by every forum store port.

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Errors raised by forum store adapters.
    pub enum StoreError {
        /// The store could not be reached.
        Connection { message: String } => "store connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "store query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Duplicate { message: String } => "duplicate entry: {message}",
    }
}

/// Translate a store failure into the domain error returned to callers.
///
/// Services intercept [`StoreError::Duplicate`] where a conflict has a
/// dedicated response; anything left over becomes a plain conflict.
pub(crate) fn map_store_error(error: StoreError) -> Error {
    match error {
        StoreError::Connection { message } => {
            Error::service_unavailable(format!("forum store unavailable: {message}"))
        }
        StoreError::Query { message } => Error::internal(format!("forum store error: {message}")),
        StoreError::Duplicate { message } => Error::conflict(message),
    }
}
