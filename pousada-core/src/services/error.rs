use crate::models::InvalidRange;
use thiserror::Error;

/// The ways a booking operation can fail.
///
/// The type is generic over the storage adapter's error, which is carried
/// untouched in [`BookingError::Storage`].
#[derive(Debug, Error)]
pub enum BookingError<E> {
    /// The stay does not end strictly after it starts
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    /// A confirmed booking already overlaps the requested stay
    #[error("room {0} is not available for the selected dates")]
    RoomUnavailable(String),

    /// The booking's status does not allow the requested transition
    #[error("{0}")]
    InvalidState(String),

    /// The booking does not exist or is not owned by the caller.
    ///
    /// The two cases are deliberately indistinguishable to the caller.
    #[error("booking not found")]
    NotFound,

    /// The caller's input is malformed
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The document store failed
    #[error("storage failure: {0}")]
    Storage(#[source] E),

    /// The payment provider failed
    #[error("payment provider failure: {0}")]
    PaymentProvider(String),
}

impl<E> BookingError<E> {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}
