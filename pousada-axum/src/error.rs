//! Mapping of booking failures onto HTTP responses.

use axum::http::StatusCode;
use pousada_core::services::BookingError;
use tracing::{Level, event};

/// The error half of every handler's result
pub(crate) type ApiError = (StatusCode, String);

pub(crate) fn unauthorized() -> ApiError {
    (StatusCode::UNAUTHORIZED, "not authorized".to_string())
}

/// Translate a booking failure into a status code and a message.
///
/// Storage failures are logged and replaced with a generic message so no
/// internals leak to the client.
pub(crate) fn api_error<E: std::error::Error>(err: BookingError<E>) -> ApiError {
    let status = match &err {
        BookingError::InvalidRange(_) | BookingError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        BookingError::NotFound => StatusCode::NOT_FOUND,
        BookingError::RoomUnavailable(_) | BookingError::InvalidState(_) => StatusCode::CONFLICT,
        BookingError::PaymentProvider(_) => {
            event!(Level::WARN, err = err.to_string());
            StatusCode::BAD_GATEWAY
        }
        BookingError::Storage(_) => {
            event!(Level::ERROR, err = err.to_string());
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal storage error".to_string(),
            );
        }
    };
    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pousada_core::models::InvalidRange;
    use rstest::rstest;

    #[derive(Debug, thiserror::Error)]
    #[error("disk I/O error at /var/lib/pousada.db")]
    struct DiskError;

    #[rstest]
    #[case(BookingError::InvalidRange(InvalidRange), StatusCode::BAD_REQUEST)]
    #[case(BookingError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST)]
    #[case(BookingError::NotFound, StatusCode::NOT_FOUND)]
    #[case(BookingError::RoomUnavailable("suite-301".into()), StatusCode::CONFLICT)]
    #[case(BookingError::InvalidState("x".into()), StatusCode::CONFLICT)]
    #[case(BookingError::PaymentProvider("x".into()), StatusCode::BAD_GATEWAY)]
    #[case(BookingError::Storage(DiskError), StatusCode::INTERNAL_SERVER_ERROR)]
    fn statuses_follow_the_failure(
        #[case] err: BookingError<DiskError>,
        #[case] expected: StatusCode,
    ) {
        assert_eq!(api_error(err).0, expected);
    }

    #[test]
    fn storage_details_are_not_disclosed() {
        let (_, message) = api_error(BookingError::Storage(DiskError));
        assert!(!message.contains("/var/lib"));
    }
}
