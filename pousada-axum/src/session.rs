//! Resolution of the caller's identity.

use crate::{
    ApiApplication,
    error::{ApiError, unauthorized},
};
use aide::OperationInput;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};

/// The user making a request, as resolved by [`pousada_core::ports::Application::authenticate`]
/// from the `Authorization: Bearer` header.
///
/// A missing header and a token the application rejects are both answered
/// with `401 Unauthorized`.
pub struct Session(pub String);

impl<T: ApiApplication> FromRequestParts<T> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, app: &T) -> Result<Self, Self::Rejection> {
        let TypedHeader(auth) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, app)
                .await
                .map_err(|_| unauthorized())?;

        app.authenticate(&auth)
            .await
            .map(Session)
            .ok_or_else(unauthorized)
    }
}

// The bearer requirement is declared per route with `security_requirement`.
impl OperationInput for Session {}
