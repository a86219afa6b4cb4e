//! Extractors whose rejections use the JSON error body.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::errors::JsonApiError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonApiError))]
pub struct ApiJson<T>(pub T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response { axum::Json(self.0).into_response() }
}

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(JsonApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(JsonApiError))]
pub struct ApiQuery<T>(pub T);

/// `Multipart` with a JSON rejection.
pub struct ApiMultipart(pub Multipart);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for ApiMultipart {
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(Multipart::from_request(req, state).await?))
    }
}
