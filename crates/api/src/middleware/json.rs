//! JSON body extractor with the API's error envelope.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Like [`Json`], but rejects malformed or invalid bodies with
/// [`AppError::BadRequest`] so clients get the standard
/// `{ "error", "code" }` body and a 400 instead of axum's plain-text 422.
///
/// ```ignore
/// async fn create(JsonBody(input): JsonBody<CreateThing>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}
