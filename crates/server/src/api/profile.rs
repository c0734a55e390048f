use axum::extract::State;
use model::{CreateProfileResult, NewProfile};
use tracing::error;

use crate::{
    app::{StateBase, WriteData},
    data::DataError,
    utils::{ApiError, Json},
};

pub const PATH_CREATE_PROFILE: &str = "/api/setlink";

/// Create a new profile.
///
/// The payload is validated against the same rules the submission form
/// checks before sending the request. The inserted document is immutable:
/// there is no update or delete operation.
#[utoipa::path(
    post,
    path = "/api/setlink",
    request_body = NewProfile,
    responses(
        (status = 200, description = "Profile created.", body = CreateProfileResult),
        (status = 400, description = "Invalid profile data or handle already exists."),
        (status = 500, description = "Internal server error."),
    ),
)]
pub async fn post_create_profile<S: StateBase + WriteData>(
    State(state): State<S>,
    Json(new_profile): Json<NewProfile>,
) -> Result<Json<CreateProfileResult>, ApiError> {
    if let Err(e) = new_profile.validate() {
        return Err(ApiError::bad_request(e.to_string()));
    }

    let handle = new_profile.handle.clone();
    match state.write().create_profile(new_profile).await {
        Ok(()) => Ok(CreateProfileResult::link_added(handle).into()),
        Err(e) => match e.current_context() {
            DataError::ProfileAlreadyExists => Err(ApiError::bad_request("Handle already exists")),
            DataError::Diesel => {
                error!("Profile creation error: {:?}", e);
                Err(ApiError::internal_server_error())
            }
        },
    }
}
