use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::app::{GetConfig, ReadData, StateBase};

mod html;

pub const PATH_CREATE_PROFILE_PAGE: &str = "/";
pub const PATH_PROFILE_PAGE: &str = "/{handle}";

/// Submission form page.
///
/// The page script validates the form, posts the profile JSON and
/// redirects to the created profile page.
pub async fn get_create_profile_page<S: StateBase + GetConfig>(
    State(state): State<S>,
) -> Html<String> {
    Html(html::create_profile_page(
        state.config().public_base_url().as_str(),
    ))
}

/// Public profile page.
pub async fn get_profile_page<S: StateBase + ReadData>(
    State(state): State<S>,
    Path(handle): Path<String>,
) -> Response {
    match state.read().profile_with_links(&handle).await {
        Ok(Some(profile)) => Html(html::profile_page(&profile)).into_response(),
        Ok(None) => {
            (StatusCode::NOT_FOUND, Html(html::not_found_page(&handle))).into_response()
        }
        Err(e) => {
            error!("Profile page error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(html::internal_error_page()),
            )
                .into_response()
        }
    }
}
