use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "setlink-backend",
        description = "Link-in-bio page builder API",
        version = "0.1.0",
    ),
    paths(crate::api::profile::post_create_profile),
    components(schemas(
        model::NewProfile,
        model::NewLinkEntry,
        model::CreateProfileResult,
    )),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn open_api_json_string() -> Result<String, serde_json::Error> {
        ApiDoc::openapi().to_pretty_json()
    }
}
