use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

pub const HANDLE_MIN_CHARS: usize = 2;
pub const HANDLE_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// One link row submitted with a new profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct NewLinkEntry {
    pub title: String,
    pub url: String,
}

/// Profile creation payload. Field names match the JSON wire format.
///
/// The same constraints are checked in the submission form before the
/// request is sent. [Self::validate] is the server side version of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub handle: String,
    pub description: String,
    pub image_url: String,
    pub links: Vec<NewLinkEntry>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    #[error("Handle must be between 2 and 50 characters")]
    HandleLength,
    #[error("Description must be between 10 and 500 characters")]
    DescriptionLength,
    #[error("Profile image URL is not a valid URL")]
    ImageUrlInvalid,
    #[error("At least one link is required")]
    LinksEmpty,
    #[error("Link title must not be empty")]
    LinkTitleEmpty,
    #[error("Link URL is not a valid URL")]
    LinkUrlInvalid,
}

impl NewProfile {
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        let handle_chars = self.handle.chars().count();
        if !(HANDLE_MIN_CHARS..=HANDLE_MAX_CHARS).contains(&handle_chars) {
            return Err(ProfileValidationError::HandleLength);
        }

        let description_chars = self.description.chars().count();
        if !(DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&description_chars) {
            return Err(ProfileValidationError::DescriptionLength);
        }

        if Url::parse(&self.image_url).is_err() {
            return Err(ProfileValidationError::ImageUrlInvalid);
        }

        if self.links.is_empty() {
            return Err(ProfileValidationError::LinksEmpty);
        }

        for link in &self.links {
            if link.title.is_empty() {
                return Err(ProfileValidationError::LinkTitleEmpty);
            }
            if Url::parse(&link.url).is_err() {
                return Err(ProfileValidationError::LinkUrlInvalid);
            }
        }

        Ok(())
    }
}

/// Public profile info for the rendering page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub handle: String,
    pub description: String,
    pub image_url: String,
    pub links: Vec<LinkEntry>,
}

/// A single (title, URL) pair displayed as a clickable row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LinkEntry {
    pub title: String,
    pub url: String,
}

impl Profile {
    pub fn new(row: ProfileRow, links: Vec<ProfileLinkRow>) -> Self {
        Self {
            handle: row.handle,
            description: row.description,
            image_url: row.image_url,
            links: links
                .into_iter()
                .map(|link| LinkEntry {
                    title: link.title,
                    url: link.url,
                })
                .collect(),
        }
    }
}

/// Profile related database data
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::profile)]
#[diesel(check_for_backend(crate::Db))]
pub struct ProfileRow {
    pub id: i64,
    pub handle: String,
    pub description: String,
    pub image_url: String,
}

/// Link related database data. The `display_order` column
/// keeps the submitted link order.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::profile_link)]
#[diesel(check_for_backend(crate::Db))]
pub struct ProfileLinkRow {
    pub id: i64,
    pub profile_id: i64,
    pub display_order: i64,
    pub title: String,
    pub url: String,
}

/// Response for successful profile creation.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateProfileResult {
    pub message: String,
    pub handle: String,
}

impl CreateProfileResult {
    pub fn link_added(handle: String) -> Self {
        Self {
            message: "Link added".to_string(),
            handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_profile() -> NewProfile {
        NewProfile {
            handle: "alice".to_string(),
            description: "Hello world!".to_string(),
            image_url: "https://x.com/a.png".to_string(),
            links: vec![NewLinkEntry {
                title: "Site".to_string(),
                url: "https://alice.dev".to_string(),
            }],
        }
    }

    #[test]
    fn valid_profile_passes_validation() {
        assert_eq!(valid_profile().validate(), Ok(()));
    }

    #[test]
    fn handle_length_limits() {
        let mut profile = valid_profile();
        profile.handle = "a".to_string();
        assert_eq!(
            profile.validate(),
            Err(ProfileValidationError::HandleLength)
        );

        profile.handle = "ab".to_string();
        assert_eq!(profile.validate(), Ok(()));

        profile.handle = "a".repeat(50);
        assert_eq!(profile.validate(), Ok(()));

        profile.handle = "a".repeat(51);
        assert_eq!(
            profile.validate(),
            Err(ProfileValidationError::HandleLength)
        );
    }

    #[test]
    fn description_length_limits() {
        let mut profile = valid_profile();
        profile.description = "short".to_string();
        assert_eq!(
            profile.validate(),
            Err(ProfileValidationError::DescriptionLength)
        );

        profile.description = "a".repeat(10);
        assert_eq!(profile.validate(), Ok(()));

        profile.description = "a".repeat(500);
        assert_eq!(profile.validate(), Ok(()));

        profile.description = "a".repeat(501);
        assert_eq!(
            profile.validate(),
            Err(ProfileValidationError::DescriptionLength)
        );
    }

    #[test]
    fn image_url_must_parse() {
        let mut profile = valid_profile();
        profile.image_url = "not an url".to_string();
        assert_eq!(
            profile.validate(),
            Err(ProfileValidationError::ImageUrlInvalid)
        );
    }

    #[test]
    fn at_least_one_link_is_required() {
        let mut profile = valid_profile();
        profile.links.clear();
        assert_eq!(profile.validate(), Err(ProfileValidationError::LinksEmpty));
    }

    #[test]
    fn link_title_must_not_be_empty() {
        let mut profile = valid_profile();
        profile.links[0].title = String::new();
        assert_eq!(
            profile.validate(),
            Err(ProfileValidationError::LinkTitleEmpty)
        );
    }

    #[test]
    fn link_url_must_parse() {
        let mut profile = valid_profile();
        profile.links[0].url = "alice.dev".to_string();
        assert_eq!(
            profile.validate(),
            Err(ProfileValidationError::LinkUrlInvalid)
        );
    }

    #[test]
    fn wire_format_field_names() {
        let json = r#"{
            "handle": "alice",
            "description": "Hello world!",
            "imageUrl": "https://x.com/a.png",
            "links": [
                {"title": "Site", "url": "https://alice.dev"},
                {"title": "Blog", "url": "https://alice.dev/blog"}
            ]
        }"#;
        let profile: NewProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.handle, "alice");
        assert_eq!(profile.image_url, "https://x.com/a.png");
        assert_eq!(profile.links.len(), 2);
        assert_eq!(profile.links[0].title, "Site");
        assert_eq!(profile.links[1].title, "Blog");
    }
}
