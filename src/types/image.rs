use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::types::error::AppError;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateImage {
    pub file_name: String,
    pub description: Option<String>,
    pub url: String,
}

impl CreateImage {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.file_name.trim().is_empty() {
            return Err(AppError::Validation("file_name must not be empty".into()));
        }
        if self.description.as_ref().is_some_and(|d| d.chars().count() > 512) {
            return Err(AppError::Validation("description is limited to 512 characters".into()));
        }
        if self.url.chars().count() > 512 {
            return Err(AppError::Validation("url is limited to 512 characters".into()));
        }
        match Url::parse(&self.url) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => Ok(()),
            _ => Err(AppError::Validation(format!("`{}` is not an http(s) url", self.url))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ImageIds {
    pub ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str) -> CreateImage {
        CreateImage { file_name: "a.png".into(), description: None, url: url.into() }
    }

    #[test]
    fn only_http_urls_are_accepted() {
        assert!(image("https://cdn.example.com/a.png").validate().is_ok());
        assert!(image("ftp://cdn.example.com/a.png").validate().is_err());
        assert!(image("not a url").validate().is_err());
    }

    #[test]
    fn long_description_is_rejected() {
        let mut img = image("https://cdn.example.com/a.png");
        img.description = Some("x".repeat(513));
        assert!(matches!(img.validate(), Err(AppError::Validation(_))));
    }
}
