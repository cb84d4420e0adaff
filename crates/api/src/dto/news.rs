use mini_shop_core::NewsId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::field_error;
use crate::models::{News, NewsInput};

/// News entry as exchanged over `/api/news`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewsDto {
    #[serde(default)]
    pub id: Option<NewsId>,

    #[serde(default)]
    #[validate(required, length(max = 255), does_not_contain(pattern = "\0"))]
    pub image: Option<String>,
}

impl NewsDto {
    /// Validate the body and extract the column values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` if `image` is missing, too long or contains NUL.
    pub fn into_input(self) -> Result<NewsInput, ValidationErrors> {
        self.validate()?;
        let Some(image) = self.image else {
            return Err(field_error("image", "required"));
        };
        Ok(NewsInput { image })
    }
}

impl From<News> for NewsDto {
    fn from(news: News) -> Self {
        Self {
            id: Some(news.id),
            image: Some(news.image),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_image_is_required() {
        let errors = NewsDto::default().into_input().unwrap_err();
        assert!(errors.field_errors().contains_key("image"));
    }

    #[test]
    fn test_image_rejects_nul() {
        let dto: NewsDto = serde_json::from_str(r#"{"image": "a\u0000.png"}"#).unwrap();
        let errors = dto.into_input().unwrap_err();
        assert_eq!(errors.field_errors()["image"][0].code, "does_not_contain");
    }

    #[test]
    fn test_serializes_id_and_image() {
        let dto = NewsDto::from(News {
            id: NewsId::new(3),
            image: "banner.png".to_string(),
        });
        assert_eq!(
            serde_json::to_string(&dto).unwrap(),
            r#"{"id":3,"image":"banner.png"}"#
        );
    }
}
