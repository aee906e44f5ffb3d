use thiserror::Error;

use crate::item::{BookType, Category};

pub const MAX_TITLE_LEN: usize = 15;
pub const MAX_DESCRIPTION_LEN: usize = 150;
pub const MAX_IMAGES: usize = 5;

/// Validation failure raised strictly before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {0} characters")]
    TitleTooLong(usize),
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("description must be at most {0} characters")]
    DescriptionTooLong(usize),
    #[error("at least one image is required")]
    NoImages,
    #[error("at most {0} images may be attached")]
    TooManyImages(usize),
    #[error("book type is required for book listings")]
    MissingBookType,
    #[error("book type only applies to book listings")]
    UnexpectedBookType,
}

/// One image file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A not-yet-posted item, as gathered from the posting form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub title: String,
    pub category: Category,
    pub description: String,
    pub book_type: Option<BookType>,
    pub images: Vec<ImageAttachment>,
}

impl ItemDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(DraftError::TitleTooLong(MAX_TITLE_LEN));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(DraftError::EmptyDescription);
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DraftError::DescriptionTooLong(MAX_DESCRIPTION_LEN));
        }

        if self.images.is_empty() {
            return Err(DraftError::NoImages);
        }
        if self.images.len() > MAX_IMAGES {
            return Err(DraftError::TooManyImages(MAX_IMAGES));
        }

        match (self.category, &self.book_type) {
            (Category::Books, None) => Err(DraftError::MissingBookType),
            (Category::Books, Some(_)) => Ok(()),
            (_, Some(_)) => Err(DraftError::UnexpectedBookType),
            (_, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageAttachment {
        ImageAttachment {
            file_name: "cover.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes: vec![0u8; 4],
        }
    }

    fn draft() -> ItemDraft {
        ItemDraft {
            title: "Lab notes".to_owned(),
            category: Category::Notes,
            description: "Weeks one through six".to_owned(),
            book_type: None,
            images: vec![image()],
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn title_and_description_limits() {
        let mut d = draft();
        d.title = "x".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(d.validate(), Err(DraftError::TitleTooLong(MAX_TITLE_LEN)));

        let mut d = draft();
        d.title = "  ".to_owned();
        assert_eq!(d.validate(), Err(DraftError::EmptyTitle));

        let mut d = draft();
        d.description = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert_eq!(
            d.validate(),
            Err(DraftError::DescriptionTooLong(MAX_DESCRIPTION_LEN))
        );
    }

    #[test]
    fn image_count_limits() {
        let mut d = draft();
        d.images.clear();
        assert_eq!(d.validate(), Err(DraftError::NoImages));

        let mut d = draft();
        d.images = vec![image(); MAX_IMAGES + 1];
        assert_eq!(d.validate(), Err(DraftError::TooManyImages(MAX_IMAGES)));

        let mut d = draft();
        d.images = vec![image(); MAX_IMAGES];
        assert!(d.validate().is_ok());
    }

    #[test]
    fn book_type_is_conditional_on_category() {
        let mut d = draft();
        d.category = Category::Books;
        assert_eq!(d.validate(), Err(DraftError::MissingBookType));

        d.book_type = Some(BookType::Novel);
        assert!(d.validate().is_ok());

        d.category = Category::Food;
        assert_eq!(d.validate(), Err(DraftError::UnexpectedBookType));
    }
}
