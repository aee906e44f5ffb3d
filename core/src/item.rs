use serde::{Deserialize, Serialize};

use crate::{ids::ItemId, store::Keyed, user::UserRef};

/// Availability of a listed item. Flips to `Swapped` when a swap completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Available,
    Swapped,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::Swapped => "swapped",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Books,
    LabReport,
    Notes,
    Food,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Books => "books",
            Category::LabReport => "labReport",
            Category::Notes => "notes",
            Category::Food => "food",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-classification carried only by `Category::Books` listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookType {
    #[serde(rename = "Story Book")]
    StoryBook,
    Textbook,
    Exam,
    Novel,
    Guidebook,
}

impl BookType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::StoryBook => "Story Book",
            BookType::Textbook => "Textbook",
            BookType::Exam => "Exam",
            BookType::Novel => "Novel",
            BookType::Guidebook => "Guidebook",
        }
    }
}

/// An item listed for trade. The store holds a read-only projection owned by
/// the posting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: ItemId,
    pub title: String,
    pub category: Category,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_type: Option<BookType>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(rename = "user")]
    pub owner: UserRef,
    #[serde(default)]
    pub status: ItemStatus,
}

impl Keyed for Item {
    type Key = ItemId;

    fn key(&self) -> &ItemId {
        &self.id
    }
}
