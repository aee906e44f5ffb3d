use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Display reference to a user, as embedded in items and swap requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub fullname: String,
}

impl UserRef {
    pub fn new(id: impl Into<UserId>, fullname: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fullname: fullname.into(),
        }
    }
}

/// The authenticated profile returned by the viewer-profile snapshot fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub fullname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Viewer {
    pub fn as_user_ref(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            fullname: self.fullname.clone(),
        }
    }
}
