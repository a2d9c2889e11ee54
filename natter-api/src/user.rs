use crate::{Error, STUB_ID};

#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn stub() -> UserId {
        UserId(String::from(STUB_ID))
    }
}

/// Author of a comment. Supplied by the caller and never modified by the tree.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUser {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl CommentUser {
    pub fn new(id: UserId, name: String) -> CommentUser {
        CommentUser {
            id,
            name,
            avatar_url: None,
            is_verified: false,
        }
    }

    pub fn stub() -> CommentUser {
        CommentUser::new(UserId::stub(), String::from("stub"))
    }

    // See comments on other `validate` functions throughout natter-api
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.id.0)?;
        crate::validate_string(&self.name)?;
        if let Some(url) = &self.avatar_url {
            crate::validate_string(url)?;
        }
        Ok(())
    }
}
