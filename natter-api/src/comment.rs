use crate::{CommentUser, Error, ReactionSet, Time};

#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct CommentId(pub String);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub author: CommentUser,
    pub created_at: Time,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Time>,
    #[serde(default)]
    pub is_edited: bool,

    /// Set on replies only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,

    #[serde(default)]
    pub reactions: ReactionSet,

    /// Replies in chronological order
    #[serde(default)]
    pub replies: im::Vector<Comment>,
}

impl Comment {
    pub fn new(
        id: CommentId,
        content: String,
        author: CommentUser,
        created_at: Time,
        reactions: ReactionSet,
    ) -> Comment {
        Comment {
            id,
            content,
            author,
            created_at,
            updated_at: None,
            is_edited: false,
            parent_id: None,
            reactions,
            replies: im::Vector::new(),
        }
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Check this comment and every reply below it.
    ///
    /// Each reply must name the comment holding it as its parent. The
    /// comment's own `parent_id` is left to whoever holds it.
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.id.0)?;
        crate::validate_content(&self.content)?;
        self.author.validate()?;
        for r in self.reactions.iter() {
            r.validate()?;
            if r.is_active && r.count == 0 {
                return Err(Error::InconsistentReaction {
                    comment: self.id.clone(),
                    reaction: r.id.clone(),
                });
            }
        }
        for reply in self.replies.iter() {
            if reply.parent_id.as_ref() != Some(&self.id) {
                return Err(Error::ParentMismatch {
                    comment: reply.id.clone(),
                    expected: Some(self.id.clone()),
                    found: reply.parent_id.clone(),
                });
            }
            reply.validate()?;
        }
        Ok(())
    }

    /// Number of comments below this one, at any depth
    pub fn reply_count(&self) -> usize {
        self.replies.iter().map(|r| 1 + r.reply_count()).sum()
    }
}
