use crate::{CommentId, CommentUser, Error, ReactionId};

/// One call into the comment tree, as sent by a demo form or replayed from a script
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Action {
    AddComment {
        content: String,
        author: CommentUser,
    },
    AddReply {
        parent_id: CommentId,
        content: String,
        author: CommentUser,
    },
    Edit {
        comment_id: CommentId,
        content: String,
    },
    Delete {
        comment_id: CommentId,
    },
    ToggleReaction {
        comment_id: CommentId,
        reaction_id: ReactionId,
    },
}

impl Action {
    /// Comment this action targets, if it targets an existing one
    pub fn target(&self) -> Option<&CommentId> {
        match self {
            Action::AddComment { .. } => None,
            Action::AddReply { parent_id, .. } => Some(parent_id),
            Action::Edit { comment_id, .. }
            | Action::Delete { comment_id }
            | Action::ToggleReaction { comment_id, .. } => Some(comment_id),
        }
    }

    // See comments on other `validate` functions throughout natter-api
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Action::AddComment { content, author } => {
                author.validate()?;
                crate::validate_content(content)
            }
            Action::AddReply {
                parent_id,
                content,
                author,
            } => {
                crate::validate_string(&parent_id.0)?;
                author.validate()?;
                crate::validate_content(content)
            }
            Action::Edit {
                comment_id,
                content,
            } => {
                crate::validate_string(&comment_id.0)?;
                crate::validate_content(content)
            }
            Action::Delete { comment_id } => crate::validate_string(&comment_id.0),
            Action::ToggleReaction {
                comment_id,
                reaction_id,
            } => {
                crate::validate_string(&comment_id.0)?;
                crate::validate_string(&reaction_id.0)
            }
        }
    }
}
