use crate::{CommentId, ReactionId};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Comment not found {0:?}")]
    CommentNotFound(CommentId),

    #[error("Reaction {reaction:?} not found on comment {comment:?}")]
    ReactionNotFound {
        comment: CommentId,
        reaction: ReactionId,
    },

    #[error("Comment id used twice in the same tree {0:?}")]
    DuplicateComment(CommentId),

    #[error("Reaction id used twice in the same set {0:?}")]
    DuplicateReaction(ReactionId),

    #[error("Comment {comment:?} names {found:?} as its parent but sits under {expected:?}")]
    ParentMismatch {
        comment: CommentId,
        expected: Option<CommentId>,
        found: Option<CommentId>,
    },

    #[error("Reaction {reaction:?} on comment {comment:?} is active with a count of 0")]
    InconsistentReaction {
        comment: CommentId,
        reaction: ReactionId,
    },

    #[error("Comment content is empty")]
    EmptyContent,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),
}

impl Error {
    /// Whether this error only says that the targeted node does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::CommentNotFound(_) | Error::ReactionNotFound { .. }
        )
    }
}
