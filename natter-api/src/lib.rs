mod action;
pub use action::Action;

mod comment;
pub use comment::{Comment, CommentId};

mod error;
pub use error::Error;

mod reaction;
pub use reaction::{Reaction, ReactionId, ReactionSet, ReactionTemplate};

mod user;
pub use user::{CommentUser, UserId};

pub type Time = chrono::DateTime<chrono::Utc>;

pub const STUB_ID: &str = "ffffffff-ffff-ffff-ffff-ffffffffffff";

// Every string that crosses into the tree from a seed file, a script or a demo
// form goes through one of the `validate` functions throughout natter-api.
// The tree engine itself trusts its inputs.
pub fn validate_string(s: &str) -> Result<(), Error> {
    if s.contains('\0') {
        return Err(Error::NullByteInString(String::from(s)));
    }
    Ok(())
}

/// Content of a comment or reply: no null byte, and not only whitespace
pub fn validate_content(s: &str) -> Result<(), Error> {
    validate_string(s)?;
    if s.trim().is_empty() {
        return Err(Error::EmptyContent);
    }
    Ok(())
}
