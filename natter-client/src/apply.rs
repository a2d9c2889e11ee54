use crate::{
    api::{Action, Comment, CommentId, Error, Reaction},
    CommentTree, IdGenerator,
};

/// What a single `Action` did to the tree
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// A new comment or reply
    Added(Comment),

    /// The comment after its edit
    Edited(Comment),

    /// The removed comment, with the replies that went away with it
    Deleted(Comment),

    Toggled {
        comment_id: CommentId,
        reaction: Reaction,
    },

    /// Nothing matched, the tree is unchanged
    NotFound(Error),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, Outcome::NotFound(_))
    }
}

#[derive(Clone, Debug)]
pub struct Applied {
    pub tree: CommentTree,
    pub outcome: Outcome,
}

impl CommentTree {
    /// Run `action` against this tree.
    ///
    /// Actions that target a comment or reaction that is not there do not
    /// fail: they return an unchanged tree along with `Outcome::NotFound`,
    /// and the caller decides whether that deserves user feedback.
    pub fn apply(&self, ids: &mut impl IdGenerator, action: Action) -> Applied {
        let res = match action {
            Action::AddComment { content, author } => {
                let (tree, c) = self.add_comment(ids, content, author);
                Ok((tree, Outcome::Added(c)))
            }
            Action::AddReply {
                parent_id,
                content,
                author,
            } => self
                .add_reply(ids, &parent_id, content, author)
                .map(|(tree, c)| (tree, Outcome::Added(c))),
            Action::Edit {
                comment_id,
                content,
            } => self
                .edit(&comment_id, content)
                .map(|(tree, c)| (tree, Outcome::Edited(c))),
            Action::Delete { comment_id } => match self.delete(&comment_id) {
                (tree, Some(c)) => Ok((tree, Outcome::Deleted(c))),
                (_, None) => Err(Error::CommentNotFound(comment_id)),
            },
            Action::ToggleReaction {
                comment_id,
                reaction_id,
            } => self
                .toggle_reaction(&comment_id, &reaction_id)
                .map(|(tree, reaction)| {
                    (
                        tree,
                        Outcome::Toggled {
                            comment_id,
                            reaction,
                        },
                    )
                }),
        };
        match res {
            Ok((tree, outcome)) => Applied { tree, outcome },
            Err(err) => {
                tracing::warn!(%err, "ignoring action on missing target");
                Applied {
                    tree: self.clone(),
                    outcome: Outcome::NotFound(err),
                }
            }
        }
    }
}
