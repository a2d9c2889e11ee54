use std::{collections::HashSet, sync::Arc};

use chrono::Utc;

use crate::{
    api::{Comment, CommentId, CommentUser, Error, Reaction, ReactionId},
    lookup, IdGenerator, Order, ReplyNesting, TreeConfig,
};

/// Top-level comments, newest first, each holding its replies.
///
/// A `CommentTree` is a value: every mutation returns a new tree and leaves
/// `self` untouched. Cloning is cheap, and a mutation only copies the vectors
/// on the path to the node it changes, so keeping old trees around (for undo,
/// or to diff against in a UI) costs little.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct CommentTree {
    comments: im::Vector<Comment>,
    #[serde(skip)]
    config: Arc<TreeConfig>,
}

impl CommentTree {
    pub fn new(config: TreeConfig) -> CommentTree {
        CommentTree {
            comments: im::Vector::new(),
            config: Arc::new(config),
        }
    }

    /// Build a tree from seed data.
    ///
    /// Every comment goes through `Comment::validate`, top-level comments must
    /// not name a parent, and no comment id may appear twice.
    pub fn from_comments(comments: Vec<Comment>, config: TreeConfig) -> Result<CommentTree, Error> {
        for c in comments.iter() {
            if c.parent_id.is_some() {
                return Err(Error::ParentMismatch {
                    comment: c.id.clone(),
                    expected: None,
                    found: c.parent_id.clone(),
                });
            }
            c.validate()?;
        }
        let res = CommentTree {
            comments: comments.into_iter().collect(),
            config: Arc::new(config),
        };
        let mut seen = HashSet::new();
        for c in res.iter() {
            if !seen.insert(&c.id) {
                return Err(Error::DuplicateComment(c.id.clone()));
            }
        }
        Ok(res)
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn with_config(&self, config: TreeConfig) -> CommentTree {
        CommentTree {
            comments: self.comments.clone(),
            config: Arc::new(config),
        }
    }

    pub fn comments(&self) -> &im::Vector<Comment> {
        &self.comments
    }

    /// Number of top-level comments
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Number of comments at any depth
    pub fn total_count(&self) -> usize {
        self.comments.iter().map(|c| 1 + c.reply_count()).sum()
    }

    pub fn find(&self, id: &CommentId) -> Option<&Comment> {
        lookup::find_in(&self.comments, id)
    }

    /// Every comment, depth-first, each one before its replies
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![self.comments.iter()],
        }
    }

    /// Top-level comments in `order`. Replies keep their own order.
    pub fn sorted(&self, order: Order) -> Vec<Comment> {
        let mut res = self.comments.iter().cloned().collect::<Vec<_>>();
        order.sort(&mut res, &self.config.popular_reaction);
        res
    }

    fn new_comment(&self, ids: &mut impl IdGenerator, content: String, author: CommentUser) -> Comment {
        Comment::new(
            ids.next_id(),
            content,
            author,
            Utc::now(),
            self.config.initial_reactions(),
        )
    }

    fn path_to(&self, id: &CommentId) -> Result<Vec<usize>, Error> {
        lookup::locate(&self.comments, id).ok_or_else(|| Error::CommentNotFound(id.clone()))
    }

    /// Prepend a new top-level comment
    pub fn add_comment(
        &self,
        ids: &mut impl IdGenerator,
        content: String,
        author: CommentUser,
    ) -> (CommentTree, Comment) {
        let comment = self.new_comment(ids, content, author);
        let mut res = self.clone();
        res.comments.push_front(comment.clone());
        tracing::debug!(id = ?comment.id, "added comment");
        (res, comment)
    }

    /// Append a reply under `parent_id`, placed according to `TreeConfig::nesting`
    pub fn add_reply(
        &self,
        ids: &mut impl IdGenerator,
        parent_id: &CommentId,
        content: String,
        author: CommentUser,
    ) -> Result<(CommentTree, Comment), Error> {
        let mut path = self.path_to(parent_id)?;
        if self.config.nesting == ReplyNesting::Flatten {
            path.truncate(1);
        }
        let mut reply = self.new_comment(ids, content, author);
        let mut res = self.clone();
        let parent = lookup::node_mut(&mut res.comments, &path)
            .ok_or_else(|| Error::CommentNotFound(parent_id.clone()))?;
        reply.parent_id = Some(parent.id.clone());
        parent.replies.push_back(reply.clone());
        tracing::debug!(id = ?reply.id, parent = ?parent.id, "added reply");
        Ok((res, reply))
    }

    /// Replace the content of comment `id`, marking it as edited
    pub fn edit(&self, id: &CommentId, content: String) -> Result<(CommentTree, Comment), Error> {
        let path = self.path_to(id)?;
        let mut res = self.clone();
        let c = lookup::node_mut(&mut res.comments, &path)
            .ok_or_else(|| Error::CommentNotFound(id.clone()))?;
        c.content = content;
        c.updated_at = Some(Utc::now());
        c.is_edited = true;
        let edited = c.clone();
        tracing::debug!(?id, "edited comment");
        Ok((res, edited))
    }

    /// Remove comment `id` and everything below it. Removing a missing id
    /// returns an identical tree.
    pub fn delete(&self, id: &CommentId) -> (CommentTree, Option<Comment>) {
        let path = match lookup::locate(&self.comments, id) {
            Some(path) => path,
            None => return (self.clone(), None),
        };
        let mut res = self.clone();
        let removed = lookup::remove_at(&mut res.comments, &path);
        if let Some(removed) = &removed {
            tracing::debug!(?id, replies = removed.reply_count(), "deleted comment");
        }
        (res, removed)
    }

    /// Flip the viewer's `reaction` on comment `id`
    pub fn toggle_reaction(
        &self,
        id: &CommentId,
        reaction: &ReactionId,
    ) -> Result<(CommentTree, Reaction), Error> {
        let path = self.path_to(id)?;
        let not_found = || Error::ReactionNotFound {
            comment: id.clone(),
            reaction: reaction.clone(),
        };
        let has_reaction = lookup::find_in(&self.comments, id)
            .map(|c| c.reactions.get(reaction).is_some())
            .unwrap_or(false);
        if !has_reaction {
            return Err(not_found());
        }
        let mut res = self.clone();
        let toggled = lookup::node_mut(&mut res.comments, &path)
            .and_then(|c| c.reactions.toggle(reaction))
            .cloned()
            .ok_or_else(not_found)?;
        tracing::debug!(?id, ?reaction, count = toggled.count, "toggled reaction");
        Ok((res, toggled))
    }
}

pub struct Iter<'a> {
    stack: Vec<im::vector::Iter<'a, Comment>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Comment;

    fn next(&mut self) -> Option<&'a Comment> {
        loop {
            match self.stack.last_mut()?.next() {
                Some(c) => {
                    self.stack.push(c.replies.iter());
                    return Some(c);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
