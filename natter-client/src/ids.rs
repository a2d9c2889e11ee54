use uuid::Uuid;

use crate::{api::CommentId, CommentTree};

/// Source of fresh comment ids. Ids must never repeat within a tree.
pub trait IdGenerator {
    fn next_id(&mut self) -> CommentId;
}

impl<F: FnMut() -> CommentId> IdGenerator for F {
    fn next_id(&mut self) -> CommentId {
        self()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> CommentId {
        CommentId(Uuid::new_v4().to_string())
    }
}

/// Ids of the form `<prefix>-<n>`, for demos and tests that want stable output.
///
/// Once `n` would go past `u64::MAX` it falls back to `<prefix>-<uuid>`,
/// which cannot collide with any numbered id.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: Option<u64>,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> SequentialIds {
        SequentialIds {
            prefix: String::from(prefix),
            next: Some(1),
        }
    }

    /// Start numbering after every `<prefix>-<n>` id already in `tree`
    pub fn after(prefix: &str, tree: &CommentTree) -> SequentialIds {
        let mut res = SequentialIds::new(prefix);
        let last = tree
            .iter()
            .filter_map(|c| res.parse(&c.id))
            .max()
            .unwrap_or(0);
        res.next = last.checked_add(1);
        if res.next.is_none() {
            tracing::warn!(prefix, "seed exhausts numbered ids, using uuids");
        }
        res
    }

    fn parse(&self, id: &CommentId) -> Option<u64> {
        id.0.strip_prefix(&self.prefix)?
            .strip_prefix('-')?
            .parse()
            .ok()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> CommentId {
        match self.next {
            Some(n) => {
                self.next = n.checked_add(1);
                CommentId(format!("{}-{}", self.prefix, n))
            }
            None => CommentId(format!("{}-{}", self.prefix, Uuid::new_v4())),
        }
    }
}
