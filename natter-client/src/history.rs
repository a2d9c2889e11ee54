use std::collections::VecDeque;

use crate::{api::Action, Applied, CommentTree, IdGenerator, Outcome};

/// The current tree, with the trees it replaced kept around for undo
#[derive(Clone, Debug)]
pub struct History {
    current: CommentTree,
    undo: VecDeque<CommentTree>,
    redo: Vec<CommentTree>,
}

impl History {
    pub fn new(tree: CommentTree) -> History {
        History {
            current: tree,
            undo: VecDeque::new(),
            redo: Vec::new(),
        }
    }

    pub fn current(&self) -> &CommentTree {
        &self.current
    }

    /// Apply `action`, recording the previous tree unless nothing changed
    pub fn apply(&mut self, ids: &mut impl IdGenerator, action: Action) -> Outcome {
        let Applied { tree, outcome } = self.current.apply(ids, action);
        if outcome.is_applied() {
            let previous = std::mem::replace(&mut self.current, tree);
            self.undo.push_back(previous);
            while self.undo.len() > self.current.config().history_limit {
                self.undo.pop_front();
            }
            self.redo.clear();
        }
        outcome
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Go back one step, returning false if there was nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.undo.pop_back() {
            None => false,
            Some(previous) => {
                let undone = std::mem::replace(&mut self.current, previous);
                self.redo.push(undone);
                true
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            None => false,
            Some(next) => {
                let previous = std::mem::replace(&mut self.current, next);
                self.undo.push_back(previous);
                true
            }
        }
    }
}
