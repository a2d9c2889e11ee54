#![cfg(test)]

use std::{cmp, ops::RangeTo, panic::AssertUnwindSafe};

use bolero::generator::TypeGenerator;

use natter_client::{
    api::{Action, CommentId, CommentUser, ReactionId, UserId},
    Applied, CommentTree, SequentialIds, TreeConfig,
};

use crate::*;

macro_rules! do_tokio_test {
    ( $name:ident, $typ:ty, $fn:expr ) => {
        #[test]
        fn $name() {
            let runtime = AssertUnwindSafe(
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("failed initializing tokio runtime"),
            );
            bolero::check!()
                .with_type::<$typ>()
                .cloned()
                .for_each(move |v| {
                    let () = runtime.block_on($fn(v));
                })
        }
    };
}

#[derive(Clone, Debug, bolero::generator::TypeGenerator)]
enum FuzzOp {
    AddComment {
        #[generator(bolero::generator::gen_with::<String>().len(0..10usize))]
        content: String,
    },
    AddReply {
        parent: usize,
        #[generator(bolero::generator::gen_with::<String>().len(0..10usize))]
        content: String,
    },
    Edit {
        target: usize,
        #[generator(bolero::generator::gen_with::<String>().len(0..10usize))]
        content: String,
    },
    Delete {
        target: usize,
    },
    Toggle {
        target: usize,
    },
    Undo,
    Redo,
}

fn resize_int(fuzz_id: usize, RangeTo { end }: RangeTo<usize>) -> Option<usize> {
    if end == 0 {
        return None;
    }
    let bucket_size = cmp::max(1, usize::MAX / end); // in case we rounded to 0
    let id = fuzz_id / bucket_size;
    Some(cmp::min(id, end - 1)) // in case id was actually over end - 1 due to rounding
}

fn pick(tree: &CommentTree, fuzz_id: usize) -> CommentId {
    resize_int(fuzz_id, ..tree.total_count())
        .and_then(|i| tree.iter().nth(i))
        .map(|c| c.id.clone())
        .unwrap_or_else(|| CommentId(String::from("missing")))
}

fn author() -> CommentUser {
    CommentUser::new(UserId(String::from("fuzzer")), String::from("Fuzzer"))
}

/// What a viewer can see of a tree, timestamps aside
fn shape(tree: &CommentTree) -> Vec<(CommentId, Option<CommentId>, String, bool, u64)> {
    tree.iter()
        .map(|c| {
            (
                c.id.clone(),
                c.parent_id.clone(),
                c.content.clone(),
                c.is_edited,
                c.reactions.count(&ReactionId::like()),
            )
        })
        .collect()
}

/// The server against a plain tree plus undo stack, driven by the same ops
struct ComparativeFuzzer {
    server: MockServer,
    feed: mpsc::UnboundedReceiver<FeedMessage>,
    ids: SequentialIds,
    past: Vec<CommentTree>,
    future: Vec<CommentTree>,
    tree: CommentTree,
}

impl ComparativeFuzzer {
    fn new() -> ComparativeFuzzer {
        let mut server = MockServer::new(TreeConfig::default());
        let feed = server.action_feed();
        ComparativeFuzzer {
            server,
            feed,
            ids: SequentialIds::new(ID_PREFIX),
            past: Vec::new(),
            future: Vec::new(),
            tree: CommentTree::default(),
        }
    }

    fn action_for(&self, op: FuzzOp) -> Option<Action> {
        Some(match op {
            FuzzOp::AddComment { content } => Action::AddComment {
                content,
                author: author(),
            },
            FuzzOp::AddReply { parent, content } => Action::AddReply {
                parent_id: pick(&self.tree, parent),
                content,
                author: author(),
            },
            FuzzOp::Edit { target, content } => Action::Edit {
                comment_id: pick(&self.tree, target),
                content,
            },
            FuzzOp::Delete { target } => Action::Delete {
                comment_id: pick(&self.tree, target),
            },
            FuzzOp::Toggle { target } => Action::ToggleReaction {
                comment_id: pick(&self.tree, target),
                reaction_id: ReactionId::like(),
            },
            FuzzOp::Undo | FuzzOp::Redo => return None,
        })
    }

    async fn execute_fuzz_op(&mut self, op: FuzzOp) {
        match op {
            FuzzOp::Undo => {
                let moved = self.server.undo().await;
                assert_eq!(moved, !self.past.is_empty());
                if let Some(prev) = self.past.pop() {
                    self.future.push(std::mem::replace(&mut self.tree, prev));
                    assert!(matches!(self.feed.try_recv(), Ok(FeedMessage::Reset(_))));
                }
            }
            FuzzOp::Redo => {
                let moved = self.server.redo().await;
                assert_eq!(moved, !self.future.is_empty());
                if let Some(next) = self.future.pop() {
                    self.past.push(std::mem::replace(&mut self.tree, next));
                    assert!(matches!(self.feed.try_recv(), Ok(FeedMessage::Reset(_))));
                }
            }
            op => {
                let action = self.action_for(op).expect("undo and redo handled above");
                let valid = action.validate();
                let res = self.server.submit_action(action.clone()).await;
                match valid {
                    Err(err) => assert_eq!(res, Err(err)),
                    Ok(()) => {
                        let Applied { tree, outcome } = self.tree.apply(&mut self.ids, action);
                        match res {
                            Ok(_) => {
                                assert!(outcome.is_applied(), "server applied {outcome:?}");
                                assert!(matches!(
                                    self.feed.try_recv(),
                                    Ok(FeedMessage::Applied(_))
                                ));
                                self.past.push(std::mem::replace(&mut self.tree, tree));
                                if self.past.len() > self.tree.config().history_limit {
                                    self.past.remove(0);
                                }
                                self.future.clear();
                            }
                            Err(err) => {
                                assert_eq!(outcome, Outcome::NotFound(err));
                            }
                        }
                    }
                }
            }
        }
        assert!(self.feed.try_recv().is_err(), "feed got an extra message");
        assert_eq!(
            shape(self.server.tree()),
            shape(&self.tree),
            "server and reference diverged"
        );
    }
}

do_tokio_test!(compare_with_reference, Vec<FuzzOp>, |ops: Vec<FuzzOp>| async move {
    let mut fuzzer = ComparativeFuzzer::new();
    for op in ops {
        fuzzer.execute_fuzz_op(op).await;
    }
});
