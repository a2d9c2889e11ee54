#![cfg(test)]

use std::{cmp, collections::HashSet, ops::RangeTo};

use bolero::generator::TypeGenerator;

use crate::{
    api::{CommentId, CommentUser, ReactionId, UserId},
    CommentTree, Order, ReplyNesting, SequentialIds, TreeConfig,
};

#[derive(Clone, Debug, bolero::generator::TypeGenerator)]
enum FuzzOp {
    AddComment {
        #[generator(bolero::generator::gen_with::<String>().len(0..20usize))]
        content: String,
        author: u8,
    },
    AddReply {
        parent: usize,
        #[generator(bolero::generator::gen_with::<String>().len(0..20usize))]
        content: String,
        author: u8,
    },
    Edit {
        target: usize,
        #[generator(bolero::generator::gen_with::<String>().len(0..20usize))]
        content: String,
    },
    Delete {
        target: usize,
    },
    Toggle {
        target: usize,
        reaction: u8,
    },
    Sort(Order),
}

fn resize_int(fuzz_id: usize, RangeTo { end }: RangeTo<usize>) -> Option<usize> {
    if end == 0 {
        return None;
    }
    let bucket_size = cmp::max(1, usize::MAX / end); // in case we rounded to 0
    let id = fuzz_id / bucket_size;
    Some(cmp::min(id, end - 1)) // in case id was actually over end - 1 due to rounding
}

fn author(n: u8) -> CommentUser {
    CommentUser::new(UserId(format!("user-{}", n % 4)), format!("User {}", n % 4))
}

/// Pick an existing comment, or a missing one on an empty tree
fn pick(tree: &CommentTree, fuzz_id: usize) -> CommentId {
    resize_int(fuzz_id, ..tree.total_count())
        .and_then(|i| tree.iter().nth(i))
        .map(|c| c.id.clone())
        .unwrap_or_else(|| CommentId(String::from("missing")))
}

fn pick_reaction(tree: &CommentTree, n: u8) -> ReactionId {
    let templates = &tree.config().default_reactions;
    // one slot past the end exercises the missing-reaction path
    match templates.get(n as usize % (templates.len() + 1)) {
        Some(t) => t.id.clone(),
        None => ReactionId(String::from("missing")),
    }
}

fn check_invariants(tree: &CommentTree) {
    let mut seen = HashSet::new();
    for c in tree.iter() {
        assert!(seen.insert(c.id.clone()), "duplicate id {:?}", c.id);
        for r in c.reactions.iter() {
            // every comment starts at 0 and only the viewer toggles
            assert_eq!(r.count, r.is_active as u64, "inconsistent reaction {r:?}");
        }
    }
    assert_eq!(seen.len(), tree.total_count());
    for top in tree.comments().iter() {
        assert!(top.parent_id.is_none());
        for r in top.replies.iter() {
            assert_eq!(r.parent_id.as_ref(), Some(&top.id));
            if tree.config().nesting == ReplyNesting::Flatten {
                assert!(r.replies.is_empty(), "flattened tree has depth > 2");
            }
        }
    }
}

fn execute_fuzz_op(tree: &CommentTree, ids: &mut SequentialIds, op: FuzzOp) -> CommentTree {
    let before = tree.clone();
    let res = match op {
        FuzzOp::AddComment { content, author: a } => {
            let (res, c) = tree.add_comment(ids, content, author(a));
            assert_eq!(res.len(), tree.len() + 1);
            assert_eq!(res.comments()[0], c);
            res
        }
        FuzzOp::AddReply {
            parent,
            content,
            author: a,
        } => {
            let parent = pick(tree, parent);
            match tree.add_reply(ids, &parent, content, author(a)) {
                Ok((res, reply)) => {
                    assert_eq!(res.total_count(), tree.total_count() + 1);
                    assert_eq!(res.len(), tree.len());
                    assert_eq!(res.find(&reply.id), Some(&reply));
                    res
                }
                Err(_) => {
                    assert!(tree.find(&parent).is_none());
                    tree.clone()
                }
            }
        }
        FuzzOp::Edit { target, content } => {
            let target = pick(tree, target);
            match tree.edit(&target, content.clone()) {
                Ok((res, edited)) => {
                    let orig = tree.find(&target).expect("edited a missing comment");
                    assert_eq!(edited.content, content);
                    assert!(edited.is_edited);
                    assert_eq!(edited.id, orig.id);
                    assert_eq!(edited.author, orig.author);
                    assert_eq!(edited.created_at, orig.created_at);
                    assert_eq!(edited.parent_id, orig.parent_id);
                    assert_eq!(edited.replies, orig.replies);
                    assert_eq!(res.total_count(), tree.total_count());
                    res
                }
                Err(_) => {
                    assert!(tree.find(&target).is_none());
                    tree.clone()
                }
            }
        }
        FuzzOp::Delete { target } => {
            let target = pick(tree, target);
            let (res, removed) = tree.delete(&target);
            match removed {
                Some(removed) => {
                    assert_eq!(
                        res.total_count(),
                        tree.total_count() - 1 - removed.reply_count()
                    );
                    for gone in std::iter::once(&removed).chain(removed.replies.iter()) {
                        assert!(res.find(&gone.id).is_none());
                    }
                }
                None => assert_eq!(res, *tree),
            }
            let (again, removed) = res.delete(&target);
            assert!(removed.is_none());
            assert_eq!(again, res);
            res
        }
        FuzzOp::Toggle { target, reaction } => {
            let target = pick(tree, target);
            let reaction = pick_reaction(tree, reaction);
            match tree.toggle_reaction(&target, &reaction) {
                Ok((res, _)) => {
                    let (back, _) = res
                        .toggle_reaction(&target, &reaction)
                        .expect("toggling back failed");
                    assert_eq!(back, *tree);
                    res
                }
                Err(err) => {
                    assert!(err.is_not_found());
                    tree.clone()
                }
            }
        }
        FuzzOp::Sort(order) => {
            let sorted = tree.sorted(order);
            assert_eq!(sorted.len(), tree.len());
            let popular = &tree.config().popular_reaction;
            for w in sorted.windows(2) {
                match order {
                    Order::Newest => assert!(w[0].created_at >= w[1].created_at),
                    Order::Oldest => assert!(w[0].created_at <= w[1].created_at),
                    Order::Popular => {
                        assert!(w[0].reactions.count(popular) >= w[1].reactions.count(popular))
                    }
                }
            }
            tree.clone()
        }
    };
    assert_eq!(*tree, before, "operation mutated its input tree");
    check_invariants(&res);
    res
}

#[test]
fn fuzz_tree_operations() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt::try_init();
    }
    bolero::check!()
        .with_type::<(bool, Vec<FuzzOp>)>()
        .cloned()
        .for_each(|(nested, ops)| {
            let config = TreeConfig {
                nesting: match nested {
                    true => ReplyNesting::Nested,
                    false => ReplyNesting::Flatten,
                },
                ..TreeConfig::default()
            };
            let mut ids = SequentialIds::new("fuzz");
            let mut tree = CommentTree::new(config);
            for op in ops {
                tree = execute_fuzz_op(&tree, &mut ids, op);
            }
        })
}
