use crate::api::{Comment, CommentId};

/// Find comment `id` at any depth, top-level list order first then each
/// comment's replies
pub fn find_in<'a>(comments: &'a im::Vector<Comment>, id: &CommentId) -> Option<&'a Comment> {
    for c in comments.iter() {
        if c.id == *id {
            return Some(c);
        }
        if let Some(res) = find_in(&c.replies, id) {
            return Some(res);
        }
    }
    None
}

/// Indices leading to comment `id`, the top-level index first
pub(crate) fn locate(comments: &im::Vector<Comment>, id: &CommentId) -> Option<Vec<usize>> {
    for (i, c) in comments.iter().enumerate() {
        if c.id == *id {
            return Some(vec![i]);
        }
        if let Some(mut path) = locate(&c.replies, id) {
            path.insert(0, i);
            return Some(path);
        }
    }
    None
}

// Only the vectors along `path` get copied, everything else stays shared
// with the tree `comments` was cloned from
pub(crate) fn node_mut<'a>(
    comments: &'a mut im::Vector<Comment>,
    path: &[usize],
) -> Option<&'a mut Comment> {
    let (first, rest) = path.split_first()?;
    let c = comments.get_mut(*first)?;
    if rest.is_empty() {
        Some(c)
    } else {
        node_mut(&mut c.replies, rest)
    }
}

/// Detach the node at `path`, with all of its replies
pub(crate) fn remove_at(comments: &mut im::Vector<Comment>, path: &[usize]) -> Option<Comment> {
    match path {
        [] => None,
        [i] if *i < comments.len() => Some(comments.remove(*i)),
        [_] => None,
        [i, rest @ ..] => remove_at(&mut comments.get_mut(*i)?.replies, rest),
    }
}
