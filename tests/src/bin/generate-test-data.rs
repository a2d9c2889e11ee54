use chrono::{Duration, TimeZone, Utc};
use natter_api::{
    Comment, CommentId, CommentUser, Reaction, ReactionSet, ReactionTemplate, Time, UserId,
};
use rand::{seq::SliceRandom, Rng};

const NUM_USERS: usize = 5;
const NUM_COMMENTS: usize = 20;
const MAX_REPLIES: usize = 6;
const MAX_REACTIONS: u64 = 40;

const COMMENT_WORD_COUNT: usize = 25;

const NAMES: &[&str] = &["Alice", "Bob", "Carol", "Dave", "Eve", "Mallory", "Trent"];

fn gen_users(rng: &mut impl Rng) -> Vec<CommentUser> {
    NAMES
        .choose_multiple(rng, NUM_USERS)
        .enumerate()
        .map(|(i, name)| {
            let mut u = CommentUser::new(UserId(format!("user-{}", i + 1)), String::from(*name));
            u.avatar_url = rng
                .gen_bool(0.5)
                .then(|| format!("https://avatars.example.com/{}.png", name.to_lowercase()));
            u.is_verified = rng.gen_bool(0.2);
            u
        })
        .collect()
}

fn gen_reactions(rng: &mut impl Rng) -> ReactionSet {
    let reactions = ReactionTemplate::defaults()
        .iter()
        .map(|t| {
            let mut r = Reaction::from_template(t);
            r.count = rng.gen_range(0..=MAX_REACTIONS);
            r.is_active = r.count > 0 && rng.gen_bool(0.1);
            r
        })
        .collect();
    ReactionSet::new(reactions).expect("default reaction templates have unique ids")
}

fn gen_comment(
    rng: &mut impl Rng,
    id: &mut usize,
    users: &[CommentUser],
    date: Time,
) -> Comment {
    *id += 1;
    let mut c = Comment::new(
        CommentId(format!("c-{id}")),
        lipsum::lipsum_words(rng.gen_range(3..COMMENT_WORD_COUNT)),
        users.choose(rng).expect("no users").clone(),
        date,
        gen_reactions(rng),
    );
    if rng.gen_bool(0.15) {
        c.is_edited = true;
        c.updated_at = Some(date + Duration::minutes(rng.gen_range(1..120)));
    }
    c
}

fn main() {
    let mut rng = rand::thread_rng();
    let users = gen_users(&mut rng);
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let mut next_id = 0;
    let mut comments = Vec::with_capacity(NUM_COMMENTS);
    for _ in 0..NUM_COMMENTS {
        let date = start + Duration::minutes(rng.gen_range(0..60 * 24 * 30));
        let mut c = gen_comment(&mut rng, &mut next_id, &users, date);
        let mut reply_date = date;
        for _ in 0..rng.gen_range(0..=MAX_REPLIES) {
            reply_date = reply_date + Duration::minutes(rng.gen_range(1..600));
            let mut r = gen_comment(&mut rng, &mut next_id, &users, reply_date);
            r.parent_id = Some(c.id.clone());
            c.replies.push_back(r);
        }
        comments.push(c);
    }
    // newest first, as the tree keeps them
    comments.sort_by_key(|c| std::cmp::Reverse(c.created_at));

    println!(
        "{}",
        serde_json::to_string_pretty(&comments).expect("serializing generated comments")
    );
}
