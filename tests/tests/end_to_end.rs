use natter_api::{Action, Comment, CommentId, CommentUser, Error, ReactionId, UserId};
use natter_client::{CommentTree, Order, Outcome, TreeConfig};
use natter_mock_server::{FeedMessage, MockServer};

fn user(name: &str) -> CommentUser {
    CommentUser::new(UserId(name.to_lowercase()), String::from(name))
}

fn added(outcome: Outcome) -> Comment {
    match outcome {
        Outcome::Added(c) => c,
        o => panic!("expected an added comment, got {o:?}"),
    }
}

#[tokio::test]
async fn discussion_through_the_mock_server() {
    let mut server = MockServer::new(TreeConfig::default());
    let mut feed = server.action_feed();

    let first = added(
        server
            .submit_action(Action::AddComment {
                content: String::from("First!"),
                author: user("Alice"),
            })
            .await
            .unwrap(),
    );
    let second = added(
        server
            .submit_action(Action::AddComment {
                content: String::from("Second"),
                author: user("Bob"),
            })
            .await
            .unwrap(),
    );
    assert_eq!(server.tree().comments()[0].id, second.id);

    let reply = added(
        server
            .submit_action(Action::AddReply {
                parent_id: first.id.clone(),
                content: String::from("Welcome"),
                author: user("Bob"),
            })
            .await
            .unwrap(),
    );
    // replying to a reply lands on the top-level comment
    let nested = added(
        server
            .submit_action(Action::AddReply {
                parent_id: reply.id.clone(),
                content: String::from("Thanks"),
                author: user("Alice"),
            })
            .await
            .unwrap(),
    );
    assert_eq!(nested.parent_id.as_ref(), Some(&first.id));
    assert_eq!(server.tree().find(&first.id).unwrap().replies.len(), 2);
    assert_eq!(server.tree().total_count(), 4);

    server
        .submit_action(Action::ToggleReaction {
            comment_id: first.id.clone(),
            reaction_id: ReactionId::like(),
        })
        .await
        .unwrap();
    let popular = server.tree().sorted(Order::Popular);
    assert_eq!(popular[0].id, first.id);

    server
        .submit_action(Action::Edit {
            comment_id: reply.id.clone(),
            content: String::from("Welcome aboard"),
        })
        .await
        .unwrap();
    let edited = server.tree().find(&reply.id).unwrap();
    assert!(edited.is_edited);
    assert!(edited.updated_at.is_some());

    assert_eq!(
        server
            .submit_action(Action::Edit {
                comment_id: reply.id.clone(),
                content: String::from(" "),
            })
            .await,
        Err(Error::EmptyContent)
    );

    server
        .submit_action(Action::Delete {
            comment_id: first.id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(server.tree().total_count(), 1);
    assert!(server.tree().find(&nested.id).is_none());

    // one feed message per accepted action
    let mut applied = 0;
    while let Ok(msg) = feed.try_recv() {
        assert!(matches!(msg, FeedMessage::Applied(_)));
        applied += 1;
    }
    assert_eq!(applied, 7);

    assert!(server.undo().await);
    assert_eq!(server.tree().total_count(), 4);
    assert!(matches!(feed.try_recv(), Ok(FeedMessage::Reset(_))));
}

#[tokio::test]
async fn seeded_from_generated_json() {
    let seed = r#"[
        {
            "id": "c-7",
            "content": "Seeded",
            "author": { "id": "u1", "name": "Carol" },
            "createdAt": "2024-01-02T00:00:00Z",
            "reactions": [{ "id": "like", "label": "Like", "emoji": "👍", "count": 3 }],
            "replies": [
                {
                    "id": "c-8",
                    "content": "Seeded reply",
                    "author": { "id": "u2", "name": "Dave" },
                    "createdAt": "2024-01-03T00:00:00Z",
                    "parentId": "c-7"
                }
            ]
        }
    ]"#;
    let comments: Vec<Comment> = serde_json::from_str(seed).unwrap();
    let tree = CommentTree::from_comments(comments, TreeConfig::default()).unwrap();
    let mut server = MockServer::seeded(tree);

    let c = added(
        server
            .submit_action(Action::AddComment {
                content: String::from("New"),
                author: user("Eve"),
            })
            .await
            .unwrap(),
    );
    assert_eq!(c.id, CommentId(String::from("c-9")));

    let like = server
        .submit_action(Action::ToggleReaction {
            comment_id: CommentId(String::from("c-7")),
            reaction_id: ReactionId::like(),
        })
        .await
        .unwrap();
    match like {
        Outcome::Toggled { reaction, .. } => {
            assert_eq!((reaction.count, reaction.is_active), (4, true))
        }
        o => panic!("unexpected outcome {o:?}"),
    }

    // the reply has no reactions at all
    assert!(matches!(
        server
            .submit_action(Action::ToggleReaction {
                comment_id: CommentId(String::from("c-8")),
                reaction_id: ReactionId::like(),
            })
            .await,
        Err(Error::ReactionNotFound { .. })
    ));
}
