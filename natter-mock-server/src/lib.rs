use natter_client::{
    api::{Action, Error},
    CommentTree, History, Outcome, SequentialIds, TreeConfig,
};
use tokio::sync::mpsc;

mod fuzz;

const ID_PREFIX: &str = "c";

#[derive(Clone, Debug)]
pub enum FeedMessage {
    /// An action went through, here is what it did
    Applied(Outcome),

    /// The whole tree changed under the feed (undo, redo)
    Reset(CommentTree),
}

/// In-memory stand-in for a comments backend, for demos and tests.
///
/// It checks actions the way a real backend would before applying them, and
/// lets any number of viewers follow the changes through `action_feed`.
pub struct MockServer {
    history: History,
    ids: SequentialIds,
    feeds: Vec<mpsc::UnboundedSender<FeedMessage>>,
}

impl MockServer {
    pub fn new(config: TreeConfig) -> MockServer {
        MockServer::seeded(CommentTree::new(config))
    }

    pub fn seeded(tree: CommentTree) -> MockServer {
        MockServer {
            ids: SequentialIds::after(ID_PREFIX, &tree),
            history: History::new(tree),
            feeds: Vec::new(),
        }
    }

    pub fn tree(&self) -> &CommentTree {
        self.history.current()
    }

    async fn relay(&mut self, msg: FeedMessage) {
        self.feeds.retain(|f| matches!(f.send(msg.clone()), Ok(())));
    }

    pub async fn submit_action(&mut self, a: Action) -> Result<Outcome, Error> {
        if let Err(err) = a.validate() {
            tracing::info!("rejecting action: {err}");
            return Err(err);
        }
        match self.history.apply(&mut self.ids, a) {
            Outcome::NotFound(err) => Err(err),
            outcome => {
                self.relay(FeedMessage::Applied(outcome.clone())).await;
                Ok(outcome)
            }
        }
    }

    pub async fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            let tree = self.tree().clone();
            self.relay(FeedMessage::Reset(tree)).await;
        }
        moved
    }

    pub async fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            let tree = self.tree().clone();
            self.relay(FeedMessage::Reset(tree)).await;
        }
        moved
    }

    pub fn action_feed(&mut self) -> mpsc::UnboundedReceiver<FeedMessage> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.feeds.push(sender);
        receiver
    }
}
