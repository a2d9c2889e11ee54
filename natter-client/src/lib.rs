mod apply;
pub use apply::{Applied, Outcome};

mod config;
pub use config::{ReplyNesting, TreeConfig};

mod history;
pub use history::History;

mod ids;
pub use ids::{IdGenerator, SequentialIds, UuidIds};

mod lookup;
pub use lookup::find_in;

mod order;
pub use order::{Order, ParseOrderError};

mod tree;
pub use tree::{CommentTree, Iter};

mod fuzz;

pub mod api {
    pub use natter_api::*;
}
