use std::{cmp::Reverse, str::FromStr};

use crate::api::{Comment, ReactionId};

#[cfg(test)]
use bolero::generator::TypeGenerator;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[cfg_attr(test, derive(bolero::generator::TypeGenerator))]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Newest,
    Oldest,
    Popular,
}

impl Order {
    /// Stable sort of `comments`. `Popular` ranks by the count of `popular`,
    /// comments without that reaction counting as 0, newest first on ties.
    pub fn sort(&self, comments: &mut [Comment], popular: &ReactionId) {
        match self {
            Order::Newest => comments.sort_by_key(|c| Reverse(c.created_at)),
            Order::Oldest => comments.sort_by_key(|c| c.created_at),
            Order::Popular => comments
                .sort_by_key(|c| (Reverse(c.reactions.count(popular)), Reverse(c.created_at))),
        }
    }
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown order {0:?}, expected one of newest, oldest or popular")]
pub struct ParseOrderError(String);

impl FromStr for Order {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Order, ParseOrderError> {
        match s {
            "newest" => Ok(Order::Newest),
            "oldest" => Ok(Order::Oldest),
            "popular" => Ok(Order::Popular),
            _ => Err(ParseOrderError(String::from(s))),
        }
    }
}
