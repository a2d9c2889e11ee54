use std::collections::HashSet;

use crate::Error;

#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct ReactionId(pub String);

impl ReactionId {
    pub fn like() -> ReactionId {
        ReactionId(String::from("like"))
    }
}

/// One counted reaction on a comment.
///
/// `count` aggregates every toggle seen on this comment, while `is_active`
/// only tracks whether the current viewer has this reaction turned on.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: ReactionId,
    pub label: String,
    pub emoji: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub is_active: bool,
}

impl Reaction {
    pub fn from_template(t: &ReactionTemplate) -> Reaction {
        Reaction {
            id: t.id.clone(),
            label: t.label.clone(),
            emoji: t.emoji.clone(),
            count: 0,
            is_active: false,
        }
    }

    // See comments on other `validate` functions throughout natter-api
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.id.0)?;
        crate::validate_string(&self.label)?;
        crate::validate_string(&self.emoji)
    }

    /// Flip the viewer's state, returning the new `is_active`
    pub fn toggle(&mut self) -> bool {
        if self.is_active {
            self.is_active = false;
            self.count = self.count.saturating_sub(1);
        } else {
            self.is_active = true;
            self.count = self.count.saturating_add(1);
        }
        self.is_active
    }
}

/// Reaction a new comment starts with
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ReactionTemplate {
    pub id: ReactionId,
    pub label: String,
    pub emoji: String,
}

impl ReactionTemplate {
    pub fn new(id: &str, label: &str, emoji: &str) -> ReactionTemplate {
        ReactionTemplate {
            id: ReactionId(String::from(id)),
            label: String::from(label),
            emoji: String::from(emoji),
        }
    }

    pub fn defaults() -> Vec<ReactionTemplate> {
        vec![
            ReactionTemplate::new("like", "Like", "👍"),
            ReactionTemplate::new("love", "Love", "❤️"),
            ReactionTemplate::new("laugh", "Laugh", "😂"),
        ]
    }
}

/// Ordered reactions of a comment, with no two entries sharing an id
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "Vec<Reaction>", into = "Vec<Reaction>")]
pub struct ReactionSet(Vec<Reaction>);

impl ReactionSet {
    pub fn new(reactions: Vec<Reaction>) -> Result<ReactionSet, Error> {
        let mut seen = HashSet::with_capacity(reactions.len());
        for r in reactions.iter() {
            if !seen.insert(&r.id) {
                return Err(Error::DuplicateReaction(r.id.clone()));
            }
        }
        Ok(ReactionSet(reactions))
    }

    /// Fresh set with every count at 0. The first template wins when ids repeat.
    pub fn from_templates(templates: &[ReactionTemplate]) -> ReactionSet {
        let mut seen = HashSet::with_capacity(templates.len());
        ReactionSet(
            templates
                .iter()
                .filter(|t| seen.insert(&t.id))
                .map(Reaction::from_template)
                .collect(),
        )
    }

    pub fn get(&self, id: &ReactionId) -> Option<&Reaction> {
        self.0.iter().find(|r| r.id == *id)
    }

    /// Count of reaction `id`, 0 if this set does not have it
    pub fn count(&self, id: &ReactionId) -> u64 {
        self.get(id).map(|r| r.count).unwrap_or(0)
    }

    /// Toggle reaction `id`, returning its new state, or `None` if it is not in the set
    pub fn toggle(&mut self, id: &ReactionId) -> Option<&Reaction> {
        let r = self.0.iter_mut().find(|r| r.id == *id)?;
        r.toggle();
        Some(r)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reaction> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<Reaction>> for ReactionSet {
    type Error = Error;

    fn try_from(reactions: Vec<Reaction>) -> Result<ReactionSet, Error> {
        ReactionSet::new(reactions)
    }
}

impl From<ReactionSet> for Vec<Reaction> {
    fn from(set: ReactionSet) -> Vec<Reaction> {
        set.0
    }
}
