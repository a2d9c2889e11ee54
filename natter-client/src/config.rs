use crate::api::{self, Error, ReactionId, ReactionSet, ReactionTemplate};

/// Where a reply to a reply ends up
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyNesting {
    /// Appended to the replies of the top-level ancestor, which becomes its parent
    #[default]
    Flatten,

    /// Appended to the replies of the comment it answers, at any depth
    Nested,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct TreeConfig {
    pub nesting: ReplyNesting,

    /// Reactions every new comment starts with, all at 0
    pub default_reactions: Vec<ReactionTemplate>,

    /// Reaction `Order::Popular` ranks by
    pub popular_reaction: ReactionId,

    /// Number of undo steps `History` keeps
    pub history_limit: usize,
}

impl Default for TreeConfig {
    fn default() -> TreeConfig {
        TreeConfig {
            nesting: ReplyNesting::Flatten,
            default_reactions: ReactionTemplate::defaults(),
            popular_reaction: ReactionId::like(),
            history_limit: 100,
        }
    }
}

impl TreeConfig {
    pub fn initial_reactions(&self) -> ReactionSet {
        ReactionSet::from_templates(&self.default_reactions)
    }

    // initial_reactions keeps the first of duplicate templates, this reports them
    pub fn validate(&self) -> Result<(), Error> {
        for t in self.default_reactions.iter() {
            api::validate_string(&t.id.0)?;
            api::validate_string(&t.label)?;
            api::validate_string(&t.emoji)?;
        }
        api::validate_string(&self.popular_reaction.0)?;
        ReactionSet::new(
            self.default_reactions
                .iter()
                .map(api::Reaction::from_template)
                .collect(),
        )?;
        Ok(())
    }
}
