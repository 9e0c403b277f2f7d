//! Reaction entity <-> model mapper

use relay_core::entities::{Reaction, ReactionTally};
use relay_core::value_objects::MessageId;

use crate::models::{ReactionModel, ReactionTallyModel};

/// Convert ReactionModel to Reaction entity
impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            id: model.id,
            message_id: MessageId::new(model.message_id),
            emoji: model.emoji,
            user: model.user,
            created_at: model.timestamp,
        }
    }
}

/// Convert ReactionTallyModel to ReactionTally entity
impl From<ReactionTallyModel> for ReactionTally {
    fn from(model: ReactionTallyModel) -> Self {
        ReactionTally {
            emoji: model.emoji,
            count: model.count,
        }
    }
}
