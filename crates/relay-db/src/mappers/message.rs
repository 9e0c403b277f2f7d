//! Message entity <-> model mapper

use relay_core::entities::Message;
use relay_core::value_objects::MessageId;

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: MessageId::new(model.id),
            sender: model.sender,
            text: model.message,
            created_at: model.timestamp,
        }
    }
}
