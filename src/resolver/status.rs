use serde::{Deserialize, Serialize};

use crate::message::MessageViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Pending,
    Sent,
    Delivered,
    Read,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Pending => "pending",
            MessageStatus::Sent => "sent",
            MessageStatus::Delivered => "delivered",
            MessageStatus::Read => "read",
        }
    }
}

/// Classifies delivery from the three flags, strongest first.
///
/// `is_all_read` wins even when `is_sent` is false. UI code relies on that
/// override, so the flags are not cross-checked here.
pub fn derive_status<M: MessageViewModel + ?Sized>(message: &M) -> MessageStatus {
    status_from_flags(
        message.is_sent(),
        message.is_all_received(),
        message.is_all_read(),
    )
}

pub fn status_from_flags(sent: bool, all_received: bool, all_read: bool) -> MessageStatus {
    if all_read {
        MessageStatus::Read
    } else if all_received {
        MessageStatus::Delivered
    } else if sent {
        MessageStatus::Sent
    } else {
        MessageStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageStatus, derive_status, status_from_flags};
    use crate::message::MessageModel;

    #[test]
    fn every_flag_combination_maps_to_one_status() {
        for bits in 0u8..8 {
            let sent = bits & 1 != 0;
            let received = bits & 2 != 0;
            let read = bits & 4 != 0;
            let expected = if read {
                MessageStatus::Read
            } else if received {
                MessageStatus::Delivered
            } else if sent {
                MessageStatus::Sent
            } else {
                MessageStatus::Pending
            };
            assert_eq!(status_from_flags(sent, received, read), expected);
        }
    }

    #[test]
    fn read_overrides_unsent_message() {
        let mut message = MessageModel::new("msg-1");
        message.mark_all_read();
        assert!(!message.is_sent());
        assert_eq!(derive_status(&message), MessageStatus::Read);
    }

    #[test]
    fn status_follows_delivery_progress() {
        let mut message = MessageModel::new("msg-1");
        assert_eq!(derive_status(&message), MessageStatus::Pending);
        message.mark_sent();
        assert_eq!(derive_status(&message), MessageStatus::Sent);
        message.mark_all_received();
        assert_eq!(derive_status(&message), MessageStatus::Delivered);
        message.mark_all_read();
        assert_eq!(derive_status(&message).as_str(), "read");
    }
}
