use tracing::warn;

use crate::database::Topic;
use crate::types::UserId;
use crate::workflow::error::WorkflowError;

/// Ensure `principal` owns `topic`.
///
/// A mismatch is reported exactly like a missing topic so callers cannot
/// probe for other users' topic ids.
pub fn authorize(topic: &Topic, principal: UserId) -> Result<(), WorkflowError> {
    if topic.owner_id != principal {
        warn!(topic_id = topic.id, %principal, "topic access denied");
        return Err(not_found_topic(topic.id));
    }
    Ok(())
}

pub(crate) fn not_found_topic(topic_id: crate::types::TopicId) -> WorkflowError {
    WorkflowError::NotFound(format!("topic {}", topic_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn topic_owned_by(owner: UserId) -> Topic {
        Topic {
            id: 7,
            text: "Chess".to_string(),
            date_added: Utc::now(),
            owner_id: owner,
        }
    }

    #[test]
    fn owner_is_allowed() {
        let owner = Uuid::new_v4();
        assert!(authorize(&topic_owned_by(owner), owner).is_ok());
    }

    #[test]
    fn stranger_sees_not_found() {
        let topic = topic_owned_by(Uuid::new_v4());
        let err = authorize(&topic, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(_)));
    }

    #[test]
    fn denial_is_indistinguishable_from_absence() {
        let topic = topic_owned_by(Uuid::new_v4());
        let denied = authorize(&topic, Uuid::new_v4()).unwrap_err();
        assert_eq!(denied.to_string(), not_found_topic(topic.id).to_string());
    }

    #[test]
    fn repeated_checks_agree_and_leave_topic_untouched() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let topic = topic_owned_by(owner);
        let before = topic.clone();

        for _ in 0..2 {
            assert!(authorize(&topic, owner).is_ok());
            assert!(authorize(&topic, stranger).is_err());
        }
        assert_eq!(topic, before);
    }
}
