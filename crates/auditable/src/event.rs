use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An audit-worthy action record submitted to the service.
///
/// The field set of an event is owned by the service, not by this crate:
/// beyond `action` everything is optional, and arbitrary service-defined
/// fields travel through the flattened [`extra`](Self::extra) map, so the
/// record is open in both directions. Applications that already have their
/// own event schema can skip this type entirely, since
/// [`Client::report_event`](crate::Client::report_event) accepts any
/// [`Serialize`] payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// What happened, e.g. `"user.login"` or `"invoice.deleted"`.
    pub action: String,
    /// The acting entity, in the embedding application's own identifier
    /// space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
    /// The team the action is scoped to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// When the action happened. Omitted from the payload unless set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,
    /// Further service-defined fields, serialized inline with the rest.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Create an event for `action` with no further fields set.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            actor_id: None,
            team_id: None,
            occurred_at: None,
            extra: Map::new(),
        }
    }

    /// Set the foreign actor identifier.
    pub fn with_actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    /// Set the foreign team identifier.
    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    /// Set the time the action occurred.
    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    /// Attach an arbitrary field to the serialized payload.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn new_sets_only_the_action() {
        let event = Event::new("user.login");
        assert_eq!(event.action, "user.login");
        assert!(event.actor_id.is_none());
        assert!(event.team_id.is_none());
        assert!(event.occurred_at.is_none());
        assert!(event.extra.is_empty());
    }

    #[test]
    fn builder_methods_fill_the_optional_fields() {
        let at = Utc.with_ymd_and_hms(2026, 8, 23, 9, 30, 0).unwrap();
        let event = Event::new("invoice.deleted")
            .with_actor("u-42")
            .with_team("t-7")
            .with_occurred_at(at)
            .with_field("invoice_id", "inv_990")
            .with_field("amount_cents", 12_500);

        assert_eq!(event.actor_id.as_deref(), Some("u-42"));
        assert_eq!(event.team_id.as_deref(), Some("t-7"));
        assert_eq!(event.occurred_at, Some(at));
        assert_eq!(event.extra["invoice_id"], "inv_990");
        assert_eq!(event.extra["amount_cents"], 12_500);
    }

    #[test]
    fn unset_fields_are_omitted_from_the_payload() {
        let json = serde_json::to_value(Event::new("user.login")).unwrap();
        assert_eq!(json, serde_json::json!({"action": "user.login"}));
    }

    #[test]
    fn extra_fields_serialize_inline() {
        let event = Event::new("user.login").with_field("ip", "10.0.0.1");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "user.login", "ip": "10.0.0.1"})
        );
    }

    #[test]
    fn round_trips_through_json() {
        let event = Event::new("user.login")
            .with_actor("u-1")
            .with_occurred_at(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
            .with_field("ip", "10.0.0.1");

        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn unknown_incoming_fields_land_in_extra() {
        let event: Event =
            serde_json::from_str(r#"{"action":"x","request_id":"r-1"}"#).unwrap();
        assert_eq!(event.action, "x");
        assert_eq!(event.extra["request_id"], "r-1");
    }
}
