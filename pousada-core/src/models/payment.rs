use serde::{Deserialize, Deserializer, Serialize};

/// One line of a hosted-payment checkout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaymentItem {
    /// The booking this line pays for
    pub id: String,
    /// A short title shown on the checkout page
    pub title: String,
    /// A longer description shown on the checkout page
    pub description: String,
    /// Units purchased
    pub quantity: u32,
    /// ISO 4217 currency code
    pub currency: String,
    /// Price of a single unit
    pub unit_price: f64,
}

/// A hosted-payment page created for a booking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaymentPreference {
    /// The provider's preference identifier
    pub id: String,
    /// Where to send the guest to pay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_point: Option<String>,
    /// Where to send the guest to pay in the provider's sandbox
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_init_point: Option<String>,
}

/// The provider's view of a single payment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// The provider's payment identifier
    pub id: String,
    /// The provider's status string, e.g. `approved` or `rejected`
    pub status: String,
    /// The reference set on the preference, i.e. the booking id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
}

impl PaymentDetails {
    /// Whether the provider considers the payment settled
    pub fn is_approved(&self) -> bool {
        self.status == "approved"
    }
}

/// The request body for attaching a payment reference to a booking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaymentReference {
    /// The provider's payment identifier, as returned on the checkout redirect
    pub payment_id: String,
}

/// An asynchronous notification from the payment provider.
///
/// Providers are inconsistent about whether identifiers are strings or
/// numbers, so both are accepted and normalized to strings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct PaymentNotification {
    /// The provider's event identifier
    #[serde(default, deserialize_with = "lenient_id")]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<String>"))]
    pub id: Option<String>,
    /// The event type, e.g. `payment.created`
    #[serde(default)]
    pub action: Option<String>,
    /// The resource type, e.g. `payment`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// The resource the event is about
    #[serde(default)]
    pub data: Option<NotificationData>,
}

/// The resource a [`PaymentNotification`] refers to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct NotificationData {
    /// The provider's payment identifier
    #[serde(default, deserialize_with = "lenient_id")]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<String>"))]
    pub id: Option<String>,
}

impl PaymentNotification {
    /// Build a notification about a payment, as the provider would send it
    pub fn payment(action: impl Into<String>, payment_id: impl Into<String>) -> Self {
        Self {
            id: None,
            action: Some(action.into()),
            kind: Some("payment".to_owned()),
            data: Some(NotificationData {
                id: Some(payment_id.into()),
            }),
        }
    }

    /// The payment identifier carried by the notification, if any
    pub fn payment_id(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

/// The acknowledgment returned to the payment provider.
///
/// Always carries `received: true`; failures are reported through
/// `processed: false` and an `error` description, never through an error
/// status, so the provider does not enter a retry storm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct WebhookAck {
    /// Always true
    pub received: bool,
    /// Whether the notification changed (or had already changed) a booking
    pub processed: bool,
    /// The booking the notification was matched to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    /// Why the notification was not acted on, or was a no-op
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// The internal error encountered while processing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookAck {
    /// The booking was moved to `confirmed`
    pub fn confirmed(booking_id: impl Into<String>) -> Self {
        Self {
            received: true,
            processed: true,
            booking_id: Some(booking_id.into()),
            reason: None,
            error: None,
        }
    }

    /// The notification was a duplicate delivery
    pub fn already_confirmed(booking_id: impl Into<String>) -> Self {
        Self {
            received: true,
            processed: true,
            booking_id: Some(booking_id.into()),
            reason: Some("Booking already confirmed".to_owned()),
            error: None,
        }
    }

    /// The notification was understood but not acted on
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            received: true,
            processed: false,
            booking_id: None,
            reason: Some(reason.into()),
            error: None,
        }
    }

    /// Attach the booking the notification was matched to
    pub fn for_booking(mut self, booking_id: impl Into<String>) -> Self {
        self.booking_id = Some(booking_id.into());
        self
    }

    /// Processing failed internally
    pub fn failed(error: impl ToString) -> Self {
        Self {
            received: true,
            processed: false,
            booking_id: None,
            reason: None,
            error: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notifications_accept_numeric_and_string_ids() {
        let numeric: PaymentNotification = serde_json::from_value(json!({
            "id": 12345,
            "action": "payment.updated",
            "type": "payment",
            "data": { "id": 987654321 },
        }))
        .unwrap();
        assert_eq!(numeric.id.as_deref(), Some("12345"));
        assert_eq!(numeric.payment_id(), Some("987654321"));

        let text: PaymentNotification = serde_json::from_value(json!({
            "action": "payment.created",
            "data": { "id": "pay-123" },
        }))
        .unwrap();
        assert_eq!(text.payment_id(), Some("pay-123"));
        assert_eq!(text, {
            let mut expected = PaymentNotification::payment("payment.created", "pay-123");
            expected.kind = None;
            expected
        });
    }

    #[test]
    fn notifications_tolerate_missing_fields() {
        let empty: PaymentNotification = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.payment_id(), None);

        let blank: PaymentNotification =
            serde_json::from_value(json!({ "data": { "id": "" } })).unwrap();
        assert_eq!(blank.payment_id(), None);
    }

    #[test]
    fn acks_always_report_receipt() {
        let ack = serde_json::to_value(WebhookAck::failed("disk on fire")).unwrap();
        assert_eq!(
            ack,
            json!({ "received": true, "processed": false, "error": "disk on fire" })
        );

        let ack = serde_json::to_value(WebhookAck::already_confirmed("b-1")).unwrap();
        assert_eq!(
            ack,
            json!({
                "received": true,
                "processed": true,
                "bookingId": "b-1",
                "reason": "Booking already confirmed",
            })
        );
    }
}
