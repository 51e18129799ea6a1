use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The lifecycle of a booking.
///
/// ```text
/// created ──────────┬──> confirmed
///    │              │
///    v              │
/// pending_payment ──┘
///    │
///    └──> cancelled <── created
/// ```
///
/// `cancelled` and `confirmed` are terminal for the booking owner; only the
/// payment reconciliation path moves a booking into `confirmed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Just made, no payment yet
    Created,
    /// A payment reference was attached, awaiting the provider's callback
    PendingPayment,
    /// Payment reconciled; the only status that blocks availability
    Confirmed,
    /// Terminal, no further mutation allowed
    Cancelled,
}

/// The error produced when parsing a stored status that is not one of the four known values.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown booking status: {0}")]
pub struct UnknownStatus(pub String);

impl BookingStatus {
    /// Every status, in lifecycle order
    pub const ALL: [BookingStatus; 4] = [
        Self::Created,
        Self::PendingPayment,
        Self::Confirmed,
        Self::Cancelled,
    ];

    /// The statuses from which a booking may be edited by its owner
    pub const UPDATABLE: &'static [BookingStatus] = &[Self::Created];

    /// The statuses from which a booking may be cancelled by its owner
    pub const CANCELLABLE: &'static [BookingStatus] = &[Self::Created, Self::PendingPayment];

    /// The statuses from which a payment may confirm a booking
    pub const CONFIRMABLE: &'static [BookingStatus] = &[Self::Created, Self::PendingPayment];

    /// The stored representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::PendingPayment => "pending_payment",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the owner may still edit the booking
    pub fn is_updatable(&self) -> bool {
        Self::UPDATABLE.contains(self)
    }

    /// Whether the owner may still cancel the booking
    pub fn is_cancellable(&self) -> bool {
        Self::CANCELLABLE.contains(self)
    }

    /// Whether a payment may still confirm the booking
    pub fn is_confirmable(&self) -> bool {
        Self::CONFIRMABLE.contains(self)
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BookingStatus::Created, true, true, true)]
    #[case(BookingStatus::PendingPayment, false, true, true)]
    #[case(BookingStatus::Confirmed, false, false, false)]
    #[case(BookingStatus::Cancelled, false, false, false)]
    fn transitions(
        #[case] status: BookingStatus,
        #[case] updatable: bool,
        #[case] cancellable: bool,
        #[case] confirmable: bool,
    ) {
        assert_eq!(status.is_updatable(), updatable);
        assert_eq!(status.is_cancellable(), cancellable);
        assert_eq!(status.is_confirmable(), confirmable);
    }

    #[test]
    fn stored_form_matches_wire_form() {
        for status in BookingStatus::ALL {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire, serde_json::Value::String(status.to_string()));
            assert_eq!(status.as_str().parse::<BookingStatus>(), Ok(status));
        }
        assert!("paid".parse::<BookingStatus>().is_err());
    }
}
