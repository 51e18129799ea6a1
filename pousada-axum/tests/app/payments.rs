use pousada_core::{
    models::{PaymentDetails, PaymentItem, PaymentPreference},
    ports::PaymentGateway,
};

#[derive(Debug, thiserror::Error)]
#[error("payment provider unavailable")]
pub struct Unavailable;

/// A payment provider that approves everything, unless it is offline.
#[derive(Default)]
pub struct StubPayments {
    pub offline: bool,
}

impl PaymentGateway for StubPayments {
    type Error = Unavailable;

    fn currency(&self) -> &str {
        "BRL"
    }

    async fn create_payment_preference(
        &self,
        _items: Vec<PaymentItem>,
        booking_id: &str,
        _user_id: &str,
    ) -> Result<PaymentPreference, Self::Error> {
        if self.offline {
            return Err(Unavailable);
        }
        Ok(PaymentPreference {
            id: format!("pref-{booking_id}"),
            init_point: Some(format!("https://pay.example/checkout/{booking_id}")),
            sandbox_init_point: Some(format!("https://sandbox.pay.example/checkout/{booking_id}")),
        })
    }

    async fn get_payment(&self, payment_id: &str) -> Result<PaymentDetails, Self::Error> {
        if self.offline {
            return Err(Unavailable);
        }
        Ok(PaymentDetails {
            id: payment_id.to_owned(),
            status: "approved".to_owned(),
            external_reference: None,
        })
    }
}
