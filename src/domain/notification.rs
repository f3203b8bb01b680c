use super::id::PaymentId;

/// Inbound payment notification. The transport payload arrives on a public
/// endpoint and is attacker-influenced; only the payment id is read, and the
/// canonical record is fetched before any state changes.
#[derive(Debug, Clone)]
pub struct PaymentNotification {
    payment_id: Option<PaymentId>,
}

impl PaymentNotification {
    /// Lenient extraction: `data.id` may arrive as a string or a number.
    /// Everything else in the payload is ignored.
    pub fn from_payload(payload: &serde_json::Value) -> Self {
        let payment_id = payload
            .get("data")
            .and_then(|data| data.get("id"))
            .and_then(|id| match id {
                serde_json::Value::String(s) => PaymentId::new(s.clone()).ok(),
                serde_json::Value::Number(n) => PaymentId::new(n.to_string()).ok(),
                _ => None,
            });

        Self { payment_id }
    }

    pub fn payment_id(&self) -> Option<&PaymentId> {
        self.payment_id.as_ref()
    }
}
