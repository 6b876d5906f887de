//! Order receipt built from the gateway's charge body.

use crate::money::{Currency, Money};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// What the customer is emailed after a successful charge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub status: String,
    pub payment_method: String,
    pub order_date: DateTime<Utc>,
    pub amount: Money,
}

impl Receipt {
    /// Read status, card brand and amount from a charge body, falling back to
    /// `charged` when the body does not echo an amount.
    pub fn from_charge(body: &Value, charged: Money, now: DateTime<Utc>) -> Self {
        let status = body
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let payment_method = body
            .pointer("/source/brand")
            .and_then(Value::as_str)
            .unwrap_or("card")
            .to_string();
        let currency = body
            .get("currency")
            .and_then(Value::as_str)
            .and_then(Currency::from_code)
            .unwrap_or(charged.currency);
        let amount = body
            .get("amount")
            .and_then(Value::as_i64)
            .map(|cents| Money::new(cents, currency))
            .unwrap_or(charged);

        Self {
            status,
            payment_method,
            order_date: now,
            amount,
        }
    }

    /// Plain-text email body.
    pub fn text(&self) -> String {
        format!(
            "Order Status: {}\nPayment Method: {}\nOrder Date: {}\nTotal Amount: {}",
            self.status,
            self.payment_method,
            self.order_date.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.amount,
        )
    }
}
