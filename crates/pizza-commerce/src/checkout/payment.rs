//! Card details submitted at checkout.

use super::CheckoutConfig;
use crate::error::CheckoutError;
use pizza_gateway::ChargeRequest;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

const CARD_NUMBER_LEN: usize = 16;
const ZIP_CODE_LEN: usize = 6;

/// Card fields as submitted. Absent, null or wrongly typed fields decode to
/// zero values and fail validation by name.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    #[serde(deserialize_with = "lenient")]
    pub card_number: String,
    #[serde(deserialize_with = "lenient")]
    pub expiration_month: i64,
    #[serde(deserialize_with = "lenient")]
    pub expiration_year: i64,
    #[serde(deserialize_with = "lenient")]
    pub security_code: i64,
    #[serde(deserialize_with = "lenient")]
    pub zip_code: String,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl std::fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self.card_number.len();
        let last4 = self.card_number.get(len.saturating_sub(4)..).unwrap_or("");
        f.debug_struct("PaymentDetails")
            .field("card_number", &format_args!("****{last4}"))
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("security_code", &"[REDACTED]")
            .field("zip_code", &self.zip_code)
            .finish()
    }
}

impl PaymentDetails {
    /// Read card fields from a request body. A body that is not an object
    /// yields empty details, so every field is reported by [`validate`].
    ///
    /// [`validate`]: PaymentDetails::validate
    pub fn from_json(body: &Value) -> Self {
        Self::deserialize(body).unwrap_or_default()
    }

    /// Check every field, naming all that are invalid.
    pub fn validate(&self, config: &CheckoutConfig) -> Result<(), CheckoutError> {
        let mut invalid = Vec::new();
        if self.card_number.trim().chars().count() != CARD_NUMBER_LEN {
            invalid.push("cardNumber");
        }
        if !(1..=12).contains(&self.expiration_month) {
            invalid.push("expirationMonth");
        }
        let year_ok = i32::try_from(self.expiration_year)
            .map(|y| config.accepted_years.accepts(y))
            .unwrap_or(false);
        if !year_ok {
            invalid.push("expirationYear");
        }
        if !(100..=999).contains(&self.security_code) {
            invalid.push("securityCode");
        }
        if self.zip_code.trim().chars().count() != ZIP_CODE_LEN {
            invalid.push("zipCode");
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::invalid(&invalid))
        }
    }

    /// Build the gateway charge for `amount_cents`. Call after [`validate`].
    ///
    /// [`validate`]: PaymentDetails::validate
    pub fn to_charge(&self, amount_cents: i64) -> Result<ChargeRequest, CheckoutError> {
        let month = u32::try_from(self.expiration_month);
        let year = i32::try_from(self.expiration_year);
        let cvc = u32::try_from(self.security_code);
        match (month, year, cvc) {
            (Ok(exp_month), Ok(exp_year), Ok(cvc)) => Ok(ChargeRequest {
                card_number: self.card_number.trim().to_string(),
                exp_month,
                exp_year,
                cvc,
                zip: self.zip_code.trim().to_string(),
                amount_cents,
            }),
            _ => Err(CheckoutError::invalid(&[
                "expirationMonth",
                "expirationYear",
                "securityCode",
            ])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CheckoutConfig {
        CheckoutConfig {
            accepted_years: (2024..=2034).into(),
            ..CheckoutConfig::default()
        }
    }

    fn valid() -> PaymentDetails {
        PaymentDetails {
            card_number: "4242424242424242".into(),
            expiration_month: 12,
            expiration_year: 2030,
            security_code: 123,
            zip_code: "560001".into(),
        }
    }

    fn invalid_fields(details: PaymentDetails) -> Vec<String> {
        match details.validate(&config()) {
            Err(CheckoutError::ValidationFailed { fields }) => fields,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_details() {
        assert!(valid().validate(&config()).is_ok());
    }

    #[test]
    fn test_boundaries() {
        let mut d = valid();
        d.expiration_month = 1;
        d.security_code = 100;
        d.expiration_year = 2034;
        assert!(d.validate(&config()).is_ok());

        d.security_code = 999;
        d.expiration_year = 2024;
        assert!(d.validate(&config()).is_ok());
    }

    #[test]
    fn test_each_field_named() {
        assert_eq!(
            invalid_fields(PaymentDetails {
                card_number: "424242".into(),
                ..valid()
            }),
            ["cardNumber"]
        );
        assert_eq!(
            invalid_fields(PaymentDetails {
                expiration_month: 13,
                ..valid()
            }),
            ["expirationMonth"]
        );
        assert_eq!(
            invalid_fields(PaymentDetails {
                expiration_year: 2019,
                ..valid()
            }),
            ["expirationYear"]
        );
        assert_eq!(
            invalid_fields(PaymentDetails {
                security_code: 99,
                ..valid()
            }),
            ["securityCode"]
        );
        assert_eq!(
            invalid_fields(PaymentDetails {
                zip_code: "5600".into(),
                ..valid()
            }),
            ["zipCode"]
        );
    }

    #[test]
    fn test_to_charge_trims_fields() {
        let details = PaymentDetails {
            card_number: " 4242424242424242 ".into(),
            ..valid()
        };
        let charge = details.to_charge(150).unwrap();
        assert_eq!(charge.card_number, "4242424242424242");
        assert_eq!(charge.exp_month, 12);
        assert_eq!(charge.cvc, 123);
        assert_eq!(charge.amount_cents, 150);
    }

    #[test]
    fn test_debug_masks_card() {
        let debug = format!("{:?}", valid());
        assert!(debug.contains("****4242"));
        assert!(!debug.contains("4242424242424242"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_wrong_types_are_named() {
        let body = serde_json::json!({
            "cardNumber": 4242424242424242u64,
            "expirationMonth": null,
            "expirationYear": 2030,
            "securityCode": "123",
            "zipCode": "560001",
        });
        let details = PaymentDetails::from_json(&body);
        assert_eq!(
            invalid_fields(details),
            ["cardNumber", "expirationMonth", "securityCode"]
        );
    }

    #[test]
    fn test_non_object_body_names_everything() {
        let details = PaymentDetails::from_json(&serde_json::json!([1, 2, 3]));
        assert_eq!(invalid_fields(details).len(), 5);
    }

    #[test]
    fn test_empty_payload_names_everything() {
        let details: PaymentDetails = serde_json::from_str("{}").unwrap();
        assert_eq!(invalid_fields(details).len(), 5);
    }
}
