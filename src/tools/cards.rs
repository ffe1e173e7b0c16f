//! Card-network request builders: Visa, Mastercard, Stripe
//!
//! Card numbers and security codes default to well-known test values; real
//! card data is never solicited and supplied values are never logged.

use super::{BoundArgs, BuilderSpec, ParamSpec, RequestBuilder};
use crate::models::RenderedPayload;
use crate::Result;
use serde_json::json;
use uuid::Uuid;

pub struct VisaAuthorizeTransaction {
    spec: BuilderSpec,
}

impl VisaAuthorizeTransaction {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "visa_authorize_transaction",
                "Generate a Visa authorization request with dummy data",
            )
            .param(ParamSpec::float("amount", 100.00))
            .param(ParamSpec::string("currency", "USD"))
            .param(ParamSpec::string("card_number", "4111111111111111"))
            .param(ParamSpec::string("expiration_month", "12"))
            .param(ParamSpec::string("expiration_year", "2025"))
            .param(ParamSpec::string("cvv", "123")),
        }
    }
}

impl RequestBuilder for VisaAuthorizeTransaction {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "transaction": {
                "amount": args.required("amount")?,
                "currency": args.required("currency")?,
                "card": {
                    "number": args.required("card_number")?,
                    "expiration_month": args.required("expiration_month")?,
                    "expiration_year": args.required("expiration_year")?,
                    "cvv": args.required("cvv")?,
                }
            }
        });

        RenderedPayload::json(&data)
    }
}

pub struct MastercardPaymentRequest {
    spec: BuilderSpec,
}

impl MastercardPaymentRequest {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "mastercard_payment_request",
                "Generate a Mastercard payment request with dummy data",
            )
            .param(ParamSpec::float("amount", 50.00))
            .param(ParamSpec::string("currency", "EUR"))
            .param(ParamSpec::string("card_number", "5555555555554444"))
            .param(ParamSpec::string("expiration_month", "06"))
            .param(ParamSpec::string("expiration_year", "2024"))
            .param(ParamSpec::string("cvc", "321")),
        }
    }
}

impl RequestBuilder for MastercardPaymentRequest {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "apiOperation": "PAY",
            "order": {
                "amount": args.required("amount")?,
                "currency": args.required("currency")?,
            },
            "sourceOfFunds": {
                "provided": {
                    "card": {
                        "number": args.required("card_number")?,
                        "expiry": {
                            "month": args.required("expiration_month")?,
                            "year": args.required("expiration_year")?,
                        },
                        "securityCode": args.required("cvc")?,
                    }
                },
                "type": "CARD"
            }
        });

        RenderedPayload::json(&data)
    }
}

/// Stripe payment-intent builder.
///
/// Embeds a freshly generated `metadata.order_id` UUID on every call, so
/// this is the one builder whose output is intentionally non-deterministic.
pub struct StripeCreatePaymentIntent {
    spec: BuilderSpec,
}

impl StripeCreatePaymentIntent {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "stripe_create_payment_intent",
                "Generate a Stripe create payment intent request with dummy data",
            )
            .param(ParamSpec::integer("amount", 2000))
            .param(ParamSpec::string("currency", "usd"))
            .param(ParamSpec::array("payment_method_types", json!(["card"]))),
        }
    }
}

impl RequestBuilder for StripeCreatePaymentIntent {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "amount": args.required("amount")?,
            "currency": args.required("currency")?,
            "payment_method_types": args.required("payment_method_types")?,
            "metadata": {
                "order_id": Uuid::new_v4().to_string(),
            }
        });

        RenderedPayload::json(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn build_json(builder: &dyn RequestBuilder, arguments: Value) -> Value {
        let args = BoundArgs::bind(builder.spec(), &arguments).unwrap();
        let payload = builder.build(&args).unwrap();
        serde_json::from_str(&payload.body).unwrap()
    }

    #[test]
    fn test_visa_defaults_use_test_card() {
        let parsed = build_json(&VisaAuthorizeTransaction::new(), json!({}));
        assert_eq!(parsed["transaction"]["amount"], 100.0);
        assert_eq!(parsed["transaction"]["card"]["number"], "4111111111111111");
        assert_eq!(parsed["transaction"]["card"]["cvv"], "123");
    }

    #[test]
    fn test_visa_integer_amount_accepted_for_float_param() {
        let parsed = build_json(&VisaAuthorizeTransaction::new(), json!({"amount": 250}));
        assert_eq!(parsed["transaction"]["amount"], 250);
    }

    #[test]
    fn test_mastercard_nested_shape() {
        let parsed = build_json(
            &MastercardPaymentRequest::new(),
            json!({"amount": 75.5, "currency": "GBP"}),
        );

        assert_eq!(parsed["apiOperation"], "PAY");
        assert_eq!(parsed["order"]["amount"], 75.5);
        assert_eq!(parsed["order"]["currency"], "GBP");
        assert_eq!(
            parsed["sourceOfFunds"]["provided"]["card"]["expiry"]["month"],
            "06"
        );
        assert_eq!(parsed["sourceOfFunds"]["type"], "CARD");
    }

    #[test]
    fn test_stripe_embeds_fresh_order_id() {
        let builder = StripeCreatePaymentIntent::new();
        let first = build_json(&builder, json!({}));
        let second = build_json(&builder, json!({}));

        let first_id = first["metadata"]["order_id"].as_str().unwrap();
        let second_id = second["metadata"]["order_id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(first_id).is_ok());
        assert_ne!(first_id, second_id);

        assert_eq!(first["amount"], 2000);
        assert_eq!(first["payment_method_types"], json!(["card"]));
    }
}
