//! Razorpay request builders: customer management and payment links

use super::{BoundArgs, BuilderSpec, ParamSpec, RequestBuilder};
use crate::models::RenderedPayload;
use crate::Result;
use serde_json::json;

pub struct CreateRazorpayCustomer {
    spec: BuilderSpec,
}

impl CreateRazorpayCustomer {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "create_razorpay_customer",
                "Generate request in JSON format for creating a Razorpay customer and returns output in JSON format",
            )
            .param(ParamSpec::string("name", "John Doe"))
            .param(ParamSpec::string("email", "john.doe@example.com"))
            .param(ParamSpec::string("contact", "1234567890"))
            .param(ParamSpec::string("fail_existing", "1"))
            .param(ParamSpec::opt_string("gstin"))
            .param(ParamSpec::opt_object("notes")),
        }
    }
}

impl RequestBuilder for CreateRazorpayCustomer {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let mut body = json!({
            "name": args.required("name")?,
            "email": args.required("email")?,
            "contact": args.required("contact")?,
            "fail_existing": args.required("fail_existing")?,
        });

        if let Some(gstin) = args.optional("gstin") {
            body["gstin"] = gstin.clone();
        }
        if let Some(notes) = args.optional("notes") {
            body["notes"] = notes.clone();
        }

        let data = json!({
            "content-type": "application/json",
            "method": "post",
            "url": "https://api.razorpay.com/v1/",
            "body": body,
        });

        RenderedPayload::json(&data)
    }
}

pub struct EditRazorpayCustomer {
    spec: BuilderSpec,
}

impl EditRazorpayCustomer {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "edit_razorpay_customer",
                "Generate request in JSON format for editing a Razorpay customer and returns output in JSON format",
            )
            .param(ParamSpec::string("name", "Jane Doe"))
            .param(ParamSpec::string("email", "jane.doe@example.com"))
            .param(ParamSpec::string("contact", "0987654321")),
        }
    }
}

impl RequestBuilder for EditRazorpayCustomer {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "name": args.required("name")?,
            "email": args.required("email")?,
            "contact": args.required("contact")?,
        });

        RenderedPayload::json(&data)
    }
}

pub struct CreateRazorpayUpiPaymentLink {
    spec: BuilderSpec,
}

impl CreateRazorpayUpiPaymentLink {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "create_razorpay_upi_payment_link",
                "Generate request in JSON format for creating a Razorpay UPI payment link and returns output in JSON format",
            )
            .param(ParamSpec::integer("amount", 100))
            .param(ParamSpec::string("currency", "INR"))
            .param(ParamSpec::object(
                "customer",
                json!({
                    "name": "John Doe",
                    "contact": "1234567890",
                    "email": "john.doe@example.com"
                }),
            ))
            .param(ParamSpec::string("description", "Payment for services"))
            .param(ParamSpec::string("reference_id", "ref12345"))
            .param(ParamSpec::opt_integer("expire_by"))
            .param(ParamSpec::boolean("accept_partial", false))
            .param(ParamSpec::opt_integer("first_min_partial_amount"))
            .param(ParamSpec::opt_object("notify"))
            .param(ParamSpec::boolean("reminder_enable", true))
            .param(ParamSpec::opt_object("notes"))
            .param(ParamSpec::opt_string("callback_url"))
            .param(ParamSpec::string("callback_method", "get")),
        }
    }
}

impl RequestBuilder for CreateRazorpayUpiPaymentLink {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let mut data = json!({
            "upi_link": "true",
            "amount": args.required("amount")?,
            "currency": args.required("currency")?,
            "accept_partial": args.required("accept_partial")?,
            "description": args.required("description")?,
            "customer": args.required("customer")?,
            "reference_id": args.required("reference_id")?,
            "reminder_enable": args.required("reminder_enable")?,
        });

        if let Some(expire_by) = args.optional("expire_by") {
            data["expire_by"] = expire_by.clone();
        }
        if let Some(first_min) = args.optional("first_min_partial_amount") {
            data["first_min_partial_amount"] = first_min.clone();
        }
        if let Some(notify) = args.optional("notify") {
            data["notify"] = notify.clone();
        }
        if let Some(notes) = args.optional("notes") {
            data["notes"] = notes.clone();
        }
        // callback_method travels only with a callback_url.
        if let Some(callback_url) = args.optional("callback_url") {
            data["callback_url"] = callback_url.clone();
            data["callback_method"] = args.required("callback_method")?.clone();
        }

        RenderedPayload::json(&data)
    }
}

pub struct RazorpayPaymentViaNetbanking {
    spec: BuilderSpec,
}

impl RazorpayPaymentViaNetbanking {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "razorpay_payment_via_netbanking",
                "Generate request in JSON format for Razorpay payment via netbanking and returns output in JSON format",
            )
            .param(ParamSpec::integer("amount", 1000))
            .param(ParamSpec::string("currency", "INR"))
            .param(ParamSpec::object(
                "customer",
                json!({
                    "name": "John Doe",
                    "contact": "1234567890",
                    "email": "john.doe@example.com"
                }),
            ))
            .param(ParamSpec::string("description", "Payment for services"))
            .param(ParamSpec::string("reference_id", "ref12345"))
            .param(ParamSpec::object(
                "bank_account",
                json!({
                    "account_number": "1234567890",
                    "ifsc": "BANK0001234"
                }),
            ))
            .param(ParamSpec::boolean("accept_partial", true))
            .param(ParamSpec::integer("first_min_partial_amount", 100))
            .param(ParamSpec::opt_object("notify"))
            .param(ParamSpec::boolean("reminder_enable", true)),
        }
    }
}

impl RequestBuilder for RazorpayPaymentViaNetbanking {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let mut data = json!({
            "amount": args.required("amount")?,
            "currency": args.required("currency")?,
            "accept_partial": args.required("accept_partial")?,
            "first_min_partial_amount": args.required("first_min_partial_amount")?,
            "reference_id": args.required("reference_id")?,
            "description": args.required("description")?,
            "customer": args.required("customer")?,
            "reminder_enable": args.required("reminder_enable")?,
            "options": {
                "order": {
                    "method": "netbanking",
                    "bank_account": args.required("bank_account")?,
                }
            }
        });

        if let Some(notify) = args.optional("notify") {
            data["notify"] = notify.clone();
        }

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
    fn test_create_customer_defaults_omit_optional_blocks() {
        let parsed = build_json(&CreateRazorpayCustomer::new(), json!({}));

        assert_eq!(parsed["method"], "post");
        assert_eq!(parsed["url"], "https://api.razorpay.com/v1/");
        assert_eq!(parsed["body"]["name"], "John Doe");
        assert_eq!(parsed["body"]["fail_existing"], "1");
        assert!(parsed["body"].get("gstin").is_none());
        assert!(parsed["body"].get("notes").is_none());
    }

    #[test]
    fn test_create_customer_optional_blocks_present_when_supplied() {
        let parsed = build_json(
            &CreateRazorpayCustomer::new(),
            json!({"gstin": "29ABCDE1234F2Z5", "notes": {"segment": "retail"}}),
        );

        assert_eq!(parsed["body"]["gstin"], "29ABCDE1234F2Z5");
        assert_eq!(parsed["body"]["notes"]["segment"], "retail");
    }

    #[test]
    fn test_edit_customer_supplied_values() {
        let parsed = build_json(
            &EditRazorpayCustomer::new(),
            json!({"name": "Asha Rao", "contact": "9111111111"}),
        );

        assert_eq!(parsed["name"], "Asha Rao");
        assert_eq!(parsed["email"], "jane.doe@example.com");
        assert_eq!(parsed["contact"], "9111111111");
    }

    #[test]
    fn test_upi_link_defaults() {
        let parsed = build_json(&CreateRazorpayUpiPaymentLink::new(), json!({}));

        assert_eq!(parsed["upi_link"], "true");
        assert_eq!(parsed["amount"], 100);
        assert_eq!(parsed["accept_partial"], false);
        assert_eq!(parsed["reminder_enable"], true);
        assert_eq!(parsed["customer"]["name"], "John Doe");
        assert!(parsed.get("expire_by").is_none());
        assert!(parsed.get("notify").is_none());
        assert!(parsed.get("callback_url").is_none());
        assert!(parsed.get("callback_method").is_none());
    }

    #[test]
    fn test_upi_link_callback_method_requires_url() {
        let parsed = build_json(
            &CreateRazorpayUpiPaymentLink::new(),
            json!({"callback_url": "https://merchant.example/cb"}),
        );

        assert_eq!(parsed["callback_url"], "https://merchant.example/cb");
        assert_eq!(parsed["callback_method"], "get");
    }

    #[test]
    fn test_netbanking_nested_order_block() {
        let parsed = build_json(
            &RazorpayPaymentViaNetbanking::new(),
            json!({"bank_account": {"account_number": "000111222", "ifsc": "HDFC0000123"}}),
        );

        assert_eq!(parsed["options"]["order"]["method"], "netbanking");
        assert_eq!(
            parsed["options"]["order"]["bank_account"]["ifsc"],
            "HDFC0000123"
        );
        assert_eq!(parsed["first_min_partial_amount"], 100);
        assert!(parsed.get("notify").is_none());
    }
}
