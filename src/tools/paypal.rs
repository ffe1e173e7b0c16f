//! PayPal invoicing builder

use super::{BoundArgs, BuilderSpec, ParamSpec, RequestBuilder};
use crate::models::RenderedPayload;
use crate::Result;
use serde_json::json;

/// Send-invoice request.
///
/// `invoice_id` is accepted for selection context but is not part of the
/// rendered body; the PayPal send endpoint carries it in the URL path.
pub struct SendPaypalInvoice {
    spec: BuilderSpec,
}

impl SendPaypalInvoice {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "send_paypal_invoice",
                "Generate request in JSON format for sending a PayPal invoice and returns output in JSON format",
            )
            .param(ParamSpec::string("invoice_id", "INV12345"))
            .param(ParamSpec::string("subject", "Invoice for services"))
            .param(ParamSpec::string("note", "Thank you for your business."))
            .param(ParamSpec::boolean("send_to_recipient", true))
            .param(ParamSpec::opt_array("additional_recipients"))
            .param(ParamSpec::boolean("send_to_invoicer", false)),
        }
    }
}

impl RequestBuilder for SendPaypalInvoice {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let mut data = json!({
            "subject": args.required("subject")?,
            "note": args.required("note")?,
            "send_to_recipient": args.required("send_to_recipient")?,
            "send_to_invoicer": args.required("send_to_invoicer")?,
        });

        if let Some(recipients) = args.optional("additional_recipients") {
            data["additional_recipients"] = recipients.clone();
        }

        RenderedPayload::json(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn build_json(arguments: Value) -> Value {
        let builder = SendPaypalInvoice::new();
        let args = BoundArgs::bind(builder.spec(), &arguments).unwrap();
        let payload = builder.build(&args).unwrap();
        serde_json::from_str(&payload.body).unwrap()
    }

    #[test]
    fn test_defaults_omit_recipients_and_invoice_id() {
        let parsed = build_json(json!({}));

        assert_eq!(parsed["subject"], "Invoice for services");
        assert_eq!(parsed["send_to_recipient"], true);
        assert_eq!(parsed["send_to_invoicer"], false);
        assert!(parsed.get("additional_recipients").is_none());
        assert!(parsed.get("invoice_id").is_none());
    }

    #[test]
    fn test_additional_recipients_rendered_when_supplied() {
        let parsed = build_json(json!({
            "additional_recipients": ["billing@example.com"]
        }));

        assert_eq!(
            parsed["additional_recipients"],
            json!(["billing@example.com"])
        );
    }
}
