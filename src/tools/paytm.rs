//! Indian wallet/UPI rail builders: Paytm balance enquiry and NPCI
//! payment confirmation.

use super::{BoundArgs, BuilderSpec, ParamSpec, RequestBuilder};
use crate::models::RenderedPayload;
use crate::Result;
use serde_json::json;

pub struct PaytmBalanceEnquiry {
    spec: BuilderSpec,
}

impl PaytmBalanceEnquiry {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "request_paytm_balance_enquiry",
                "Generate request in JSON format for Paytm Balance Enquiry and returns output in JSON format",
            )
            .param(ParamSpec::string("userToken", "defaultUserToken"))
            .param(ParamSpec::string("totalAmount", "100"))
            .param(ParamSpec::string("mid", "defaultMID"))
            .param(ParamSpec::string("clientId", "defaultClientID"))
            .param(ParamSpec::string("signature", "defaultSignature")),
        }
    }
}

impl RequestBuilder for PaytmBalanceEnquiry {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "body": {
                "userToken": args.required("userToken")?,
                "totalAmount": args.required("totalAmount")?,
                "mid": args.required("mid")?,
            },
            "head": {
                "clientId": args.required("clientId")?,
                "signature": args.required("signature")?,
            }
        });

        RenderedPayload::json(&data)
    }
}

pub struct NpciUpiPaymentConfirmation {
    spec: BuilderSpec,
}

impl NpciUpiPaymentConfirmation {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "npci_upi_payment_confirmation",
                "Generate request in JSON format for NPCI UPI payment confirmation and returns output in JSON format",
            )
            .param(ParamSpec::string("psp_ref_no", "PSP123456"))
            .param(ParamSpec::string("upi_trans_ref_no", "UPI123456"))
            .param(ParamSpec::string("npci_trans_id", "NPCI123456"))
            .param(ParamSpec::string("cust_ref_no", "CUST123456"))
            .param(ParamSpec::string("amount", "1000"))
            .param(ParamSpec::string("txn_auth_date", "2023-01-01T10:00:00Z"))
            .param(ParamSpec::string("response_code", "00"))
            .param(ParamSpec::string("approval_number", "APPROVED"))
            .param(ParamSpec::string("status", "SUCCESS"))
            .param(ParamSpec::string("status_desc", "Transaction successful"))
            .param(ParamSpec::string("payer_vpa", "payer@bank"))
            .param(ParamSpec::string("payee_vpa", "payee@bank"))
            .param(ParamSpec::string("txn_type", "DEBIT"))
            .param(ParamSpec::string("ref_url", "http://example.com"))
            .param(ParamSpec::string("err_code", "00"))
            .param(ParamSpec::string("payer_mobile_no", "1234567890")),
        }
    }
}

impl RequestBuilder for NpciUpiPaymentConfirmation {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "pspRefNo": args.required("psp_ref_no")?,
            "upiTransRefNo": args.required("upi_trans_ref_no")?,
            "npciTransId": args.required("npci_trans_id")?,
            "custRefNo": args.required("cust_ref_no")?,
            "amount": args.required("amount")?,
            "txnAuthDate": args.required("txn_auth_date")?,
            "responseCode": args.required("response_code")?,
            "approvalNumber": args.required("approval_number")?,
            "status": args.required("status")?,
            "statusDesc": args.required("status_desc")?,
            "addInfo": {},
            "payerVPA": args.required("payer_vpa")?,
            "payeeVPA": args.required("payee_vpa")?,
            "txn_type": args.required("txn_type")?,
            "ref_url": args.required("ref_url")?,
            "errCode": args.required("err_code")?,
            "payerMobileNo": args.required("payer_mobile_no")?,
        });

        RenderedPayload::json(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayloadFormat;
    use serde_json::{json, Value};

    fn build(builder: &dyn RequestBuilder, arguments: Value) -> RenderedPayload {
        let args = BoundArgs::bind(builder.spec(), &arguments).unwrap();
        builder.build(&args).unwrap()
    }

    #[test]
    fn test_paytm_defaults() {
        let payload = build(&PaytmBalanceEnquiry::new(), json!({}));
        assert_eq!(payload.format, PayloadFormat::Json);

        let parsed: Value = serde_json::from_str(&payload.body).unwrap();
        assert_eq!(parsed["body"]["userToken"], "defaultUserToken");
        assert_eq!(parsed["body"]["totalAmount"], "100");
        assert_eq!(parsed["body"]["mid"], "defaultMID");
        assert_eq!(parsed["head"]["clientId"], "defaultClientID");
        assert_eq!(parsed["head"]["signature"], "defaultSignature");
    }

    #[test]
    fn test_paytm_supplied_values_verbatim() {
        let payload = build(
            &PaytmBalanceEnquiry::new(),
            json!({"userToken": "ABC", "totalAmount": "500", "mid": "M1"}),
        );

        let parsed: Value = serde_json::from_str(&payload.body).unwrap();
        assert_eq!(parsed["body"]["userToken"], "ABC");
        assert_eq!(parsed["body"]["totalAmount"], "500");
        assert_eq!(parsed["body"]["mid"], "M1");
        // Unsupplied head fields keep their defaults.
        assert_eq!(parsed["head"]["clientId"], "defaultClientID");
    }

    #[test]
    fn test_paytm_idempotent() {
        let builder = PaytmBalanceEnquiry::new();
        let first = build(&builder, json!({"mid": "M1"}));
        let second = build(&builder, json!({"mid": "M1"}));
        assert_eq!(first.body, second.body);
    }

    #[test]
    fn test_npci_defaults_and_fixed_add_info() {
        let payload = build(&NpciUpiPaymentConfirmation::new(), json!({}));

        let parsed: Value = serde_json::from_str(&payload.body).unwrap();
        assert_eq!(parsed["pspRefNo"], "PSP123456");
        assert_eq!(parsed["payerVPA"], "payer@bank");
        assert_eq!(parsed["addInfo"], json!({}));
        assert_eq!(parsed["payerMobileNo"], "1234567890");
    }
}
