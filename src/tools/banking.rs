//! Generic banking builders: balance checks, profiles, transfers, credit,
//! recurring payments, loans, and FX.
//!
//! Defaults are placeholder values throughout; the SSN and account-number
//! defaults are obviously fake and exist only to produce a complete payload
//! shape when the user supplies nothing.

use super::{BoundArgs, BuilderSpec, ParamSpec, RequestBuilder};
use crate::models::RenderedPayload;
use crate::Result;
use serde_json::json;

pub struct CheckAccountBalance {
    spec: BuilderSpec,
}

impl CheckAccountBalance {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "check_account_balance",
                "Generate a generic account balance check request",
            )
            .param(ParamSpec::string("account_number", "1234567890"))
            .param(ParamSpec::string("routing_number", "021000021")),
        }
    }
}

impl RequestBuilder for CheckAccountBalance {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "request_type": "BALANCE_INQUIRY",
            "account_info": {
                "account_number": args.required("account_number")?,
                "routing_number": args.required("routing_number")?,
            }
        });

        RenderedPayload::json(&data)
    }
}

pub struct CreateCustomerProfile {
    spec: BuilderSpec,
}

impl CreateCustomerProfile {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "create_customer_profile",
                "Generate a request to create a customer profile with dummy data",
            )
            .param(ParamSpec::string("name", "Alice Smith"))
            .param(ParamSpec::string("email", "alice.smith@example.com"))
            .param(ParamSpec::string("phone", "+1234567890"))
            .param(ParamSpec::object(
                "address",
                json!({
                    "street": "123 Main St",
                    "city": "Anytown",
                    "state": "CA",
                    "zip": "12345",
                    "country": "US"
                }),
            )),
        }
    }
}

impl RequestBuilder for CreateCustomerProfile {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "customer": {
                "name": args.required("name")?,
                "email": args.required("email")?,
                "phone": args.required("phone")?,
                "address": args.required("address")?,
            }
        });

        RenderedPayload::json(&data)
    }
}

pub struct InitiateWireTransfer {
    spec: BuilderSpec,
}

impl InitiateWireTransfer {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "initiate_wire_transfer",
                "Generate a wire transfer initiation request with dummy data",
            )
            .param(ParamSpec::float("amount", 5000.00))
            .param(ParamSpec::string("currency", "USD"))
            .param(ParamSpec::string("sender_account", "1111222233334444"))
            .param(ParamSpec::string("recipient_account", "5555666677778888"))
            .param(ParamSpec::string("recipient_bank", "BOFAUS3NXXX")),
        }
    }
}

impl RequestBuilder for InitiateWireTransfer {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "transfer_type": "WIRE",
            "amount": args.required("amount")?,
            "currency": args.required("currency")?,
            "sender_account": args.required("sender_account")?,
            "recipient": {
                "account": args.required("recipient_account")?,
                "bank_code": args.required("recipient_bank")?,
            }
        });

        RenderedPayload::json(&data)
    }
}

pub struct RequestCreditReport {
    spec: BuilderSpec,
}

impl RequestCreditReport {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "request_credit_report",
                "Generate a credit report request with dummy data",
            )
            .param(ParamSpec::string("ssn", "123-45-6789"))
            .param(ParamSpec::string("name", "John Doe"))
            .param(ParamSpec::string("dob", "1980-01-01")),
        }
    }
}

impl RequestBuilder for RequestCreditReport {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "request_type": "CREDIT_REPORT",
            "subject": {
                "ssn": args.required("ssn")?,
                "name": args.required("name")?,
                "date_of_birth": args.required("dob")?,
            }
        });

        RenderedPayload::json(&data)
    }
}

pub struct CreateRecurringPayment {
    spec: BuilderSpec,
}

impl CreateRecurringPayment {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "create_recurring_payment",
                "Generate a recurring payment setup request with dummy data",
            )
            .param(ParamSpec::float("amount", 19.99))
            .param(ParamSpec::string("frequency", "MONTHLY"))
            .param(ParamSpec::string("start_date", "2023-08-01"))
            .param(ParamSpec::object(
                "payment_method",
                json!({
                    "type": "CARD",
                    "last4": "1234",
                    "brand": "visa"
                }),
            )),
        }
    }
}

impl RequestBuilder for CreateRecurringPayment {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "recurring_payment": {
                "amount": args.required("amount")?,
                "currency": "USD",
                "frequency": args.required("frequency")?,
                "start_date": args.required("start_date")?,
                "payment_method": args.required("payment_method")?,
            }
        });

        RenderedPayload::json(&data)
    }
}

pub struct RequestLoanApplication {
    spec: BuilderSpec,
}

impl RequestLoanApplication {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "request_loan_application",
                "Generate a loan application request with dummy data",
            )
            .param(ParamSpec::float("amount", 50000.00))
            .param(ParamSpec::integer("term_months", 60))
            .param(ParamSpec::object(
                "applicant",
                json!({
                    "name": "Emma Johnson",
                    "annual_income": 75000,
                    "credit_score": 720
                }),
            )),
        }
    }
}

impl RequestBuilder for RequestLoanApplication {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "loan_request": {
                "amount": args.required("amount")?,
                "term_months": args.required("term_months")?,
                "purpose": "HOME_IMPROVEMENT",
                "applicant": args.required("applicant")?,
            }
        });

        RenderedPayload::json(&data)
    }
}

pub struct CurrencyExchangeRequest {
    spec: BuilderSpec,
}

impl CurrencyExchangeRequest {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "currency_exchange_request",
                "Generate a currency exchange request with dummy data",
            )
            .param(ParamSpec::string("from_currency", "USD"))
            .param(ParamSpec::string("to_currency", "EUR"))
            .param(ParamSpec::float("amount", 1000.00)),
        }
    }
}

impl RequestBuilder for CurrencyExchangeRequest {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let data = json!({
            "exchange_request": {
                "from_currency": args.required("from_currency")?,
                "to_currency": args.required("to_currency")?,
                "amount": args.required("amount")?,
            }
        });

        RenderedPayload::json(&data)
    }
}
