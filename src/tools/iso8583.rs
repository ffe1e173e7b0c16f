//! Pseudo-ISO-8583 template builders
//!
//! These render an illustrative textual field listing, not the real binary
//! bitmap encoding; the inline comments are part of the template and are
//! kept verbatim as documentation for the reader.

use super::{BoundArgs, BuilderSpec, ParamSpec, RequestBuilder};
use crate::models::RenderedPayload;
use crate::Result;

pub struct BankBalanceIsoFormat {
    spec: BuilderSpec,
}

impl BankBalanceIsoFormat {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "request_bank_balance_iso_format",
                "Generate request ISO 8583 format for Bank balance enquiry and returns output in ISO 8583 format",
            )
            .param(ParamSpec::string("mti", "0100"))
            .param(ParamSpec::string("pan", "1234567890123456"))
            .param(ParamSpec::string("processing_code", "300000"))
            .param(ParamSpec::string("transmission_datetime", "123456"))
            .param(ParamSpec::string("stan", "123456"))
            .param(ParamSpec::string("terminal_id", "T1234567"))
            .param(ParamSpec::string("currency_code", "356")),
        }
    }
}

impl RequestBuilder for BankBalanceIsoFormat {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let body = format!(
            r#"
    <iso8583>
        <field id="0">{mti}</field> <!-- MTI: Authorization request -->
        <field id="2">{pan}</field> <!-- Primary Account Number (PAN) -->
        <field id="3">{processing_code}</field> <!-- Processing Code: Balance Enquiry -->
        <field id="7">{transmission_datetime}</field> <!-- Transmission Date & Time -->
        <field id="11">{stan}</field> <!-- Systems Trace Audit Number (STAN) -->
        <field id="41">{terminal_id}</field> <!-- Card Acceptor Terminal Identification -->
        <field id="49">{currency_code}</field> <!-- Currency Code, Transaction -->
    </iso8583>
    "#,
            mti = args.str("mti")?,
            pan = args.str("pan")?,
            processing_code = args.str("processing_code")?,
            transmission_datetime = args.str("transmission_datetime")?,
            stan = args.str("stan")?,
            terminal_id = args.str("terminal_id")?,
            currency_code = args.str("currency_code")?,
        );

        Ok(RenderedPayload::template(body))
    }
}

pub struct Iso8583FundTransfer {
    spec: BuilderSpec,
}

impl Iso8583FundTransfer {
    pub fn new() -> Self {
        Self {
            spec: BuilderSpec::new(
                "iso8583_fund_transfer",
                "Generate request in ISO 8583 format for fund transfer in JPOS format and returns output in ISO 8583 format",
            )
            .param(ParamSpec::string("mti", "0200"))
            .param(ParamSpec::string("processing_code", "200000"))
            .param(ParamSpec::string("amount", "7500000"))
            .param(ParamSpec::string("stan", "987654"))
            .param(ParamSpec::string("terminal_id", "T2468135"))
            .param(ParamSpec::string("merchant_id", "M135792468024680")),
        }
    }
}

impl RequestBuilder for Iso8583FundTransfer {
    fn spec(&self) -> &BuilderSpec {
        &self.spec
    }

    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload> {
        let body = format!(
            r#"
    <isomsg>
      <header />
      <field id="0" value="{mti}" />
      <field id="3" value="{processing_code}" />
      <field id="4" value="{amount}" />
      <field id="11" value="{stan}" />
      <field id="41" value="{terminal_id}" />
      <field id="42" value="{merchant_id}" />
    </isomsg>
    "#,
            mti = args.str("mti")?,
            processing_code = args.str("processing_code")?,
            amount = args.str("amount")?,
            stan = args.str("stan")?,
            terminal_id = args.str("terminal_id")?,
            merchant_id = args.str("merchant_id")?,
        );

        Ok(RenderedPayload::template(body))
    }
}
