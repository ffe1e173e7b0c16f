//! Request builder trait and registry
//!
//! Builders are pure, synchronous, side-effect-free string construction:
//! each renders one canonical financial-request payload shape from supplied
//! or default parameter values. The registry is built once at startup and
//! read-only afterwards; its order is the order tools are shown to the LLM.

use crate::error::AgentError;
use crate::models::RenderedPayload;
use crate::Result;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub mod banking;
pub mod cards;
pub mod iso8583;
pub mod paypal;
pub mod paytm;
pub mod razorpay;

/// Semantic parameter types declared by builders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Float,
    Boolean,
    Object,
    Array,
}

impl ParamKind {
    fn json_type(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Float => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::Object => "object",
            ParamKind::Array => "array",
        }
    }

    /// Whether a supplied JSON value satisfies this semantic type.
    /// Float accepts any number; Integer requires a whole number.
    fn accepts(self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Integer => value.is_i64() || value.is_u64(),
            ParamKind::Float => value.is_number(),
            ParamKind::Boolean => value.is_boolean(),
            ParamKind::Object => value.is_object(),
            ParamKind::Array => value.is_array(),
        }
    }
}

/// One declared builder parameter: name, semantic type, optional default.
/// A parameter without a default is optional and is simply omitted from the
/// payload when the caller does not supply it.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn string(name: &'static str, default: &str) -> Self {
        Self {
            name,
            kind: ParamKind::String,
            default: Some(Value::String(default.to_string())),
        }
    }

    pub fn opt_string(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::String,
            default: None,
        }
    }

    pub fn integer(name: &'static str, default: i64) -> Self {
        Self {
            name,
            kind: ParamKind::Integer,
            default: Some(json!(default)),
        }
    }

    pub fn opt_integer(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Integer,
            default: None,
        }
    }

    pub fn float(name: &'static str, default: f64) -> Self {
        Self {
            name,
            kind: ParamKind::Float,
            default: Some(json!(default)),
        }
    }

    pub fn boolean(name: &'static str, default: bool) -> Self {
        Self {
            name,
            kind: ParamKind::Boolean,
            default: Some(Value::Bool(default)),
        }
    }

    pub fn object(name: &'static str, default: Value) -> Self {
        Self {
            name,
            kind: ParamKind::Object,
            default: Some(default),
        }
    }

    pub fn opt_object(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Object,
            default: None,
        }
    }

    pub fn array(name: &'static str, default: Value) -> Self {
        Self {
            name,
            kind: ParamKind::Array,
            default: Some(default),
        }
    }

    pub fn opt_array(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Array,
            default: None,
        }
    }
}

/// Name, description, and ordered parameter schema for one builder.
/// The description is what the LLM sees when selecting a tool.
#[derive(Debug, Clone)]
pub struct BuilderSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParamSpec>,
}

impl BuilderSpec {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            parameters: Vec::new(),
        }
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.parameters.push(param);
        self
    }

    /// Render the OpenAI-style tool definition for this builder.
    pub fn to_tool_definition(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.parameters {
            let mut schema = Map::new();
            schema.insert("type".to_string(), json!(param.kind.json_type()));
            if let Some(default) = &param.default {
                schema.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name.to_string(), Value::Object(schema));
        }

        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                },
            }
        })
    }
}

/// Arguments bound against a builder's schema: unknown keys rejected, types
/// checked, defaults resolved. Optional parameters with no supplied value
/// stay absent so builders can omit their payload blocks entirely.
#[derive(Debug, Clone)]
pub struct BoundArgs {
    values: Map<String, Value>,
}

impl BoundArgs {
    pub fn bind(spec: &BuilderSpec, arguments: &Value) -> Result<Self> {
        let empty = Map::new();
        let supplied: &Map<String, Value> = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return Err(AgentError::InvalidArgument(format!(
                    "arguments for '{}' must be a JSON object",
                    spec.name
                )))
            }
        };

        for (key, value) in supplied {
            let Some(param) = spec.parameters.iter().find(|p| p.name == key) else {
                return Err(AgentError::InvalidArgument(format!(
                    "unknown parameter '{}' for builder '{}'",
                    key, spec.name
                )));
            };

            if !value.is_null() && !param.kind.accepts(value) {
                return Err(AgentError::InvalidArgument(format!(
                    "parameter '{}' of builder '{}' expects type {}",
                    key,
                    spec.name,
                    param.kind.json_type()
                )));
            }
        }

        let mut values = Map::new();
        for param in &spec.parameters {
            match supplied.get(param.name) {
                Some(value) if !value.is_null() => {
                    values.insert(param.name.to_string(), value.clone());
                }
                _ => {
                    if let Some(default) = &param.default {
                        values.insert(param.name.to_string(), default.clone());
                    }
                }
            }
        }

        Ok(Self { values })
    }

    /// Value that is guaranteed present after binding (declared default).
    pub fn required(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| AgentError::InvalidArgument(format!("missing parameter '{}'", name)))
    }

    /// Optional value: `None` means the parameter was omitted and had no
    /// default, so the corresponding payload block must not appear.
    pub fn optional(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// String accessor for template substitution.
    pub fn str(&self, name: &str) -> Result<&str> {
        self.required(name)?.as_str().ok_or_else(|| {
            AgentError::InvalidArgument(format!("parameter '{}' is not a string", name))
        })
    }
}

/// Trait for a single request builder (pure, deterministic rendering)
pub trait RequestBuilder: Send + Sync {
    fn spec(&self) -> &BuilderSpec;
    fn build(&self, args: &BoundArgs) -> Result<RenderedPayload>;
}

/// Ordered registry of request builders
pub struct ToolRegistry {
    ordered: Vec<Arc<dyn RequestBuilder>>,
    by_name: HashMap<String, Arc<dyn RequestBuilder>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            ordered: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn register(&mut self, builder: Arc<dyn RequestBuilder>) {
        self.by_name
            .insert(builder.spec().name.to_string(), builder.clone());
        self.ordered.push(builder);
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<dyn RequestBuilder>> {
        self.by_name.get(name).cloned()
    }

    /// Builder specs in registration order.
    pub fn list(&self) -> Vec<&BuilderSpec> {
        self.ordered.iter().map(|b| b.spec()).collect()
    }

    /// OpenAI tool definitions in registration order.
    pub fn tool_definitions(&self) -> Vec<Value> {
        self.ordered
            .iter()
            .map(|b| b.spec().to_tool_definition())
            .collect()
    }

    /// Resolve, validate arguments against the schema, and invoke.
    pub fn invoke(&self, name: &str, arguments: &Value) -> Result<RenderedPayload> {
        let builder = self
            .resolve(name)
            .ok_or_else(|| AgentError::ToolNotFound(name.to_string()))?;

        let args = BoundArgs::bind(builder.spec(), arguments)?;
        builder.build(&args)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the full builder catalog in the order the LLM should see it.
pub fn create_default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(paytm::PaytmBalanceEnquiry::new()));
    registry.register(Arc::new(iso8583::BankBalanceIsoFormat::new()));
    registry.register(Arc::new(razorpay::CreateRazorpayCustomer::new()));
    registry.register(Arc::new(razorpay::EditRazorpayCustomer::new()));
    registry.register(Arc::new(iso8583::Iso8583FundTransfer::new()));
    registry.register(Arc::new(razorpay::CreateRazorpayUpiPaymentLink::new()));
    registry.register(Arc::new(razorpay::RazorpayPaymentViaNetbanking::new()));
    registry.register(Arc::new(paypal::SendPaypalInvoice::new()));
    registry.register(Arc::new(paytm::NpciUpiPaymentConfirmation::new()));
    registry.register(Arc::new(cards::VisaAuthorizeTransaction::new()));
    registry.register(Arc::new(cards::MastercardPaymentRequest::new()));
    registry.register(Arc::new(cards::StripeCreatePaymentIntent::new()));
    registry.register(Arc::new(banking::CheckAccountBalance::new()));
    registry.register(Arc::new(banking::CreateCustomerProfile::new()));
    registry.register(Arc::new(banking::InitiateWireTransfer::new()));
    registry.register(Arc::new(banking::RequestCreditReport::new()));
    registry.register(Arc::new(banking::CreateRecurringPayment::new()));
    registry.register(Arc::new(banking::RequestLoanApplication::new()));
    registry.register(Arc::new(banking::CurrencyExchangeRequest::new()));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> BuilderSpec {
        BuilderSpec::new("sample", "Sample builder")
            .param(ParamSpec::string("mid", "defaultMID"))
            .param(ParamSpec::integer("amount", 100))
            .param(ParamSpec::opt_object("notes"))
    }

    #[test]
    fn test_bind_resolves_defaults() {
        let args = BoundArgs::bind(&sample_spec(), &json!({})).unwrap();
        assert_eq!(args.str("mid").unwrap(), "defaultMID");
        assert_eq!(args.required("amount").unwrap(), &json!(100));
        assert!(args.optional("notes").is_none());
    }

    #[test]
    fn test_bind_keeps_supplied_values_verbatim() {
        let args =
            BoundArgs::bind(&sample_spec(), &json!({"mid": "M1", "amount": 500})).unwrap();
        assert_eq!(args.str("mid").unwrap(), "M1");
        assert_eq!(args.required("amount").unwrap(), &json!(500));
    }

    #[test]
    fn test_bind_rejects_unknown_parameter() {
        let err = BoundArgs::bind(&sample_spec(), &json!({"bogus": 1})).unwrap_err();
        assert!(matches!(err, AgentError::InvalidArgument(_)));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_bind_rejects_wrong_type() {
        let err = BoundArgs::bind(&sample_spec(), &json!({"amount": "500"})).unwrap_err();
        assert!(matches!(err, AgentError::InvalidArgument(_)));
    }

    #[test]
    fn test_bind_treats_null_as_omitted() {
        let args = BoundArgs::bind(&sample_spec(), &json!({"notes": null})).unwrap();
        assert!(args.optional("notes").is_none());
    }

    #[test]
    fn test_registry_preserves_registration_order() {
        let registry = create_default_registry();
        let names: Vec<&str> = registry.list().iter().map(|s| s.name).collect();
        assert_eq!(names[0], "request_paytm_balance_enquiry");
        assert_eq!(names[1], "request_bank_balance_iso_format");
        assert_eq!(names.len(), 19);
        assert_eq!(*names.last().unwrap(), "currency_exchange_request");
    }

    #[test]
    fn test_registry_invoke_unknown_tool() {
        let registry = create_default_registry();
        let err = registry.invoke("no_such_tool", &json!({})).unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(_)));
    }

    #[test]
    fn test_tool_definition_shape() {
        let definition = sample_spec().to_tool_definition();
        assert_eq!(definition["type"], "function");
        assert_eq!(definition["function"]["name"], "sample");
        assert_eq!(
            definition["function"]["parameters"]["properties"]["amount"]["type"],
            "integer"
        );
        assert_eq!(
            definition["function"]["parameters"]["properties"]["mid"]["default"],
            "defaultMID"
        );
    }
}
