// WHOIS, domain studio and pcdomains valuation/research bodies

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Patch;

pub const ESTIMATION_CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "CNY", "CHF", "JPY"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DomainListFields {
    pub domains: Patch<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeywordFields {
    pub keywords: Patch<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EstimationFields {
    pub domains: Patch<Vec<String>>,
    pub currency: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DomainStudioFields {
    #[serde(rename = "searchToken", alias = "search_token")]
    pub search_token: Patch<String>,
    pub currency: Patch<String>,
    pub sources: Patch<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimation {
    pub domains: Vec<String>,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keywords {
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Domains {
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainStudioSourceInitial {
    pub services: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainStudioSourcePremium {
    pub max: u32,
    pub promo_tlds: Vec<String>,
    pub services: Vec<String>,
    pub top_tlds: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainStudioSources {
    pub initial: DomainStudioSourceInitial,
    pub premium: DomainStudioSourcePremium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEnvelopeSearchRequest {
    pub search_token: String,
    pub currency: Option<String>,
    pub sources: Value,
}
