// WHOIS, domain studio and pcdomains valuation/research payloads

use serde_json::Value;

use super::Result;
use crate::models::research::{
    DomainEnvelopeSearchRequest, DomainStudioFields, DomainStudioSourceInitial,
    DomainStudioSourcePremium, DomainStudioSources, Domains, Estimation, EstimationFields,
    KeywordFields, Keywords,
};
use crate::registry::{PassthroughHeaders, RegistryClient};

const DEFAULT_SERVICES: &[&str] = &["WHOIS", "PRICE", "ESTIMATION"];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Sources used when a domain studio search does not bring its own
pub fn default_sources() -> DomainStudioSources {
    DomainStudioSources {
        initial: DomainStudioSourceInitial {
            services: strings(DEFAULT_SERVICES),
        },
        premium: DomainStudioSourcePremium {
            max: 5,
            promo_tlds: strings(&["rocks", "shop"]),
            services: strings(DEFAULT_SERVICES),
            top_tlds: strings(&["de", "com", "net"]),
        },
    }
}

pub fn build_domain_studio_request(fields: &DomainStudioFields) -> Result<DomainEnvelopeSearchRequest> {
    let sources = match fields.sources.as_option() {
        Some(sources) => sources.clone(),
        None => serde_json::to_value(default_sources())?,
    };

    Ok(DomainEnvelopeSearchRequest {
        search_token: fields.search_token.cloned_option().unwrap_or_default(),
        currency: fields.currency.cloned_option(),
        sources,
    })
}

pub async fn domain_studio_search(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    fields: &DomainStudioFields,
) -> Result<Value> {
    let request = serde_json::to_value(build_domain_studio_request(fields)?)?;
    Ok(client.domain_studio(headers).search(request).await?)
}

pub async fn whois_multi(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    domains: &[String],
) -> Result<Value> {
    Ok(client.whois(headers).multi(domains).await?)
}

/// Valuation lookups never carry registry passthrough headers
pub async fn estimate(client: &RegistryClient, fields: &EstimationFields) -> Result<Value> {
    let estimation = Estimation {
        domains: fields.domains.cloned_option().unwrap_or_default(),
        currency: fields.currency.cloned_option().unwrap_or_default(),
    };
    Ok(client
        .pc_domains(&PassthroughHeaders::none())
        .estimation(serde_json::to_value(estimation)?)
        .await?)
}

pub async fn keyword(client: &RegistryClient, fields: &KeywordFields) -> Result<Value> {
    let keywords = Keywords {
        keywords: fields.keywords.cloned_option().unwrap_or_default(),
    };
    Ok(client
        .pc_domains(&PassthroughHeaders::none())
        .keyword(serde_json::to_value(keywords)?)
        .await?)
}

pub async fn majestic(client: &RegistryClient, domains: Vec<String>) -> Result<Value> {
    Ok(client
        .pc_domains(&PassthroughHeaders::none())
        .majestic(serde_json::to_value(Domains { domains })?)
        .await?)
}
