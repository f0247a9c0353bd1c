use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Patch, RecordId};

pub const DEFAULT_PRODUCT: &str = "SSL123";
pub const DEFAULT_AUTHENTICATION_METHOD: &str = "FILE";
pub const DEFAULT_LIFETIME_MONTHS: u32 = 12;

/// Inbound certificate fields (create, create realtime, prepare order)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CertificateFields {
    pub name: Patch<String>,
    pub sslcontact_id: Patch<RecordId>,
    pub product: Patch<String>,
    pub authentication_method: Patch<String>,
    pub lifetime_months: Patch<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePeriod {
    pub unit: String,
    pub period: u32,
}

impl TimePeriod {
    pub fn months(period: u32) -> Self {
        Self {
            unit: "MONTH".to_string(),
            period,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertAuthentication {
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub name: String,
    pub product: String,
    pub csr: String,
    pub admin_contact: Value,
    pub technical_contact: Value,
    pub lifetime: TimePeriod,
    pub authentication: CertAuthentication,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateData {
    pub name: String,
    pub product: String,
    pub csr: String,
}
