use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Patch, RecordId};

/// Inbound domain fields shared by create, update, restore and transfer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DomainFields {
    pub name: Patch<String>,
    pub nameservers: Patch<Vec<String>>,
    pub contact_id: Patch<RecordId>,
    pub comment: Patch<String>,
    pub confirm_owner_consent: Patch<bool>,
    pub general_request_email: Patch<String>,
    pub authinfo: Patch<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameServer {
    pub name: String,
    #[serde(default, alias = "ip_addresses", skip_serializing_if = "Vec::is_empty")]
    pub ip_addresses: Vec<String>,
}

impl NameServer {
    pub fn host(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip_addresses: Vec::new(),
        }
    }
}

/// Domain payload for create and transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Domain {
    pub name: Option<String>,
    pub nameservers: Option<Vec<NameServer>>,
    pub adminc: Option<Value>,
    pub ownerc: Option<Value>,
    pub techc: Option<Value>,
    pub zonec: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authinfo: Option<String>,
}

/// Domain payload for restore
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainRestore {
    pub name: String,
    pub nameservers: Option<Vec<NameServer>>,
    pub adminc: Option<Value>,
    pub ownerc: Option<Value>,
    pub techc: Option<Value>,
    pub zonec: Option<Value>,
}

/// One entry of a bulk domain update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BulkDomainItem {
    pub name: Patch<String>,
    pub nameservers: Patch<Vec<NameServer>>,
    pub confirm_owner_consent: Patch<bool>,
    pub ownerc_contact_id: Patch<RecordId>,
}

/// Body of `PATCH /api/bulk/domain`. Top-level owner fields apply to every
/// item that does not carry its own.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BulkDomainFields {
    pub domains: Patch<Vec<BulkDomainItem>>,
    pub confirm_owner_consent: Patch<bool>,
    pub ownerc_contact_id: Patch<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkDomainPatchRequest {
    pub objects: Vec<Value>,
}
