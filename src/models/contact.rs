use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Patch;

/// Inbound contact fields (`POST /api/contact`, `PUT /api/contact/{id}`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactFields {
    #[serde(rename = "type")]
    pub contact_type: Patch<String>,
    pub organization: Patch<String>,
    pub alias: Patch<String>,
    pub city: Patch<String>,
    pub country: Patch<String>,
    pub state: Patch<String>,
    pub street_no: Patch<String>,
    pub address_info: Patch<String>,
    pub pcode: Patch<String>,
    pub fname: Patch<String>,
    pub lname: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
    pub fax: Patch<String>,
    pub comment: Patch<String>,
    pub confirm_owner_consent: Patch<bool>,
    pub extensions: Patch<Value>,
    pub nic_ref: Patch<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NicMember {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactReference {
    pub nic: NicMember,
}

/// Contact payload for the registry. Unset fields go out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "type")]
    pub contact_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub alias: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub address: Vec<Option<String>>,
    pub pcode: Option<String>,
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_owner_consent: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nic_ref: Vec<ContactReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}
