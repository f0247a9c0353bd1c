use serde::{Deserialize, Serialize};

use super::Patch;

/// Inbound SSL contact fields (`POST /api/sslcontact`, `PUT /api/sslcontact/{id}`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SslContactFields {
    pub organization: Patch<String>,
    pub city: Patch<String>,
    pub state: Patch<String>,
    pub country: Patch<String>,
    pub street_no: Patch<String>,
    pub address_info: Patch<String>,
    pub pcode: Patch<String>,
    pub title: Patch<String>,
    pub fname: Patch<String>,
    pub lname: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
    pub fax: Patch<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SslContact {
    pub organization: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub address: Vec<Option<String>>,
    pub pcode: Option<String>,
    pub title: Option<String>,
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
}
