use serde::{Deserialize, Serialize};

use super::Patch;

/// Inbound user fields (`POST /api/user`, `PUT /api/user/{username}/{context}`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserFields {
    pub username: Patch<String>,
    pub context: Patch<String>,
    pub password: Patch<String>,
    pub language: Patch<String>,
    pub default_email: Patch<String>,
    pub parent_username: Patch<String>,
    pub parent_context: Patch<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicUser {
    pub user: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user: String,
    pub context: String,
    pub password: Option<String>,
    pub language: Option<String>,
    pub default_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<BasicUser>,
}
