use serde_json::{Map, Value};
use tracing::info;

use super::{fetched_record, Result};
use crate::models::user::{BasicUser, User, UserFields};
use crate::registry::{PassthroughHeaders, RegistryClient};

pub fn build_user(fields: &UserFields) -> User {
    let parent = match (fields.parent_username.as_option(), fields.parent_context.as_option()) {
        (Some(user), Some(context)) => Some(BasicUser {
            user: user.clone(),
            context: context.clone(),
        }),
        _ => None,
    };

    User {
        user: fields.username.cloned_option().unwrap_or_default(),
        context: fields.context.cloned_option().unwrap_or_default(),
        password: fields.password.cloned_option(),
        language: fields.language.cloned_option(),
        default_email: fields.default_email.cloned_option(),
        parent,
    }
}

pub fn patch_user(record: &mut Map<String, Value>, fields: &UserFields) -> serde_json::Result<()> {
    fields.language.apply(record, "language")?;
    fields.default_email.apply(record, "defaultEmail")?;
    fields.password.apply(record, "password")?;
    Ok(())
}

#[tracing::instrument(skip(client, headers, fields))]
pub async fn create_user(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    fields: &UserFields,
) -> Result<Value> {
    let user = serde_json::to_value(build_user(fields))?;
    Ok(client.user(headers).create(user).await?)
}

#[tracing::instrument(skip(client, headers, fields))]
pub async fn update_user(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    username: &str,
    context: &str,
    fields: &UserFields,
) -> Result<Value> {
    let service = client.user(headers);
    let id = format!("{}/{}", username, context);
    let mut record = fetched_record(service.info(username, context).await?, "user", &id)?;

    patch_user(&mut record, fields)?;
    info!("Submitting patched user");

    Ok(service.update(username, context, Value::Object(record)).await?)
}
