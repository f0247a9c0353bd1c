use serde_json::{Map, Value};
use tracing::info;

use super::{fetched_record, Result};
use crate::models::contact::{Contact, ContactFields, ContactReference, NicMember};
use crate::models::ssl_contact::{SslContact, SslContactFields};
use crate::models::{Patch, RecordId};
use crate::registry::{first_record, PassthroughHeaders, RegistryClient};

/// Contact create payload. Every unset field goes out as `null`.
pub fn build_contact(fields: &ContactFields) -> Contact {
    Contact {
        contact_type: fields.contact_type.cloned_option(),
        organization: fields.organization.cloned_option(),
        alias: fields.alias.cloned_option(),
        city: fields.city.cloned_option(),
        country: fields.country.cloned_option(),
        state: fields.state.cloned_option(),
        address: vec![
            fields.street_no.cloned_option(),
            fields.address_info.cloned_option(),
        ],
        pcode: fields.pcode.cloned_option(),
        fname: fields.fname.cloned_option(),
        lname: fields.lname.cloned_option(),
        email: fields.email.cloned_option(),
        phone: fields.phone.cloned_option(),
        fax: fields.fax.cloned_option(),
        comment: fields.comment.cloned_option(),
        confirm_owner_consent: fields.confirm_owner_consent.cloned_option(),
        nic_ref: nic_references(fields.nic_ref.as_option()),
        extensions: fields.extensions.cloned_option(),
    }
}

fn nic_references(labels: Option<&Vec<String>>) -> Vec<ContactReference> {
    labels
        .into_iter()
        .flatten()
        .map(|label| ContactReference {
            nic: NicMember {
                label: label.clone(),
            },
        })
        .collect()
}

/// Overwrite the fields present in `fields` on a fetched contact record
pub fn patch_contact(record: &mut Map<String, Value>, fields: &ContactFields) -> serde_json::Result<()> {
    fields.contact_type.apply(record, "type")?;
    fields.organization.apply(record, "organization")?;
    fields.alias.apply(record, "alias")?;
    fields.city.apply(record, "city")?;
    fields.country.apply(record, "country")?;
    fields.state.apply(record, "state")?;
    fields.pcode.apply(record, "pcode")?;
    fields.fname.apply(record, "fname")?;
    fields.lname.apply(record, "lname")?;
    fields.email.apply(record, "email")?;
    fields.phone.apply(record, "phone")?;
    fields.fax.apply(record, "fax")?;
    fields.comment.apply(record, "comment")?;
    fields.confirm_owner_consent.apply(record, "confirmOwnerConsent")?;
    fields.extensions.apply(record, "extensions")?;
    fields
        .nic_ref
        .clone()
        .map(|labels| nic_references(Some(&labels)))
        .apply(record, "nicRef")?;
    patch_address(record, &fields.street_no, &fields.address_info);
    Ok(())
}

pub fn build_ssl_contact(fields: &SslContactFields) -> SslContact {
    SslContact {
        organization: fields.organization.cloned_option(),
        city: fields.city.cloned_option(),
        state: fields.state.cloned_option(),
        country: fields.country.cloned_option(),
        address: vec![
            fields.street_no.cloned_option(),
            fields.address_info.cloned_option(),
        ],
        pcode: fields.pcode.cloned_option(),
        title: fields.title.cloned_option(),
        fname: fields.fname.cloned_option(),
        lname: fields.lname.cloned_option(),
        email: fields.email.cloned_option(),
        phone: fields.phone.cloned_option(),
        fax: fields.fax.cloned_option(),
    }
}

pub fn patch_ssl_contact(
    record: &mut Map<String, Value>,
    fields: &SslContactFields,
) -> serde_json::Result<()> {
    fields.organization.apply(record, "organization")?;
    fields.city.apply(record, "city")?;
    fields.state.apply(record, "state")?;
    fields.country.apply(record, "country")?;
    fields.pcode.apply(record, "pcode")?;
    fields.title.apply(record, "title")?;
    fields.fname.apply(record, "fname")?;
    fields.lname.apply(record, "lname")?;
    fields.email.apply(record, "email")?;
    fields.phone.apply(record, "phone")?;
    fields.fax.apply(record, "fax")?;
    patch_address(record, &fields.street_no, &fields.address_info);
    Ok(())
}

/// Rebuild the two-line address when either line is supplied. A line that
/// is not supplied keeps its fetched value; a missing second line is `""`.
fn patch_address(record: &mut Map<String, Value>, street_no: &Patch<String>, address_info: &Patch<String>) {
    if street_no.is_absent() && address_info.is_absent() {
        return;
    }

    let existing = record.get("address").and_then(Value::as_array);
    let existing_line = |index: usize| existing.and_then(|lines| lines.get(index)).cloned();

    let line = |patch: &Patch<String>| match patch {
        Patch::Absent => None,
        Patch::Null => Some(Value::Null),
        Patch::Value(text) => Some(Value::String(text.clone())),
    };

    let street = line(street_no)
        .or_else(|| existing_line(0))
        .unwrap_or(Value::Null);
    let info = line(address_info)
        .or_else(|| existing_line(1))
        .unwrap_or_else(|| Value::String(String::new()));

    record.insert("address".to_string(), Value::Array(vec![street, info]));
}

/// Fetch a contact record for embedding into a domain payload
#[tracing::instrument(skip(client, headers), fields(contact_id = %id))]
pub async fn resolve_contact(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    id: &RecordId,
) -> Result<Value> {
    let result = client.contact(headers).info(id.as_str()).await?;
    Ok(first_record(result, "contact", id.as_str())?)
}

/// Fetch an SSL contact record for embedding into a certificate payload
#[tracing::instrument(skip(client, headers), fields(sslcontact_id = %id))]
pub async fn resolve_ssl_contact(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    id: &RecordId,
) -> Result<Value> {
    let result = client.ssl_contact(headers).info(id.as_str()).await?;
    Ok(first_record(result, "sslcontact", id.as_str())?)
}

#[tracing::instrument(skip(client, headers, fields))]
pub async fn create_contact(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    fields: &ContactFields,
) -> Result<Value> {
    let contact = serde_json::to_value(build_contact(fields))?;
    Ok(client.contact(headers).create(contact).await?)
}

/// Fetch-then-patch. Concurrent updates to one contact race; last write wins.
#[tracing::instrument(skip(client, headers, fields))]
pub async fn update_contact(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    id: &str,
    fields: &ContactFields,
) -> Result<Value> {
    let service = client.contact(headers);
    let mut record = fetched_record(service.info(id).await?, "contact", id)?;

    patch_contact(&mut record, fields)?;
    info!(contact_id = id, "Submitting patched contact");

    Ok(service.update(id, Value::Object(record)).await?)
}

#[tracing::instrument(skip(client, headers, fields))]
pub async fn create_ssl_contact(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    fields: &SslContactFields,
) -> Result<Value> {
    let contact = serde_json::to_value(build_ssl_contact(fields))?;
    Ok(client.ssl_contact(headers).create(contact).await?)
}

#[tracing::instrument(skip(client, headers, fields))]
pub async fn update_ssl_contact(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    id: &str,
    fields: &SslContactFields,
) -> Result<Value> {
    let service = client.ssl_contact(headers);
    let mut record = fetched_record(service.info(id).await?, "sslcontact", id)?;

    patch_ssl_contact(&mut record, fields)?;
    info!(sslcontact_id = id, "Submitting patched SSL contact");

    Ok(service.update(id, Value::Object(record)).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MockRegistryTransport;
    use pretty_assertions::assert_eq;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn fetched_contact() -> Map<String, Value> {
        match json!({
            "id": 23250350,
            "type": "PERSON",
            "alias": "John Doe",
            "city": "Regensburg",
            "country": "DE",
            "address": ["Some Street 1", "Floor 2"],
            "pcode": "93047",
            "fname": "John",
            "lname": "Doe",
            "email": "john@example.com",
            "comment": "keep me"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_create_sends_nulls_for_unset_fields() {
        let fields: ContactFields = serde_json::from_value(json!({
            "type": "PERSON",
            "city": "Regensburg",
            "country": "DE",
            "pcode": "93047",
            "lname": "Doe",
            "street_no": "Some Street 1",
            "fax": null
        }))
        .unwrap();

        let contact = serde_json::to_value(build_contact(&fields)).unwrap();

        assert_eq!(
            contact,
            json!({
                "type": "PERSON",
                "alias": null,
                "city": "Regensburg",
                "country": "DE",
                "state": null,
                "address": ["Some Street 1", null],
                "pcode": "93047",
                "fname": null,
                "lname": "Doe",
                "email": null,
                "phone": null,
                "fax": null,
                "comment": null
            })
        );
    }

    #[test]
    fn test_create_with_organization_consent_and_nic_ref() {
        let fields: ContactFields = serde_json::from_value(json!({
            "type": "ORG",
            "organization": "Example GmbH",
            "confirm_owner_consent": true,
            "nic_ref": ["DENIC"]
        }))
        .unwrap();

        let contact = serde_json::to_value(build_contact(&fields)).unwrap();

        assert_eq!(contact["organization"], "Example GmbH");
        assert_eq!(contact["confirmOwnerConsent"], true);
        assert_eq!(contact["nicRef"], json!([ { "nic": { "label": "DENIC" } } ]));
    }

    #[test]
    fn test_patch_leaves_absent_fields_untouched() {
        let original = fetched_contact();
        let mut record = original.clone();

        patch_contact(&mut record, &ContactFields::default()).unwrap();

        assert_eq!(record, original);
    }

    #[test]
    fn test_patch_overwrites_present_fields_including_empty() {
        let fields: ContactFields = serde_json::from_value(json!({
            "city": "Berlin",
            "comment": "",
            "email": null
        }))
        .unwrap();
        let mut record = fetched_contact();

        patch_contact(&mut record, &fields).unwrap();

        assert_eq!(record["city"], "Berlin");
        assert_eq!(record["comment"], "");
        assert_eq!(record["email"], Value::Null);
        assert_eq!(record["fname"], "John");
        assert_eq!(record["address"], json!(["Some Street 1", "Floor 2"]));
    }

    #[test]
    fn test_patch_address_keeps_unsupplied_line() {
        let fields: ContactFields =
            serde_json::from_value(json!({ "street_no": "Other Street 5" })).unwrap();
        let mut record = fetched_contact();

        patch_contact(&mut record, &fields).unwrap();

        assert_eq!(record["address"], json!(["Other Street 5", "Floor 2"]));
    }

    #[test]
    fn test_patch_address_defaults_missing_second_line() {
        let fields: ContactFields =
            serde_json::from_value(json!({ "street_no": "Other Street 5" })).unwrap();
        let mut record = fetched_contact();
        record.insert("address".to_string(), json!(["Some Street 1"]));

        patch_contact(&mut record, &fields).unwrap();

        assert_eq!(record["address"], json!(["Other Street 5", ""]));
    }

    #[test]
    fn test_ssl_patch_leaves_absent_fields_untouched() {
        let original = match json!({
            "id": 7,
            "title": "Dr.",
            "address": ["Main St 1"],
            "state": "BY"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let mut record = original.clone();

        patch_ssl_contact(&mut record, &SslContactFields::default()).unwrap();

        assert_eq!(record, original);
    }

    #[tokio::test]
    async fn test_update_fetches_then_puts_patched_record() {
        let mut transport = MockRegistryTransport::new();
        let mut sequence = mockall::Sequence::new();

        transport
            .expect_send()
            .withf(|request, _| request.method == Method::GET && request.path == "/contact/23250350")
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(json!({ "data": [ Value::Object(fetched_contact()) ] })));
        transport
            .expect_send()
            .withf(|request, _| {
                request.method == Method::PUT
                    && request.path == "/contact/23250350"
                    && request.body.as_ref().map_or(false, |body| {
                        body["fname"] == "Jane" && body["lname"] == "Doe" && body["id"] == 23250350
                    })
            })
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(json!({ "status": { "type": "SUCCESS" } })));

        let client = RegistryClient::new(Arc::new(transport));
        let fields: ContactFields = serde_json::from_value(json!({ "fname": "Jane" })).unwrap();

        let result = update_contact(&client, &PassthroughHeaders::none(), "23250350", &fields)
            .await
            .unwrap();

        assert_eq!(result["status"]["type"], "SUCCESS");
    }

    #[tokio::test]
    async fn test_update_ssl_contact_fetches_then_puts_patched_record() {
        let mut transport = MockRegistryTransport::new();
        let mut sequence = mockall::Sequence::new();

        transport
            .expect_send()
            .withf(|request, _| request.method == Method::GET && request.path == "/sslcontact/7")
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| {
                Ok(json!({ "data": [ {
                    "id": 7,
                    "title": "Dr.",
                    "fname": "John",
                    "address": ["Main St 1", "Floor 2"],
                    "state": "BY"
                } ] }))
            });
        transport
            .expect_send()
            .withf(|request, _| {
                request.method == Method::PUT
                    && request.path == "/sslcontact/7"
                    && request.body
                        == Some(json!({
                            "id": 7,
                            "title": "",
                            "fname": "John",
                            "address": ["Side St 9", "Floor 2"],
                            "state": "BY"
                        }))
            })
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(json!({ "status": { "type": "SUCCESS" } })));

        let client = RegistryClient::new(Arc::new(transport));
        let fields: SslContactFields =
            serde_json::from_value(json!({ "title": "", "street_no": "Side St 9" })).unwrap();

        let result = update_ssl_contact(&client, &PassthroughHeaders::none(), "7", &fields)
            .await
            .unwrap();

        assert_eq!(result["status"]["type"], "SUCCESS");
    }
}
