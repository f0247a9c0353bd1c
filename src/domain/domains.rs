use serde_json::{Map, Value};
use tracing::info;

use super::contacts::resolve_contact;
use super::{fetched_record, Result};
use crate::models::domain::{Domain, DomainFields, DomainRestore, NameServer};
use crate::models::Patch;
use crate::registry::{PassthroughHeaders, RegistryClient};

/// The four contact roles a domain carries
pub const CONTACT_ROLES: [&str; 4] = ["adminc", "ownerc", "techc", "zonec"];

fn name_servers(hosts: &[String]) -> Vec<NameServer> {
    hosts.iter().map(NameServer::host).collect()
}

/// Resolve `contact_id` if one was given. A failed lookup aborts the caller
/// before anything is written.
async fn contact_for(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    fields: &DomainFields,
) -> Result<Option<Value>> {
    match fields.contact_id.as_option() {
        Some(id) => Ok(Some(resolve_contact(client, headers, id).await?)),
        None => Ok(None),
    }
}

/// Create and transfer payload
pub fn build_domain(fields: &DomainFields, contact: Option<Value>) -> Domain {
    Domain {
        name: fields.name.cloned_option(),
        nameservers: fields.nameservers.as_option().map(|hosts| name_servers(hosts)),
        adminc: contact.clone(),
        ownerc: contact.clone(),
        techc: contact.clone(),
        zonec: contact,
        authinfo: None,
    }
}

pub fn build_restore(name: &str, fields: &DomainFields, contact: Option<Value>) -> DomainRestore {
    DomainRestore {
        name: name.to_string(),
        nameservers: fields.nameservers.as_option().map(|hosts| name_servers(hosts)),
        adminc: contact.clone(),
        ownerc: contact.clone(),
        techc: contact.clone(),
        zonec: contact,
    }
}

/// Overwrite the fields present in `fields` on a fetched domain record.
/// `contact` is the resolved record for a supplied `contact_id`.
pub fn patch_domain(
    record: &mut Map<String, Value>,
    fields: &DomainFields,
    contact: Option<Value>,
) -> serde_json::Result<()> {
    fields.comment.apply(record, "comment")?;
    fields
        .nameservers
        .clone()
        .map(|hosts| name_servers(&hosts))
        .apply(record, "nameservers")?;
    fields.confirm_owner_consent.apply(record, "confirmOwnerConsent")?;
    fields.general_request_email.apply(record, "generalRequestEmail")?;

    let contact = match (&fields.contact_id, contact) {
        (Patch::Absent, _) => Patch::Absent,
        (_, Some(contact)) => Patch::Value(contact),
        (_, None) => Patch::Null,
    };
    for role in CONTACT_ROLES {
        contact.apply(record, role)?;
    }

    Ok(())
}

#[tracing::instrument(skip(client, headers, fields))]
pub async fn create_domain(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    fields: &DomainFields,
) -> Result<Value> {
    let contact = contact_for(client, headers, fields).await?;
    let domain = serde_json::to_value(build_domain(fields, contact))?;

    Ok(client.domain(headers).create(domain).await?)
}

#[tracing::instrument(skip(client, headers, fields))]
pub async fn transfer_domain(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    fields: &DomainFields,
) -> Result<Value> {
    let contact = contact_for(client, headers, fields).await?;
    let domain = Domain {
        authinfo: fields.authinfo.cloned_option(),
        ..build_domain(fields, contact)
    };

    Ok(client.domain(headers).transfer(serde_json::to_value(domain)?).await?)
}

/// Fetch-then-patch. Concurrent updates to one domain race; last write wins.
#[tracing::instrument(skip(client, headers, fields))]
pub async fn update_domain(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    name: &str,
    fields: &DomainFields,
) -> Result<Value> {
    let service = client.domain(headers);
    let mut record = fetched_record(service.info(name).await?, "domain", name)?;
    let contact = contact_for(client, headers, fields).await?;

    patch_domain(&mut record, fields, contact)?;
    info!("Submitting patched domain");

    Ok(service.update(name, Value::Object(record)).await?)
}

/// Renew submits the fetched record unchanged
#[tracing::instrument(skip(client, headers))]
pub async fn renew_domain(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    name: &str,
) -> Result<Value> {
    let service = client.domain(headers);
    let record = fetched_record(service.info(name).await?, "domain", name)?;

    Ok(service.renew(name, Value::Object(record)).await?)
}

#[tracing::instrument(skip(client, headers, fields))]
pub async fn restore_domain(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    name: &str,
    fields: &DomainFields,
) -> Result<Value> {
    let contact = contact_for(client, headers, fields).await?;
    let restore = serde_json::to_value(build_restore(name, fields, contact))?;

    Ok(client.domain(headers).restore(name, restore).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::registry::{MockRegistryTransport, RegistryError};
    use pretty_assertions::assert_eq;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn contact_record() -> Value {
        json!({ "id": 2112, "fname": "John", "lname": "Doe" })
    }

    #[test]
    fn test_build_domain_sets_all_contact_roles() {
        let fields: DomainFields = serde_json::from_value(json!({
            "name": "example.com",
            "nameservers": ["ns1.example.net", "ns2.example.net"],
            "contact_id": "2112"
        }))
        .unwrap();

        let domain = serde_json::to_value(build_domain(&fields, Some(contact_record()))).unwrap();

        assert_eq!(
            domain,
            json!({
                "name": "example.com",
                "nameservers": [ { "name": "ns1.example.net" }, { "name": "ns2.example.net" } ],
                "adminc": contact_record(),
                "ownerc": contact_record(),
                "techc": contact_record(),
                "zonec": contact_record()
            })
        );
    }

    #[test]
    fn test_patch_domain_leaves_absent_fields_untouched() {
        let original = match json!({
            "name": "example.com",
            "comment": "old",
            "nameservers": [ { "name": "a.ns.example" } ],
            "ownerc": { "id": 1 }
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let mut record = original.clone();

        patch_domain(&mut record, &DomainFields::default(), None).unwrap();

        assert_eq!(record, original);
    }

    #[test]
    fn test_patch_domain_overwrites_present_fields() {
        let fields: DomainFields = serde_json::from_value(json!({
            "comment": "",
            "confirm_owner_consent": false,
            "general_request_email": "hostmaster@example.com",
            "contact_id": 2112
        }))
        .unwrap();
        let mut record = Map::new();
        record.insert("comment".to_string(), json!("old"));

        patch_domain(&mut record, &fields, Some(contact_record())).unwrap();

        assert_eq!(record["comment"], "");
        assert_eq!(record["confirmOwnerConsent"], false);
        assert_eq!(record["generalRequestEmail"], "hostmaster@example.com");
        for role in CONTACT_ROLES {
            assert_eq!(record[role], contact_record());
        }
    }

    #[tokio::test]
    async fn test_failed_contact_lookup_skips_domain_create() {
        let mut transport = MockRegistryTransport::new();
        transport
            .expect_send()
            .withf(|request, _| request.method == Method::GET && request.path == "/contact/999999")
            .times(1)
            .returning(|_, _| {
                Err(RegistryError::Remote {
                    status: 404,
                    body: json!({ "status": { "code": "E0105", "type": "ERROR" } }),
                })
            });
        transport
            .expect_send()
            .withf(|request, _| request.path == "/domain")
            .never();

        let client = RegistryClient::new(Arc::new(transport));
        let fields: DomainFields = serde_json::from_value(json!({
            "name": "example.com",
            "nameservers": ["ns1.example.net", "ns2.example.net"],
            "contact_id": 999999
        }))
        .unwrap();

        let err = create_domain(&client, &PassthroughHeaders::none(), &fields)
            .await
            .unwrap_err();

        match err {
            DomainError::Registry(RegistryError::Remote { status, .. }) => assert_eq!(status, 404),
            other => panic!("Expected upstream 404, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_renew_submits_fetched_record() {
        let mut transport = MockRegistryTransport::new();
        transport
            .expect_send()
            .withf(|request, _| request.method == Method::GET && request.path == "/domain/example.com")
            .times(1)
            .returning(|_, _| Ok(json!({ "data": [ { "name": "example.com", "period": 1 } ] })));
        transport
            .expect_send()
            .withf(|request, _| {
                request.method == Method::PUT
                    && request.path == "/domain/example.com/_renew"
                    && request.body == Some(json!({ "name": "example.com", "period": 1 }))
            })
            .times(1)
            .returning(|_, _| Ok(json!({ "status": { "type": "SUCCESS" } })));

        let client = RegistryClient::new(Arc::new(transport));

        renew_domain(&client, &PassthroughHeaders::none(), "example.com")
            .await
            .unwrap();
    }

    #[test]
    fn test_patch_domain_null_contact_clears_all_roles() {
        let mut record = match json!({
            "name": "example.com",
            "adminc": { "id": 1 },
            "ownerc": { "id": 1 },
            "techc": { "id": 1 },
            "zonec": { "id": 1 }
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let fields: DomainFields = serde_json::from_value(json!({ "contact_id": null })).unwrap();

        patch_domain(&mut record, &fields, None).unwrap();

        assert_eq!(
            Value::Object(record),
            json!({ "name": "example.com", "adminc": null, "ownerc": null, "techc": null, "zonec": null })
        );
    }

    #[tokio::test]
    async fn test_update_resolves_contact_between_fetch_and_put() {
        let mut transport = MockRegistryTransport::new();
        let mut sequence = mockall::Sequence::new();

        transport
            .expect_send()
            .withf(|request, _| request.method == Method::GET && request.path == "/domain/example.com")
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| {
                Ok(json!({ "data": [ { "name": "example.com", "comment": "keep", "ownerc": { "id": 1 } } ] }))
            });
        transport
            .expect_send()
            .withf(|request, _| request.method == Method::GET && request.path == "/contact/2112")
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(json!({ "data": [ contact_record() ] })));
        transport
            .expect_send()
            .withf(|request, _| {
                request.method == Method::PUT
                    && request.path == "/domain/example.com"
                    && request.body
                        == Some(json!({
                            "name": "example.com",
                            "comment": "keep",
                            "adminc": contact_record(),
                            "ownerc": contact_record(),
                            "techc": contact_record(),
                            "zonec": contact_record()
                        }))
            })
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(json!({ "status": { "type": "SUCCESS" } })));

        let client = RegistryClient::new(Arc::new(transport));
        let fields: DomainFields = serde_json::from_value(json!({ "contact_id": 2112 })).unwrap();

        let result = update_domain(&client, &PassthroughHeaders::none(), "example.com", &fields)
            .await
            .unwrap();

        assert_eq!(result["status"]["type"], "SUCCESS");
    }

    #[tokio::test]
    async fn test_failed_contact_lookup_skips_domain_update() {
        let mut transport = MockRegistryTransport::new();
        transport
            .expect_send()
            .withf(|request, _| request.method == Method::GET && request.path == "/domain/example.com")
            .times(1)
            .returning(|_, _| Ok(json!({ "data": [ { "name": "example.com" } ] })));
        transport
            .expect_send()
            .withf(|request, _| request.path == "/contact/2112")
            .times(1)
            .returning(|_, _| Ok(json!({ "data": [] })));
        transport
            .expect_send()
            .withf(|request, _| request.method == Method::PUT)
            .never();

        let client = RegistryClient::new(Arc::new(transport));
        let fields: DomainFields = serde_json::from_value(json!({ "contact_id": 2112 })).unwrap();

        let err = update_domain(&client, &PassthroughHeaders::none(), "example.com", &fields)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Registry(RegistryError::MissingRecord { resource: "contact", .. })
        ));
    }
}
