use serde_json::Value;
use std::collections::HashMap;
use tracing::info;

use super::contacts::resolve_contact;
use super::{fetched_record, Result};
use crate::models::domain::{BulkDomainFields, BulkDomainPatchRequest};
use crate::models::{Patch, RecordId};
use crate::registry::{PassthroughHeaders, RegistryClient};

/// Contact lookups for one batch; each distinct id is fetched at most once
struct ContactCache<'a> {
    client: &'a RegistryClient,
    headers: &'a PassthroughHeaders,
    resolved: HashMap<String, Value>,
}

impl<'a> ContactCache<'a> {
    fn new(client: &'a RegistryClient, headers: &'a PassthroughHeaders) -> Self {
        Self {
            client,
            headers,
            resolved: HashMap::new(),
        }
    }

    async fn get(&mut self, id: &RecordId) -> Result<Value> {
        if let Some(contact) = self.resolved.get(id.as_str()) {
            return Ok(contact.clone());
        }

        let contact = resolve_contact(self.client, self.headers, id).await?;
        self.resolved.insert(id.as_str().to_string(), contact.clone());
        Ok(contact)
    }
}

/// Fetch and patch every listed domain in order, then send them all in one
/// `PATCH /bulk/domain`. Any failure aborts before that call.
#[tracing::instrument(skip(client, headers, fields))]
pub async fn bulk_update_domains(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    fields: &BulkDomainFields,
) -> Result<Value> {
    let items = fields.domains.as_option().map(Vec::as_slice).unwrap_or_default();
    let service = client.domain(headers);
    let mut contacts = ContactCache::new(client, headers);
    let mut objects = Vec::with_capacity(items.len());

    for item in items {
        let name = item.name.as_option().map(String::as_str).unwrap_or_default();
        let mut record = fetched_record(service.info(name).await?, "domain", name)?;

        if item.nameservers.is_present() {
            item.nameservers.apply(&mut record, "nameservers")?;
        }

        let consent = if item.confirm_owner_consent.is_present() {
            &item.confirm_owner_consent
        } else {
            &fields.confirm_owner_consent
        };
        consent.apply(&mut record, "confirmOwnerConsent")?;

        let owner = if item.ownerc_contact_id.is_present() {
            &item.ownerc_contact_id
        } else {
            &fields.ownerc_contact_id
        };
        let ownerc = match owner {
            Patch::Value(id) => Patch::Value(contacts.get(id).await?),
            Patch::Null => Patch::Null,
            Patch::Absent => Patch::Absent,
        };
        ownerc.apply(&mut record, "ownerc")?;

        objects.push(Value::Object(record));
    }

    info!(
        domains = objects.len(),
        contact_lookups = contacts.resolved.len(),
        "Submitting bulk domain update"
    );

    let request = serde_json::to_value(BulkDomainPatchRequest { objects })?;
    Ok(client.domain_bulk(headers).update(request).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MockRegistryTransport;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn owner() -> Value {
        json!({ "id": 2112, "lname": "Owner" })
    }

    #[tokio::test]
    async fn test_shared_owner_is_resolved_once() {
        let mut transport = MockRegistryTransport::new();
        transport
            .expect_send()
            .withf(|request, _| request.method == Method::GET && request.path.starts_with("/domain/"))
            .times(2)
            .returning(|request, _| {
                let name = request.path.trim_start_matches("/domain/").to_string();
                Ok(json!({ "data": [ { "name": name, "nameservers": [] } ] }))
            });
        transport
            .expect_send()
            .withf(|request, _| request.method == Method::GET && request.path == "/contact/2112")
            .times(1)
            .returning(|_, _| Ok(json!({ "data": [ owner() ] })));
        transport
            .expect_send()
            .withf(|request, _| {
                request.method == Method::PATCH
                    && request.path == "/bulk/domain"
                    && request.body.as_ref().map_or(false, |body| {
                        let objects = body["objects"].as_array().cloned().unwrap_or_default();
                        objects.len() == 2
                            && objects[0]["name"] == "one.example"
                            && objects[1]["name"] == "two.example"
                            && objects.iter().all(|o| o["ownerc"] == owner())
                            && objects.iter().all(|o| o["confirmOwnerConsent"] == true)
                    })
            })
            .times(1)
            .returning(|_, _| Ok(json!({ "status": { "type": "SUCCESS" } })));

        let client = RegistryClient::new(Arc::new(transport));
        let fields: BulkDomainFields = serde_json::from_value(json!({
            "domains": [ { "name": "one.example" }, { "name": "two.example" } ],
            "confirm_owner_consent": true,
            "ownerc_contact_id": "2112"
        }))
        .unwrap();

        let result = bulk_update_domains(&client, &PassthroughHeaders::none(), &fields)
            .await
            .unwrap();

        assert_eq!(result["status"]["type"], "SUCCESS");
    }

    #[tokio::test]
    async fn test_item_values_override_batch_defaults() {
        let mut transport = MockRegistryTransport::new();
        transport
            .expect_send()
            .withf(|request, _| request.path == "/domain/one.example")
            .times(1)
            .returning(|_, _| Ok(json!({ "data": [ { "name": "one.example" } ] })));
        transport
            .expect_send()
            .withf(|request, _| request.path == "/contact/7")
            .times(1)
            .returning(|_, _| Ok(json!({ "data": [ { "id": 7 } ] })));
        transport
            .expect_send()
            .withf(|request, _| {
                request.path == "/bulk/domain"
                    && request.body
                        == Some(json!({
                            "objects": [ {
                                "name": "one.example",
                                "nameservers": [ { "name": "ns1.example.net", "ipAddresses": ["192.0.2.1"] } ],
                                "confirmOwnerConsent": false,
                                "ownerc": { "id": 7 }
                            } ]
                        }))
            })
            .times(1)
            .returning(|_, _| Ok(json!({})));

        let client = RegistryClient::new(Arc::new(transport));
        let fields: BulkDomainFields = serde_json::from_value(json!({
            "domains": [ {
                "name": "one.example",
                "nameservers": [ { "name": "ns1.example.net", "ipAddresses": ["192.0.2.1"] } ],
                "confirm_owner_consent": false,
                "ownerc_contact_id": 7
            } ],
            "confirm_owner_consent": true,
            "ownerc_contact_id": 2112
        }))
        .unwrap();

        bulk_update_domains(&client, &PassthroughHeaders::none(), &fields)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_failed_lookup_skips_bulk_patch() {
        let mut transport = MockRegistryTransport::new();
        transport
            .expect_send()
            .withf(|request, _| request.path == "/domain/one.example")
            .times(1)
            .returning(|_, _| Ok(json!({ "data": [] })));
        transport
            .expect_send()
            .withf(|request, _| request.path == "/bulk/domain")
            .never();

        let client = RegistryClient::new(Arc::new(transport));
        let fields: BulkDomainFields =
            serde_json::from_value(json!({ "domains": [ { "name": "one.example" } ] })).unwrap();

        assert!(bulk_update_domains(&client, &PassthroughHeaders::none(), &fields)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_item_null_owner_clears_instead_of_inheriting() {
        let mut transport = MockRegistryTransport::new();
        transport
            .expect_send()
            .withf(|request, _| request.path == "/domain/one.example")
            .times(1)
            .returning(|_, _| Ok(json!({ "data": [ { "name": "one.example", "ownerc": { "id": 1 } } ] })));
        transport
            .expect_send()
            .withf(|request, _| request.path.starts_with("/contact/"))
            .never();
        transport
            .expect_send()
            .withf(|request, _| {
                request.path == "/bulk/domain"
                    && request.body
                        == Some(json!({ "objects": [ { "name": "one.example", "ownerc": null } ] }))
            })
            .times(1)
            .returning(|_, _| Ok(json!({})));

        let client = RegistryClient::new(Arc::new(transport));
        let fields: BulkDomainFields = serde_json::from_value(json!({
            "domains": [ { "name": "one.example", "ownerc_contact_id": null } ],
            "ownerc_contact_id": 2112
        }))
        .unwrap();

        bulk_update_domains(&client, &PassthroughHeaders::none(), &fields)
            .await
            .unwrap();
    }
}
