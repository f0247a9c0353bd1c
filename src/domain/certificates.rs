use serde_json::Value;
use tracing::info;

use super::contacts::resolve_ssl_contact;
use super::csr::{generate_csr, CsrBundle};
use super::{DomainError, Result};
use crate::models::certificate::{
    CertAuthentication, Certificate, CertificateData, CertificateFields, TimePeriod,
    DEFAULT_AUTHENTICATION_METHOD, DEFAULT_LIFETIME_MONTHS, DEFAULT_PRODUCT,
};
use crate::registry::{PassthroughHeaders, RegistryClient};

/// Which create verb a certificate order goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    Standard,
    Realtime,
}

/// Key generation is CPU bound, so keep it off the async workers
async fn csr_for(common_name: &str) -> Result<CsrBundle> {
    let common_name = common_name.to_string();
    tokio::task::spawn_blocking(move || generate_csr(&common_name))
        .await
        .map_err(|e| DomainError::Internal(format!("CSR task failed: {}", e)))?
        .map_err(DomainError::from)
}

fn product(fields: &CertificateFields) -> String {
    fields
        .product
        .cloned_option()
        .unwrap_or_else(|| DEFAULT_PRODUCT.to_string())
}

pub fn build_certificate(fields: &CertificateFields, csr: String, contact: Value) -> Certificate {
    Certificate {
        name: fields.name.cloned_option().unwrap_or_default(),
        product: product(fields),
        csr,
        admin_contact: contact.clone(),
        technical_contact: contact,
        lifetime: TimePeriod::months(
            fields
                .lifetime_months
                .cloned_option()
                .unwrap_or(DEFAULT_LIFETIME_MONTHS),
        ),
        authentication: CertAuthentication {
            method: fields
                .authentication_method
                .cloned_option()
                .unwrap_or_else(|| DEFAULT_AUTHENTICATION_METHOD.to_string()),
        },
    }
}

/// Resolve the SSL contact, generate a CSR for the name and order. Only the
/// PEM leaves this function; the private key is dropped with the bundle.
#[tracing::instrument(skip(client, headers, fields))]
pub async fn create_certificate(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    fields: &CertificateFields,
    mode: OrderMode,
) -> Result<Value> {
    let contact = match fields.sslcontact_id.as_option() {
        Some(id) => resolve_ssl_contact(client, headers, id).await?,
        None => Value::Null,
    };

    let name = fields.name.as_option().map(String::as_str).unwrap_or_default();
    let bundle = csr_for(name).await?;
    info!(common_name = name, "Generated CSR");

    let certificate = serde_json::to_value(build_certificate(fields, bundle.pem, contact))?;
    let service = client.certificate(headers);

    Ok(match mode {
        OrderMode::Standard => service.create(certificate).await?,
        OrderMode::Realtime => service.create_realtime(certificate).await?,
    })
}

#[tracing::instrument(skip(client, headers, fields))]
pub async fn prepare_order(
    client: &RegistryClient,
    headers: &PassthroughHeaders,
    fields: &CertificateFields,
) -> Result<Value> {
    let name = fields.name.cloned_option().unwrap_or_default();
    let bundle = csr_for(&name).await?;

    let data = CertificateData {
        product: product(fields),
        name,
        csr: bundle.pem,
    };

    Ok(client
        .certificate(headers)
        .prepare_order(serde_json::to_value(data)?)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MockRegistryTransport;
    use pretty_assertions::assert_eq;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_build_certificate_defaults() {
        let fields: CertificateFields = serde_json::from_value(json!({
            "name": "example.com",
            "sslcontact_id": 7
        }))
        .unwrap();

        let certificate =
            serde_json::to_value(build_certificate(&fields, "PEM".to_string(), json!({ "id": 7 })))
                .unwrap();

        assert_eq!(
            certificate,
            json!({
                "name": "example.com",
                "product": "SSL123",
                "csr": "PEM",
                "adminContact": { "id": 7 },
                "technicalContact": { "id": 7 },
                "lifetime": { "unit": "MONTH", "period": 12 },
                "authentication": { "method": "FILE" }
            })
        );
    }

    #[test]
    fn test_build_certificate_overrides() {
        let fields: CertificateFields = serde_json::from_value(json!({
            "name": "example.com",
            "product": "BASICSSL",
            "authentication_method": "DNS",
            "lifetime_months": 24
        }))
        .unwrap();

        let certificate = build_certificate(&fields, String::new(), Value::Null);

        assert_eq!(certificate.product, "BASICSSL");
        assert_eq!(certificate.authentication.method, "DNS");
        assert_eq!(certificate.lifetime, TimePeriod::months(24));
    }

    #[tokio::test]
    async fn test_realtime_order_resolves_contact_then_posts_csr() {
        let mut transport = MockRegistryTransport::new();
        let mut sequence = mockall::Sequence::new();
        transport
            .expect_send()
            .withf(|request, _| request.method == Method::GET && request.path == "/sslcontact/7")
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(json!({ "data": [ { "id": 7, "lname": "Doe" } ] })));
        transport
            .expect_send()
            .withf(|request, _| {
                request.method == Method::POST
                    && request.path == "/certificate/_realtime"
                    && request.body.as_ref().map_or(false, |body| {
                        body["adminContact"]["id"] == 7
                            && body["csr"]
                                .as_str()
                                .map_or(false, |pem| pem.starts_with("-----BEGIN CERTIFICATE REQUEST-----"))
                    })
            })
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(json!({ "status": { "type": "SUCCESS" } })));

        let client = RegistryClient::new(Arc::new(transport));
        let fields: CertificateFields = serde_json::from_value(json!({
            "name": "example.com",
            "sslcontact_id": "7"
        }))
        .unwrap();

        create_certificate(&client, &PassthroughHeaders::none(), &fields, OrderMode::Realtime)
            .await
            .unwrap();
    }
}
