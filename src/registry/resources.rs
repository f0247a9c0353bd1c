// Resource-scoped verb sets. One method, one REST call.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

use super::errors::Result;
use super::headers::PassthroughHeaders;
use super::{RegistryClient, RegistryRequest};
use crate::models::query::QuerySpec;

/// Characters that may not appear raw inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

fn query_body(query: &QuerySpec) -> Result<Value> {
    Ok(serde_json::to_value(query)?)
}

macro_rules! resource_service {
    ($name:ident) => {
        pub struct $name<'a> {
            client: &'a RegistryClient,
            headers: &'a PassthroughHeaders,
        }

        impl<'a> $name<'a> {
            pub(super) fn new(client: &'a RegistryClient, headers: &'a PassthroughHeaders) -> Self {
                Self { client, headers }
            }

            async fn send(&self, request: RegistryRequest) -> Result<Value> {
                self.client.send(request, self.headers).await
            }
        }
    };
}

resource_service!(ContactService);
resource_service!(DomainService);
resource_service!(SslContactService);
resource_service!(CertificateService);
resource_service!(UserService);
resource_service!(User2faService);
resource_service!(WhoisService);
resource_service!(DomainBulkService);
resource_service!(DomainStudioService);
resource_service!(PcDomainsService);

impl ContactService<'_> {
    pub async fn create(&self, contact: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/contact").with_body(contact)).await
    }

    pub async fn info(&self, id: &str) -> Result<Value> {
        self.send(RegistryRequest::get(format!("/contact/{}", encode_segment(id))))
            .await
    }

    /// The record carries its own id
    pub async fn update(&self, id: &str, contact: Value) -> Result<Value> {
        self.send(RegistryRequest::put(format!("/contact/{}", encode_segment(id))).with_body(contact))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.send(RegistryRequest::delete(format!("/contact/{}", encode_segment(id))))
            .await
    }

    pub async fn list(&self, query: &QuerySpec) -> Result<Value> {
        self.send(RegistryRequest::post("/contact/_search").with_body(query_body(query)?))
            .await
    }
}

impl DomainService<'_> {
    pub async fn create(&self, domain: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/domain").with_body(domain)).await
    }

    pub async fn info(&self, name: &str) -> Result<Value> {
        self.send(RegistryRequest::get(format!("/domain/{}", encode_segment(name))))
            .await
    }

    pub async fn update(&self, name: &str, domain: Value) -> Result<Value> {
        self.send(RegistryRequest::put(format!("/domain/{}", encode_segment(name))).with_body(domain))
            .await
    }

    pub async fn list(&self, query: &QuerySpec) -> Result<Value> {
        self.send(RegistryRequest::post("/domain/_search").with_body(query_body(query)?))
            .await
    }

    pub async fn auth_info1_create(&self, name: &str) -> Result<Value> {
        self.send(RegistryRequest::post(format!("/domain/{}/_authinfo1", encode_segment(name))))
            .await
    }

    pub async fn auth_info1_delete(&self, name: &str) -> Result<Value> {
        self.send(RegistryRequest::delete(format!("/domain/{}/_authinfo1", encode_segment(name))))
            .await
    }

    pub async fn auth_info2_create(&self, name: &str) -> Result<Value> {
        self.send(RegistryRequest::post(format!("/domain/{}/_authinfo2", encode_segment(name))))
            .await
    }

    pub async fn renew(&self, name: &str, domain: Value) -> Result<Value> {
        self.send(
            RegistryRequest::put(format!("/domain/{}/_renew", encode_segment(name))).with_body(domain),
        )
        .await
    }

    pub async fn restore(&self, name: &str, restore: Value) -> Result<Value> {
        self.send(
            RegistryRequest::put(format!("/domain/{}/_restore", encode_segment(name)))
                .with_body(restore),
        )
        .await
    }

    pub async fn restore_list(&self, query: &QuerySpec) -> Result<Value> {
        self.send(RegistryRequest::post("/domain/restore/_search").with_body(query_body(query)?))
            .await
    }

    pub async fn transfer(&self, domain: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/domain/_transfer").with_body(domain))
            .await
    }
}

impl SslContactService<'_> {
    pub async fn create(&self, contact: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/sslcontact").with_body(contact)).await
    }

    pub async fn info(&self, id: &str) -> Result<Value> {
        self.send(RegistryRequest::get(format!("/sslcontact/{}", encode_segment(id))))
            .await
    }

    pub async fn update(&self, id: &str, contact: Value) -> Result<Value> {
        self.send(RegistryRequest::put(format!("/sslcontact/{}", encode_segment(id))).with_body(contact))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.send(RegistryRequest::delete(format!("/sslcontact/{}", encode_segment(id))))
            .await
    }

    pub async fn list(&self, query: &QuerySpec) -> Result<Value> {
        self.send(RegistryRequest::post("/sslcontact/_search").with_body(query_body(query)?))
            .await
    }
}

impl CertificateService<'_> {
    pub async fn create(&self, certificate: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/certificate").with_body(certificate))
            .await
    }

    pub async fn create_realtime(&self, certificate: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/certificate/_realtime").with_body(certificate))
            .await
    }

    pub async fn prepare_order(&self, certificate_data: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/certificate/_prepareOrder").with_body(certificate_data))
            .await
    }

    pub async fn info(&self, id: &str) -> Result<Value> {
        self.send(RegistryRequest::get(format!("/certificate/{}", encode_segment(id))))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.send(RegistryRequest::delete(format!("/certificate/{}", encode_segment(id))))
            .await
    }

    pub async fn list(&self, query: &QuerySpec) -> Result<Value> {
        self.send(RegistryRequest::post("/certificate/_search").with_body(query_body(query)?))
            .await
    }
}

impl UserService<'_> {
    fn user_path(username: &str, context: &str) -> String {
        format!("/user/{}/{}", encode_segment(username), encode_segment(context))
    }

    pub async fn create(&self, user: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/user").with_body(user)).await
    }

    pub async fn info(&self, username: &str, context: &str) -> Result<Value> {
        self.send(RegistryRequest::get(Self::user_path(username, context)))
            .await
    }

    pub async fn update(&self, username: &str, context: &str, user: Value) -> Result<Value> {
        self.send(RegistryRequest::put(Self::user_path(username, context)).with_body(user))
            .await
    }

    pub async fn delete(&self, username: &str, context: &str) -> Result<Value> {
        self.send(RegistryRequest::delete(Self::user_path(username, context)))
            .await
    }

    pub async fn list(&self, query: &QuerySpec) -> Result<Value> {
        self.send(RegistryRequest::post("/user/_search").with_body(query_body(query)?))
            .await
    }

    pub async fn lock(&self, username: &str, context: &str) -> Result<Value> {
        self.send(RegistryRequest::put(format!("{}/_lock", Self::user_path(username, context))))
            .await
    }

    pub async fn unlock(&self, username: &str, context: &str) -> Result<Value> {
        self.send(RegistryRequest::put(format!("{}/_unlock", Self::user_path(username, context))))
            .await
    }

    pub async fn copy(&self, username: &str, context: &str, body: Value) -> Result<Value> {
        self.send(
            RegistryRequest::post(format!("{}/copy", Self::user_path(username, context))).with_body(body),
        )
        .await
    }

    pub async fn profile_update(&self, username: &str, context: &str, body: Value) -> Result<Value> {
        self.send(
            RegistryRequest::put(format!("{}/profile", Self::user_path(username, context)))
                .with_body(body),
        )
        .await
    }

    pub async fn service_profile_update(
        &self,
        username: &str,
        context: &str,
        body: Value,
    ) -> Result<Value> {
        self.send(
            RegistryRequest::put(format!("{}/serviceProfile", Self::user_path(username, context)))
                .with_body(body),
        )
        .await
    }

    pub async fn billing_limit_update(
        &self,
        username: &str,
        context: &str,
        body: Value,
    ) -> Result<Value> {
        self.send(
            RegistryRequest::put(format!("{}/billinglimit", Self::user_path(username, context)))
                .with_body(body),
        )
        .await
    }

    pub async fn billing_term_update(
        &self,
        username: &str,
        context: &str,
        body: Value,
    ) -> Result<Value> {
        self.send(
            RegistryRequest::put(format!("{}/billingterm", Self::user_path(username, context)))
                .with_body(body),
        )
        .await
    }
}

impl User2faService<'_> {
    pub async fn token_config_info(&self) -> Result<Value> {
        self.send(RegistryRequest::get("/OTPAuth")).await
    }

    pub async fn token_config_create(&self) -> Result<Value> {
        self.send(RegistryRequest::post("/OTPAuth")).await
    }

    pub async fn token_config_activate(&self) -> Result<Value> {
        self.send(RegistryRequest::put("/user/_2fa")).await
    }

    pub async fn token_config_delete(&self) -> Result<Value> {
        self.send(RegistryRequest::delete("/user/_2fa")).await
    }
}

impl WhoisService<'_> {
    pub async fn single(&self, domain: &str) -> Result<Value> {
        self.send(RegistryRequest::get(format!("/whois/{}", encode_segment(domain))))
            .await
    }

    pub async fn multi(&self, domains: &[String]) -> Result<Value> {
        self.send(RegistryRequest::post("/whois").with_body(serde_json::to_value(domains)?))
            .await
    }
}

impl DomainBulkService<'_> {
    pub async fn update(&self, request: Value) -> Result<Value> {
        self.send(RegistryRequest::patch("/bulk/domain").with_body(request))
            .await
    }
}

impl DomainStudioService<'_> {
    pub async fn search(&self, request: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/domainstudio").with_body(request))
            .await
    }
}

impl PcDomainsService<'_> {
    pub async fn estimation(&self, estimation: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/estimate").with_body(estimation))
            .await
    }

    pub async fn alexa(&self, domain: &str) -> Result<Value> {
        self.send(RegistryRequest::get(format!("/alexa/{}", encode_segment(domain))))
            .await
    }

    pub async fn keyword(&self, keywords: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/keyword").with_body(keywords))
            .await
    }

    pub async fn meta(&self, domain: &str) -> Result<Value> {
        self.send(RegistryRequest::get(format!("/meta/{}", encode_segment(domain))))
            .await
    }

    pub async fn sistrix(&self, domain: &str, country: &str) -> Result<Value> {
        self.send(RegistryRequest::get(format!(
            "/sistrix/{}/{}",
            encode_segment(domain),
            encode_segment(country)
        )))
        .await
    }

    pub async fn majestic(&self, domains: Value) -> Result<Value> {
        self.send(RegistryRequest::post("/majestic").with_body(domains))
            .await
    }

    pub async fn smu_check(&self, username: &str) -> Result<Value> {
        self.send(RegistryRequest::get(format!("/smu_check/{}", encode_segment(username))))
            .await
    }

    pub async fn wayback(&self, domain: &str) -> Result<Value> {
        self.send(RegistryRequest::get(format!("/wayback/{}", encode_segment(domain))))
            .await
    }
}
