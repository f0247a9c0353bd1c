use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter, prelude::*};
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;  // Import as _ since we only need the trait methods
use opentelemetry_sdk::{trace::{SdkTracerProvider, Sampler}, Resource};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use tracing_opentelemetry::OpenTelemetryLayer;

use crate::api::handlers::{
    certificate, contact, domain, domain_bulk, domain_studio, pc_domains, ssl_contact, user,
    user_2fa, whois,
};
use crate::api::passthrough::passthrough_headers;
use crate::config::Config;
use crate::registry::{HttpTransport, RegistryClient};

/// One registry client per identity
#[derive(Clone)]
pub struct AppState {
    /// Contacts, domains, users, 2FA, WHOIS, bulk and domain studio
    pub general: RegistryClient,
    /// SSL contacts and certificates
    pub ssl: RegistryClient,
    /// Valuation and research lookups
    pub pc_domains: RegistryClient,
}

pub fn init_tracing() {
    let enable_otel = env::var("OTEL_ENABLED").unwrap_or_else(|_| "false".to_string()) == "true";

    let otel_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4318/v1/traces".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json() // JSON format for log shipping
                .with_target(false)
                .with_span_events(fmt::format::FmtSpan::CLOSE), // Log span close with duration
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,tower=warn,reqwest=warn")),
        );

    if enable_otel {
        match init_opentelemetry(&otel_endpoint) {
            Ok(provider) => {
                opentelemetry::global::set_tracer_provider(provider.clone());

                // global::tracer returns BoxedTracer which doesn't implement PreSampledTracer
                let tracer = provider.tracer("domainrobot-gateway");

                subscriber
                    .with(OpenTelemetryLayer::new(tracer))
                    .init();

                info!("OpenTelemetry enabled: {}", otel_endpoint);
            }
            Err(e) => {
                tracing::error!("Failed to initialize OpenTelemetry: {}. Continuing with logs only.", e);
                subscriber.init();
            }
        }
    } else {
        subscriber.init();
    }
}

fn init_opentelemetry(endpoint: &str) -> Result<SdkTracerProvider, Box<dyn std::error::Error>> {
    let environment = env::var("ENVIRONMENT")
        .unwrap_or_else(|_| "development".to_string());

    let service_name = env::var("OTEL_SERVICE_NAME")
        .unwrap_or_else(|_| "domainrobot-gateway".to_string());

    let sampling_rate = env::var("OTEL_TRACE_SAMPLING_RATE")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(1.0)
        .clamp(0.0, 1.0);

    let resource = Resource::builder()
        .with_attribute(KeyValue::new("service.name", service_name))
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    // HTTP collectors listen on 4318, anything else is treated as gRPC
    let exporter = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        SpanExporter::builder()
            .with_http()
            .with_endpoint(endpoint)
            .build()?
    } else {
        SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()?
    };

    let provider = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(Sampler::TraceIdRatioBased(sampling_rate))
        .with_batch_exporter(exporter)
        .build();

    info!("OpenTelemetry sampling rate: {}%", sampling_rate * 100.0);

    Ok(provider)
}

/// Build the three registry clients from configuration
pub fn build_state(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    let client = |identity| -> Result<RegistryClient, Box<dyn std::error::Error>> {
        Ok(RegistryClient::new(Arc::new(HttpTransport::new(identity, config.timeout)?)))
    };

    info!(url = %config.url, "Creating registry clients");

    Ok(AppState {
        general: client(config.general_identity())?,
        ssl: client(config.ssl_identity())?,
        pc_domains: client(config.pc_domains_identity())?,
    })
}

pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        // Contacts
        .route("/contact", post(contact::create_contact_handler))
        .route("/contact/_search", post(contact::list_contacts_handler))
        .route(
            "/contact/{id}",
            get(contact::contact_info_handler)
                .put(contact::update_contact_handler)
                .delete(contact::delete_contact_handler),
        )
        // Domains
        .route("/domain", post(domain::create_domain_handler))
        .route("/domain/_search", post(domain::list_domains_handler))
        .route("/domain/_transfer", post(domain::transfer_domain_handler))
        .route("/domain/restore/_search", post(domain::restore_list_handler))
        .route(
            "/domain/{name}",
            get(domain::domain_info_handler).put(domain::update_domain_handler),
        )
        .route(
            "/domain/{name}/_authinfo1",
            post(domain::create_authinfo1_handler).delete(domain::delete_authinfo1_handler),
        )
        .route("/domain/{name}/_authinfo2", post(domain::create_authinfo2_handler))
        .route("/domain/{name}/_renew", put(domain::renew_domain_handler))
        .route("/domain/{name}/_restore", put(domain::restore_domain_handler))
        .route("/bulk/domain", patch(domain_bulk::bulk_update_domains_handler))
        // SSL contacts
        .route("/sslcontact", post(ssl_contact::create_ssl_contact_handler))
        .route("/sslcontact/_search", post(ssl_contact::list_ssl_contacts_handler))
        .route(
            "/sslcontact/{id}",
            get(ssl_contact::ssl_contact_info_handler)
                .put(ssl_contact::update_ssl_contact_handler)
                .delete(ssl_contact::delete_ssl_contact_handler),
        )
        // Certificates
        .route("/certificate", post(certificate::create_certificate_handler))
        .route("/certificate/_realtime", post(certificate::create_certificate_realtime_handler))
        .route("/certificate/_prepareOrder", post(certificate::prepare_order_handler))
        .route("/certificate/_search", post(certificate::list_certificates_handler))
        .route(
            "/certificate/{id}",
            get(certificate::certificate_info_handler).delete(certificate::delete_certificate_handler),
        )
        // Users
        .route("/user", post(user::create_user_handler))
        .route("/user/_search", post(user::list_users_handler))
        .route(
            "/user/_2fa",
            put(user_2fa::activate_2fa_handler).delete(user_2fa::deactivate_2fa_handler),
        )
        .route(
            "/user/{username}/{context}",
            get(user::user_info_handler)
                .put(user::update_user_handler)
                .delete(user::delete_user_handler),
        )
        .route("/user/{username}/{context}/_lock", put(user::lock_user_handler))
        .route("/user/{username}/{context}/_unlock", put(user::unlock_user_handler))
        .route("/user/{username}/{context}/copy", post(user::copy_user_handler))
        .route("/user/{username}/{context}/profile", put(user::update_profile_handler))
        .route(
            "/user/{username}/{context}/serviceProfile",
            put(user::update_service_profile_handler),
        )
        .route(
            "/user/{username}/{context}/billinglimit",
            put(user::update_billing_limit_handler),
        )
        .route(
            "/user/{username}/{context}/billingterm",
            put(user::update_billing_term_handler),
        )
        .route(
            "/OTPAuth",
            get(user_2fa::token_config_info_handler).post(user_2fa::token_config_create_handler),
        )
        // WHOIS and domain studio
        .route("/whois", post(whois::whois_multi_handler))
        .route("/whois/{domain}", get(whois::whois_single_handler))
        .route("/domainstudio", post(domain_studio::domain_studio_search_handler))
        // Valuation and research
        .route("/estimate", post(pc_domains::estimation_handler))
        .route("/alexa/{domain}", get(pc_domains::alexa_handler))
        .route("/keyword", post(pc_domains::keyword_handler))
        .route("/meta/{domain}", get(pc_domains::meta_handler))
        .route("/sistrix/{domain}/{country}", get(pc_domains::sistrix_handler))
        .route("/majestic", post(pc_domains::majestic_handler))
        .route("/smu_check/{username}", get(pc_domains::smu_check_handler))
        .route("/wayback/{domain}", get(pc_domains::wayback_handler))
        // Registry headers are computed per request and never shared
        .layer(middleware::from_fn(passthrough_headers));

    Router::new()
        .nest("/api", api)
        // Health check endpoint
        .route("/health", get(health_check))
        .with_state(state)
        // Add tracing layer for observability
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}

pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Domainrobot gateway");

    // Set up ctrl-c handler for graceful shutdown
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutting down gracefully...");
    };

    let app = create_app(build_state(&config)?);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
