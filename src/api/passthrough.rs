use axum::{extract::Request, middleware::Next, response::Response};
use tracing::debug;

use crate::registry::PassthroughHeaders;

/// Filter the inbound headers down to the registry whitelist and attach the
/// result to this request only. Handlers read it back as
/// `Extension<PassthroughHeaders>`.
pub async fn passthrough_headers(mut request: Request, next: Next) -> Response {
    let headers = PassthroughHeaders::from_header_map(request.headers());

    if !headers.is_empty() {
        debug!(count = headers.len(), "Passing registry headers through");
    }

    request.extensions_mut().insert(headers);
    next.run(request).await
}
