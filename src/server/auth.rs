//! Auth middleware — extracts and validates credentials per the agent
//! card's declared authentication schemes.
//!
//! The agent card's `authentication_schemes` list is ordered; the first
//! scheme the incoming request presents credentials for is the one checked.
//! A request presenting no recognized credential gets `401` with
//! `AuthenticationRequired`; one presenting a credential the validator
//! rejects gets `401` with `AuthenticationFailed`.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::WWW_AUTHENTICATE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use futures::future::BoxFuture;

use crate::error::A2AError;
use crate::types::{AuthScheme, JsonRpcError};

/// A credential extracted from an incoming request per one of the agent
/// card's declared schemes.
#[derive(Debug, Clone)]
pub enum ExtractedAuth {
    Bearer(String),
    Header { name: String, value: String },
    OAuth2(String),
}

/// Validates an extracted credential. Returning `Err` rejects the request
/// with `AuthenticationFailed`.
pub type AuthValidator =
    Arc<dyn Fn(ExtractedAuth) -> BoxFuture<'static, Result<(), A2AError>> + Send + Sync>;

#[derive(Clone)]
pub struct AuthState {
    pub schemes: Vec<AuthScheme>,
    pub validator: AuthValidator,
}

fn extract(scheme: &AuthScheme, request: &Request) -> Option<ExtractedAuth> {
    match scheme {
        AuthScheme::Bearer => request
            .headers()
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| ExtractedAuth::Bearer(token.to_string())),
        AuthScheme::Header { name } => request
            .headers()
            .get(name.as_str())
            .and_then(|v| v.to_str().ok())
            .map(|value| ExtractedAuth::Header {
                name: name.clone(),
                value: value.to_string(),
            }),
        AuthScheme::OAuth2 { .. } => request
            .headers()
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| ExtractedAuth::OAuth2(token.to_string())),
    }
}

fn unauthorized(err: A2AError) -> Response {
    let rpc_err: JsonRpcError = err.into();
    let mut response = (
        axum::http::StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "jsonrpc": "2.0",
            "error": rpc_err,
            "id": null,
        })),
    )
        .into_response();
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, "Bearer".parse().unwrap());
    response
}

/// axum middleware enforcing authentication for routes it's layered onto.
/// Extraction is attempted in the order the schemes were declared on the
/// agent card; the first scheme with a matching credential in the request
/// is the one validated.
pub async fn auth_middleware(
    State(state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if state.schemes.is_empty() {
        return next.run(request).await;
    }

    let credential = state.schemes.iter().find_map(|scheme| extract(scheme, &request));

    let Some(credential) = credential else {
        return unauthorized(A2AError::authentication_required(
            "no credential matching a declared authentication scheme was presented",
        ));
    };

    match (state.validator)(credential.clone()).await {
        Ok(()) => {
            // Make the validated credential available to downstream
            // handlers via `Extension<ExtractedAuth>`.
            request.extensions_mut().insert(credential);
            next.run(request).await
        }
        Err(_) => unauthorized(A2AError::authentication_failed("credential was rejected")),
    }
}
