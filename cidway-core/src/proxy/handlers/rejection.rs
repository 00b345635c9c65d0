use crate::ctx::{RequestCtx, RequestRejectError};
use crate::proxy::handlers::writer::write_response;
use crate::resolve::{ProxiedBody, ProxiedResponse};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use pingora::prelude::Session;

const ALLOWED_METHODS: &str = "GET, HEAD";

/// Answers requests that never reach a resolver.
pub(crate) struct RejectionHandler;

impl RejectionHandler {
    pub(crate) async fn handle(
        &self,
        session: &mut Session,
        ctx: &mut RequestCtx,
        err: &RequestRejectError,
    ) -> pingora::Result<bool> {
        let response = rejection_response(err, ctx.method() == Method::HEAD);
        ctx.status = Some(response.status.as_u16());

        write_response(session, response).await?;
        Ok(true)
    }
}

pub(crate) fn rejection_response(err: &RequestRejectError, head: bool) -> ProxiedResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );

    let (status, text) = match err {
        RequestRejectError::MethodNotAllowed => {
            headers.insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
            (StatusCode::METHOD_NOT_ALLOWED, None)
        }
        RequestRejectError::InvalidPath | RequestRejectError::PathTraversal => {
            (StatusCode::BAD_REQUEST, Some("Invalid request path."))
        }
    };

    let len = text.map(str::len).unwrap_or(0);
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    if text.is_some() {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
    }

    let body = match text {
        Some(text) if !head => ProxiedBody::Bytes(Bytes::from_static(text.as_bytes())),
        _ => ProxiedBody::Empty,
    };

    ProxiedResponse {
        status,
        headers,
        body,
    }
}
