use crate::resolve::{ProxiedBody, ProxiedResponse};
use futures_util::StreamExt;
use pingora::prelude::Session;
use pingora::{Custom, Error};
use pingora_http::ResponseHeader;

/// Writes status and headers first, then the body chunk by chunk as it arrives.
///
/// A failed client write returns early and drops the upstream stream, which cancels the upstream
/// fetch.
pub(crate) async fn write_response(
    session: &mut Session,
    response: ProxiedResponse,
) -> pingora::Result<()> {
    let ProxiedResponse {
        status,
        headers,
        body,
    } = response;

    let mut resp = ResponseHeader::build(status, Some(headers.len()))?;
    for (name, value) in headers.iter() {
        resp.append_header(name.clone(), value.clone())?;
    }

    match body {
        ProxiedBody::Empty => {
            session.write_response_header(Box::new(resp), true).await?;
        }

        ProxiedBody::Bytes(bytes) => {
            session.write_response_header(Box::new(resp), false).await?;
            session.write_response_body(Some(bytes), true).await?;
        }

        ProxiedBody::Stream(mut stream) => {
            session.write_response_header(Box::new(resp), false).await?;

            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(|e| {
                    tracing::warn!(error = %e, "upstream body interrupted");
                    Error::new(Custom("upstream body read error"))
                })?;

                if chunk.is_empty() {
                    continue;
                }

                session.write_response_body(Some(chunk), false).await?;
            }

            // End-of-stream.
            session.write_response_body(None, true).await?;
        }
    }

    Ok(())
}
