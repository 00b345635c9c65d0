use crate::ctx::RequestCtx;
use crate::proxy::handlers::{RejectionHandler, ResourceHandler};
use crate::server::RuntimeState;
use async_trait::async_trait;
use pingora::prelude::*;
use std::sync::Arc;

/// CidwayGateway answers every request itself inside `request_filter`.
///
/// Upstream gateways are reached through the resolver's own HTTP client, because fallback between
/// candidate paths needs to see a 404 before deciding what to send the client.
///
/// Pingora hook execution order for this gateway:
///
/// 1. new_ctx()
///    - Allocate empty RequestCtx
///
/// 2. request_filter()
///    - Hydrate ctx from Session (path normalization, query parsing)
///    - Route match (`/grove` vs `/api/ipfs`), 404 when none matches
///    - Method guard (GET and HEAD only)
///    - Resolve, fetch with fallback, stream the response
///
/// 3. logging()   /// ALWAYS LAST
///    - Emit the access log event
pub struct CidwayGateway {
    state: Arc<RuntimeState>,

    // Handlers
    rejection_handler: RejectionHandler,
    resource_handler: ResourceHandler,
}

impl CidwayGateway {
    pub fn new(state: Arc<RuntimeState>) -> Self {
        Self {
            state,
            rejection_handler: RejectionHandler,
            resource_handler: ResourceHandler,
        }
    }
}

#[async_trait]
impl ProxyHttp for CidwayGateway {
    type CTX = RequestCtx;

    fn new_ctx(&self) -> Self::CTX {
        RequestCtx::empty()
    }

    /// Never reached: `request_filter` always finishes the response.
    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> Result<Box<HttpPeer>> {
        Err(Error::new(Custom("cidway does not proxy through pingora peers")))
    }

    /// ACCEPT → NORMALIZE → ROUTE → GUARD → RESOLVE
    async fn request_filter(&self, session: &mut Session, ctx: &mut Self::CTX) -> Result<bool> {
        // The request ctx existed before now but had no data.
        if let Err(err) = ctx.hydrate_from_session(session) {
            tracing::debug!(error = %err, "rejected request");
            return self.rejection_handler.handle(session, ctx, &err).await;
        }

        let state = self.state.as_ref();

        let Some(route) = state.router.match_route(ctx.path()) else {
            tracing::debug!(path = ctx.path(), "no route matched");
            ctx.status = Some(404);
            session.respond_error(404).await?;
            return Ok(true);
        };
        ctx.route = Some(route.kind);

        if let Err(err) = ctx.ensure_read_method() {
            return self.rejection_handler.handle(session, ctx, &err).await;
        }

        self.resource_handler
            .handle(session, ctx, route, state)
            .await
    }

    async fn logging(&self, session: &mut Session, e: Option<&Error>, ctx: &mut Self::CTX)
    where
        Self::CTX: Send + Sync,
    {
        let status = ctx
            .status
            .or_else(|| session.response_written().map(|r| r.status.as_u16()));

        tracing::info!(
            request_id = %ctx.request_id,
            method = %ctx.method(),
            path = ctx.path(),
            route = ctx.route.map(|r| r.as_str()),
            status,
            error = e.map(|err| err.to_string()),
            "request completed"
        );
    }
}
