use crate::ctx::RequestCtx;
use crate::proxy::handlers::writer::write_response;
use crate::route::RouteEntry;
use crate::server::RuntimeState;
use pingora::prelude::Session;

/// Resolves a routed request against its gateway and streams the result back.
pub(crate) struct ResourceHandler;

impl ResourceHandler {
    pub(crate) async fn handle(
        &self,
        session: &mut Session,
        ctx: &mut RequestCtx,
        route: &RouteEntry,
        state: &RuntimeState,
    ) -> pingora::Result<bool> {
        let request = ctx.request_context(route);
        let resolver = state.resolver(route.kind);

        let response = resolver.resolve(&request, state.fetcher.as_ref()).await;
        ctx.status = Some(response.status.as_u16());

        write_response(session, response).await?;
        Ok(true)
    }
}
