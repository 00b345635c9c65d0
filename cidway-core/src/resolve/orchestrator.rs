use crate::resolve::upstream::{FetchError, UpstreamFetch, UpstreamOutcome, UpstreamRequest};
use crate::resolve::{
    CandidateList, GatewayOrigin, ProxiedResponse, ResolveError, ResourceIdentifier, Scheme,
};
use http::{HeaderMap, Method, StatusCode};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::{debug, warn};
use url::Url;

/// Characters escaped inside a single upstream path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// How a single fetch attempt steers the candidate loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// 2xx (including 206): this is the response.
    Success,
    /// 404 with more candidates left: try the next one.
    RetryableNotFound,
    /// Anything else, or 404 on the last candidate: stop here.
    TerminalError,
}

pub fn classify_attempt(status: StatusCode, is_last: bool) -> AttemptOutcome {
    if status.is_success() {
        AttemptOutcome::Success
    } else if status == StatusCode::NOT_FOUND && !is_last {
        AttemptOutcome::RetryableNotFound
    } else {
        AttemptOutcome::TerminalError
    }
}

/// Everything needed to run the candidate loop for one request.
#[derive(Debug, Clone)]
pub struct FetchPlan {
    pub scheme: Scheme,
    pub gateway: GatewayOrigin,
    pub candidates: CandidateList,
    pub method: Method,
    pub request_headers: HeaderMap,
    pub filename: String,
}

/// Builds `<origin>/<candidate>`, escaping each candidate segment.
pub(crate) fn upstream_url(
    gateway: &GatewayOrigin,
    candidate: &ResourceIdentifier,
) -> Result<Url, FetchError> {
    let path = candidate
        .as_str()
        .split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");

    let url = Url::parse(&format!(
        "{}/{}",
        gateway.as_str().trim_end_matches('/'),
        path
    ))?;
    Ok(url)
}

/// Tries each candidate in order, sequentially, until one succeeds or the loop must stop.
///
/// Transport failures end the loop immediately; they are never retried against the next
/// candidate.
pub async fn fetch_with_fallback(
    fetcher: &dyn UpstreamFetch,
    plan: FetchPlan,
) -> Result<ProxiedResponse, ResolveError> {
    let last = plan.candidates.len().saturating_sub(1);

    for (i, candidate) in plan.candidates.iter().enumerate() {
        let url = upstream_url(&plan.gateway, candidate)?;
        let request = UpstreamRequest {
            method: plan.method.clone(),
            url: url.clone(),
            headers: plan.request_headers.clone(),
        };

        let outcome = fetcher.fetch(request).await.inspect_err(|err| {
            warn!(scheme = %plan.scheme, url = %url, error = %err, "upstream fetch failed");
        })?;

        let decision = classify_attempt(outcome.status, i == last);
        debug!(
            scheme = %plan.scheme,
            attempt = i + 1,
            url = %url,
            status = outcome.status.as_u16(),
            decision = ?decision,
            "upstream attempt"
        );

        match decision {
            AttemptOutcome::Success => {
                return Ok(ProxiedResponse::from_upstream(outcome, &plan.filename));
            }
            AttemptOutcome::RetryableNotFound => continue,
            AttemptOutcome::TerminalError => {
                return Err(terminal_error(plan.scheme, outcome).await);
            }
        }
    }

    // Candidate lists are never empty; kept for totality.
    Err(ResolveError::UpstreamNotFound {
        message: plan
            .scheme
            .not_found_message()
            .unwrap_or("Resource not found."),
    })
}

async fn terminal_error(scheme: Scheme, outcome: UpstreamOutcome) -> ResolveError {
    let status = outcome.status;

    if status == StatusCode::NOT_FOUND {
        if let Some(message) = scheme.not_found_message() {
            return ResolveError::UpstreamNotFound { message };
        }
    }

    match outcome.text().await {
        Ok(body) => ResolveError::UpstreamError { status, body },
        Err(err) => {
            warn!(scheme = %scheme, status = status.as_u16(), error = %err, "failed to read upstream error body");
            ResolveError::UpstreamError {
                status,
                body: String::new(),
            }
        }
    }
}
