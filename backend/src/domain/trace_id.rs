//! Request-scoped correlation identifier.
//!
//! The [`crate::middleware::Trace`] middleware opens a task-local scope per
//! request; domain errors and log events read the identifier from there
//! instead of threading it through every call.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use portal::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "00000000-0000-0000-0000-000000000000".parse().unwrap();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request currently in scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` in scope.
    ///
    /// Task-locals do not follow `tokio::spawn`; wrap spawned work in this
    /// call to keep correlation.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
