//! Correlation id for one storefront request.
//!
//! The [`crate::Trace`] middleware generates an id per request and runs the
//! handler inside [`TraceId::scope`]. Domain errors built during that request
//! pick the id up through [`TraceId::current`]. The id lives in a tokio
//! task-local, so work moved onto `tokio::spawn` must be wrapped in
//! [`TraceId::scope`] again to keep it.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Request correlation id.
///
/// # Examples
/// ```
/// use storefront::TraceId;
///
/// let id = TraceId::generate();
/// let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let seen = runtime.block_on(TraceId::scope(id, async { TraceId::current() }));
/// assert_eq!(seen, Some(id));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `id` as the current trace id.
    pub async fn scope<Fut>(id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
