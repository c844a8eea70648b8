//! Sequential keyset scan: fetch a page, run the hook, derive the next cursor
//! from the last row, and repeat while pages come back full.

use crate::hook::{NoHook, PageControl, PageHook};
use connectors::source::PageSource;
use futures::{Stream, stream};
use model::pagination::{request::PagingRequest, token::KeySetToken};
use planner::{error::PlanError, query::keyset::next_token};
use tracing::{debug, info};

/// Summary of a completed scan.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverReport<R> {
    pub pages_fetched: usize,
    pub rows: Vec<R>,
    pub stopped_by_hook: bool,
}

struct PageStep<R, P> {
    rows: Vec<R>,
    next: Option<PagingRequest<P>>,
    stopped_by_hook: bool,
}

/// Drives a [`PageSource`] until it is exhausted or the hook asks to stop.
///
/// One fetch and at most one hook call are in flight at a time. Completion is
/// inferred from page fullness, so a result set whose size is an exact
/// multiple of the page size costs one extra, empty fetch.
pub struct PageDriver<S, H = NoHook> {
    source: S,
    hook: H,
}

impl<S> PageDriver<S, NoHook> {
    pub fn new(source: S) -> Self {
        PageDriver {
            source,
            hook: NoHook,
        }
    }
}

impl<S, H> PageDriver<S, H> {
    pub fn with_hook<H2>(self, hook: H2) -> PageDriver<S, H2> {
        PageDriver {
            source: self.source,
            hook,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Collects every row after the request's token, in keyset order.
    pub async fn fetch_all<P>(&mut self, request: PagingRequest<P>) -> Result<Vec<S::Row>, S::Error>
    where
        P: Clone + Send + Sync,
        S: PageSource<P>,
        S::Error: From<PlanError>,
        H: PageHook<S::Row, S::Error>,
    {
        Ok(self.fetch_all_with_report(request).await?.rows)
    }

    pub async fn fetch_all_with_report<P>(
        &mut self,
        request: PagingRequest<P>,
    ) -> Result<DriverReport<S::Row>, S::Error>
    where
        P: Clone + Send + Sync,
        S: PageSource<P>,
        S::Error: From<PlanError>,
        H: PageHook<S::Row, S::Error>,
    {
        let first = request.key_set_token.clone();
        let mut report = DriverReport {
            pages_fetched: 0,
            rows: Vec::new(),
            stopped_by_hook: false,
        };

        let mut current = Some(request);
        while let Some(request) = current.take() {
            let step = self.next_page(&first, &request).await?;
            report.pages_fetched += 1;
            report.stopped_by_hook = step.stopped_by_hook;
            report.rows.extend(step.rows);
            current = step.next;
        }

        info!(
            pages = report.pages_fetched,
            rows = report.rows.len(),
            stopped_by_hook = report.stopped_by_hook,
            "Keyset scan finished"
        );

        Ok(report)
    }

    /// Yields each non-empty page as it is fetched.
    ///
    /// The stream ends after the last page, or after yielding the first error.
    pub fn into_stream<P>(
        self,
        request: PagingRequest<P>,
    ) -> impl Stream<Item = Result<Vec<S::Row>, S::Error>>
    where
        P: Clone + Send + Sync,
        S: PageSource<P>,
        S::Error: From<PlanError>,
        H: PageHook<S::Row, S::Error>,
    {
        let first = request.key_set_token.clone();

        stream::unfold(Some((self, request)), move |state| {
            let first = first.clone();
            async move {
                let (mut driver, request) = state?;
                match driver.next_page(&first, &request).await {
                    Ok(step) if step.rows.is_empty() => None,
                    Ok(step) => {
                        let next = step.next.map(|request| (driver, request));
                        Some((Ok(step.rows), next))
                    }
                    Err(e) => Some((Err(e), None)),
                }
            }
        })
    }

    async fn next_page<P>(
        &mut self,
        first: &KeySetToken,
        request: &PagingRequest<P>,
    ) -> Result<PageStep<S::Row, P>, S::Error>
    where
        P: Clone + Send + Sync,
        S: PageSource<P>,
        S::Error: From<PlanError>,
        H: PageHook<S::Row, S::Error>,
    {
        let rows = self.source.fetch(request).await?;

        let control = if rows.is_empty() {
            PageControl::Continue
        } else {
            self.hook.after_page(&rows).await?
        };

        let token = next_token(Some(first), rows.last())?;
        let full = rows.len() == request.page_size;
        let stopped_by_hook = control == PageControl::Stop;

        debug!(
            rows = rows.len(),
            page_size = request.page_size,
            full,
            stopped_by_hook,
            "Fetched page"
        );

        if stopped_by_hook {
            info!(rows = rows.len(), "Page hook requested stop");
        }

        let next = match token {
            Some(token) if full && !stopped_by_hook => Some(request.with_token(token)),
            _ => None,
        };

        Ok(PageStep {
            rows,
            next,
            stopped_by_hook,
        })
    }
}
