use async_trait::async_trait;
use std::future::Future;

/// Whether the driver should keep paging after a hook ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageControl {
    #[default]
    Continue,
    Stop,
}

/// `true` means "stop now".
impl From<bool> for PageControl {
    fn from(stop: bool) -> Self {
        if stop {
            PageControl::Stop
        } else {
            PageControl::Continue
        }
    }
}

/// Side-effect-only hooks always continue.
impl From<()> for PageControl {
    fn from(_: ()) -> Self {
        PageControl::Continue
    }
}

/// Invoked once per non-empty page, before the next fetch is issued.
#[async_trait]
pub trait PageHook<R, E>: Send
where
    R: Send + Sync + 'static,
    E: Send + 'static,
{
    async fn after_page(&mut self, rows: &[R]) -> Result<PageControl, E>;
}

/// The default hook: never stops the scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHook;

#[async_trait]
impl<R, E> PageHook<R, E> for NoHook
where
    R: Send + Sync + 'static,
    E: Send + 'static,
{
    async fn after_page(&mut self, _rows: &[R]) -> Result<PageControl, E> {
        Ok(PageControl::Continue)
    }
}

/// A [`PageHook`] backed by an async closure receiving a copy of each page.
///
/// The closure may resolve to `()`, a `bool` stop flag or a [`PageControl`].
pub struct FnHook<F> {
    f: F,
}

pub fn hook_fn<F>(f: F) -> FnHook<F> {
    FnHook { f }
}

#[async_trait]
impl<R, E, F, Fut, C> PageHook<R, E> for FnHook<F>
where
    R: Clone + Send + Sync + 'static,
    E: Send + 'static,
    F: FnMut(Vec<R>) -> Fut + Send + 'static,
    Fut: Future<Output = Result<C, E>> + Send + 'static,
    C: Into<PageControl> + 'static,
{
    async fn after_page(&mut self, rows: &[R]) -> Result<PageControl, E> {
        let control = (self.f)(rows.to_vec()).await?;
        Ok(control.into())
    }
}
