use async_trait::async_trait;
use model::{pagination::request::PagingRequest, records::row::Record};
use std::future::Future;

/// Retrieves one page of rows for a paging request.
///
/// Implementations must order rows by the keyset ordering for the request's
/// token and direction, keep only rows after the token, and return at most
/// `page_size` rows. The ordering must be identical on every call.
#[async_trait]
pub trait PageSource<P = ()>: Send + Sync
where
    P: Send + Sync,
{
    type Row: Record + Send + Sync + 'static;
    type Error: Send + 'static;

    async fn fetch(&self, request: &PagingRequest<P>) -> Result<Vec<Self::Row>, Self::Error>;
}

/// A [`PageSource`] backed by an async closure receiving its own copy of the request.
pub struct FnSource<F> {
    f: F,
}

pub fn source_fn<F>(f: F) -> FnSource<F> {
    FnSource { f }
}

#[async_trait]
impl<P, F, Fut, R, E> PageSource<P> for FnSource<F>
where
    P: Clone + Send + Sync + 'static,
    F: Fn(PagingRequest<P>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<R>, E>> + Send + 'static,
    R: Record + Send + Sync + 'static,
    E: Send + 'static,
{
    type Row = R;
    type Error = E;

    async fn fetch(&self, request: &PagingRequest<P>) -> Result<Vec<R>, E> {
        (self.f)(request.clone()).await
    }
}
