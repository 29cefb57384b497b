use futures::future::LocalBoxFuture;

use crate::domain::analysis::{AnalysisResult, Query};
use crate::domain::errors::AppError;

/// Interface to the backend that turns a query into an analysis.
///
/// The returned future is local: the page runs on one thread and the
/// orchestrator awaits it between two short-lived state mutations.
pub trait QueryService {
    fn analyze<'a>(&'a self, query: &'a Query) -> LocalBoxFuture<'a, Result<AnalysisResult, AppError>>;
}

impl<T: QueryService + ?Sized> QueryService for std::rc::Rc<T> {
    fn analyze<'a>(&'a self, query: &'a Query) -> LocalBoxFuture<'a, Result<AnalysisResult, AppError>> {
        (**self).analyze(query)
    }
}
