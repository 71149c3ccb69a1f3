use std::collections::HashMap;
use std::future::Future;

use crate::error::Result;

/// Loads one batch of items by id.
///
/// Ids missing from the returned map are "not found", not an error. An
/// `Err` fails every caller waiting on the batch and nothing is cached.
///
/// Any `Fn(Vec<String>) -> impl Future<Output = Result<HashMap<String, T>>>`
/// is a resolver.
pub trait BatchResolver<T> {
    fn resolve(&self, ids: Vec<String>) -> impl Future<Output = Result<HashMap<String, T>>>;
}

impl<T, F, Fut> BatchResolver<T> for F
where
    F: Fn(Vec<String>) -> Fut,
    Fut: Future<Output = Result<HashMap<String, T>>>,
{
    fn resolve(&self, ids: Vec<String>) -> impl Future<Output = Result<HashMap<String, T>>> {
        self(ids)
    }
}
