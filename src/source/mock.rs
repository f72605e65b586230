//! # Mock Source
//!
//! A scripted [`OrderSource`] for testing the board actor without files.
//!
//! Queue one expectation per fetch you expect, then call [`MockSource::verify`]
//! at the end of the test.
//!
//! ```ignore
//! let mock = MockSource::new();
//! mock.expect_fetch().return_ok(rows);
//! mock.expect_fetch().return_err(SourceError::Unavailable("db down".into()));
//!
//! let source = mock.clone();
//! // ... hand `source` to a BoardActor ...
//! mock.verify();
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::OrderRow;
use crate::source::{OrderSource, SourceError};

type Response = Result<Vec<OrderRow>, SourceError>;

/// A source that answers fetches from a queue of expectations.
///
/// Clones share the same queue.
#[derive(Clone, Default)]
pub struct MockSource {
    expectations: Arc<Mutex<VecDeque<Response>>>,
    fetches: Arc<Mutex<usize>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one more `fetch` call.
    pub fn expect_fetch(&self) -> FetchExpectationBuilder {
        FetchExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl OrderSource for MockSource {
    async fn fetch(&self) -> Result<Vec<OrderRow>, SourceError> {
        *self.fetches.lock().unwrap() += 1;
        let next = self.expectations.lock().unwrap().pop_front();
        match next {
            Some(response) => response,
            None => Err(SourceError::Unavailable("unexpected fetch".into())),
        }
    }
}

/// Builder for `fetch` expectations.
pub struct FetchExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Response>>>,
}

impl FetchExpectationBuilder {
    /// The fetch returns these rows.
    pub fn return_ok(self, rows: Vec<OrderRow>) {
        self.expectations.lock().unwrap().push_back(Ok(rows));
    }

    /// The fetch fails with `error`.
    pub fn return_err(self, error: SourceError) {
        self.expectations.lock().unwrap().push_back(Err(error));
    }
}
