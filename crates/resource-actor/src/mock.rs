//! # Mock Client
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from
//! a queue of expectations instead of by a running actor. Tests use it to pin down exactly
//! which store requests a piece of code sends, and what happens when the store fails.
//!
//! | | MockClient | Real actor |
//! |---------|------------|------------|
//! | **State** | none, answers are scripted | real store |
//! | **Error injection** | `return_err` | needs a specific store state |
//! | **Use case** | code *around* the client | the actor itself, full system |
//!
//! A request that arrives when the next expectation does not match it (or when no
//! expectation is left) is counted as unexpected and its response channel is dropped, so
//! the caller sees [`FrameworkError::ActorDropped`]. [`MockClient::verify`] fails the test
//! if any expectation is left over or any unexpected request arrived.
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{FrameworkError, ResourceEntity};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Note { id: u64 }
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl ResourceEntity for Note {
//!     type Id = u64; type Create = (); type Update = ();
//!     type Context = (); type Error = NoteError;
//!     fn from_create_params(id: u64, _: ()) -> Result<Self, NoteError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Note>::new();
//!     mock.expect_get(1).return_err(FrameworkError::NotFound("1".into()));
//!
//!     let client = mock.client();
//!     assert!(matches!(client.get(1).await, Err(FrameworkError::NotFound(_))));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// An expected request and the scripted answer.
enum Expectation<T: ResourceEntity> {
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        ids: Vec<T::Id>,
        response: Result<Vec<T::Id>, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ResourceEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    unexpected: Arc<AtomicUsize>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ResourceEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ResourceEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let unexpected = Arc::new(AtomicUsize::new(0));

        let queue = expectations.clone();
        let misses = unexpected.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { ids, respond_to },
                        Some(Expectation::Delete { ids: expected, response }),
                    ) if ids == expected => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        tracing::warn!(?request, "Unexpected request");
                        misses.fetch_add(1, Ordering::SeqCst);
                        // Put the unmatched expectation back for the next request
                        if let Some(expectation) = expectation {
                            queue.lock().unwrap().push_front(expectation);
                        }
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Expects a `list` request.
    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, |response| Expectation::List { response })
    }

    /// Expects a `get` request for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, move |response| Expectation::Get { id, response })
    }

    /// Expects a `create` request.
    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, |response| Expectation::Create { response })
    }

    /// Expects an `update` request for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` request for exactly `ids`.
    pub fn expect_delete(&mut self, ids: Vec<T::Id>) -> ExpectationBuilder<'_, T, Vec<T::Id>> {
        ExpectationBuilder::new(self, move |response| Expectation::Delete { ids, response })
    }

    /// Number of requests that did not match the next expectation.
    pub fn unexpected_requests(&self) -> usize {
        self.unexpected.load(Ordering::SeqCst)
    }

    /// Verifies that all expectations were met and nothing else was sent.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
        let unexpected = self.unexpected_requests();
        if unexpected != 0 {
            panic!("{} unexpected request(s) received", unexpected);
        }
    }
}

/// Builder returned by the `expect_*` methods; finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<'a, T: ResourceEntity, R> {
    mock: &'a MockClient<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a>,
}

impl<'a, T: ResourceEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.build)(Err(error)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Tag {
        id: u64,
        label: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Tag error")]
    struct TagError;

    #[async_trait]
    impl ResourceEntity for Tag {
        type Id = u64;
        type Create = String;
        type Update = String;
        type Context = ();
        type Error = TagError;

        fn from_create_params(id: u64, label: String) -> Result<Self, TagError> {
            Ok(Self { id, label })
        }

        async fn on_update(&mut self, label: String, _: &()) -> Result<(), TagError> {
            self.label = label;
            Ok(())
        }
    }

    fn tag(id: u64, label: &str) -> Tag {
        Tag {
            id,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_create().return_ok(tag(1, "red"));
        mock.expect_get(1).return_ok(tag(1, "red"));
        mock.expect_delete(vec![1]).return_ok(vec![1]);

        let client = mock.client();
        assert_eq!(client.create("red".into()).await.unwrap().id, 1);
        assert_eq!(client.get(1).await.unwrap().label, "red");
        client.delete(1).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_counts_unexpected_requests() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_get(7).return_ok(tag(7, "blue"));

        let client = mock.client();
        let wrong = client.get(8).await;
        assert!(matches!(wrong, Err(FrameworkError::ActorDropped)));
        assert_eq!(mock.unexpected_requests(), 1);

        // The unmatched expectation is still queued
        assert_eq!(client.get(7).await.unwrap().label, "blue");
    }
}
