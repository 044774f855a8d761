//! Scripted provider for exercising wallet flows without a browser.

use crate::{Eip1193Provider, ProviderError};
use async_trait::async_trait;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// JSON-RPC "method not found", returned for anything not scripted.
pub const METHOD_NOT_SCRIPTED: i64 = -32601;

/// Replies are queued per method and consumed in order.
#[derive(Default)]
pub struct MockProvider {
    replies: RefCell<HashMap<String, VecDeque<Result<Value, ProviderError>>>>,
    log: RefCell<Vec<(String, Value)>>,
    waited_ms: Cell<u64>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: &str, reply: Result<Value, ProviderError>) -> &Self {
        self.replies
            .borrow_mut()
            .entry(method.to_owned())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn on_ok(&self, method: &str, reply: Value) -> &Self {
        self.on(method, Ok(reply))
    }

    pub fn on_err(&self, method: &str, code: Option<i64>, message: &str) -> &Self {
        self.on(method, Err(ProviderError::rpc(code, message)))
    }

    pub fn calls(&self, method: &str) -> usize {
        self.log.borrow().iter().filter(|(m, _)| m == method).count()
    }

    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.log
            .borrow()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    pub fn methods(&self) -> Vec<String> {
        self.log.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn waited_ms(&self) -> u64 {
        self.waited_ms.get()
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.log.borrow_mut().push((method.to_owned(), params));
        self.replies
            .borrow_mut()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(ProviderError::rpc(
                    Some(METHOD_NOT_SCRIPTED),
                    format!("{method} not scripted"),
                ))
            })
    }

    /// Records the delay and yields once, so concurrent flows can interleave.
    async fn wait(&self, millis: u32) {
        self.waited_ms.set(self.waited_ms.get() + u64::from(millis));
        YieldOnce(false).await;
    }
}

struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}
