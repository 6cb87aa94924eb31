use std::{
    pin::Pin,
    task::{Context, Poll, Waker},
};

use futures::future::BoxFuture;
use futures::Future;

/// Single-shot future polled inline on the UI thread with a noop waker.
pub(crate) enum AsyncTask<T> {
    Pending(BoxFuture<'static, T>),
    Taken,
}

impl<T> AsyncTask<T> {
    pub fn new(future: BoxFuture<'static, T>) -> Self {
        Self::Pending(future)
    }

    /// Returns the value once the future resolves; None while still pending
    /// or after the value was taken.
    pub fn poll_data(&mut self) -> Option<T> {
        let AsyncTask::Pending(future) = self else {
            return None;
        };
        let mut cx = Context::from_waker(Waker::noop());
        match Pin::new(future).poll(&mut cx) {
            Poll::Ready(value) => {
                *self = AsyncTask::Taken;
                Some(value)
            }
            Poll::Pending => None,
        }
    }
}
