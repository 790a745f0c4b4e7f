//! Releasers: the cleanup half of a [`UniqueResource`](super::UniqueResource).
//!
//! A wrapper stores its releaser in a fixed-shape slot. Plain `fn(&mut T)`
//! pointers fit directly. Anything richer is erased behind [`Release`].
//! Every release runs through [`Releaser::invoke`], which turns a panicking
//! releaser into a process abort.

use crate::errors::ResourceError;
use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{error, trace};

/// A plain, stateless releaser.
///
/// Captureless closures coerce to this type.
pub type ReleaseFn<T> = fn(&mut T);

/// Erased cleanup for releasers that carry state.
///
/// Implementations must not fail. A panic escaping `release` aborts the
/// process.
pub trait Release<T>: Send {
    /// Cleans up `value`. Called at most once per owned value.
    fn release(&mut self, value: &mut T);
}

/// Result of a user-supplied deleter.
///
/// Lets deleters return either `()` or a `Result` whose error is reported
/// before the abort.
pub trait ReleaseOutcome {
    /// Converts the outcome into a failure reason, if any.
    fn into_release_result(self) -> Result<(), String>;
}

impl ReleaseOutcome for () {
    fn into_release_result(self) -> Result<(), String> {
        Ok(())
    }
}

impl<E: fmt::Display> ReleaseOutcome for Result<(), E> {
    fn into_release_result(self) -> Result<(), String> {
        self.map_err(|e| e.to_string())
    }
}

/// Storage for a wrapper's releaser.
pub(crate) enum Releaser<T> {
    /// Plain function pointer; no allocation.
    Fn(ReleaseFn<T>),
    /// Boxed adapter.
    Adapter(Box<dyn Release<T>>),
}

impl<T> Releaser<T> {
    /// Short label used in logs and `Debug` output.
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::Fn(_) => "fn",
            Self::Adapter(_) => "adapter",
        }
    }

    /// Runs the releaser on `value`, aborting if it panics.
    pub(crate) fn invoke(&mut self, value: &mut T) {
        trace!(
            resource = type_name::<T>(),
            releaser = self.kind(),
            "releasing resource"
        );

        let outcome = catch_unwind(AssertUnwindSafe(|| match self {
            Self::Fn(release) => release(value),
            Self::Adapter(adapter) => adapter.release(value),
        }));

        if let Err(payload) = outcome {
            abort_with(&ResourceError::release_failed::<T>(panic_message(
                payload.as_ref(),
            )));
        }
    }
}

/// Adapts an arbitrary deleter into a [`Release`] implementation.
pub(crate) struct DeleterAdapter<D, R> {
    deleter: D,
    _outcome: PhantomData<fn() -> R>,
}

impl<D, R> DeleterAdapter<D, R> {
    pub(crate) const fn new(deleter: D) -> Self {
        Self {
            deleter,
            _outcome: PhantomData,
        }
    }
}

impl<T, D, R> Release<T> for DeleterAdapter<D, R>
where
    D: FnMut(&mut T) -> R + Send,
    R: ReleaseOutcome,
{
    fn release(&mut self, value: &mut T) {
        if let Err(reason) = (self.deleter)(value).into_release_result() {
            abort_with(&ResourceError::release_failed::<T>(reason));
        }
    }
}

/// Logs `err` and aborts the process. Never unwinds.
pub(crate) fn abort_with(err: &ResourceError) -> ! {
    error!(error = %err, "resource ownership contract violated, aborting");
    std::process::abort()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "releaser panicked".to_string())
}
