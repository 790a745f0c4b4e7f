//! Helpers that build a [`UniqueResource`] from an arbitrary deleter.

use super::releaser::{DeleterAdapter, ReleaseOutcome, Releaser};
use super::unique::UniqueResource;
use super::value::ResourceValue;
use crate::errors::{ResourceError, Result};

/// Wraps `value` so that `deleter` runs on it exactly once.
///
/// The deleter may capture state and may return `()` or a `Result`. A
/// deleter that returns `Err` or panics aborts the process: release cannot
/// fail.
///
/// ```rust
/// use resguard::make_unique_resource;
/// use std::sync::{Arc, Mutex};
///
/// let closed = Arc::new(Mutex::new(Vec::new()));
/// let log = closed.clone();
/// {
///     let _fd = make_unique_resource(42, move |fd: &mut i32| log.lock().unwrap().push(*fd));
/// }
/// assert_eq!(*closed.lock().unwrap(), vec![42]);
/// ```
pub fn make_unique_resource<T, D, R>(value: T, deleter: D) -> UniqueResource<T>
where
    T: ResourceValue,
    D: FnMut(&mut T) -> R + Send + 'static,
    R: ReleaseOutcome + 'static,
{
    UniqueResource::bind(value, Releaser::Adapter(Box::new(DeleterAdapter::new(deleter))))
}

/// Like [`make_unique_resource`], converting `value` into `T` first.
///
/// The deleter is not armed until the conversion succeeds.
pub fn try_make_unique_resource<T, U, D, R>(value: U, deleter: D) -> Result<UniqueResource<T>>
where
    T: ResourceValue + TryFrom<U>,
    <T as TryFrom<U>>::Error: std::error::Error + Send + Sync + 'static,
    D: FnMut(&mut T) -> R + Send + 'static,
    R: ReleaseOutcome + 'static,
{
    let value = T::try_from(value).map_err(ResourceError::conversion::<T, _>)?;
    Ok(make_unique_resource(value, deleter))
}
