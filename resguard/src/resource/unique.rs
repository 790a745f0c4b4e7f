//! The owning wrapper.

use super::releaser::{abort_with, Release, ReleaseFn, Releaser};
use super::value::ResourceValue;
use crate::errors::{ResourceError, Result};
use std::any::type_name;
use std::fmt;
use std::ops::{Deref, DerefMut};
use tracing::trace;

const CONSUMED: &str = "resource value is present until the wrapper is consumed";

/// Exclusive owner of a value-like resource.
///
/// The releaser runs exactly once per owned value: when the wrapper is
/// dropped, or earlier through [`reset`](Self::reset). It never runs after
/// [`release_ownership`](Self::release_ownership). Ownership moves with
/// ordinary Rust moves, and assigning over a wrapper releases the resource it
/// held.
///
/// ```rust
/// use resguard::UniqueResource;
///
/// fn close_slot(slot: &mut u32) {
///     println!("closing slot {slot}");
/// }
///
/// let slot = UniqueResource::new(4_u32, close_slot);
/// assert!(slot.is_valid());
/// assert_eq!(*slot, 4);
/// // `close_slot(&mut 4)` runs here.
/// ```
#[must_use = "dropping a `UniqueResource` releases its resource immediately"]
pub struct UniqueResource<T: ResourceValue> {
    value: Option<T>,
    valid: bool,
    releaser: Releaser<T>,
}

impl<T: ResourceValue> UniqueResource<T> {
    /// Takes ownership of `value`, to be released with `releaser`.
    ///
    /// `value` is converted into place first; use [`try_new`](Self::try_new)
    /// when that conversion can fail.
    pub fn new(value: impl Into<T>, releaser: ReleaseFn<T>) -> Self {
        Self::bind(value.into(), Releaser::Fn(releaser))
    }

    /// Takes ownership of `value` with a releaser that may be absent.
    ///
    /// A missing releaser is a programming error. The process aborts before
    /// anything is bound.
    pub fn from_parts(value: T, releaser: Option<ReleaseFn<T>>) -> Self {
        match releaser {
            Some(releaser) => Self::new(value, releaser),
            None => abort_with(&ResourceError::missing_releaser::<T>()),
        }
    }

    /// Takes ownership of `value` with a stateful releaser.
    pub fn from_release<R>(value: T, releaser: R) -> Self
    where
        R: Release<T> + 'static,
    {
        Self::bind(value, Releaser::Adapter(Box::new(releaser)))
    }

    /// Converts `value` into `T` and takes ownership of the result.
    ///
    /// A failed conversion returns [`ResourceError::Conversion`]. No releaser
    /// has been armed at that point, so nothing is released.
    pub fn try_new<U>(value: U, releaser: ReleaseFn<T>) -> Result<Self>
    where
        T: TryFrom<U>,
        <T as TryFrom<U>>::Error: std::error::Error + Send + Sync + 'static,
    {
        let value = T::try_from(value).map_err(ResourceError::conversion::<T, _>)?;
        Ok(Self::new(value, releaser))
    }

    pub(crate) const fn bind(value: T, releaser: Releaser<T>) -> Self {
        Self {
            value: Some(value),
            valid: true,
            releaser,
        }
    }

    /// Returns the owned value.
    ///
    /// Validity is not checked: after [`reset`](Self::reset) this is the
    /// value that was already released.
    pub fn get(&self) -> &T {
        self.value.as_ref().expect(CONSUMED)
    }

    /// Returns the owned value mutably. Same caveats as [`get`](Self::get).
    pub fn get_mut(&mut self) -> &mut T {
        self.value.as_mut().expect(CONSUMED)
    }

    /// Returns true while the wrapper owns an unreleased resource.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Releases the resource now. Later calls, and the eventual drop, do
    /// nothing.
    pub fn reset(&mut self) {
        self.release();
    }

    /// Gives up ownership without running the releaser and returns the value.
    ///
    /// The caller becomes responsible for cleaning the value up.
    pub fn release_ownership(mut self) -> T {
        trace!(
            resource = type_name::<T>(),
            releaser = self.releaser.kind(),
            was_valid = self.valid,
            "disarming resource"
        );
        self.valid = false;
        self.value.take().expect(CONSUMED)
    }

    /// Exchanges value, validity and releaser with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    fn release(&mut self) {
        if !self.valid {
            return;
        }
        if let Some(value) = self.value.as_mut() {
            self.releaser.invoke(value);
        }
        self.valid = false;
    }
}

/// Swaps two wrappers. Same as [`UniqueResource::swap`].
pub fn swap<T: ResourceValue>(a: &mut UniqueResource<T>, b: &mut UniqueResource<T>) {
    a.swap(b);
}

impl<T: ResourceValue> Drop for UniqueResource<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: ResourceValue> Deref for UniqueResource<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: ResourceValue> DerefMut for UniqueResource<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: ResourceValue + fmt::Debug> fmt::Debug for UniqueResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("UniqueResource");
        if let Some(value) = &self.value {
            debug.field("value", value);
        }
        debug
            .field("valid", &self.valid)
            .field("releaser", &self.releaser.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    thread_local! {
        static RELEASED: RefCell<Vec<(char, i32)>> = const { RefCell::new(Vec::new()) };
    }

    fn release_a(value: &mut i32) {
        RELEASED.with(|log| log.borrow_mut().push(('a', *value)));
    }

    fn release_b(value: &mut i32) {
        RELEASED.with(|log| log.borrow_mut().push(('b', *value)));
    }

    fn released() -> Vec<(char, i32)> {
        RELEASED.with(|log| log.borrow().clone())
    }

    fn clear() {
        RELEASED.with(|log| log.borrow_mut().clear());
    }

    #[test]
    fn test_drop_releases_once() {
        clear();
        {
            let res = UniqueResource::new(5, release_a);
            assert!(res.is_valid());
        }
        assert_eq!(released(), vec![('a', 5)]);
    }

    #[test]
    fn test_reset_is_idempotent() {
        clear();
        let mut res = UniqueResource::new(6, release_a);
        res.reset();
        assert!(!res.is_valid());
        res.reset();
        drop(res);
        assert_eq!(released(), vec![('a', 6)]);
    }

    #[test]
    fn test_get_after_reset_returns_stale_value() {
        clear();
        let mut res = UniqueResource::new(8, release_a);
        res.reset();
        assert_eq!(*res.get(), 8);
    }

    #[test]
    fn test_release_ownership_skips_releaser() {
        clear();
        let res = UniqueResource::new(9, release_a);
        let raw = res.release_ownership();
        assert_eq!(raw, 9);
        assert!(released().is_empty());
    }

    #[test]
    fn test_move_does_not_release() {
        clear();
        let a = UniqueResource::new(10, release_a);
        let b = a;
        assert!(released().is_empty());
        assert!(b.is_valid());
        drop(b);
        assert_eq!(released(), vec![('a', 10)]);
    }

    #[test]
    fn test_assignment_releases_previous_resource() {
        clear();
        let mut target = UniqueResource::new(1, release_a);
        assert_eq!(*target, 1);
        let incoming = UniqueResource::new(2, release_b);
        target = incoming;
        assert_eq!(released(), vec![('a', 1)]);
        assert_eq!(*target, 2);
        drop(target);
        assert_eq!(released(), vec![('a', 1), ('b', 2)]);
    }

    #[test]
    fn test_assignment_over_invalid_releases_nothing() {
        clear();
        let mut target = UniqueResource::new(1, release_a);
        target.reset();
        target = UniqueResource::new(3, release_b);
        assert!(target.is_valid());
        assert_eq!(released(), vec![('a', 1)]);
    }

    #[test]
    #[allow(clippy::self_assignment, dead_code, unused_assignments)]
    fn test_self_assignment_is_noop() {
        clear();
        let mut res = UniqueResource::new(11, release_a);
        res = res;
        assert!(released().is_empty());
        assert!(res.is_valid());
        assert_eq!(*res, 11);
        drop(res);
        assert_eq!(released(), vec![('a', 11)]);
    }

    #[test]
    fn test_swap_exchanges_value_and_releaser() {
        clear();
        let mut a = UniqueResource::new(1, release_a);
        let mut b = UniqueResource::new(2, release_b);
        a.swap(&mut b);
        assert_eq!((*a, *b), (2, 1));

        drop(a);
        assert_eq!(released(), vec![('b', 2)]);
        drop(b);
        assert_eq!(released(), vec![('b', 2), ('a', 1)]);
    }

    #[test]
    fn test_swap_with_invalid_moves_validity() {
        clear();
        let mut live = UniqueResource::new(1, release_a);
        let mut spent = UniqueResource::new(2, release_b);
        spent.reset();

        swap(&mut live, &mut spent);
        assert!(!live.is_valid());
        assert!(spent.is_valid());

        drop(live);
        drop(spent);
        assert_eq!(released(), vec![('b', 2), ('a', 1)]);
    }

    #[test]
    fn test_deref_forwards_members() {
        fn forget_name(_name: &mut String) {}

        let mut name = UniqueResource::new(String::from("lock"), forget_name);
        name.push_str("-7");
        assert_eq!(name.len(), 6);
        assert_eq!(name.get().as_str(), "lock-7");
    }

    #[test]
    fn test_releaser_sees_mutated_value() {
        clear();
        let mut res = UniqueResource::new(1, release_a);
        *res.get_mut() = 40;
        drop(res);
        assert_eq!(released(), vec![('a', 40)]);
    }

    #[test]
    fn test_from_parts_with_releaser() {
        clear();
        let res = UniqueResource::from_parts(12, Some(release_b as ReleaseFn<i32>));
        drop(res);
        assert_eq!(released(), vec![('b', 12)]);
    }

    #[test]
    fn test_from_release_uses_stateful_releaser() {
        struct Counting(std::sync::Arc<std::sync::atomic::AtomicUsize>);

        impl Release<u16> for Counting {
            fn release(&mut self, _value: &mut u16) {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }

        let count = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let mut res = UniqueResource::from_release(3_u16, Counting(count.clone()));
        res.reset();
        drop(res);
        assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_try_new_converts_value() {
        clear();
        let res = UniqueResource::<i32>::try_new(13_u8, release_a).unwrap();
        assert_eq!(*res, 13);
        drop(res);
        assert_eq!(released(), vec![('a', 13)]);
    }

    #[test]
    fn test_try_new_propagates_conversion_failure() {
        fn never(_: &mut u8) {
            panic!("no resource was bound");
        }

        let err = UniqueResource::<u8>::try_new(1_000_i32, never).unwrap_err();
        assert!(matches!(err, ResourceError::Conversion { target: "u8", .. }));
    }

    #[test]
    fn test_debug_output() {
        fn noop(_: &mut u32) {}

        let res = UniqueResource::new(21_u32, noop);
        assert_eq!(
            format!("{res:?}"),
            "UniqueResource { value: 21, valid: true, releaser: \"fn\" }"
        );
    }

    #[test]
    fn test_new_converts_value_into_place() {
        fn close_wide(_: &mut u64) {}

        let res = UniqueResource::<u64>::new(7_u32, close_wide);
        assert_eq!(*res, 7_u64);
        assert!(res.is_valid());
    }

    #[test]
    fn test_new_widening_releases_converted_value() {
        clear();
        let res = UniqueResource::new(3_i16, release_a);
        assert_eq!(*res, 3_i32);
        drop(res);
        assert_eq!(released(), vec![('a', 3)]);
    }
}
