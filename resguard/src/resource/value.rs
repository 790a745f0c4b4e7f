//! Marker trait for the values a [`UniqueResource`](super::UniqueResource) may own.

use std::num::{
    NonZeroI128, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroIsize, NonZeroU128,
    NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU8, NonZeroUsize,
};
use std::path::PathBuf;

/// A plain value that identifies an external resource.
///
/// File descriptors, handles, socket IDs and table indices are resource
/// values. Addressable memory is not: raw pointers, `NonNull`, `Box`, `Rc`
/// and `Arc` have no implementation, and the orphan rules keep downstream
/// crates from adding one, so wrapping them is rejected at build time.
///
/// Opt a handle newtype in with [`resource_value!`](crate::resource_value):
///
/// ```rust
/// use resguard::{resource_value, UniqueResource};
///
/// #[derive(Debug, PartialEq)]
/// struct SlotId(u32);
/// resource_value!(SlotId);
///
/// fn free_slot(_slot: &mut SlotId) {}
///
/// let slot = UniqueResource::new(SlotId(3), free_slot);
/// assert_eq!(*slot.get(), SlotId(3));
/// ```
///
/// Pointer-shaped values do not compile:
///
/// ```rust,compile_fail
/// use resguard::UniqueResource;
///
/// fn free(_ptr: &mut *mut u8) {}
///
/// let _ = UniqueResource::new(std::ptr::null_mut::<u8>(), free);
/// ```
///
/// ```rust,compile_fail
/// use resguard::UniqueResource;
///
/// fn free(_ptr: &mut Box<u32>) {}
///
/// let _ = UniqueResource::new(Box::new(1_u32), free);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a resource value",
    label = "pointer-shaped and unregistered types cannot be owned by a `UniqueResource`",
    note = "wrap handles, descriptors or indices; register a newtype with `resguard::resource_value!`"
)]
pub trait ResourceValue {}

/// Implements [`ResourceValue`](crate::ResourceValue) for one or more types.
#[macro_export]
macro_rules! resource_value {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::ResourceValue for $ty {})+
    };
}

resource_value!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, (),
);

resource_value!(
    NonZeroU8,
    NonZeroU16,
    NonZeroU32,
    NonZeroU64,
    NonZeroU128,
    NonZeroUsize,
    NonZeroI8,
    NonZeroI16,
    NonZeroI32,
    NonZeroI64,
    NonZeroI128,
    NonZeroIsize,
);

resource_value!(String, PathBuf);
