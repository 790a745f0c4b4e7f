//! Exclusive ownership of value-like resources.
//!
//! This module provides:
//! - `UniqueResource`, the owning wrapper
//! - Releasers: plain `fn` pointers or erased `Release` adapters
//! - `make_unique_resource` for arbitrary deleters
//! - The `ResourceValue` marker that keeps pointer types out

mod factory;
mod releaser;
mod unique;
mod value;


pub use factory::{make_unique_resource, try_make_unique_resource};
pub use releaser::{Release, ReleaseFn, ReleaseOutcome};
pub use unique::{swap, UniqueResource};
pub use value::ResourceValue;
