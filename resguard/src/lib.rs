//! # Resguard
//!
//! Exclusive, scope-bound ownership of value-like resources.
//!
//! A [`UniqueResource`] binds a plain value (a file descriptor, a handle, a
//! socket ID, an index into some external table) to the function that
//! releases it. The release runs exactly once, when the wrapper goes out of
//! scope, whether the scope ends by returning, by `?`, or by unwinding.
//!
//! - **Exclusive ownership**: wrappers move but never copy
//! - **Early release**: [`UniqueResource::reset`] releases before scope end
//! - **Hand-off**: [`UniqueResource::release_ownership`] returns the raw value
//!   and disarms the wrapper
//! - **Arbitrary deleters**: [`make_unique_resource`] accepts closures that
//!   capture state or return a `Result`
//!
//! Release may not fail. A releaser that panics, or a deleter that returns
//! `Err`, aborts the process.
//!
//! ## Quick Start
//!
//! ```rust
//! use resguard::prelude::*;
//!
//! fn close_socket(id: &mut u32) {
//!     println!("socket {id} closed");
//! }
//!
//! fn serve() -> Result<()> {
//!     let socket = UniqueResource::<u32>::try_new(7_i64, close_socket)?;
//!     assert_eq!(*socket, 7);
//!     Ok(())
//!     // `close_socket(&mut 7)` runs here, also on early return.
//! }
//!
//! serve().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod errors;
pub mod resource;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use errors::{ResourceError, Result};
pub use resource::{
    make_unique_resource, swap, try_make_unique_resource, Release, ReleaseFn, ReleaseOutcome,
    ResourceValue, UniqueResource,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::{ResourceError, Result};
    pub use crate::resource::{
        make_unique_resource, try_make_unique_resource, Release, ReleaseFn, ReleaseOutcome,
        ResourceValue, UniqueResource,
    };
}
