//! Re-exports used by the crate macros. Not part of the public API surface.

pub use alloc::vec::Vec;
