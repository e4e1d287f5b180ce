#![no_std]

extern crate alloc;

pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod context;
pub(crate) mod errors;
pub(crate) mod identity;
pub(crate) mod provider;
pub(crate) mod registry;
pub(crate) mod registry_macros;

pub mod macros_utils;

pub use config::Config;
pub use container::Container;
pub use errors::{InstantiateErrorKind, RegistryErrorKind, ResolveErrorKind};
pub use identity::Identity;
pub use provider::{Dependencies, Provider, Value};
pub use registry::{Registry, RegistryBuilder};
