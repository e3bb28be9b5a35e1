//! subpack-lib: the package lifecycle engine behind `subpack`.
//!
//! This crate provides everything needed to install a prebuilt toolchain
//! into the per-user store and expose it on the shell `PATH`:
//! - `Package`: a toolchain descriptor plus its install/remove lifecycle
//! - `ExtractorRegistry`: suffix-dispatched archive extraction strategies
//! - `drill_singleton_dirs`: collapsing of redundant wrapper directories
//! - `PathRegistrar`: idempotent management of the generated env file
//! - `catalog`: the statically declared set of known toolchains

pub mod catalog;
pub mod consts;
pub mod context;
pub mod env;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod package;
pub mod platform;
pub mod store;

pub use context::Context;
pub use error::{Error, Result};
pub use package::{Descriptor, InstallReport, Package, PostInstall, RemoveReport};
