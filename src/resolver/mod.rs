//! Resolution of installation directories to packages.
//!
//! - [`fs`]: existence checks and symlink resolution that never fail
//! - [`manifest`]: reading a directory's `package.json` into a descriptor
//! - [`version`]: npm-style range matching
//! - [`locator`]: finding the installation that provides a declared dependency

pub mod fs;
pub mod locator;
pub mod manifest;
pub mod version;

pub use fs::{exists, resolve_real_path};
pub use locator::{candidate_module_dirs, Locator, ResolvedDependency, MODULES_DIR};
pub use manifest::{load_manifest, PackageDescriptor, MANIFEST_FILE};
pub use version::satisfies;
