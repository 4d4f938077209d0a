//! Parser module for npm package manifests.
//!
//! # Example
//!
//! ```
//! use depscope::parser::parse_str;
//!
//! let pkg = parse_str(r#"{
//!     "name": "my-app",
//!     "version": "1.0.0",
//!     "dependencies": {"react": "^18.0.0"},
//!     "devDependencies": {"typescript": "^5.0.0"}
//! }"#).unwrap();
//!
//! assert_eq!(pkg.declared_dependencies(false).len(), 1);
//! assert_eq!(pkg.declared_dependencies(true).len(), 2);
//! ```

pub mod package_json;
pub mod types;

pub use package_json::{parse_file, parse_str, ParseError, ParseResult};

pub use types::{DependencyMap, PackageJson};
