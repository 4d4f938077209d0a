//! Loading a package descriptor from an installation directory.

use std::path::Path;

use tracing::warn;

use super::fs::exists;
use crate::parser::{parse_file, DependencyMap};

/// File name of the per-package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// The manifest fields the graph needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    /// Production dependencies, with development ones merged in when requested
    pub dependencies: DependencyMap,
}

/// Reads `<directory>/package.json`.
///
/// Returns `None` when the manifest is absent. A manifest that cannot be
/// read or parsed is logged and also yields `None`. Missing `name` or
/// `version` fields become empty strings.
pub fn load_manifest(directory: &Path, include_dev_dependencies: bool) -> Option<PackageDescriptor> {
    let path = directory.join(MANIFEST_FILE);
    if !exists(&path) {
        return None;
    }

    let pkg = match parse_file(&path) {
        Ok(pkg) => pkg,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Error reading package.json");
            return None;
        }
    };

    let dependencies = pkg.declared_dependencies(include_dev_dependencies);
    Some(PackageDescriptor {
        name: pkg.name.unwrap_or_default(),
        version: pkg.version.unwrap_or_default(),
        description: pkg.description,
        dependencies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(MANIFEST_FILE),
            r#"{
                "name": "app",
                "version": "1.0.0",
                "description": "The app",
                "dependencies": {"lib": "^1.0.0"},
                "devDependencies": {"jest": "^29.0.0"}
            }"#,
        )
        .unwrap();

        let prod = load_manifest(tmp.path(), false).unwrap();
        assert_eq!(prod.name, "app");
        assert_eq!(prod.version, "1.0.0");
        assert_eq!(prod.description.as_deref(), Some("The app"));
        assert_eq!(prod.dependencies.len(), 1);

        let with_dev = load_manifest(tmp.path(), true).unwrap();
        assert_eq!(with_dev.dependencies.len(), 2);
    }

    #[test]
    fn test_missing_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_manifest(tmp.path(), false).is_none());
    }

    #[test]
    fn test_malformed_manifest_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), "{ \"name\": ").unwrap();

        assert!(load_manifest(tmp.path(), false).is_none());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), r#"{"private": true}"#).unwrap();

        let descriptor = load_manifest(tmp.path(), false).unwrap();
        assert_eq!(descriptor.name, "");
        assert_eq!(descriptor.version, "");
        assert!(descriptor.description.is_none());
        assert!(descriptor.dependencies.is_empty());
    }
}
