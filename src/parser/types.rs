//! Shared types for manifest parsing.
//!
//! This module defines the in-memory shape of an npm `package.json` and
//! the declared-dependency map the traversal consumes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Declared dependencies of a package: name -> version range.
pub type DependencyMap = BTreeMap<String, String>;

/// Represents the structure of a package.json file.
///
/// Only the fields needed to identify a package and read its declared
/// dependencies are captured; everything else is ignored on deserialization.
/// A captured field holding an unexpected JSON type is dropped rather than
/// failing the whole manifest.
///
/// # Example
///
/// ```
/// use depscope::parser::types::PackageJson;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg: PackageJson = serde_json::from_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageJson {
    /// The name of the package.
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: Option<String>,

    /// The version of the package (semver format).
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,

    /// A brief description of the package.
    #[serde(default, deserialize_with = "scalar_string")]
    pub description: Option<String>,

    /// Production dependencies required at runtime.
    #[serde(default, deserialize_with = "dependency_map")]
    pub dependencies: Option<DependencyMap>,

    /// Development-only dependencies (testing, building, etc.).
    #[serde(
        rename = "devDependencies",
        default,
        deserialize_with = "dependency_map"
    )]
    pub dev_dependencies: Option<DependencyMap>,
}

impl PackageJson {
    /// Returns the dependency map the traversal should follow.
    ///
    /// Production dependencies come first. When `include_dev` is set,
    /// development dependencies are merged into the same map and replace
    /// the range of a same-named production entry.
    pub fn declared_dependencies(&self, include_dev: bool) -> DependencyMap {
        let mut deps = self.dependencies.clone().unwrap_or_default();

        if include_dev {
            if let Some(ref dev) = self.dev_dependencies {
                deps.extend(dev.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }

        deps
    }
}

/// Keeps strings and numbers, discarding any other JSON value.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Keeps the string-valued entries of an object.
///
/// A non-string range could never match an installed version, so dropping
/// it does not change what the traversal resolves.
fn dependency_map<'de, D>(deserializer: D) -> Result<Option<DependencyMap>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(entries) => Some(
            entries
                .into_iter()
                .filter_map(|(name, range)| match range {
                    Value::String(range) => Some((name, range)),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}
