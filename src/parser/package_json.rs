//! Parser for npm package.json files.

use std::fs;
use std::path::Path;

use super::types::PackageJson;

/// Errors that can occur during package.json parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a package.json file from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use depscope::parser::package_json::parse_file;
///
/// let pkg = parse_file(Path::new("package.json")).unwrap();
/// println!("Package: {:?}", pkg.name);
/// ```
pub fn parse_file(path: &Path) -> ParseResult<PackageJson> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a package.json from a string.
///
/// # Example
///
/// ```
/// use depscope::parser::package_json::parse_str;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg = parse_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
pub fn parse_str(content: &str) -> ParseResult<PackageJson> {
    let pkg: PackageJson = serde_json::from_str(content)?;
    Ok(pkg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PACKAGE_JSON: &str = r#"{
        "name": "test-project",
        "version": "1.0.0",
        "description": "A test project",
        "dependencies": {
            "react": "^18.2.0",
            "lodash": "~4.17.21"
        },
        "devDependencies": {
            "typescript": "^5.0.0"
        }
    }"#;

    #[test]
    fn test_parse_str_valid() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();

        assert_eq!(pkg.name, Some("test-project".to_string()));
        assert_eq!(pkg.version, Some("1.0.0".to_string()));
        assert_eq!(pkg.description, Some("A test project".to_string()));
        assert_eq!(pkg.declared_dependencies(true).len(), 3);
    }

    #[test]
    fn test_parse_str_minimal() {
        let pkg = parse_str("{}").unwrap();

        assert!(pkg.name.is_none());
        assert!(pkg.version.is_none());
        assert!(pkg.dependencies.is_none());
    }

    #[test]
    fn test_parse_str_invalid_json() {
        let result = parse_str("{ invalid json }");

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ParseError::JsonError(_)));
    }

    #[test]
    fn test_parse_str_with_extra_fields() {
        // package.json often has many other fields; ensure we ignore them gracefully
        let json = r#"{
            "name": "with-extras",
            "version": "1.0.0",
            "scripts": {"build": "tsc"},
            "license": "MIT",
            "repository": {"type": "git", "url": "https://example.com"},
            "peerDependencies": {"react": "*"},
            "dependencies": {"express": "^4.18.0"}
        }"#;

        let pkg = parse_str(json).unwrap();
        assert_eq!(pkg.name, Some("with-extras".to_string()));
        assert_eq!(pkg.declared_dependencies(true).len(), 1);
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_file(&dir.path().join("package.json"));

        assert!(matches!(result.unwrap_err(), ParseError::IoError(_)));
    }

    #[test]
    fn test_parse_error_display() {
        let io_err = ParseError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert!(io_err.to_string().contains("Failed to read file"));
    }
}
