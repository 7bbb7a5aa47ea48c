//! Config file loading

use super::FileConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed at the repository root, in order.
pub const CONFIG_CANDIDATES: &[&str] = &[
    "repo2md.toml",
    ".repo2md.toml",
    "repo2md.yml",
    ".repo2md.yml",
    "repo2md.yaml",
    ".repo2md.yaml",
];

/// Section name under which the keys may be nested.
const NESTED_SECTION: &str = "repo2md";

/// Load the defaults file for `repo_root`.
///
/// An explicit `config_path` must parse. An auto-discovered file that does not
/// parse is reported as a warning and ignored.
pub fn load_config(repo_root: &Path, config_path: Option<&Path>) -> Result<FileConfig> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(repo_root),
    };

    let Some(config_file) = discovered else {
        return Ok(FileConfig::default());
    };

    match parse_config_file(&config_file) {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if !config_path_provided => {
            tracing::warn!("Ignoring auto-discovered config {}: {:#}", config_file.display(), e);
            Ok(FileConfig::default())
        }
        Err(e) => Err(e),
    }
}

fn parse_config_file(config_file: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml_config(&content, config_file),
        "yaml" | "yml" => parse_yaml_config(&content, config_file),
        other => anyhow::bail!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        ),
    }
}

/// Parse TOML config, with the keys at top level or under `[repo2md]`.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<FileConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(NESTED_SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, with the keys at top level or under `repo2md:`.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<FileConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    // An empty document parses as null
    if raw.is_null() {
        return Ok(FileConfig::default());
    }

    let config_val = match raw.get(NESTED_SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

/// First candidate config file present at `repo_root`.
pub fn discover_config(repo_root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES.iter().map(|name| repo_root.join(name)).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn test_load_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("repo2md.toml"),
            "max_file_size = 999\nno_meta = true\nexclude = [\"*.log\", \"dist/\"]\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.max_file_size, Some(999));
        assert_eq!(cfg.no_meta, Some(true));
        assert_eq!(cfg.exclude, vec!["*.log", "dist/"]);
    }

    #[test]
    fn test_nested_toml_section() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join(".repo2md.toml"),
            "[repo2md]\nrecent = 3\nuncommitted = true\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.recent, Some(3));
        assert_eq!(cfg.uncommitted, Some(true));
    }

    #[test]
    fn test_load_yaml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("repo2md.yml"),
            "repo2md:\n  include:\n    - \"src/**/*.rs\"\n  include_meta: README.md\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.include, vec!["src/**/*.rs"]);
        assert_eq!(cfg.include_meta, vec!["README.md"]);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("repo2md.yaml"), "").expect("write");
        assert_eq!(load_config(tmp.path(), None).expect("config"), FileConfig::default());
    }

    #[test]
    fn test_toml_wins_over_yaml_in_discovery() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("repo2md.toml"), "recent = 1\n").expect("write");
        fs::write(tmp.path().join("repo2md.yml"), "recent: 2\n").expect("write");

        assert_eq!(discover_config(tmp.path()), Some(tmp.path().join("repo2md.toml")));
        assert_eq!(load_config(tmp.path(), None).expect("config").recent, Some(1));
    }

    #[test]
    fn test_comma_separated_string_lists() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "exclude = \"*.log, dist/ ,  target/\"\n").expect("write");

        let cfg = load_config(tmp.path(), Some(&path)).expect("config");
        assert_eq!(cfg.exclude, vec!["*.log", "dist/", "target/"]);
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "exclude = 123\n").expect("write");

        let result = load_config(tmp.path(), Some(&path));
        assert!(result.is_err(), "explicit config with invalid type should return Err");
    }

    #[test]
    fn test_explicit_config_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.ini");
        fs::write(&path, "recent=1\n").expect("write");

        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_missing_file_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        assert!(load_config(tmp.path(), Some(&tmp.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_config_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("repo2md.toml"), "max_file_size = \"big\"\n").expect("write");

        let cfg = load_config(tmp.path(), None).expect("should not error on auto-discovery");
        assert_eq!(cfg, FileConfig::default());
    }
}
