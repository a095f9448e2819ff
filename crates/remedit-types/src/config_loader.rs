/// Config file loader with validation.
///
/// Reads the user's YAML config file, validates it on load, and checks the
/// file mode on Unix: a config that stores passwords or cookies should not
/// be readable by group or others.
///
/// Expected file shape:
/// ```text
/// editor: "vim"
/// default_wiki: work
/// wikis:
///   work:
///     url: https://wiki.example.org
///     username: alice
///     password: hunter2
///   public:
///     url: https://wiki.example.com
/// ```
use std::path::{Path, PathBuf};

use crate::config::RemeditConfig;
use crate::errors::RemeditError;

/// Default config file location (`~/.config/remedit/config.yaml` on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("remedit").join("config.yaml"))
}

/// Load and validate the config file at `path`.
///
/// A missing file is an error here; use [`load_default`] for the optional
/// default-location lookup.
pub fn load(path: &Path) -> Result<RemeditConfig, RemeditError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| RemeditError::Config(format!("failed to read {}: {e}", path.display())))?;
    let config: RemeditConfig = serde_yaml::from_str(&content)
        .map_err(|e| RemeditError::Config(format!("failed to parse {}: {e}", path.display())))?;
    validate(&config)?;

    if file_mode_too_open(path, &config) {
        tracing::warn!(
            path = %path.display(),
            "config file stores credentials but is readable by group/others; \
             consider `chmod 600`"
        );
    }

    Ok(config)
}

/// Load the config from the default location, or return an empty config if
/// no file exists there.
pub fn load_default() -> Result<RemeditConfig, RemeditError> {
    match default_config_path() {
        Some(path) if path.exists() => load(&path),
        _ => Ok(RemeditConfig::default()),
    }
}

/// Validate the config for internal consistency.
///
/// Checks:
/// - Every profile URL is non-empty and uses http or https
/// - No profile has a password without a username
/// - `default_wiki` names an existing profile
pub fn validate(config: &RemeditConfig) -> Result<(), RemeditError> {
    for (alias, profile) in &config.wikis {
        if profile.url.trim().is_empty() {
            return Err(RemeditError::Config(format!(
                "wiki profile '{alias}' has an empty url"
            )));
        }
        if !profile.url.starts_with("http://") && !profile.url.starts_with("https://") {
            return Err(RemeditError::Config(format!(
                "wiki profile '{alias}': url '{}' must start with http:// or https://",
                profile.url
            )));
        }
        if profile.password.is_some() && profile.username.is_none() {
            return Err(RemeditError::Config(format!(
                "wiki profile '{alias}' has a password but no username"
            )));
        }
    }

    if let Some(default) = &config.default_wiki {
        if !config.wikis.contains_key(default) {
            return Err(RemeditError::Config(format!(
                "default_wiki '{default}' does not name a configured wiki profile"
            )));
        }
    }

    Ok(())
}

/// True when the file stores secret material and is readable beyond the
/// owner. Always false on non-Unix platforms.
#[cfg(unix)]
fn file_mode_too_open(path: &Path, config: &RemeditConfig) -> bool {
    use std::os::unix::fs::MetadataExt;

    if !config.wikis.values().any(|p| p.holds_secrets()) {
        return false;
    }
    match std::fs::metadata(path) {
        Ok(meta) => meta.mode() & 0o077 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn file_mode_too_open(_path: &Path, _config: &RemeditConfig) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            r#"
editor: "vim"
default_wiki: work
wikis:
  work:
    url: https://wiki.example.org
    username: alice
    password: hunter2
  public:
    url: http://wiki.example.com
"#,
        );

        let config = load(&path).unwrap();
        assert_eq!(config.editor.as_deref(), Some("vim"));
        assert_eq!(config.default_wiki.as_deref(), Some("work"));
        assert_eq!(config.wikis.len(), 2);

        let work = config.wikis.get("work").unwrap();
        assert_eq!(work.url, "https://wiki.example.org");
        assert_eq!(work.username.as_deref(), Some("alice"));
        assert!(work.holds_secrets());
        assert!(!config.wikis.get("public").unwrap().holds_secrets());
    }

    #[test]
    fn test_empty_file_is_empty_config() {
        let (_dir, path) = write_config("{}");
        let config = load(&path).unwrap();
        assert!(config.editor.is_none());
        assert!(config.wikis.is_empty());
    }

    #[test]
    fn test_missing_file_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = load(&path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("failed to read"));
        assert!(msg.contains("nope.yaml"));
    }

    #[test]
    fn test_invalid_yaml_error_names_path() {
        let (_dir, path) = write_config("wikis: [not: a: map");
        let err = load(&path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("failed to parse"));
        assert!(msg.contains("config.yaml"));
    }

    #[test]
    fn test_validation_rejects_bad_scheme() {
        let (_dir, path) = write_config(
            r#"
wikis:
  work:
    url: ftp://wiki.example.org
"#,
        );
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn test_validation_rejects_empty_url() {
        let (_dir, path) = write_config(
            r#"
wikis:
  work:
    url: ""
"#,
        );
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("empty url"));
    }

    #[test]
    fn test_validation_rejects_password_without_username() {
        let (_dir, path) = write_config(
            r#"
wikis:
  work:
    url: https://wiki.example.org
    password: hunter2
"#,
        );
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("password but no username"));
    }

    #[test]
    fn test_validation_rejects_unknown_default_wiki() {
        let (_dir, path) = write_config(
            r#"
default_wiki: missing
wikis:
  work:
    url: https://wiki.example.org
"#,
        );
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("default_wiki 'missing'"));
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_check_flags_open_credential_file() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, path) = write_config(
            r#"
wikis:
  work:
    url: https://wiki.example.org
    username: alice
    password: hunter2
"#,
        );
        let config = load(&path).unwrap();

        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(file_mode_too_open(&path, &config));

        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
        assert!(!file_mode_too_open(&path, &config));
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_check_ignores_secretless_config() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, path) = write_config(
            r#"
wikis:
  public:
    url: https://wiki.example.com
"#,
        );
        let config = load(&path).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!file_mode_too_open(&path, &config));
    }
}
