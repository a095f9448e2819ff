/// Configuration types for the remedit tool.
///
/// Parsed from the user's config file (YAML). Everything is optional — a
/// missing config file is equivalent to an empty one, and the CLI flags can
/// supply the same values per invocation.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::page::Credentials;

/// Top-level configuration, parsed from `~/.config/remedit/config.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemeditConfig {
    /// Editor command used when neither `--editor` nor `$VISUAL`/`$EDITOR`
    /// supply one. May contain arguments ("code -w").
    #[serde(default)]
    pub editor: Option<String>,

    /// Alias of the wiki profile used when `--wiki` is not given.
    #[serde(default)]
    pub default_wiki: Option<String>,

    /// Named wiki profiles.
    #[serde(default)]
    pub wikis: HashMap<String, WikiProfile>,
}

/// Connection settings for one wiki.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikiProfile {
    /// Base URL of the wiki (http or https).
    pub url: String,

    /// Username for HTTP basic auth.
    #[serde(default)]
    pub username: Option<String>,

    /// Password for HTTP basic auth. Requires `username`.
    #[serde(default)]
    pub password: Option<String>,

    /// Pre-established session cookie, sent verbatim. Used instead of
    /// basic auth when set.
    #[serde(default)]
    pub cookie: Option<String>,
}

impl WikiProfile {
    /// Whether this profile stores any secret material.
    ///
    /// Drives the permission warning on the config file: a profile with
    /// only a URL is harmless to share, one with a password or cookie
    /// is not.
    pub fn holds_secrets(&self) -> bool {
        self.password.is_some() || self.cookie.is_some()
    }

    /// Credentials described by this profile.
    ///
    /// A cookie wins over basic auth when both are configured.
    pub fn credentials(&self) -> Credentials {
        if let Some(cookie) = &self.cookie {
            return Credentials::Cookie(cookie.clone());
        }
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Credentials::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            _ => Credentials::Anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_wins_over_basic_auth() {
        let profile = WikiProfile {
            url: "https://wiki.example.org".to_string(),
            username: Some("alice".to_string()),
            password: Some("hunter2".to_string()),
            cookie: Some("wiki_session=abc123".to_string()),
        };
        assert_eq!(
            profile.credentials(),
            Credentials::Cookie("wiki_session=abc123".to_string())
        );
    }

    #[test]
    fn test_username_without_password_is_anonymous() {
        let profile = WikiProfile {
            url: "https://wiki.example.org".to_string(),
            username: Some("alice".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.credentials(), Credentials::Anonymous);
        assert!(!profile.holds_secrets());
    }

    #[test]
    fn test_holds_secrets() {
        let mut profile = WikiProfile {
            url: "https://wiki.example.org".to_string(),
            ..Default::default()
        };
        assert!(!profile.holds_secrets());
        profile.password = Some("hunter2".to_string());
        assert!(profile.holds_secrets());
    }
}
