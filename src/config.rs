//! Configuration file handling.
//!
//! This module loads the Reddit script-app credentials from an
//! `app.yaml` file:
//!
//! ```yaml
//! client_id: asdf
//! client_secret: fdsa
//! username: me
//! password: swordfish
//! user_agent: flairscope
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default credentials file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "app.yaml";

/// Reddit script-app credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// OAuth client id of the script app.
    pub client_id: String,
    /// OAuth client secret of the script app.
    pub client_secret: String,
    /// Account the script app belongs to.
    pub username: String,
    /// Password of that account.
    pub password: String,
    /// User agent sent with every request; Reddit requires a descriptive one.
    pub user_agent: String,
}

impl Credentials {
    /// Load credentials from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials file: {}", path.display()))?;

        let credentials: Credentials = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse credentials file: {}", path.display()))?;

        Ok(credentials)
    }

    /// Try to load credentials from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
    /// can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate a template credentials file content.
    pub fn template_yaml() -> String {
        let template = Credentials {
            client_id: "your-client-id".to_string(),
            client_secret: "your-client-secret".to_string(),
            username: "your-username".to_string(),
            password: "your-password".to_string(),
            user_agent: "flairscope".to_string(),
        };
        serde_yaml::to_string(&template).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_credentials() {
        let yaml = r#"
client_id: abc123
client_secret: shhh
username: me
password: swordfish
user_agent: flairscope test
"#;

        let credentials: Credentials = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(credentials.client_id, "abc123");
        assert_eq!(credentials.client_secret, "shhh");
        assert_eq!(credentials.username, "me");
        assert_eq!(credentials.password, "swordfish");
        assert_eq!(credentials.user_agent, "flairscope test");
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let yaml = "client_id: abc123\nclient_secret: shhh\n";
        assert!(serde_yaml::from_str::<Credentials>(yaml).is_err());
    }

    #[test]
    fn test_template_round_trips() {
        let template = Credentials::template_yaml();
        assert!(!template.is_empty());
        let parsed: Credentials = serde_yaml::from_str(&template).unwrap();
        assert_eq!(parsed.client_id, "your-client-id");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "client_id: a\nclient_secret: b\nusername: c\npassword: d\nuser_agent: e\n"
        )
        .unwrap();

        let credentials = Credentials::load(file.path()).unwrap();
        assert_eq!(credentials.username, "c");
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(Credentials::load(&missing).is_err());
    }
}
