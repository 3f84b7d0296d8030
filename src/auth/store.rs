use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

const CONFIG_DIR: &str = ".costco";
const CONFIG_FILE: &str = "config.json";
const TOKEN_FILE: &str = "tokens.json";

/// Environment override for the store directory; used by tests and
/// sandboxed installs.
pub const CONFIG_DIR_ENV: &str = "COSTCO_CONFIG_DIR";

/// Non-secret settings persisted to `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredConfig {
    pub email: String,
    pub warehouse_number: String,
}

/// Credential record persisted to `tokens.json`.
///
/// Not authoritative once the process is running: the in-memory credential
/// always wins. `updated_at` is stamped by the store on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub id_token: String,
    pub refresh_token: String,
    pub token_expiry: DateTime<Utc>,
    pub refresh_token_expires_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// File-backed storage for settings and the current credential pair.
///
/// Two files under one directory: `config.json` for non-secrets and
/// `tokens.json` for the token material, both whole-file overwrites with
/// owner-only permissions.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the store directory: `COSTCO_CONFIG_DIR` if set, otherwise
    /// `~/.costco`.
    pub fn from_env() -> Result<Self, StoreError> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(Self::new(dir));
            }
        }
        let home = dirs::home_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(home.join(CONFIG_DIR)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700))?;
        }
        Ok(())
    }

    pub fn save_config(&self, config: &StoredConfig) -> Result<(), StoreError> {
        self.write_json(&self.config_path(), config)
    }

    /// Missing file is `Ok(None)`; only an unreadable or malformed file is
    /// an error.
    pub fn load_config(&self) -> Result<Option<StoredConfig>, StoreError> {
        self.read_json(&self.config_path())
    }

    /// Persist the credential record, stamping `updated_at`. Returns the
    /// record as written.
    pub fn save_credentials(
        &self,
        mut creds: StoredCredentials,
    ) -> Result<StoredCredentials, StoreError> {
        creds.updated_at = Utc::now();
        self.write_json(&self.token_path(), &creds)?;
        Ok(creds)
    }

    pub fn load_credentials(&self) -> Result<Option<StoredCredentials>, StoreError> {
        self.read_json(&self.token_path())
    }

    /// Remove the token file, forcing re-authentication on next use.
    /// Already-absent is not an error.
    pub fn clear_credentials(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.token_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Human-readable summary of the store state for the `info` command.
    pub fn describe(&self) -> String {
        let mut info = format!("Config directory: {}\n", self.dir.display());

        let config_path = self.config_path();
        if config_path.exists() {
            info.push_str(&format!("Config file: {} (exists)\n", config_path.display()));
        } else {
            info.push_str(&format!(
                "Config file: {} (not found)\n",
                config_path.display()
            ));
        }

        let token_path = self.token_path();
        if token_path.exists() {
            info.push_str(&format!("Token file: {} (exists)\n", token_path.display()));
            if let Ok(Some(creds)) = self.load_credentials() {
                if Utc::now() < creds.token_expiry {
                    info.push_str(&format!(
                        "  - Token valid until: {}\n",
                        creds.token_expiry.to_rfc3339()
                    ));
                } else {
                    info.push_str("  - Token expired, will refresh\n");
                }
                info.push_str(&format!(
                    "  - Last updated: {}\n",
                    creds.updated_at.to_rfc3339()
                ));
            }
        } else {
            info.push_str(&format!(
                "Token file: {} (not found)\n",
                token_path.display()
            ));
        }

        info
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let data = serde_json::to_vec_pretty(value)?;
        fs::write(path, data)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &Path,
    ) -> Result<Option<T>, StoreError> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use serial_test::serial;

    fn temp_store() -> (tempfile::TempDir, CredentialStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join(CONFIG_DIR));
        (dir, store)
    }

    fn sample_credentials() -> StoredCredentials {
        StoredCredentials {
            id_token: "eyJ.test.token".into(),
            refresh_token: "R1".into(),
            token_expiry: Utc::now() + TimeDelta::minutes(55),
            refresh_token_expires_at: Utc::now() + TimeDelta::days(90),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn credentials_round_trip() {
        let (_tmp, store) = temp_store();
        let saved = store.save_credentials(sample_credentials()).unwrap();

        let loaded = store.load_credentials().unwrap().unwrap();

        // identical field for field; updated_at is stamped by the store and
        // round-trips with the rest
        assert_eq!(loaded, saved);
    }

    #[test]
    fn missing_files_load_as_none() {
        let (_tmp, store) = temp_store();
        assert!(store.load_credentials().unwrap().is_none());
        assert!(store.load_config().unwrap().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let (_tmp, store) = temp_store();
        store.save_credentials(sample_credentials()).unwrap();

        store.clear_credentials().unwrap();
        assert!(store.load_credentials().unwrap().is_none());
        // second clear on an absent file is fine
        store.clear_credentials().unwrap();
    }

    #[test]
    fn config_round_trip() {
        let (_tmp, store) = temp_store();
        let config = StoredConfig {
            email: "member@example.com".into(),
            warehouse_number: "847".into(),
        };
        store.save_config(&config).unwrap();

        let loaded = store.load_config().unwrap().unwrap();
        assert_eq!(loaded.email, "member@example.com");
        assert_eq!(loaded.warehouse_number, "847");
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_tmp, store) = temp_store();
        store.save_credentials(sample_credentials()).unwrap();

        let mode = std::fs::metadata(store.token_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);

        let dir_mode = std::fs::metadata(store.dir())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(dir_mode & 0o777, 0o700);
    }

    #[test]
    #[serial]
    fn env_override_wins_over_home() {
        let tmp = tempfile::tempdir().unwrap();
        std::env::set_var(CONFIG_DIR_ENV, tmp.path());

        let store = CredentialStore::from_env().unwrap();
        assert_eq!(store.dir(), tmp.path());

        std::env::remove_var(CONFIG_DIR_ENV);
    }

    #[test]
    fn describe_reports_token_state() {
        let (_tmp, store) = temp_store();
        let info = store.describe();
        assert!(info.contains("not found"));

        store.save_credentials(sample_credentials()).unwrap();
        let info = store.describe();
        assert!(info.contains("Token valid until"));
    }
}
