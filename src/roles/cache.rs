use super::{Role, RoleSource};
use crate::config::Settings;
use crate::error::{Result, SsoError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// On-disk shape of a role cache, one file per SSO instance under
/// `<config dir>/cache/<instance>.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleCacheFile {
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// File-backed role collection for one SSO instance. `refresh` re-reads
/// the cache file, so an external refresher can update it between runs.
pub struct RoleCache {
    path: PathBuf,
    data: RoleCacheFile,
}

impl RoleCache {
    /// Cache handle for a named SSO instance.
    pub fn for_instance(name: &str) -> Result<Self> {
        let path = Settings::config_dir()?
            .join("cache")
            .join(format!("{name}.json"));
        Ok(Self::at(path))
    }

    /// Cache handle for an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            data: RoleCacheFile::default(),
        }
    }

    /// True when the cache has not been refreshed within `max_age_hours`.
    /// 0 disables the check; an interval too large to represent as a
    /// duration never goes stale.
    pub fn is_stale(&self, max_age_hours: i64) -> bool {
        if max_age_hours == 0 {
            return false;
        }
        let max_age = match Duration::try_hours(max_age_hours) {
            Some(max_age) => max_age,
            None => return false,
        };
        match self.data.updated_at {
            Some(updated_at) => Utc::now() - updated_at > max_age,
            None => true,
        }
    }
}

impl RoleSource for RoleCache {
    fn refresh(&mut self) -> Result<()> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            SsoError::CacheError(format!(
                "Failed to read role cache {}: {}",
                self.path.display(),
                e
            ))
        })?;

        self.data = serde_json::from_str(&contents)?;
        tracing::debug!(
            "Loaded {} roles from {}",
            self.data.roles.len(),
            self.path.display()
        );
        Ok(())
    }

    fn roles(&self) -> &[Role] {
        &self.data.roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_cache(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_refresh_loads_roles_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_cache(
            dir.path(),
            "Default.json",
            r#"{
                "updated_at": "2026-01-10T12:00:00Z",
                "roles": [
                    {"arn": "arn:aws:iam::111:role/B", "tags": {"Role": "B", "AccountId": "111"}},
                    {"arn": "arn:aws:iam::222:role/A", "tags": {"Role": "A"}}
                ]
            }"#,
        );

        let mut cache = RoleCache::at(path);
        cache.refresh().unwrap();

        let roles = cache.roles();
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].arn, "arn:aws:iam::111:role/B");
        assert_eq!(roles[1].arn, "arn:aws:iam::222:role/A");

        let keys: Vec<&str> = roles[0].all_tags().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Role", "AccountId"]);
    }

    #[test]
    fn test_refresh_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = RoleCache::at(dir.path().join("missing.json"));

        let err = cache.refresh().unwrap_err();
        assert!(matches!(err, SsoError::CacheError(_)));
        assert!(cache.roles().is_empty());
    }

    #[test]
    fn test_refresh_fails_on_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_cache(dir.path(), "Default.json", "{not json");

        let mut cache = RoleCache::at(path);
        assert!(matches!(cache.refresh(), Err(SsoError::Json(_))));
    }

    #[test]
    fn test_staleness_window() {
        let dir = tempfile::tempdir().unwrap();
        let recent = Utc::now() - Duration::hours(1);
        let path = write_cache(
            dir.path(),
            "Default.json",
            &format!(
                r#"{{"updated_at": "{}", "roles": []}}"#,
                recent.to_rfc3339()
            ),
        );

        let mut cache = RoleCache::at(path);
        cache.refresh().unwrap();

        assert!(!cache.is_stale(24));
        assert!(!cache.is_stale(0));
    }

    #[test]
    fn test_staleness_with_old_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_cache(
            dir.path(),
            "Default.json",
            r#"{"updated_at": "2020-01-01T00:00:00Z", "roles": []}"#,
        );

        let mut cache = RoleCache::at(path);
        cache.refresh().unwrap();

        assert!(cache.is_stale(24));
        assert!(!cache.is_stale(0));
    }

    #[test]
    fn test_unrefreshed_cache_is_stale() {
        let cache = RoleCache::at(PathBuf::from("/tmp/never-read.json"));
        assert!(cache.is_stale(24));
        assert!(!cache.is_stale(0));
    }

    #[test]
    fn test_staleness_with_extreme_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_cache(
            dir.path(),
            "Default.json",
            &format!(
                r#"{{"updated_at": "{}", "roles": []}}"#,
                Utc::now().to_rfc3339()
            ),
        );

        let mut cache = RoleCache::at(path);
        cache.refresh().unwrap();

        // Hour counts that overflow a Duration must not panic the warning path
        assert!(!cache.is_stale(i64::MAX));
        assert!(!cache.is_stale(i64::MIN));
    }
}
