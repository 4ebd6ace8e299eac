use std::{fs, path::Path, path::PathBuf, time::Duration};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preferences_path: Option<PathBuf>,
    pub message_hide_delay_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preferences_path: None,
            message_hide_delay_ms: 2_000,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_path
            .clone()
            .unwrap_or_else(|| storage::default_preferences_path(dirs::config_dir()))
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.message_hide_delay_ms)
    }
}

/// Reads `path` if present, then applies `SHORTUUID_*` environment overrides.
/// Unreadable files and unparsable values leave the defaults in place.
pub fn load_settings(path: &Path) -> Settings {
    load_settings_with(path, |name| std::env::var(name).ok())
}

fn load_settings_with(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = fs::read_to_string(path)
        .ok()
        .and_then(|raw| toml::from_str::<Settings>(&raw).ok())
        .unwrap_or_default();

    apply_env_overrides(&mut settings, lookup);
    settings
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SHORTUUID_PREFERENCES_PATH") {
        if !v.trim().is_empty() {
            settings.preferences_path = Some(PathBuf::from(v));
        }
    }

    if let Some(v) = lookup("SHORTUUID_MESSAGE_HIDE_DELAY_MS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.message_hide_delay_ms = parsed;
        }
    }

    if let Some(v) = lookup("SHORTUUID_LOG") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load_settings_with(&dir.path().join("absent.toml"), lookup_from(&[]));

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.hide_delay(), Duration::from_secs(2));
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("shortuuid.toml");
        fs::write(
            &path,
            "preferences_path = \"/tmp/prefs.json\"\nmessage_hide_delay_ms = 500\n",
        )
        .expect("write config");

        let settings = load_settings_with(&path, lookup_from(&[]));
        assert_eq!(
            settings.preferences_path(),
            PathBuf::from("/tmp/prefs.json")
        );
        assert_eq!(settings.hide_delay(), Duration::from_millis(500));
    }

    #[test]
    fn malformed_file_falls_back_before_env_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("shortuuid.toml");
        fs::write(&path, "message_hide_delay_ms = \"later\"\n").expect("write config");

        let settings = load_settings_with(&path, lookup_from(&[("SHORTUUID_LOG", "warn")]));
        assert_eq!(settings.message_hide_delay_ms, 2_000);
        assert_eq!(settings.log_filter, "warn");
    }

    #[test]
    fn env_overrides_win_and_bad_numbers_are_ignored() {
        let mut settings = Settings {
            message_hide_delay_ms: 900,
            ..Settings::default()
        };
        apply_env_overrides(
            &mut settings,
            lookup_from(&[
                ("SHORTUUID_PREFERENCES_PATH", "/var/lib/prefs.json"),
                ("SHORTUUID_MESSAGE_HIDE_DELAY_MS", "soon"),
                ("SHORTUUID_LOG", "debug"),
            ]),
        );

        assert_eq!(
            settings.preferences_path,
            Some(PathBuf::from("/var/lib/prefs.json"))
        );
        assert_eq!(settings.message_hide_delay_ms, 900);
        assert_eq!(settings.log_filter, "debug");
    }
}
