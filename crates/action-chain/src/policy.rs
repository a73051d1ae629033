use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::PolicyError;
use crate::model::ActionKind;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainPolicy {
    pub enabled: bool,
    /// Emit an info line when a fallback strategy wins, surfacing drift
    /// from the primary locator.
    pub log_fallback_success: bool,
    pub timeouts: ChainTimeouts,
}

impl Default for ChainPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            log_fallback_success: true,
            timeouts: ChainTimeouts::default(),
        }
    }
}

impl ChainPolicy {
    /// Loads a policy from a YAML file, falling back to defaults when no
    /// path is given or the file does not exist.
    pub fn load_from_path(path: Option<PathBuf>) -> Result<Self, PolicyError> {
        match path {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(&path)?;
                Ok(serde_yaml::from_str(&raw)?)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainTimeouts {
    pub fill_ms: u64,
    pub click_ms: u64,
    pub text_ms: u64,
    pub hover_ms: u64,
}

impl ChainTimeouts {
    pub fn for_kind(&self, kind: ActionKind) -> Duration {
        let ms = match kind {
            ActionKind::Fill => self.fill_ms,
            ActionKind::Click => self.click_ms,
            ActionKind::Text => self.text_ms,
            ActionKind::Hover => self.hover_ms,
        };
        Duration::from_millis(ms)
    }
}

impl Default for ChainTimeouts {
    fn default() -> Self {
        Self {
            fill_ms: 5000,
            click_ms: 5000,
            text_ms: 3000,
            hover_ms: 2500,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_when_path_missing() {
        let policy = ChainPolicy::load_from_path(None).unwrap();
        assert!(policy.enabled);
        assert!(policy.log_fallback_success);
        assert_eq!(
            policy.timeouts.for_kind(ActionKind::Click),
            Duration::from_millis(5000)
        );

        let absent = PathBuf::from("config/does-not-exist.yaml");
        let policy = ChainPolicy::load_from_path(Some(absent)).unwrap();
        assert!(policy.enabled);
    }

    #[test]
    fn loads_yaml_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "enabled: true\nlog_fallback_success: false\ntimeouts:\n  fill_ms: 100\n  click_ms: 200\n  text_ms: 300\n  hover_ms: 400"
        )
        .unwrap();
        let policy = ChainPolicy::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert!(!policy.log_fallback_success);
        assert_eq!(
            policy.timeouts.for_kind(ActionKind::Hover),
            Duration::from_millis(400)
        );
    }

    #[test]
    fn policy_round_trips_through_yaml() {
        let policy = ChainPolicy::default();
        let yaml = serde_yaml::to_string(&policy).unwrap();
        let parsed: ChainPolicy = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.timeouts.fill_ms, policy.timeouts.fill_ms);
        assert_eq!(parsed.enabled, policy.enabled);
    }
}
