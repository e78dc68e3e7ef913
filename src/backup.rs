//! Full-state export and restore.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::advice::DEFAULT_MODEL;
use crate::domain::{OutfitLog, SecureString, UserProfile, WardrobeItem};
use crate::engine::{Action, SliceUpdate, Update, VibeState};

pub const BACKUP_VERSION: u32 = 1;

/// One downloadable document. Carries the API key in the clear, so treat
/// the file as a secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub inventory: Vec<WardrobeItem>,
    #[serde(default)]
    pub outfit_logs: Vec<OutfitLog>,
    #[serde(default)]
    pub api_key: SecureString,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Failed to parse backup: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported backup version {found} (expected {BACKUP_VERSION})")]
    UnsupportedVersion { found: u32 },
}

pub fn export(state: &VibeState, model: &str, exported_at: DateTime<Utc>) -> Backup {
    Backup {
        version: BACKUP_VERSION,
        exported_at,
        profile: state.profile.clone(),
        inventory: state.inventory.clone(),
        outfit_logs: state.outfit_logs.clone(),
        api_key: state.api_key.clone(),
        location: state.location.clone(),
        model: model.to_string(),
    }
}

impl Backup {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Replace actions that apply this backup, plus the model it names.
    pub fn into_actions(self) -> (Vec<Action>, String) {
        let actions = vec![
            Action::SetSlice(SliceUpdate::Profile(Update::Replace(self.profile))),
            Action::SetSlice(SliceUpdate::Inventory(Update::Replace(self.inventory))),
            Action::SetSlice(SliceUpdate::OutfitLogs(Update::Replace(self.outfit_logs))),
            Action::SetSlice(SliceUpdate::ApiKey(Update::Replace(self.api_key))),
            Action::SetSlice(SliceUpdate::Location(Update::Replace(self.location))),
        ];
        (actions, self.model)
    }
}

/// Parse and version-check `json`, returning the actions that apply it.
pub fn restore(json: &str) -> Result<(Vec<Action>, String), BackupError> {
    let backup: Backup = serde_json::from_str(json)?;
    if backup.version != BACKUP_VERSION {
        return Err(BackupError::UnsupportedVersion {
            found: backup.version,
        });
    }
    Ok(backup.into_actions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn newer_version_is_rejected() {
        let json = r#"{"version": 2, "exportedAt": "2025-01-01T00:00:00Z"}"#;
        assert!(matches!(
            restore(json),
            Err(BackupError::UnsupportedVersion { found: 2 })
        ));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(restore("not json"), Err(BackupError::Parse(_))));
    }

    #[test]
    fn restore_yields_one_action_per_slice() {
        let mut state = VibeState::default();
        state.location = "Oslo".into();
        let at = Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap();
        let json = export(&state, "gemini-pro", at).to_json().unwrap();
        assert!(json.contains("\"exportedAt\""));

        let (actions, model) = restore(&json).unwrap();
        assert_eq!(model, "gemini-pro");
        assert_eq!(actions.len(), 5);
    }

    #[test]
    fn missing_model_uses_default() {
        let json = r#"{"version": 1, "exportedAt": "2025-01-01T00:00:00Z"}"#;
        let (_, model) = restore(json).unwrap();
        assert_eq!(model, DEFAULT_MODEL);
    }
}
