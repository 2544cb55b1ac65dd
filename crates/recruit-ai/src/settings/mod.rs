//! Process-wide screening settings persisted under [`SETTINGS_KEY`].

pub mod router;

use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ValidationError;
use crate::storage::{read_json, write_json, KeyValueStore, StorageError, SETTINGS_KEY};

pub use router::settings_router;

pub const DEFAULT_CUTOFF_SCORE: u8 = 75;
pub const MIN_CUTOFF_SCORE: u8 = 45;
pub const MAX_CUTOFF_SCORE: u8 = 95;
pub const CUTOFF_STEP: u8 = 5;
/// What [`Settings::redacted`] puts in place of a non-empty API key.
pub const API_KEY_MASK: &str = "********";

/// Screening configuration replaced wholesale on every save.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_key: String,
    pub cutoff_score: u8,
    pub auto_email: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            cutoff_score: DEFAULT_CUTOFF_SCORE,
            auto_email: false,
            updated_at: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &mask(&self.api_key))
            .field("cutoff_score", &self.cutoff_score)
            .field("auto_email", &self.auto_email)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let cutoff = self.cutoff_score;
        if !(MIN_CUTOFF_SCORE..=MAX_CUTOFF_SCORE).contains(&cutoff) {
            return Err(cutoff_out_of_range(cutoff));
        }
        if cutoff % CUTOFF_STEP != 0 {
            return Err(ValidationError::invalid(
                "cutoffScore",
                format!("must be a multiple of {CUTOFF_STEP}, got {cutoff}"),
            ));
        }
        Ok(())
    }

    /// Copy safe to hand back to API clients.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: mask(&self.api_key).to_string(),
            ..self.clone()
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        API_KEY_MASK
    }
}

fn cutoff_out_of_range(cutoff: impl fmt::Display) -> ValidationError {
    ValidationError::invalid(
        "cutoffScore",
        format!("must be between {MIN_CUTOFF_SCORE} and {MAX_CUTOFF_SCORE}, got {cutoff}"),
    )
}

/// Partial change to the stored settings, as sent by `PUT /api/v1/settings` and
/// `settings set`. Absent fields keep their stored value. An `apiKey` equal to
/// [`API_KEY_MASK`] is the redacted key echoed back and also keeps the stored key.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    /// `i64` so values outside `u8` still reach the range check.
    pub cutoff_score: Option<i64>,
    pub auto_email: Option<bool>,
}

impl fmt::Debug for SettingsUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsUpdate")
            .field("api_key", &self.api_key.as_deref().map(mask))
            .field("cutoff_score", &self.cutoff_score)
            .field("auto_email", &self.auto_email)
            .finish()
    }
}

impl SettingsUpdate {
    /// Merge onto `current`. Only the range is checked here; [`SettingsStore::save`]
    /// runs the full validation.
    pub fn apply(self, current: Settings) -> Result<Settings, ValidationError> {
        let api_key = match self.api_key {
            Some(key) if key != API_KEY_MASK => key,
            _ => current.api_key,
        };
        let cutoff_score = match self.cutoff_score {
            Some(raw) => u8::try_from(raw)
                .ok()
                .filter(|cutoff| (MIN_CUTOFF_SCORE..=MAX_CUTOFF_SCORE).contains(cutoff))
                .ok_or_else(|| cutoff_out_of_range(raw))?,
            None => current.cutoff_score,
        };

        Ok(Settings {
            api_key,
            cutoff_score,
            auto_email: self.auto_email.unwrap_or(current.auto_email),
            updated_at: current.updated_at,
        })
    }
}

/// Singleton owner of the persisted [`Settings`] record.
pub struct SettingsStore<B: ?Sized = dyn KeyValueStore> {
    backend: Arc<B>,
    write_lock: Mutex<()>,
}

impl<B> SettingsStore<B>
where
    B: KeyValueStore + ?Sized,
{
    pub fn open(backend: Arc<B>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// Current settings; defaults stand in for anything absent, unreadable, or out of range.
    pub fn load(&self) -> Settings {
        let settings: Settings = match read_json(self.backend.as_ref(), SETTINGS_KEY) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "settings unavailable, using defaults");
                return Settings::default();
            }
        };

        if let Err(err) = settings.validate() {
            warn!(error = %err, "stored cutoff rejected, using default cutoff");
            return Settings {
                cutoff_score: DEFAULT_CUTOFF_SCORE,
                ..settings
            };
        }
        settings
    }

    /// Apply `update` over the current record and save the result.
    pub fn update(&self, update: SettingsUpdate) -> Result<Settings, SettingsError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let merged = update.apply(self.load())?;
        self.write(merged)
    }

    /// Validate and overwrite the stored record, returning what was written.
    pub fn save(&self, settings: Settings) -> Result<Settings, SettingsError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        self.write(settings)
    }

    fn write(&self, settings: Settings) -> Result<Settings, SettingsError> {
        settings.validate()?;

        let stored = Settings {
            updated_at: Some(Utc::now()),
            ..settings
        };
        write_json(self.backend.as_ref(), SETTINGS_KEY, &stored)?;

        info!(
            cutoff_score = stored.cutoff_score,
            auto_email = stored.auto_email,
            "settings saved"
        );
        Ok(stored)
    }
}

/// Error raised when settings cannot be saved.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
