//! Flat-file JSON storage for accounts, progress, and interaction logs.
//!
//! Each collection lives in one pretty-printed JSON file under the data
//! directory, rewritten whole on every mutation and guarded by a per-file
//! mutex. Missing or corrupt files read back as empty collections; only real
//! write failures surface as errors.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use neuropath_wellbeing::{BreakReason, SupportMode};

pub const USERS_FILE: &str = "users.json";
pub const PROGRESS_FILE: &str = "progress.json";
pub const INTERACTIONS_FILE: &str = "interactions.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub neurodiversity_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(rename = "type")]
    pub user_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub module_id: String,
    pub activity_id: String,
    pub status: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub user_id: String,
    #[serde(default)]
    pub completions: Vec<Completion>,
}

impl ProgressRecord {
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            completions: Vec::new(),
        }
    }
}

/// One logged submission, including any support-mode trigger metadata. The
/// engine itself keeps no history; this record is the only durable trace of
/// a trigger, captured at submission time.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub session_id: String,
    pub activity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub is_correct: bool,
    pub time_taken: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confusion_flag: Option<bool>,
    #[serde(default)]
    pub support_modes: Vec<SupportMode>,
    pub break_triggered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_reason: Option<BreakReason>,
    pub consecutive_wrong: u32,
    pub wrong_in_last5: usize,
    pub timestamp: String,
}

pub struct FlatFileStore {
    users_path: PathBuf,
    progress_path: PathBuf,
    interactions_path: PathBuf,
    users_lock: Mutex<()>,
    progress_lock: Mutex<()>,
    interactions_lock: Mutex<()>,
}

impl FlatFileStore {
    /// Opens the store, creating the directory and empty collection files on
    /// first run.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir).map_err(|source| StoreError::CreateDir {
            path: data_dir.to_path_buf(),
            source,
        })?;

        let store = Self {
            users_path: data_dir.join(USERS_FILE),
            progress_path: data_dir.join(PROGRESS_FILE),
            interactions_path: data_dir.join(INTERACTIONS_FILE),
            users_lock: Mutex::new(()),
            progress_lock: Mutex::new(()),
            interactions_lock: Mutex::new(()),
        };

        for path in [
            &store.users_path,
            &store.progress_path,
            &store.interactions_path,
        ] {
            if !path.exists() {
                write_json(path, &Vec::<serde_json::Value>::new())?;
            }
        }

        Ok(store)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<UserRecord> {
        let _guard = self.users_lock.lock();
        read_or_empty::<UserRecord>(&self.users_path)
            .into_iter()
            .find(|user| user.email == email)
    }

    /// Appends a new account unless the email is already registered.
    /// Returns false on a duplicate.
    pub fn try_insert_user(&self, record: UserRecord) -> Result<bool, StoreError> {
        let _guard = self.users_lock.lock();
        let mut users = read_or_empty::<UserRecord>(&self.users_path);
        if users.iter().any(|user| user.email == record.email) {
            return Ok(false);
        }
        users.push(record);
        write_json(&self.users_path, &users)?;
        Ok(true)
    }

    pub fn progress_for(&self, user_id: &str) -> ProgressRecord {
        let _guard = self.progress_lock.lock();
        read_or_empty::<ProgressRecord>(&self.progress_path)
            .into_iter()
            .find(|record| record.user_id == user_id)
            .unwrap_or_else(|| ProgressRecord::empty(user_id))
    }

    /// Records a completion: one progress record per user, one completion
    /// per activity; repeats overwrite status and timestamp.
    pub fn upsert_completion(
        &self,
        user_id: &str,
        module_id: &str,
        activity_id: &str,
        status: &str,
    ) -> Result<ProgressRecord, StoreError> {
        let _guard = self.progress_lock.lock();
        let mut records = read_or_empty::<ProgressRecord>(&self.progress_path);
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let entry = match records.iter_mut().find(|r| r.user_id == user_id) {
            Some(entry) => entry,
            None => {
                records.push(ProgressRecord::empty(user_id));
                records.last_mut().expect("record just pushed")
            }
        };

        match entry
            .completions
            .iter_mut()
            .find(|c| c.activity_id == activity_id)
        {
            Some(existing) => {
                existing.status = status.to_string();
                existing.updated_at = now;
            }
            None => entry.completions.push(Completion {
                module_id: module_id.to_string(),
                activity_id: activity_id.to_string(),
                status: status.to_string(),
                updated_at: now,
            }),
        }

        let snapshot = entry.clone();
        write_json(&self.progress_path, &records)?;
        Ok(snapshot)
    }

    pub fn append_interaction(&self, record: &InteractionRecord) -> Result<(), StoreError> {
        let _guard = self.interactions_lock.lock();
        let mut interactions = read_or_empty::<InteractionRecord>(&self.interactions_path);
        interactions.push(record.clone());
        write_json(&self.interactions_path, &interactions)
    }

    pub fn interactions_for(&self, user_id: Option<&str>) -> Vec<InteractionRecord> {
        let _guard = self.interactions_lock.lock();
        let interactions = read_or_empty::<InteractionRecord>(&self.interactions_path);
        match user_id {
            Some(id) => interactions
                .into_iter()
                .filter(|record| record.user_id.as_deref() == Some(id))
                .collect(),
            None => interactions,
        }
    }
}

fn read_or_empty<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unreadable data file, treating as empty");
            Vec::new()
        }
    }
}

fn write_json<T: Serialize>(path: &Path, values: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string_pretty(values).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, raw).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
