//! 파일 기반 로그인 세션 저장소.
//!
//! `journal login`이 저장한 토큰을 이후 명령에서 재사용합니다. 만료(기본 2시간)된
//! 세션은 열 때 지워집니다.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, warn};

use journal_core::{AppConfig, JournalError, JournalResult, KeyValueStore, SessionManager};

/// 세션 파일 경로 환경 변수.
pub const SESSION_FILE_ENV: &str = "JOURNAL_SESSION_FILE";

const DEFAULT_SESSION_FILE: &str = ".journal/session.json";

/// JSON 파일에 저장되는 키-값 저장소.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// 저장소를 엽니다. 파일이 없거나 손상되었으면 빈 저장소입니다.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    /// 기본 세션 파일 경로 (`JOURNAL_SESSION_FILE` 또는 `.journal/session.json`).
    pub fn default_path() -> PathBuf {
        std::env::var(SESSION_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        if let Err(e) = self.write() {
            warn!("Failed to write session file {}: {:#}", self.path.display(), e);
        }
    }

    fn write(&self) -> Result<()> {
        if self.entries.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path).context("Failed to remove session file")?;
            }
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create session directory")?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json).context("Failed to write session file")?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }

    fn flush(&mut self) -> JournalResult<()> {
        self.write()
            .map_err(|e| JournalError::Session(format!("{}: {:#}", self.path.display(), e)))
    }
}

/// 기본 경로의 세션을 열고 복원합니다.
pub fn open_session(config: &AppConfig) -> SessionManager<FileStore> {
    open_session_at(FileStore::default_path(), config)
}

/// 지정 경로의 세션을 열고 복원합니다.
pub fn open_session_at(path: impl Into<PathBuf>, config: &AppConfig) -> SessionManager<FileStore> {
    let mut manager = SessionManager::new(FileStore::open(path), config.session.ttl());
    manager.init(Utc::now());
    manager
}

/// 사용할 토큰을 결정합니다: 명시값 > `JOURNAL_TOKEN` > 저장된 세션.
pub fn resolve_token(explicit: Option<String>, config: &AppConfig) -> Option<String> {
    explicit
        .or_else(|| std::env::var(crate::input::TOKEN_ENV).ok())
        .filter(|t| !t.trim().is_empty())
        .or_else(|| {
            open_session(config)
                .session()
                .map(|s| s.token().to_string())
        })
}
