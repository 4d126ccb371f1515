//! 로그인 세션.
//!
//! 세션은 불투명한 키-값 저장소 위에서 명시적인 수명주기를 가집니다.
//! 저장소에는 토큰, 사용자 JSON, 로그인 시각(epoch 밀리초), 점검 배너 표시 플래그가
//! 기록됩니다.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::domain::User;
use crate::error::{JournalError, JournalResult};

/// 인증 토큰 키.
pub const KEY_AUTH_TOKEN: &str = "authToken";
/// 사용자 JSON 키.
pub const KEY_USER_DATA: &str = "userData";
/// 로그인 시각 키.
pub const KEY_LOGIN_TIMESTAMP: &str = "loginTimestamp";
/// 점검 배너를 표시한 로그인 시각 키.
pub const KEY_MAINTENANCE_SHOWN_FOR: &str = "maintenanceShownFor";

/// 세션 데이터를 보관하는 키-값 저장소.
pub trait KeyValueStore {
    /// 값 조회.
    fn get(&self, key: &str) -> Option<String>;

    /// 값 저장.
    fn set(&mut self, key: &str, value: String);

    /// 값 삭제.
    fn remove(&mut self, key: &str);

    /// 변경 내용이 실제로 저장되었는지 확인합니다. 메모리 저장소는 항상 성공.
    fn flush(&mut self) -> JournalResult<()> {
        Ok(())
    }
}

/// 메모리 저장소.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// 빈 저장소를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 키 수.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// 활성 세션.
#[derive(Debug)]
pub struct Session {
    token: SecretString,
    /// 로그인 사용자
    pub user: User,
    /// 로그인 시각
    pub login_at: DateTime<Utc>,
}

impl Session {
    /// 인증 토큰. 로그에 남기지 않습니다.
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// 만료 여부. 경과 시간이 `ttl`을 넘으면 만료입니다.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.login_at) > ttl
    }
}

/// 저장소 위의 세션 관리자.
pub struct SessionManager<S: KeyValueStore> {
    store: S,
    ttl: Duration,
    current: Option<Session>,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// 새 관리자를 생성합니다. 저장소는 `init` 호출 전까지 읽지 않습니다.
    pub fn new(store: S, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            current: None,
        }
    }

    /// 저장소에서 세션을 복원합니다.
    ///
    /// 만료되었거나 손상된 데이터는 저장소에서 모두 지우고 `None`을 반환합니다.
    pub fn init(&mut self, now: DateTime<Utc>) -> Option<&Session> {
        self.current = match self.restore() {
            Ok(Some(session)) if session.is_expired(now, self.ttl) => {
                debug!(login_at = %session.login_at, "session expired");
                self.clear_store();
                None
            }
            Ok(Some(session)) => Some(session),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "discarding corrupt session data");
                self.clear_store();
                None
            }
        };
        self.current.as_ref()
    }

    /// 세션을 다시 검증합니다. 규칙은 `init`과 같습니다.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Option<&Session> {
        self.init(now)
    }

    /// 로그인 결과를 저장합니다.
    pub fn sign_in(
        &mut self,
        token: impl Into<String>,
        user: User,
        now: DateTime<Utc>,
    ) -> JournalResult<&Session> {
        let token: String = token.into();
        if token.trim().is_empty() {
            return Err(JournalError::InvalidInput("빈 인증 토큰".to_string()));
        }

        let user_json = serde_json::to_string(&user)?;
        self.store.set(KEY_AUTH_TOKEN, token.clone());
        self.store.set(KEY_USER_DATA, user_json);
        self.store
            .set(KEY_LOGIN_TIMESTAMP, now.timestamp_millis().to_string());
        if let Err(e) = self.store.flush() {
            self.clear_store();
            self.current = None;
            return Err(e);
        }

        debug!(user = user.display_name(), "signed in");

        let login_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
        Ok(&*self.current.insert(Session {
            token: SecretString::new(token.into()),
            user,
            login_at,
        }))
    }

    /// 로그아웃합니다. 저장소의 모든 세션 키를 지웁니다.
    pub fn sign_out(&mut self) {
        self.clear_store();
        self.current = None;
    }

    /// 현재 세션.
    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// 저장소 참조.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// 이번 로그인에서 점검 배너를 아직 보여주지 않았는지 확인합니다.
    pub fn should_show_maintenance(&self) -> bool {
        match (
            self.current.as_ref(),
            self.store.get(KEY_LOGIN_TIMESTAMP),
        ) {
            (Some(_), Some(login)) => {
                self.store.get(KEY_MAINTENANCE_SHOWN_FOR).as_deref() != Some(login.as_str())
            }
            _ => false,
        }
    }

    /// 이번 로그인에서 점검 배너를 보여주었다고 기록합니다.
    pub fn mark_maintenance_shown(&mut self) {
        if let Some(login) = self.store.get(KEY_LOGIN_TIMESTAMP) {
            self.store.set(KEY_MAINTENANCE_SHOWN_FOR, login);
        }
    }

    fn restore(&self) -> JournalResult<Option<Session>> {
        let token = self.store.get(KEY_AUTH_TOKEN);
        let user = self.store.get(KEY_USER_DATA);
        let login = self.store.get(KEY_LOGIN_TIMESTAMP);

        let (token, user, login) = match (token, user, login) {
            (None, None, None) => return Ok(None),
            (Some(t), Some(u), Some(l)) => (t, u, l),
            _ => return Err(JournalError::Session("세션 키 일부 누락".to_string())),
        };

        let user: User = serde_json::from_str(&user)
            .map_err(|e| JournalError::Session(format!("사용자 데이터 손상: {}", e)))?;
        let millis: i64 = login
            .trim()
            .parse()
            .map_err(|_| JournalError::Session(format!("잘못된 로그인 시각: {}", login)))?;
        let login_at = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| JournalError::Session(format!("잘못된 로그인 시각: {}", millis)))?;

        Ok(Some(Session {
            token: SecretString::new(token.into()),
            user,
            login_at,
        }))
    }

    fn clear_store(&mut self) {
        for key in [
            KEY_AUTH_TOKEN,
            KEY_USER_DATA,
            KEY_LOGIN_TIMESTAMP,
            KEY_MAINTENANCE_SHOWN_FOR,
        ] {
            self.store.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use chrono::TimeZone;

    fn user() -> User {
        serde_json::from_str(r#"{"id": "u1", "name": "Ravi", "role_type": "TRADER"}"#).unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_sign_in_then_restore() {
        let mut manager = SessionManager::new(MemoryStore::new(), Duration::hours(2));
        manager.sign_in("tok-123", user(), t0()).unwrap();

        let store = manager.store().clone();
        let mut restored = SessionManager::new(store, Duration::hours(2));
        let session = restored.init(t0() + Duration::minutes(30)).unwrap();
        assert_eq!(session.token(), "tok-123");
        assert!(session.user.has_role(Role::Trader));
        assert_eq!(session.login_at, t0());
    }

    #[test]
    fn test_expired_session_clears_store() {
        let mut manager = SessionManager::new(MemoryStore::new(), Duration::hours(2));
        manager.sign_in("tok", user(), t0()).unwrap();

        // 정확히 2시간은 아직 유효
        assert!(manager.refresh(t0() + Duration::hours(2)).is_some());
        assert!(manager
            .refresh(t0() + Duration::hours(2) + Duration::seconds(1))
            .is_none());
        assert!(manager.store().is_empty());
    }

    #[test]
    fn test_corrupt_data_clears_store() {
        let mut store = MemoryStore::new();
        store.set(KEY_AUTH_TOKEN, "tok".to_string());
        store.set(KEY_USER_DATA, "{not json".to_string());
        store.set(KEY_LOGIN_TIMESTAMP, "1".to_string());

        let mut manager = SessionManager::new(store, Duration::hours(2));
        assert!(manager.init(t0()).is_none());
        assert!(manager.store().is_empty());
    }

    #[test]
    fn test_maintenance_banner_once_per_login() {
        let mut manager = SessionManager::new(MemoryStore::new(), Duration::hours(2));
        assert!(!manager.should_show_maintenance());

        manager.sign_in("tok", user(), t0()).unwrap();
        assert!(manager.should_show_maintenance());
        manager.mark_maintenance_shown();
        assert!(!manager.should_show_maintenance());

        // 새 로그인은 플래그를 다시 연다
        manager.sign_in("tok", user(), t0() + Duration::minutes(5)).unwrap();
        assert!(manager.should_show_maintenance());
    }

    #[test]
    fn test_sign_out_removes_everything() {
        let mut manager = SessionManager::new(MemoryStore::new(), Duration::hours(2));
        manager.sign_in("tok", user(), t0()).unwrap();
        manager.mark_maintenance_shown();
        manager.sign_out();
        assert!(manager.session().is_none());
        assert!(manager.store().is_empty());
    }

    /// 저장은 받지만 영구 반영에 실패하는 저장소
    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, value: String) {
            self.0.set(key, value);
        }

        fn remove(&mut self, key: &str) {
            self.0.remove(key);
        }

        fn flush(&mut self) -> JournalResult<()> {
            Err(JournalError::Session("read-only".to_string()))
        }
    }

    #[test]
    fn test_unsaved_sign_in_is_rejected() {
        let mut manager = SessionManager::new(ReadOnlyStore::default(), Duration::hours(2));
        let err = manager.sign_in("tok", user(), t0()).unwrap_err();
        assert!(err.requires_login());
        assert!(manager.session().is_none());
        assert!(manager.store().0.is_empty());
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut manager = SessionManager::new(MemoryStore::new(), Duration::hours(2));
        assert!(manager.sign_in("  ", user(), t0()).is_err());
    }
}
