//! 사용자와 역할.
//!
//! 백엔드의 역할 필드는 `role` 또는 `role_type`이며 문자열이나 문자열 배열,
//! 대소문자 구분 없이 내려옵니다. 역직렬화 시 한 번만 `RoleSet`으로 정규화합니다.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::deserialize_optional_string;

/// 사용자 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// 관리자
    Admin,
    /// 트레이더
    Trader,
}

impl Role {
    /// 태그 문자열에서 역할을 파싱합니다. 알 수 없는 태그는 `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "TRADER" => Some(Role::Trader),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("ADMIN"),
            Role::Trader => f.write_str("TRADER"),
        }
    }
}

/// 정규화된 역할 집합. 비어 있지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// 태그 목록에서 역할 집합을 만듭니다.
    ///
    /// 알 수 없는 태그는 버리며, 결과가 비면 트레이더로 간주합니다.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles: BTreeSet<Role> = tags
            .into_iter()
            .filter_map(|t| Role::parse(t.as_ref()))
            .collect();
        if roles.is_empty() {
            roles.insert(Role::Trader);
        }
        Self(roles)
    }

    /// 와이어 값(문자열, 배열, null)에서 역할 집합을 만듭니다.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => Self::from_tags(s.split(',')),
            Some(Value::Array(items)) => {
                Self::from_tags(items.iter().filter_map(|v| v.as_str()))
            }
            _ => Self::from_tags(std::iter::empty::<&str>()),
        }
    }

    /// 역할 포함 여부.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// 역할 순회.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self::from_tags(std::iter::empty::<&str>())
    }
}

/// 사용자.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub roles: RoleSet,
    pub is_active: bool,
    pub is_verified: bool,
}

impl User {
    /// 역할 보유 여부. 권한 판단의 단일 진입점입니다.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }

    /// 관리자 여부.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// 표시 이름 (이름이 없으면 이메일).
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("")
    }
}

/// 백엔드 사용자 와이어 형식.
#[derive(Deserialize)]
struct UserWire {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    phone: Option<String>,
    #[serde(default)]
    role: Option<Value>,
    #[serde(default)]
    role_type: Option<Value>,
    #[serde(default)]
    roles: Option<Value>,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    is_verified: bool,
}

fn default_true() -> bool {
    true
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = UserWire::deserialize(deserializer)?;
        let role_value = wire
            .roles
            .as_ref()
            .or(wire.role.as_ref())
            .or(wire.role_type.as_ref());

        Ok(User {
            id: wire.id,
            name: wire.name,
            email: wire.email,
            phone: wire.phone,
            roles: RoleSet::from_value(role_value),
            is_active: wire.is_active,
            is_verified: wire.is_verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_string_any_case() {
        let user: User = serde_json::from_value(json!({"id": 1, "role": "admin"})).unwrap();
        assert!(user.is_admin());
        assert!(!user.has_role(Role::Trader));
    }

    #[test]
    fn test_role_type_array() {
        let user: User =
            serde_json::from_value(json!({"role_type": ["Trader", "ADMIN", "auditor"]})).unwrap();
        assert!(user.has_role(Role::Admin));
        assert!(user.has_role(Role::Trader));
        assert_eq!(user.roles.iter().count(), 2);
    }

    #[test]
    fn test_missing_role_defaults_to_trader() {
        let user: User = serde_json::from_value(json!({"email": "a@b.c"})).unwrap();
        assert!(user.has_role(Role::Trader));
        assert!(!user.is_admin());
        assert_eq!(user.display_name(), "a@b.c");
    }

    #[test]
    fn test_roundtrip_through_serialize() {
        let user: User = serde_json::from_value(json!({"name": "Asha", "role": "ADMIN"})).unwrap();
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["roles"], json!(["ADMIN"]));

        let back: User = serde_json::from_value(value).unwrap();
        assert_eq!(back, user);
    }
}
