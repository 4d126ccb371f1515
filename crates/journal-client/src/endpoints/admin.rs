//! 관리자 엔드포인트.

use reqwest::Method;
use serde_json::json;

use journal_core::{normalize_records, JournalEntry, Trade, User};

use crate::client::{path_id, Auth, JournalApi};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    JournalsEnvelope, MessageResponse, TradesEnvelope, UserEnvelope, UserUpdate, UsersEnvelope,
};

/// `userIds=a,b` 파라미터. 비어 있으면 전체 사용자.
fn user_ids_param(user_ids: &[String]) -> Vec<(&'static str, String)> {
    let ids: Vec<&str> = user_ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .collect();
    if ids.is_empty() {
        Vec::new()
    } else {
        vec![("userIds", ids.join(","))]
    }
}

impl JournalApi {
    /// `GET /admin/users`
    pub async fn admin_users(&self) -> ApiResult<Vec<User>> {
        let envelope: UsersEnvelope = self.get("/admin/users", Auth::Bearer).await?;
        Ok(envelope.users)
    }

    /// `GET /admin/users/{id}`
    pub async fn admin_user(&self, id: &str) -> ApiResult<User> {
        let path = format!("/admin/users/{}", path_id(id)?);
        let envelope: UserEnvelope = self.get(&path, Auth::Bearer).await?;
        Ok(envelope.user)
    }

    /// `PUT /admin/users/{id}`
    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> ApiResult<MessageResponse> {
        if update.is_empty() {
            return Err(ApiError::InvalidInput(
                "변경할 항목이 없습니다".to_string(),
            ));
        }
        let path = format!("/admin/users/{}", path_id(id)?);
        self.send_json(Method::PUT, &path, update, Auth::Bearer)
            .await
    }

    /// `PUT /admin/users/{id}/password`
    pub async fn update_user_password(
        &self,
        id: &str,
        new_password: &str,
    ) -> ApiResult<MessageResponse> {
        if new_password.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "새 비밀번호가 비어 있습니다".to_string(),
            ));
        }
        let path = format!("/admin/users/{}/password", path_id(id)?);
        let body = json!({ "newPassword": new_password });
        self.send_json(Method::PUT, &path, &body, Auth::Bearer)
            .await
    }

    /// `GET /admin/trades[?userIds=a,b]`
    pub async fn admin_trades(&self, user_ids: &[String]) -> ApiResult<Vec<Trade>> {
        let params = user_ids_param(user_ids);
        let envelope: TradesEnvelope = self
            .get_with_query("/admin/trades", &params, Auth::Bearer)
            .await?;
        Ok(normalize_records(envelope.trades, &self.timezone()))
    }

    /// `GET /admin/journals[?userIds=a,b]`
    pub async fn admin_journals(&self, user_ids: &[String]) -> ApiResult<Vec<JournalEntry>> {
        let params = user_ids_param(user_ids);
        let envelope: JournalsEnvelope = self
            .get_with_query("/admin/journals", &params, Auth::Bearer)
            .await?;
        Ok(envelope.journals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ids_param() {
        assert!(user_ids_param(&[]).is_empty());
        assert!(user_ids_param(&[" ".to_string()]).is_empty());
        assert_eq!(
            user_ids_param(&["1".to_string(), " 7 ".to_string()]),
            vec![("userIds", "1,7".to_string())]
        );
    }
}
