//! 점검 일정 엔드포인트.

use reqwest::Method;

use journal_core::{MaintenanceWindow, NewMaintenance};

use crate::client::{Auth, JournalApi};
use crate::error::{ApiError, ApiResult};
use crate::models::{MaintenanceEnvelope, MessageResponse};

impl JournalApi {
    /// `GET /maintenance/upcoming`
    ///
    /// 인증 없이 호출합니다. `success`가 거짓이면 빈 목록입니다.
    pub async fn upcoming_maintenance(&self) -> ApiResult<Vec<MaintenanceWindow>> {
        let envelope: MaintenanceEnvelope =
            self.get("/maintenance/upcoming", Auth::Public).await?;
        if !envelope.success {
            return Ok(Vec::new());
        }
        Ok(envelope.maintenance)
    }

    /// `POST /admin/maintenance`
    pub async fn schedule_maintenance(
        &self,
        maintenance: &NewMaintenance,
    ) -> ApiResult<MessageResponse> {
        if maintenance.to_time <= maintenance.from_time {
            return Err(ApiError::InvalidInput(format!(
                "종료 시각({})이 시작 시각({})보다 늦어야 합니다",
                maintenance.to_time.format("%H:%M"),
                maintenance.from_time.format("%H:%M")
            )));
        }
        if maintenance.message.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "점검 안내 메시지가 비어 있습니다".to_string(),
            ));
        }

        self.send_json(Method::POST, "/admin/maintenance", maintenance, Auth::Bearer)
            .await
    }
}
