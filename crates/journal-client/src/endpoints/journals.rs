//! 매매 일지 엔드포인트.

use reqwest::Method;

use journal_core::JournalEntry;

use crate::client::{Auth, JournalApi};
use crate::error::{ApiError, ApiResult};
use crate::models::{JournalsEnvelope, MessageResponse};

impl JournalApi {
    /// `GET /journals`
    pub async fn journals(&self) -> ApiResult<Vec<JournalEntry>> {
        let envelope: JournalsEnvelope = self.get("/journals", Auth::Bearer).await?;
        Ok(envelope.journals)
    }

    /// `POST /journals`
    pub async fn create_journal(&self, entry: &JournalEntry) -> ApiResult<MessageResponse> {
        if entry.title.trim().is_empty() && entry.content.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "일지 제목과 내용이 모두 비어 있습니다".to_string(),
            ));
        }
        self.send_json(Method::POST, "/journals", entry, Auth::Bearer)
            .await
    }
}
