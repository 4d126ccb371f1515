//! 거래 내역 이미지 추출 엔드포인트.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;

use crate::client::JournalApi;
use crate::error::{ApiError, ApiResult};
use crate::extract::ExtractedTrade;

const IMAGE_DETAILS_PATH: &str = "/imgdetails/";

#[derive(Debug, Deserialize)]
struct ExtractionEnvelope {
    #[serde(default)]
    trades: Vec<ExtractedTrade>,
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

impl JournalApi {
    /// `POST {image_url}/imgdetails/` (multipart 필드 `image`)
    ///
    /// 추출 결과는 검증 전 후보 목록입니다. [`crate::extract::validate_extracted`]로
    /// 저장 가능한 거래를 골라야 합니다.
    pub async fn extract_trades(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<Vec<ExtractedTrade>> {
        if image.is_empty() {
            return Err(ApiError::InvalidInput("이미지가 비어 있습니다".to_string()));
        }

        let part = Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))?;
        let form = Form::new().part("image", part);

        let url = self.image_endpoint(IMAGE_DETAILS_PATH);
        let request = self.raw_request(Method::POST, &url).multipart(form);
        let envelope: ExtractionEnvelope = self.execute(request, IMAGE_DETAILS_PATH).await?;
        Ok(envelope.trades)
    }

    /// 파일을 읽어 이미지 추출을 요청합니다.
    pub async fn extract_trades_from_file(
        &self,
        path: impl AsRef<Path>,
    ) -> ApiResult<Vec<ExtractedTrade>> {
        let path = path.as_ref();
        let image = tokio::fs::read(path).await.map_err(|e| {
            ApiError::InvalidInput(format!("이미지 파일을 읽을 수 없습니다 ({}): {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");
        self.extract_trades(image, file_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("shot.PNG"), "image/png");
        assert_eq!(mime_for("a.b.jpeg"), "image/jpeg");
        assert_eq!(mime_for("noext"), "application/octet-stream");
    }
}
