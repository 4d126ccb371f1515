//! 인증 엔드포인트.

use reqwest::Method;
use serde_json::json;
use tracing::info;

use journal_core::User;

use crate::client::{Auth, JournalApi};
use crate::error::{ApiError, ApiResult};
use crate::models::{AuthResponse, MessageResponse, SignupRequest, UserEnvelope};

fn require(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{}이(가) 비어 있습니다", field)));
    }
    Ok(())
}

impl JournalApi {
    /// `POST /auth/login`
    ///
    /// 성공해도 토큰을 자동으로 설정하지 않습니다. 호출자가 세션을 만든 뒤
    /// `set_token`을 호출해야 합니다.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        require("email", email)?;
        require("password", password)?;

        let body = json!({ "email": email.trim(), "password": password });
        let response: AuthResponse = self
            .send_json(Method::POST, "/auth/login", &body, Auth::Public)
            .await?;

        if response.token.is_none() {
            return Err(ApiError::Parse(
                "로그인 응답에 토큰이 없습니다".to_string(),
            ));
        }
        info!("Login succeeded");
        Ok(response)
    }

    /// `POST /auth/signup`
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<MessageResponse> {
        require("name", &request.name)?;
        require("email", &request.email)?;
        require("password", &request.password)?;
        self.send_json(Method::POST, "/auth/signup", request, Auth::Public)
            .await
    }

    /// `POST /auth/verify-otp`
    pub async fn verify_otp(&self, email: &str, otp: &str) -> ApiResult<AuthResponse> {
        require("email", email)?;
        require("otp", otp)?;
        let body = json!({ "email": email, "otp": otp });
        self.send_json(Method::POST, "/auth/verify-otp", &body, Auth::Public)
            .await
    }

    /// `POST /auth/resend-otp`
    pub async fn resend_otp(&self, email: &str) -> ApiResult<MessageResponse> {
        require("email", email)?;
        let body = json!({ "email": email });
        self.send_json(Method::POST, "/auth/resend-otp", &body, Auth::Public)
            .await
    }

    /// `POST /auth/forgot-password`
    pub async fn forgot_password(&self, email: &str) -> ApiResult<MessageResponse> {
        require("email", email)?;
        let body = json!({ "email": email });
        self.send_json(Method::POST, "/auth/forgot-password", &body, Auth::Public)
            .await
    }

    /// `POST /auth/reset-password`
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> ApiResult<MessageResponse> {
        require("email", email)?;
        require("otp", otp)?;
        require("newPassword", new_password)?;
        let body = json!({ "email": email, "otp": otp, "newPassword": new_password });
        self.send_json(Method::POST, "/auth/reset-password", &body, Auth::Public)
            .await
    }

    /// `GET /auth/profile`
    pub async fn profile(&self) -> ApiResult<User> {
        let envelope: UserEnvelope = self.get("/auth/profile", Auth::Bearer).await?;
        Ok(envelope.user)
    }
}
