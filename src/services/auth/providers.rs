//! # OAuth 2.0 프로바이더 전략 구현
//!
//! [`OAuth2Provider`](super::oauth2_service::OAuth2Provider) trait의
//! Google/Facebook 구현체입니다. 엔드포인트와 프로필 응답 형태만
//! 프로바이더마다 다르고 플로우는 공유됩니다.
//!
//! | 항목 | Google | Facebook |
//! |------|--------|----------|
//! | 스코프 | `profile` | `public_profile` |
//! | 프로필 조회 | Bearer 헤더 | `access_token` 쿼리 파라미터 |
//! | 외부 ID 필드 | `id` | `id` |

use async_trait::async_trait;
use crate::{
    config::{AuthProvider, FacebookOAuthConfig, GoogleOAuthConfig},
    domain::models::oauth::oauth2_models::{FacebookUserInfo, GoogleUserInfo},
};
use crate::errors::errors::AppError;
use super::oauth2_service::OAuth2Provider;

/// Google OAuth 2.0 프로바이더 전략
pub struct GoogleProvider;

#[async_trait]
impl OAuth2Provider for GoogleProvider {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Google
    }

    fn client_id(&self) -> String {
        GoogleOAuthConfig::client_id()
    }

    fn client_secret(&self) -> String {
        GoogleOAuthConfig::client_secret()
    }

    fn redirect_uri(&self) -> String {
        GoogleOAuthConfig::redirect_uri()
    }

    fn auth_uri(&self) -> String {
        GoogleOAuthConfig::auth_uri()
    }

    fn token_uri(&self) -> String {
        GoogleOAuthConfig::token_uri()
    }

    fn scope(&self) -> &'static str {
        "profile"
    }

    /// UserInfo API로 Google 사용자 ID를 조회합니다
    ///
    /// ```text
    /// GET https://www.googleapis.com/oauth2/v2/userinfo
    /// Authorization: Bearer ACCESS_TOKEN
    /// ```
    async fn fetch_external_id(
        &self,
        http: &reqwest::Client,
        access_token: &str,
    ) -> Result<String, AppError> {
        let response = http
            .get(GoogleOAuthConfig::userinfo_uri())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 프로필 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 프로필 조회 실패: {}",
                error_text
            )));
        }

        let profile = response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 프로필 파싱 실패: {}", e)))?;

        Ok(profile.id)
    }
}

/// Facebook OAuth 2.0 프로바이더 전략
pub struct FacebookProvider;

#[async_trait]
impl OAuth2Provider for FacebookProvider {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Facebook
    }

    fn client_id(&self) -> String {
        FacebookOAuthConfig::app_id()
    }

    fn client_secret(&self) -> String {
        FacebookOAuthConfig::app_secret()
    }

    fn redirect_uri(&self) -> String {
        FacebookOAuthConfig::redirect_uri()
    }

    fn auth_uri(&self) -> String {
        FacebookOAuthConfig::auth_uri()
    }

    fn token_uri(&self) -> String {
        FacebookOAuthConfig::token_uri()
    }

    fn scope(&self) -> &'static str {
        "public_profile"
    }

    /// Graph API로 Facebook 사용자 ID를 조회합니다
    ///
    /// ```text
    /// GET https://graph.facebook.com/me?fields=id,name&access_token=ACCESS_TOKEN
    /// ```
    async fn fetch_external_id(
        &self,
        http: &reqwest::Client,
        access_token: &str,
    ) -> Result<String, AppError> {
        let response = http
            .get(FacebookOAuthConfig::userinfo_uri())
            .query(&[("fields", "id,name"), ("access_token", access_token)])
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Facebook 프로필 요청 실패: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Facebook 프로필 조회 실패: {}",
                error_text
            )));
        }

        let profile = response
            .json::<FacebookUserInfo>()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Facebook 프로필 파싱 실패: {}", e))
            })?;

        Ok(profile.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_identities() {
        assert_eq!(GoogleProvider.provider(), AuthProvider::Google);
        assert_eq!(FacebookProvider.provider(), AuthProvider::Facebook);
    }

    #[test]
    fn test_scopes() {
        assert_eq!(GoogleProvider.scope(), "profile");
        assert_eq!(FacebookProvider.scope(), "public_profile");
    }
}
