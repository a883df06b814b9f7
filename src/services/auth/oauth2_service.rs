//! # OAuth 2.0 로그인 서비스
//!
//! Google/Facebook OAuth 2.0 프로토콜을 통한 소셜 로그인 기능을 제공합니다.
//! RFC 6749 OAuth 2.0 Authorization Code Grant를 준수하며,
//! Spring Security OAuth2 Client와 유사한 인증 플로우를 구현합니다.
//!
//! ## OAuth 2.0 Authorization Code Flow
//!
//! ```text
//! ┌──────────┐                     ┌──────────────┐                  ┌──────────────┐
//! │ 브라우저   │                     │   우리 서버    │                  │  프로바이더    │
//! └──────────┘                     └──────────────┘                  └──────────────┘
//!      │                                  │                                │
//!      │ 1. GET /auth/{provider}          │                                │
//!      ├─────────────────────────────────►│                                │
//!      │                                  │ 2. state 발급 + Redis 저장      │
//!      │ 3. 302 → 프로바이더 동의 화면       │                                │
//!      │◄─────────────────────────────────┤                                │
//!      │                                  │                                │
//!      │ 4. 사용자 로그인/동의                │                                │
//!      ├──────────────────────────────────────────────────────────────────►│
//!      │ 5. 302 → 콜백 (code, state)       │                                │
//!      │◄──────────────────────────────────────────────────────────────────┤
//!      │ 6. GET 콜백?code=..&state=..      │                                │
//!      ├─────────────────────────────────►│                                │
//!      │                                  │ 7. state 일회용 검증 (GETDEL)    │
//!      │                                  │ 8. code → access token 교환     │
//!      │                                  ├───────────────────────────────►│
//!      │                                  │◄───────────────────────────────┤
//!      │                                  │ 9. 프로필 조회 (외부 ID 획득)      │
//!      │                                  ├───────────────────────────────►│
//!      │                                  │◄───────────────────────────────┤
//!      │                                  │ 10. find-or-create + 세션 발급   │
//!      │ 11. 302 → /secrets               │                                │
//!      │◄─────────────────────────────────┤                                │
//! ```
//!
//! ## CSRF 방지 (State Parameter)
//!
//! state 값은 핸드셰이크 시작 시 무작위로 생성되어 Redis에
//! 10분 TTL로 저장되고, 콜백에서 `GETDEL`로 정확히 한 번만
//! 소비됩니다. 저장된 적 없는 state, 만료된 state, 이미 사용된
//! state는 모두 인증 실패로 처리됩니다.
//!
//! ## 프로바이더 추상화
//!
//! 두 OAuth 2.0 프로바이더는 엔드포인트와 프로필 응답 형태만 다르고
//! 플로우가 같으므로, [`OAuth2Provider`] trait 뒤에서 하나의
//! 드라이버([`OAuth2LoginService`])를 공유합니다.

use std::sync::Arc;
use async_trait::async_trait;
use uuid::Uuid;
use crate::{
    caching::redis::RedisClient,
    config::{AuthProvider, OAuthConfig},
    domain::entities::users::user::User,
    domain::models::oauth::oauth2_models::OAuth2TokenResponse,
    repositories::users::user_repo::UserRepository,
};
use crate::errors::errors::AppError;

/// OAuth 2.0 프로바이더 전략 인터페이스
///
/// 프로바이더별로 다른 것(엔드포인트, 자격증명, 스코프, 프로필 조회)만을
/// 정의합니다. 플로우 자체는 [`OAuth2LoginService`]가 담당합니다.
#[async_trait]
pub trait OAuth2Provider: Send + Sync {
    /// 이 전략이 담당하는 프로바이더
    fn provider(&self) -> AuthProvider;

    /// OAuth 클라이언트 ID
    fn client_id(&self) -> String;

    /// OAuth 클라이언트 secret
    fn client_secret(&self) -> String;

    /// 등록된 콜백 URI
    fn redirect_uri(&self) -> String;

    /// 사용자 동의 화면 엔드포인트
    fn auth_uri(&self) -> String;

    /// 토큰 교환 엔드포인트
    fn token_uri(&self) -> String;

    /// 요청할 스코프
    fn scope(&self) -> &'static str;

    /// 액세스 토큰으로 프로바이더 프로필을 조회하여 외부 ID를 반환합니다
    ///
    /// # 인자
    ///
    /// * `http` - 공유 HTTP 클라이언트
    /// * `access_token` - 토큰 교환으로 획득한 액세스 토큰
    ///
    /// # 반환값
    ///
    /// * `Ok(String)` - 프로바이더가 발급한 사용자 외부 ID
    /// * `Err(AppError::ExternalServiceError)` - 프로필 API 통신/파싱 오류
    async fn fetch_external_id(
        &self,
        http: &reqwest::Client,
        access_token: &str,
    ) -> Result<String, AppError>;
}

/// 동의 화면으로 보낼 authorization URL을 구성합니다
///
/// # 인자
///
/// * `auth_uri` - 프로바이더의 인증 엔드포인트
/// * `params` - 쿼리 파라미터 (값은 percent-encoding 됨)
pub fn build_authorize_url(auth_uri: &str, params: &[(&str, String)]) -> String {
    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", auth_uri, query_string)
}

/// OAuth 2.0 로그인 드라이버
///
/// 하나의 프로바이더 전략을 감싸 핸드셰이크 시작과 콜백 완료를
/// 처리합니다. Google과 Facebook 각각에 대해 한 인스턴스씩
/// 조립 루트에서 구성됩니다.
///
/// ## 주요 책임
///
/// 1. **핸드셰이크 시작**: state 발급/저장 후 동의 화면 URL 생성
/// 2. **콜백 완료**: state 검증, 토큰 교환, 프로필 조회, find-or-create
///
/// ## 에러 의미
///
/// - `AuthenticationError`: 사용자 거부, state 불일치 등 — 핸들러가
///   `/login` 리다이렉트로 처리
/// - `ExternalServiceError` / `DatabaseError` / `RedisError`: 시스템
///   장애 — 일반 500 응답으로 처리
pub struct OAuth2LoginService {
    /// 프로바이더 전략
    provider: Box<dyn OAuth2Provider>,
    /// find-or-create를 수행할 사용자 리포지토리
    user_repo: Arc<UserRepository>,
    /// 일회용 state 저장소
    redis: Arc<RedisClient>,
    /// 공유 HTTP 클라이언트
    http: reqwest::Client,
}

impl OAuth2LoginService {
    /// 새 드라이버 인스턴스를 생성합니다.
    pub fn new(
        provider: Box<dyn OAuth2Provider>,
        user_repo: Arc<UserRepository>,
        redis: Arc<RedisClient>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            provider,
            user_repo,
            redis,
            http,
        }
    }

    /// state 값에 대한 Redis 키를 구성합니다
    fn state_key(state: &str) -> String {
        format!("oauth:state:{}", state)
    }

    /// 이 드라이버가 담당하는 프로바이더 이름
    pub fn provider_name(&self) -> &'static str {
        self.provider.provider().as_str()
    }

    /// 핸드셰이크를 시작합니다
    ///
    /// 무작위 state를 발급하여 Redis에 저장하고,
    /// 사용자를 보낼 동의 화면 URL을 반환합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(String)` - 302 리다이렉트에 사용할 authorization URL
    /// * `Err(AppError::RedisError)` - state 저장 실패
    pub async fn begin(&self) -> Result<String, AppError> {
        let state = Uuid::new_v4().simple().to_string();

        self.redis
            .set_with_expiry(
                &Self::state_key(&state),
                &self.provider_name().to_string(),
                OAuthConfig::state_ttl_seconds(),
            )
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        Ok(build_authorize_url(
            &self.provider.auth_uri(),
            &[
                ("client_id", self.provider.client_id()),
                ("redirect_uri", self.provider.redirect_uri()),
                ("scope", self.provider.scope().to_string()),
                ("response_type", "code".to_string()),
                ("state", state),
            ],
        ))
    }

    /// 콜백을 완료하고 인증된 사용자를 반환합니다
    ///
    /// # 인자
    ///
    /// * `code` - 프로바이더가 발급한 Authorization Code
    /// * `state` - 핸드셰이크 시작 시 발급한 state
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - find-or-create로 확보한 사용자
    /// * `Err(AppError::AuthenticationError)` - state 검증 실패
    /// * `Err(AppError::ExternalServiceError)` - 프로바이더 통신 오류
    /// * `Err(AppError::DatabaseError)` - 사용자 저장소 오류
    ///
    /// # 처리 단계
    ///
    /// 1. **State 일회용 검증**: Redis에서 GETDEL로 소비
    /// 2. **토큰 교환**: Authorization Code → Access Token
    /// 3. **프로필 조회**: 외부 ID 획득
    /// 4. **계정 확보**: find-or-create
    pub async fn complete(&self, code: &str, state: &str) -> Result<User, AppError> {
        // 1. State 검증
        self.consume_state(state).await?;

        // 2. Authorization code로 액세스 토큰 교환
        let token_response = self.exchange_code_for_token(code).await?;

        // 3. 액세스 토큰으로 외부 ID 조회
        let external_id = self
            .provider
            .fetch_external_id(&self.http, &token_response.access_token)
            .await?;

        // 4. find-or-create로 사용자 확보
        let user = self
            .user_repo
            .find_or_create_linked(self.provider.provider(), &external_id)
            .await?;

        log::info!("{} 로그인 성공", self.provider_name());

        Ok(user)
    }

    /// state를 일회용으로 검증합니다
    ///
    /// Redis에서 GETDEL로 꺼내므로 같은 state의 두 번째 사용은
    /// 반드시 실패합니다. 저장된 값은 state를 발급한 프로바이더
    /// 이름이어야 합니다 (프로바이더 간 state 혼용 방지).
    async fn consume_state(&self, state: &str) -> Result<(), AppError> {
        if state.is_empty() {
            return Err(AppError::AuthenticationError(
                "유효하지 않은 OAuth state".to_string(),
            ));
        }

        let stored: Option<String> = self
            .redis
            .take(&Self::state_key(state))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        match stored {
            Some(owner) if owner == self.provider_name() => Ok(()),
            Some(_) => Err(AppError::AuthenticationError(
                "다른 프로바이더의 OAuth state입니다".to_string(),
            )),
            None => Err(AppError::AuthenticationError(
                "만료되었거나 알 수 없는 OAuth state입니다".to_string(),
            )),
        }
    }

    /// Authorization Code를 Access Token으로 교환합니다
    ///
    /// # 요청 형식
    ///
    /// ```text
    /// POST {token_uri}
    /// Content-Type: application/x-www-form-urlencoded
    ///
    /// code=AUTHORIZATION_CODE&
    /// client_id=CLIENT_ID&
    /// client_secret=CLIENT_SECRET&
    /// redirect_uri=REDIRECT_URI&
    /// grant_type=authorization_code
    /// ```
    async fn exchange_code_for_token(&self, code: &str) -> Result<OAuth2TokenResponse, AppError> {
        let params = [
            ("code", code.to_string()),
            ("client_id", self.provider.client_id()),
            ("client_secret", self.provider.client_secret()),
            ("redirect_uri", self.provider.redirect_uri()),
            ("grant_type", "authorization_code".to_string()),
        ];

        let response = self
            .http
            .post(self.provider.token_uri())
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "{} 토큰 요청 실패: {}",
                    self.provider_name(),
                    e
                ))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 교환 실패: {}",
                self.provider_name(),
                error_text
            )));
        }

        response
            .json::<OAuth2TokenResponse>()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "{} 토큰 응답 파싱 실패: {}",
                    self.provider_name(),
                    e
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_key_format() {
        assert_eq!(
            OAuth2LoginService::state_key("abc123"),
            "oauth:state:abc123"
        );
    }

    #[test]
    fn test_build_authorize_url_encodes_params() {
        let url = build_authorize_url(
            "https://accounts.google.com/o/oauth2/auth",
            &[
                ("client_id", "my-client".to_string()),
                ("redirect_uri", "http://localhost:3000/auth/google/secrets".to_string()),
                ("scope", "profile".to_string()),
                ("response_type", "code".to_string()),
                ("state", "xyz".to_string()),
            ],
        );

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("client_id=my-client"));
        // redirect URI의 예약 문자는 인코딩되어야 한다
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fgoogle%2Fsecrets"
        ));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("state=xyz"));
        assert!(!url.contains(' '));
    }
}
