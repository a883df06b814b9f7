//! # Authentication Configuration Module
//!
//! OAuth 프로바이더와 인증 관련 설정을 관리하는 모듈입니다.
//! Spring Security의 `spring.security.oauth2.client.registration.*` 설정과
//! 유사한 역할을 수행하며, 세 가지 소셜 로그인 프로바이더를 지원합니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 사용자명/패스워드 기반 전통적인 인증
//! 2. **Google OAuth 2.0**: Google 계정을 통한 소셜 로그인
//! 3. **Facebook OAuth 2.0**: Facebook 계정을 통한 소셜 로그인
//! 4. **Twitter OAuth 1.0a**: Request Token 교환 기반 소셜 로그인
//!
//! ## 필수 환경 변수 설정
//!
//! ### Google OAuth 설정
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:3000/auth/google/secrets"
//! ```
//!
//! ### Facebook OAuth 설정
//! ```bash
//! export FACEBOOK_APP_ID="your-facebook-app-id"
//! export FACEBOOK_APP_SECRET="your-facebook-app-secret"
//! export FACEBOOK_REDIRECT_URI="http://localhost:3000/auth/facebook/secrets"
//! ```
//!
//! ### Twitter OAuth 설정
//! ```bash
//! export TWITTER_CONSUMER_KEY="your-consumer-key"
//! export TWITTER_CONSUMER_SECRET="your-consumer-secret"
//! export TWITTER_CALLBACK_URI="http://127.0.0.1:3000/auth/twitter/callback"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{AuthProvider, GoogleOAuthConfig};
//!
//! let client_id = GoogleOAuthConfig::client_id();
//! let provider = AuthProvider::from_str("google")?;
//! assert_eq!(provider.link_field(), Some("google_id"));
//! ```

use std::env;

/// Google OAuth 2.0 설정을 관리하는 구조체
///
/// Google Cloud Console 에서 생성한 OAuth 2.0 클라이언트 정보를 관리합니다.
///
/// ## Google Cloud Console 설정 가이드
///
/// 1. [Google Cloud Console](https://console.cloud.google.com/) 접속
/// 2. 프로젝트 생성 또는 선택
/// 3. APIs & Services > Credentials로 이동
/// 4. OAuth 2.0 Client IDs 생성
/// 5. 승인된 리디렉션 URI 추가: `http://localhost:3000/auth/google/secrets`
///
/// ## 보안 고려사항
///
/// - `client_secret`은 절대 클라이언트 사이드에 노출되어서는 안 됩니다
/// - 프로덕션에서는 HTTPS redirect URI만 사용하세요
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    /// Google OAuth Client ID를 반환합니다.
    ///
    /// # Panics
    ///
    /// `GOOGLE_CLIENT_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_id() -> String {
        env::var("GOOGLE_CLIENT_ID")
            .expect("GOOGLE_CLIENT_ID must be set")
    }

    /// Google OAuth Client Secret을 반환합니다.
    ///
    /// 서버 사이드에서만 사용되며, 토큰 교환 시 사용됩니다.
    /// 이 값을 로그에 출력하지 마세요.
    ///
    /// # Panics
    ///
    /// `GOOGLE_CLIENT_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_secret() -> String {
        env::var("GOOGLE_CLIENT_SECRET")
            .expect("GOOGLE_CLIENT_SECRET must be set")
    }

    /// OAuth 인증 완료 후 리디렉션될 URI를 반환합니다.
    ///
    /// 이 URI는 Google Cloud Console의 승인된 리디렉션 URI 목록에
    /// 등록되어 있어야 합니다.
    ///
    /// # URI 형식
    ///
    /// - 개발: `http://localhost:3000/auth/google/secrets`
    /// - 프로덕션: `https://yourdomain.com/auth/google/secrets`
    ///
    /// # Panics
    ///
    /// `GOOGLE_REDIRECT_URI` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn redirect_uri() -> String {
        env::var("GOOGLE_REDIRECT_URI")
            .expect("GOOGLE_REDIRECT_URI must be set")
    }

    /// Google OAuth 인증 서버의 인증 엔드포인트 URI를 반환합니다.
    ///
    /// 사용자를 Google 로그인 페이지로 리디렉션할 때 사용되는 URL 입니다.
    /// 일반적으로 변경할 필요가 없으므로 기본값을 제공합니다.
    ///
    /// # 기본값
    ///
    /// `https://accounts.google.com/o/oauth2/auth`
    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/auth".to_string())
    }

    /// Google OAuth 토큰 교환 엔드포인트 URI를 반환합니다.
    ///
    /// # 기본값
    ///
    /// `https://oauth2.googleapis.com/token`
    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    /// Google 사용자 프로필 조회 엔드포인트 URI를 반환합니다.
    ///
    /// # 기본값
    ///
    /// `https://www.googleapis.com/oauth2/v2/userinfo`
    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string())
    }
}

/// Facebook OAuth 2.0 설정을 관리하는 구조체
///
/// Meta for Developers 에서 생성한 앱의 OAuth 정보를 관리합니다.
/// Google과 동일한 Authorization Code Grant 플로우를 사용하지만
/// 엔드포인트와 명칭(App ID/App Secret)이 다릅니다.
pub struct FacebookOAuthConfig;

impl FacebookOAuthConfig {
    /// Facebook App ID를 반환합니다.
    ///
    /// # Panics
    ///
    /// `FACEBOOK_APP_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn app_id() -> String {
        env::var("FACEBOOK_APP_ID")
            .expect("FACEBOOK_APP_ID must be set")
    }

    /// Facebook App Secret을 반환합니다.
    ///
    /// # Panics
    ///
    /// `FACEBOOK_APP_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn app_secret() -> String {
        env::var("FACEBOOK_APP_SECRET")
            .expect("FACEBOOK_APP_SECRET must be set")
    }

    /// OAuth 인증 완료 후 리디렉션될 URI를 반환합니다.
    ///
    /// # Panics
    ///
    /// `FACEBOOK_REDIRECT_URI` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn redirect_uri() -> String {
        env::var("FACEBOOK_REDIRECT_URI")
            .expect("FACEBOOK_REDIRECT_URI must be set")
    }

    /// Facebook 로그인 다이얼로그 엔드포인트 URI를 반환합니다.
    ///
    /// # 기본값
    ///
    /// `https://www.facebook.com/v18.0/dialog/oauth`
    pub fn auth_uri() -> String {
        env::var("FACEBOOK_AUTH_URI")
            .unwrap_or_else(|_| "https://www.facebook.com/v18.0/dialog/oauth".to_string())
    }

    /// Facebook 토큰 교환 엔드포인트 URI를 반환합니다.
    ///
    /// # 기본값
    ///
    /// `https://graph.facebook.com/v18.0/oauth/access_token`
    pub fn token_uri() -> String {
        env::var("FACEBOOK_TOKEN_URI")
            .unwrap_or_else(|_| "https://graph.facebook.com/v18.0/oauth/access_token".to_string())
    }

    /// Graph API 프로필 조회 엔드포인트 URI를 반환합니다.
    ///
    /// # 기본값
    ///
    /// `https://graph.facebook.com/me`
    pub fn userinfo_uri() -> String {
        env::var("FACEBOOK_USERINFO_URI")
            .unwrap_or_else(|_| "https://graph.facebook.com/me".to_string())
    }
}

/// Twitter OAuth 1.0a 설정을 관리하는 구조체
///
/// Twitter Developer Portal 에서 발급받은 Consumer Key/Secret을 관리합니다.
/// OAuth 2.0과 달리 모든 요청에 HMAC-SHA1 서명이 필요하며,
/// Request Token → 사용자 승인 → Access Token의 3단계 플로우를 따릅니다.
pub struct TwitterOAuthConfig;

impl TwitterOAuthConfig {
    /// Twitter Consumer Key (API Key)를 반환합니다.
    ///
    /// # Panics
    ///
    /// `TWITTER_CONSUMER_KEY` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn consumer_key() -> String {
        env::var("TWITTER_CONSUMER_KEY")
            .expect("TWITTER_CONSUMER_KEY must be set")
    }

    /// Twitter Consumer Secret (API Secret)을 반환합니다.
    ///
    /// 요청 서명 키의 절반을 구성하는 민감 정보입니다.
    ///
    /// # Panics
    ///
    /// `TWITTER_CONSUMER_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn consumer_secret() -> String {
        env::var("TWITTER_CONSUMER_SECRET")
            .expect("TWITTER_CONSUMER_SECRET must be set")
    }

    /// OAuth 인증 완료 후 리디렉션될 콜백 URI를 반환합니다.
    ///
    /// # Panics
    ///
    /// `TWITTER_CALLBACK_URI` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn callback_uri() -> String {
        env::var("TWITTER_CALLBACK_URI")
            .expect("TWITTER_CALLBACK_URI must be set")
    }

    /// Request Token 발급 엔드포인트 URI를 반환합니다.
    ///
    /// # 기본값
    ///
    /// `https://api.twitter.com/oauth/request_token`
    pub fn request_token_uri() -> String {
        env::var("TWITTER_REQUEST_TOKEN_URI")
            .unwrap_or_else(|_| "https://api.twitter.com/oauth/request_token".to_string())
    }

    /// 사용자 승인 페이지 엔드포인트 URI를 반환합니다.
    ///
    /// # 기본값
    ///
    /// `https://api.twitter.com/oauth/authenticate`
    pub fn authenticate_uri() -> String {
        env::var("TWITTER_AUTHENTICATE_URI")
            .unwrap_or_else(|_| "https://api.twitter.com/oauth/authenticate".to_string())
    }

    /// Access Token 교환 엔드포인트 URI를 반환합니다.
    ///
    /// # 기본값
    ///
    /// `https://api.twitter.com/oauth/access_token`
    pub fn access_token_uri() -> String {
        env::var("TWITTER_ACCESS_TOKEN_URI")
            .unwrap_or_else(|_| "https://api.twitter.com/oauth/access_token".to_string())
    }
}

/// OAuth 일반 설정을 관리하는 구조체
///
/// 모든 OAuth 프로바이더에 공통으로 적용되는 보안 설정을 관리합니다.
/// state 매개변수와 Request Token은 Redis에 일회용으로 저장되며,
/// 이 구조체는 해당 항목들의 수명을 결정합니다.
pub struct OAuthConfig;

impl OAuthConfig {
    /// OAuth 핸드셰이크 중간 상태의 유효 기간을 초 단위로 반환합니다.
    ///
    /// OAuth2 state 값과 OAuth1 Request Token secret이 Redis에
    /// 보관되는 최대 시간입니다. 이 시간이 지나면 콜백은 인증 실패로
    /// 처리됩니다.
    ///
    /// # 기본값
    ///
    /// 600초 (10분)
    ///
    /// # Environment Variables
    ///
    /// - `OAUTH_STATE_TTL_SECONDS`: 커스텀 TTL 설정
    pub fn state_ttl_seconds() -> u64 {
        env::var("OAUTH_STATE_TTL_SECONDS")
            .unwrap_or_else(|_| "600".to_string())
            .parse()
            .unwrap_or(600)
    }
}

/// 지원하는 인증 공급자를 나타내는 열거형
///
/// 다양한 인증 방식을 추상화하여 통일된 인터페이스를 제공합니다.
/// 인증 성공 이후의 코드는 어떤 프로바이더를 거쳤는지 구분하지 않습니다.
///
/// ## 직렬화 지원
///
/// `serde`를 통해 JSON 직렬화/역직렬화를 지원하므로,
/// Redis 임시 상태 저장에 사용할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AuthProvider {
    /// 로컬 사용자명/패스워드 인증
    ///
    /// bcrypt를 사용한 패스워드 해싱을 지원합니다.
    Local,

    /// Google OAuth 2.0 인증
    Google,

    /// Facebook OAuth 2.0 인증
    Facebook,

    /// Twitter OAuth 1.0a 인증
    ///
    /// Request Token 교환과 HMAC-SHA1 요청 서명이 필요합니다.
    Twitter,
}

impl AuthProvider {
    /// 문자열에서 AuthProvider를 생성합니다.
    ///
    /// # 인자
    ///
    /// * `s` - 인증 프로바이더 이름 (대소문자 무관)
    ///
    /// # 반환값
    ///
    /// * `Ok(AuthProvider)` - 유효한 프로바이더인 경우
    /// * `Err(String)` - 지원하지 않는 프로바이더인 경우
    ///
    /// # 지원되는 값
    ///
    /// - `"local"` → `AuthProvider::Local`
    /// - `"google"` → `AuthProvider::Google`
    /// - `"facebook"` → `AuthProvider::Facebook`
    /// - `"twitter"` → `AuthProvider::Twitter`
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            "facebook" => Ok(AuthProvider::Facebook),
            "twitter" => Ok(AuthProvider::Twitter),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    /// AuthProvider를 문자열로 변환합니다.
    ///
    /// # 반환값
    ///
    /// 해당 프로바이더의 소문자 문자열 표현
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
            AuthProvider::Facebook => "facebook",
            AuthProvider::Twitter => "twitter",
        }
    }

    /// 사용자 문서에서 해당 프로바이더의 외부 ID가 저장되는 필드명을 반환합니다.
    ///
    /// find-or-create 조회/업서트 필터를 구성할 때 사용됩니다.
    /// 로컬 인증은 외부 ID가 없으므로 `None`을 반환합니다.
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// assert_eq!(AuthProvider::Google.link_field(), Some("google_id"));
    /// assert_eq!(AuthProvider::Local.link_field(), None);
    /// ```
    pub fn link_field(&self) -> Option<&'static str> {
        match self {
            AuthProvider::Local => None,
            AuthProvider::Google => Some("google_id"),
            AuthProvider::Facebook => Some("facebook_id"),
            AuthProvider::Twitter => Some("twitter_id"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(AuthProvider::from_str("local").unwrap(), AuthProvider::Local);
        assert_eq!(AuthProvider::from_str("google").unwrap(), AuthProvider::Google);
        assert_eq!(
            AuthProvider::from_str("facebook").unwrap(),
            AuthProvider::Facebook
        );
        assert_eq!(
            AuthProvider::from_str("twitter").unwrap(),
            AuthProvider::Twitter
        );

        // 대소문자 무관 테스트
        assert_eq!(AuthProvider::from_str("GOOGLE").unwrap(), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("Twitter").unwrap(), AuthProvider::Twitter);

        // 지원하지 않는 프로바이더 테스트
        assert!(AuthProvider::from_str("github").is_err());
        assert!(AuthProvider::from_str("unknown").is_err());
    }

    #[test]
    fn test_auth_provider_as_string() {
        assert_eq!(AuthProvider::Local.as_str(), "local");
        assert_eq!(AuthProvider::Google.as_str(), "google");
        assert_eq!(AuthProvider::Facebook.as_str(), "facebook");
        assert_eq!(AuthProvider::Twitter.as_str(), "twitter");
    }

    #[test]
    fn test_auth_provider_roundtrip() {
        // 문자열 → AuthProvider → 문자열 변환 테스트
        let providers = ["local", "google", "facebook", "twitter"];

        for &provider_str in &providers {
            let provider = AuthProvider::from_str(provider_str).unwrap();
            assert_eq!(provider.as_str(), provider_str);
        }
    }

    #[test]
    fn test_link_field_mapping() {
        assert_eq!(AuthProvider::Local.link_field(), None);
        assert_eq!(AuthProvider::Google.link_field(), Some("google_id"));
        assert_eq!(AuthProvider::Facebook.link_field(), Some("facebook_id"));
        assert_eq!(AuthProvider::Twitter.link_field(), Some("twitter_id"));
    }

    #[test]
    fn test_auth_provider_serialization() {
        // JSON 직렬화/역직렬화 테스트
        let provider = AuthProvider::Twitter;
        let json = serde_json::to_string(&provider).unwrap();
        let deserialized: AuthProvider = serde_json::from_str(&json).unwrap();
        assert_eq!(provider, deserialized);
    }
}
