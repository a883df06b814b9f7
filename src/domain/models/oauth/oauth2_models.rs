//! # OAuth 2.0 프로바이더 응답 모델
//!
//! Google/Facebook OAuth 2.0 플로우에서 반환되는 토큰과 사용자 프로필을
//! 역직렬화하기 위한 데이터 모델을 정의합니다.
//!
//! ## API 엔드포인트
//!
//! | 프로바이더 | 토큰 교환 | 프로필 조회 |
//! |-----------|-----------|-------------|
//! | Google | `oauth2.googleapis.com/token` | `www.googleapis.com/oauth2/v2/userinfo` |
//! | Facebook | `graph.facebook.com/v18.0/oauth/access_token` | `graph.facebook.com/me` |
//!
//! 두 프로바이더 모두 토큰 응답은 같은 필드 구성을 사용하므로
//! [`OAuth2TokenResponse`] 하나로 공유합니다. 프로필 응답은
//! 인증에 필요한 최소 필드(외부 ID)만 필수로 두고 나머지는
//! 프로바이더/스코프에 따라 생략될 수 있어 Option으로 둡니다.

use serde::Deserialize;

/// OAuth 2.0 토큰 교환 응답
///
/// Authorization Code를 교환했을 때 프로바이더가 반환하는 JSON 응답입니다.
/// 이 서비스는 프로필 조회에 `access_token`만 사용하고,
/// refresh token이나 id_token은 보관하지 않습니다.
#[derive(Debug, Deserialize)]
pub struct OAuth2TokenResponse {
    /// 프로필 API 호출에 사용할 액세스 토큰
    pub access_token: String,
    /// 토큰 타입 (일반적으로 "Bearer")
    #[serde(default)]
    pub token_type: Option<String>,
    /// 액세스 토큰 만료 시간 (초)
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Google 사용자 프로필 응답
///
/// `profile` 스코프만 요청하므로 이메일 필드는 내려오지 않을 수 있습니다.
/// 인증에는 `id`만 사용됩니다.
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 사용자 고유 ID
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Facebook 사용자 프로필 응답 (`graph.facebook.com/me`)
#[derive(Debug, Deserialize)]
pub struct FacebookUserInfo {
    /// Facebook 사용자 고유 ID
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_deserialization() {
        let json = r#"{
            "access_token": "ya29.a0AfH6SMC",
            "expires_in": 3599,
            "scope": "profile",
            "token_type": "Bearer"
        }"#;

        let token: OAuth2TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "ya29.a0AfH6SMC");
        assert_eq!(token.token_type.as_deref(), Some("Bearer"));
        assert_eq!(token.expires_in, Some(3599));
    }

    #[test]
    fn test_token_response_minimal_fields() {
        // Facebook은 token_type을 생략하는 경우가 있다
        let json = r#"{"access_token": "EAAC"}"#;
        let token: OAuth2TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "EAAC");
        assert!(token.token_type.is_none());
    }

    #[test]
    fn test_google_userinfo_without_email_scope() {
        let json = r#"{"id": "1234567890", "name": "Alice", "picture": "https://example.com/p.jpg"}"#;
        let info: GoogleUserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.id, "1234567890");
        assert_eq!(info.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_facebook_userinfo_deserialization() {
        let json = r#"{"id": "10158", "name": "Bob"}"#;
        let info: FacebookUserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.id, "10158");
    }
}
