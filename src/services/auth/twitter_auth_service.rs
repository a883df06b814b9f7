//! # Twitter OAuth 1.0a 인증 서비스
//!
//! Twitter의 OAuth 1.0a 프로토콜을 통한 소셜 로그인 기능을 제공합니다.
//! RFC 5849를 준수하며, OAuth 2.0과 달리 모든 API 요청에
//! HMAC-SHA1 서명이 필요합니다.
//!
//! ## OAuth 1.0a 3-Legged Flow
//!
//! ```text
//! ┌──────────┐                     ┌──────────────┐                  ┌──────────────┐
//! │ 브라우저   │                     │   우리 서버    │                  │   Twitter    │
//! └──────────┘                     └──────────────┘                  └──────────────┘
//!      │                                  │                                │
//!      │ 1. GET /auth/twitter             │                                │
//!      ├─────────────────────────────────►│                                │
//!      │                                  │ 2. POST oauth/request_token    │
//!      │                                  │    (서명 + oauth_callback)      │
//!      │                                  ├───────────────────────────────►│
//!      │                                  │ 3. oauth_token + secret        │
//!      │                                  │◄───────────────────────────────┤
//!      │                                  │ 4. secret → Redis (10분 TTL)   │
//!      │ 5. 302 → oauth/authenticate      │                                │
//!      │◄─────────────────────────────────┤                                │
//!      │                                  │                                │
//!      │ 6. 사용자 승인                     │                                │
//!      ├──────────────────────────────────────────────────────────────────►│
//!      │ 7. 302 → 콜백 (token, verifier)   │                                │
//!      │◄──────────────────────────────────────────────────────────────────┤
//!      │ 8. GET 콜백?oauth_token=..        │                                │
//!      ├─────────────────────────────────►│                                │
//!      │                                  │ 9. secret 일회용 소비 (GETDEL)   │
//!      │                                  │ 10. POST oauth/access_token    │
//!      │                                  │     (서명 + oauth_verifier)     │
//!      │                                  ├───────────────────────────────►│
//!      │                                  │ 11. user_id 포함 응답           │
//!      │                                  │◄───────────────────────────────┤
//!      │                                  │ 12. find-or-create + 세션 발급  │
//!      │ 13. 302 → /secrets               │                                │
//!      │◄─────────────────────────────────┤                                │
//! ```
//!
//! ## 요청 서명 (RFC 5849 §3.4)
//!
//! ```text
//! 1. 모든 매개변수를 percent-encoding 후 키 순으로 정렬
//! 2. "k=v"를 &로 연결 → parameter string
//! 3. METHOD & enc(URL) & enc(parameter string) → signature base string
//! 4. enc(consumer_secret) & enc(token_secret) → signing key
//! 5. Base64(HMAC-SHA1(key, base)) → oauth_signature
//! ```
//!
//! percent-encoding은 RFC 3986의 unreserved 문자만 남기는 엄격한
//! 규칙을 따라야 하며, 한 문자라도 다르게 인코딩하면 Twitter가
//! 401을 반환합니다.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use uuid::Uuid;

use crate::{
    caching::redis::RedisClient,
    config::{AuthProvider, OAuthConfig, TwitterOAuthConfig},
    domain::entities::users::user::User,
    domain::models::oauth::twitter_models::{TwitterAccessToken, TwitterRequestToken},
    repositories::users::user_repo::UserRepository,
};
use crate::errors::errors::AppError;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 percent-encoding (unreserved 문자 제외 전부 인코딩)
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// signature base string을 구성합니다 (RFC 5849 §3.4.1)
///
/// # 인자
///
/// * `method` - HTTP 메서드 (대문자로 정규화됨)
/// * `base_url` - 쿼리 문자열을 제외한 요청 URL
/// * `params` - 서명에 포함할 모든 매개변수 (oauth_signature 제외)
pub fn signature_base_string(method: &str, base_url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&parameter_string)
    )
}

/// 서명 키를 구성합니다 (RFC 5849 §3.4.2)
///
/// Request Token 발급 단계처럼 token secret이 아직 없는 경우
/// 빈 문자열을 전달합니다 (키는 `enc(cs)&`로 끝남).
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// HMAC-SHA1 서명을 계산하여 Base64로 반환합니다
pub fn sign_hmac_sha1(base_string: &str, key: &str) -> Result<String, AppError> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| AppError::InternalError(format!("HMAC 키 초기화 실패: {}", e)))?;
    mac.update(base_string.as_bytes());

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// OAuth Authorization 헤더 값을 구성합니다 (RFC 5849 §3.5.1)
///
/// ```text
/// OAuth oauth_consumer_key="...", oauth_nonce="...", oauth_signature="..."
/// ```
pub fn authorization_header(oauth_params: &[(&str, &str)]) -> String {
    let mut sorted: Vec<(&str, &str)> = oauth_params.to_vec();
    sorted.sort();

    let fields = sorted
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {}", fields)
}

/// Twitter OAuth 1.0a 로그인 서비스
///
/// Request Token 발급부터 Access Token 교환까지의 전체 플로우를
/// 담당합니다. Access Token 응답에 `user_id`가 포함되므로
/// 별도의 프로필 조회 없이 find-or-create로 이어집니다.
///
/// ## Request Token secret 보관
///
/// 1단계에서 받은 token secret은 3단계의 요청 서명에 필요하므로
/// `oauth1:token:{oauth_token}` 키로 Redis에 10분 TTL로 보관하고,
/// 콜백에서 GETDEL로 정확히 한 번만 소비합니다. OAuth 2.0의
/// state와 같은 역할(CSRF/재전송 방지)을 겸합니다.
pub struct TwitterAuthService {
    /// find-or-create를 수행할 사용자 리포지토리
    user_repo: Arc<UserRepository>,
    /// Request Token secret 저장소
    redis: Arc<RedisClient>,
    /// 공유 HTTP 클라이언트
    http: reqwest::Client,
}

impl TwitterAuthService {
    /// 새 서비스 인스턴스를 생성합니다.
    pub fn new(user_repo: Arc<UserRepository>, redis: Arc<RedisClient>, http: reqwest::Client) -> Self {
        Self {
            user_repo,
            redis,
            http,
        }
    }

    /// Request Token에 대한 Redis 키를 구성합니다
    fn token_key(oauth_token: &str) -> String {
        format!("oauth1:token:{}", oauth_token)
    }

    /// 현재 UNIX 타임스탬프 (초)
    fn oauth_timestamp() -> Result<String, AppError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::InternalError(format!("시간 계산 실패: {}", e)))?
            .as_secs();

        Ok(timestamp.to_string())
    }

    /// 핸드셰이크를 시작합니다
    ///
    /// Request Token을 발급받아 secret을 Redis에 보관하고,
    /// 사용자를 보낼 승인 페이지 URL을 반환합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(String)` - 302 리다이렉트에 사용할 authenticate URL
    /// * `Err(AppError::ExternalServiceError)` - Twitter API 통신 오류
    /// * `Err(AppError::RedisError)` - secret 저장 실패
    pub async fn begin(&self) -> Result<String, AppError> {
        let consumer_key = TwitterOAuthConfig::consumer_key();
        let consumer_secret = TwitterOAuthConfig::consumer_secret();
        let callback = TwitterOAuthConfig::callback_uri();
        let url = TwitterOAuthConfig::request_token_uri();

        let nonce = Uuid::new_v4().simple().to_string();
        let timestamp = Self::oauth_timestamp()?;

        let oauth_params: Vec<(&str, &str)> = vec![
            ("oauth_callback", callback.as_str()),
            ("oauth_consumer_key", consumer_key.as_str()),
            ("oauth_nonce", nonce.as_str()),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_version", "1.0"),
        ];

        // Request Token 단계에는 아직 token secret이 없다
        let base = signature_base_string("POST", &url, &oauth_params);
        let key = signing_key(&consumer_secret, "");
        let signature = sign_hmac_sha1(&base, &key)?;

        let mut header_params = oauth_params.clone();
        header_params.push(("oauth_signature", signature.as_str()));

        let response = self
            .http
            .post(&url)
            .header("Authorization", authorization_header(&header_params))
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Twitter request token 요청 실패: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Twitter request token 발급 실패: {}",
                error_text
            )));
        }

        let body = response.text().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Twitter 응답 읽기 실패: {}", e))
        })?;

        let request_token = TwitterRequestToken::from_form_body(&body)?;

        if !request_token.callback_confirmed {
            return Err(AppError::ExternalServiceError(
                "Twitter가 콜백 URL을 승인하지 않았습니다".to_string(),
            ));
        }

        // Access Token 교환 서명에 필요한 secret을 일회용으로 보관
        self.redis
            .set_with_expiry(
                &Self::token_key(&request_token.oauth_token),
                &request_token.oauth_token_secret,
                OAuthConfig::state_ttl_seconds(),
            )
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        Ok(format!(
            "{}?oauth_token={}",
            TwitterOAuthConfig::authenticate_uri(),
            percent_encode(&request_token.oauth_token)
        ))
    }

    /// 콜백을 완료하고 인증된 사용자를 반환합니다
    ///
    /// # 인자
    ///
    /// * `oauth_token` - 1단계에서 발급된 Request Token
    /// * `oauth_verifier` - 사용자 승인 후 발급된 verifier
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - find-or-create로 확보한 사용자
    /// * `Err(AppError::AuthenticationError)` - 알 수 없거나 만료된 토큰
    /// * `Err(AppError::ExternalServiceError)` - Twitter API 통신 오류
    /// * `Err(AppError::DatabaseError)` - 사용자 저장소 오류
    pub async fn complete(&self, oauth_token: &str, oauth_verifier: &str) -> Result<User, AppError> {
        // Request Token secret 일회용 소비
        let token_secret: String = self
            .redis
            .take(&Self::token_key(oauth_token))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?
            .ok_or_else(|| {
                AppError::AuthenticationError(
                    "만료되었거나 알 수 없는 request token입니다".to_string(),
                )
            })?;

        let consumer_key = TwitterOAuthConfig::consumer_key();
        let consumer_secret = TwitterOAuthConfig::consumer_secret();
        let url = TwitterOAuthConfig::access_token_uri();

        let nonce = Uuid::new_v4().simple().to_string();
        let timestamp = Self::oauth_timestamp()?;

        let oauth_params: Vec<(&str, &str)> = vec![
            ("oauth_consumer_key", consumer_key.as_str()),
            ("oauth_nonce", nonce.as_str()),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", oauth_token),
            ("oauth_verifier", oauth_verifier),
            ("oauth_version", "1.0"),
        ];

        let base = signature_base_string("POST", &url, &oauth_params);
        let key = signing_key(&consumer_secret, &token_secret);
        let signature = sign_hmac_sha1(&base, &key)?;

        let mut header_params = oauth_params.clone();
        header_params.push(("oauth_signature", signature.as_str()));

        let response = self
            .http
            .post(&url)
            .header("Authorization", authorization_header(&header_params))
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Twitter access token 요청 실패: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Twitter access token 교환 실패: {}",
                error_text
            )));
        }

        let body = response.text().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Twitter 응답 읽기 실패: {}", e))
        })?;

        let access_token = TwitterAccessToken::from_form_body(&body)?;

        let user = self
            .user_repo
            .find_or_create_linked(AuthProvider::Twitter, &access_token.user_id)
            .await?;

        log::info!("twitter 로그인 성공");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Twitter 개발자 문서의 서명 예제를 그대로 재현한다.
    // https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature
    const CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
    const TOKEN_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";

    fn reference_params() -> Vec<(&'static str, &'static str)> {
        vec![
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ("include_entities", "true"),
            ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
            ("oauth_nonce", "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1318622958"),
            ("oauth_token", "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"),
            ("oauth_version", "1.0"),
        ]
    }

    #[test]
    fn test_percent_encoding_is_rfc3986_strict() {
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
        assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
        // unreserved 문자는 그대로
        assert_eq!(percent_encode("abc-ABC_1.2~3"), "abc-ABC_1.2~3");
    }

    #[test]
    fn test_signature_base_string_matches_reference() {
        let base = signature_base_string(
            "post",
            "https://api.twitter.com/1.1/statuses/update.json",
            &reference_params(),
        );

        let expected = "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
            include_entities%3Dtrue%26\
            oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
            oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
            oauth_signature_method%3DHMAC-SHA1%26\
            oauth_timestamp%3D1318622958%26\
            oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
            oauth_version%3D1.0%26\
            status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521";

        assert_eq!(base, expected);
    }

    #[test]
    fn test_hmac_sha1_signature_matches_reference() {
        let base = signature_base_string(
            "POST",
            "https://api.twitter.com/1.1/statuses/update.json",
            &reference_params(),
        );
        let key = signing_key(CONSUMER_SECRET, TOKEN_SECRET);

        let signature = sign_hmac_sha1(&base, &key).unwrap();
        assert_eq!(signature, "tnnArxj06cWHq44gCs1OSKk/jLY=");
    }

    #[test]
    fn test_signing_key_without_token_secret() {
        // Request Token 단계: token secret이 비어 있어도 &는 유지된다
        assert_eq!(
            signing_key("consumer-secret", ""),
            "consumer-secret&"
        );
    }

    #[test]
    fn test_authorization_header_format() {
        let header = authorization_header(&[
            ("oauth_signature", "a/b+c="),
            ("oauth_consumer_key", "key"),
        ]);

        // 필드는 정렬되고, 값은 percent-encoding 후 따옴표로 감싼다
        assert_eq!(
            header,
            "OAuth oauth_consumer_key=\"key\", oauth_signature=\"a%2Fb%2Bc%3D\""
        );
    }

    #[test]
    fn test_token_key_format() {
        assert_eq!(
            TwitterAuthService::token_key("req-token"),
            "oauth1:token:req-token"
        );
    }
}
