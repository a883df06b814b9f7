//! # Twitter OAuth 1.0a 응답 모델
//!
//! Twitter의 OAuth 1.0a 엔드포인트는 JSON이 아니라
//! `application/x-www-form-urlencoded` 형식의 본문을 반환합니다.
//!
//! ```text
//! oauth_token=Z6eEdO8M...&oauth_token_secret=Kd75W4O...&oauth_callback_confirmed=true
//! ```
//!
//! 이 모듈은 해당 본문을 파싱하는 모델과 헬퍼를 제공합니다.

use std::collections::HashMap;

use crate::errors::errors::AppError;

/// form-urlencoded 본문을 키-값 맵으로 파싱합니다
///
/// 값은 percent-decoding 됩니다. 중복 키는 마지막 값이 유지됩니다.
fn parse_form_body(body: &str) -> HashMap<String, String> {
    body.split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = urlencoding::decode(key).ok()?.into_owned();
            let value = urlencoding::decode(value).ok()?.into_owned();
            Some((key, value))
        })
        .collect()
}

/// Request Token 발급 응답 (`POST oauth/request_token`)
#[derive(Debug, Clone, PartialEq)]
pub struct TwitterRequestToken {
    /// 임시 Request Token. 사용자 승인 리다이렉트에 사용
    pub oauth_token: String,
    /// Request Token secret. Access Token 교환 요청 서명에 필요
    pub oauth_token_secret: String,
    /// 콜백 URL이 수락되었는지 여부
    pub callback_confirmed: bool,
}

impl TwitterRequestToken {
    /// form-urlencoded 응답 본문을 파싱합니다
    ///
    /// # 인자
    ///
    /// * `body` - Request Token 엔드포인트의 응답 본문
    ///
    /// # 반환값
    ///
    /// * `Ok(TwitterRequestToken)` - 필수 필드가 모두 존재하는 경우
    /// * `Err(AppError::ExternalServiceError)` - 본문 형식이 예상과 다른 경우
    pub fn from_form_body(body: &str) -> Result<Self, AppError> {
        let mut fields = parse_form_body(body);

        let oauth_token = fields.remove("oauth_token").ok_or_else(|| {
            AppError::ExternalServiceError("Request token 응답에 oauth_token이 없습니다".to_string())
        })?;
        let oauth_token_secret = fields.remove("oauth_token_secret").ok_or_else(|| {
            AppError::ExternalServiceError(
                "Request token 응답에 oauth_token_secret이 없습니다".to_string(),
            )
        })?;
        let callback_confirmed = fields
            .remove("oauth_callback_confirmed")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            oauth_token,
            oauth_token_secret,
            callback_confirmed,
        })
    }
}

/// Access Token 교환 응답 (`POST oauth/access_token`)
///
/// Twitter는 Access Token 응답에 인증된 사용자의 `user_id`를 함께
/// 내려주므로 별도의 프로필 조회 호출이 필요 없습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct TwitterAccessToken {
    pub oauth_token: String,
    pub oauth_token_secret: String,
    /// Twitter 사용자 고유 ID. find-or-create 키로 사용
    pub user_id: String,
    pub screen_name: Option<String>,
}

impl TwitterAccessToken {
    /// form-urlencoded 응답 본문을 파싱합니다
    ///
    /// # 반환값
    ///
    /// * `Ok(TwitterAccessToken)` - 필수 필드가 모두 존재하는 경우
    /// * `Err(AppError::ExternalServiceError)` - 본문 형식이 예상과 다른 경우
    pub fn from_form_body(body: &str) -> Result<Self, AppError> {
        let mut fields = parse_form_body(body);

        let oauth_token = fields.remove("oauth_token").ok_or_else(|| {
            AppError::ExternalServiceError("Access token 응답에 oauth_token이 없습니다".to_string())
        })?;
        let oauth_token_secret = fields.remove("oauth_token_secret").ok_or_else(|| {
            AppError::ExternalServiceError(
                "Access token 응답에 oauth_token_secret이 없습니다".to_string(),
            )
        })?;
        let user_id = fields.remove("user_id").ok_or_else(|| {
            AppError::ExternalServiceError("Access token 응답에 user_id가 없습니다".to_string())
        })?;
        let screen_name = fields.remove("screen_name");

        Ok(Self {
            oauth_token,
            oauth_token_secret,
            user_id,
            screen_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_token_parsing() {
        let body = "oauth_token=Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik\
                    &oauth_token_secret=Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM\
                    &oauth_callback_confirmed=true";

        let token = TwitterRequestToken::from_form_body(body).unwrap();
        assert_eq!(token.oauth_token, "Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik");
        assert_eq!(
            token.oauth_token_secret,
            "Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM"
        );
        assert!(token.callback_confirmed);
    }

    #[test]
    fn test_request_token_missing_field() {
        let body = "oauth_token=abc";
        assert!(TwitterRequestToken::from_form_body(body).is_err());
    }

    #[test]
    fn test_access_token_parsing() {
        let body = "oauth_token=6253282-eWudHldSbIaelX7swmsiHImEL4KinwaGloHANdrY\
                    &oauth_token_secret=2EEfA6BG3ly3sR3RjE0IBSnlQu4ZrUzPiYKmrkVU\
                    &user_id=6253282&screen_name=twitterapi";

        let token = TwitterAccessToken::from_form_body(body).unwrap();
        assert_eq!(token.user_id, "6253282");
        assert_eq!(token.screen_name.as_deref(), Some("twitterapi"));
    }

    #[test]
    fn test_percent_decoded_values() {
        let body = "oauth_token=a%2Fb&oauth_token_secret=c%3Dd&user_id=1";
        let token = TwitterAccessToken::from_form_body(body).unwrap();
        assert_eq!(token.oauth_token, "a/b");
        assert_eq!(token.oauth_token_secret, "c=d");
    }
}
