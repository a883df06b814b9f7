//! OAuth 콜백 쿼리 파라미터 DTO
//!
//! 프로바이더가 콜백 URL에 붙여 보내는 쿼리 문자열을 매핑합니다.
//! 사용자가 동의 화면에서 거부한 경우 `code`/`oauth_token` 없이
//! 에러 파라미터만 도착하므로 모든 필드를 Option으로 둡니다.

use serde::Deserialize;

/// OAuth 2.0 콜백 쿼리 (Google/Facebook 공용)
#[derive(Debug, Deserialize)]
pub struct OAuth2CallbackQuery {
    /// Authorization Code. 거부/에러 시 None
    pub code: Option<String>,
    /// CSRF 방지용 state. 핸드셰이크 시작 시 발급한 값이 돌아와야 함
    pub state: Option<String>,
    /// 에러 코드 (사용자가 거부했거나 프로바이더 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl OAuth2CallbackQuery {
    /// 콜백이 성공 파라미터를 모두 갖추었는지 확인하고 (code, state)를 반환합니다
    pub fn into_grant(self) -> Option<(String, String)> {
        if self.error.is_some() {
            return None;
        }
        match (self.code, self.state) {
            (Some(code), Some(state)) if !code.is_empty() && !state.is_empty() => {
                Some((code, state))
            }
            _ => None,
        }
    }
}

/// Twitter OAuth 1.0a 콜백 쿼리
#[derive(Debug, Deserialize)]
pub struct TwitterCallbackQuery {
    /// 1단계에서 발급된 Request Token
    pub oauth_token: Option<String>,
    /// 사용자 승인 후 발급되는 verifier
    pub oauth_verifier: Option<String>,
    /// 사용자가 승인 화면에서 거부한 경우 전달되는 토큰
    pub denied: Option<String>,
}

impl TwitterCallbackQuery {
    /// 콜백이 성공 파라미터를 모두 갖추었는지 확인하고
    /// (oauth_token, oauth_verifier)를 반환합니다
    pub fn into_grant(self) -> Option<(String, String)> {
        if self.denied.is_some() {
            return None;
        }
        match (self.oauth_token, self.oauth_verifier) {
            (Some(token), Some(verifier)) if !token.is_empty() && !verifier.is_empty() => {
                Some((token, verifier))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth2_grant_extraction() {
        let ok = OAuth2CallbackQuery {
            code: Some("4/abc".to_string()),
            state: Some("xyz".to_string()),
            error: None,
            error_description: None,
        };
        assert_eq!(ok.into_grant(), Some(("4/abc".to_string(), "xyz".to_string())));
    }

    #[test]
    fn test_oauth2_denied_consent_yields_no_grant() {
        let denied = OAuth2CallbackQuery {
            code: None,
            state: Some("xyz".to_string()),
            error: Some("access_denied".to_string()),
            error_description: Some("The user denied the request".to_string()),
        };
        assert_eq!(denied.into_grant(), None);
    }

    #[test]
    fn test_oauth2_error_overrides_code() {
        // 에러가 있으면 code가 있어도 승인으로 취급하지 않는다
        let conflicting = OAuth2CallbackQuery {
            code: Some("4/abc".to_string()),
            state: Some("xyz".to_string()),
            error: Some("server_error".to_string()),
            error_description: None,
        };
        assert_eq!(conflicting.into_grant(), None);
    }

    #[test]
    fn test_twitter_grant_extraction() {
        let ok = TwitterCallbackQuery {
            oauth_token: Some("req-token".to_string()),
            oauth_verifier: Some("verifier".to_string()),
            denied: None,
        };
        assert_eq!(
            ok.into_grant(),
            Some(("req-token".to_string(), "verifier".to_string()))
        );

        let denied = TwitterCallbackQuery {
            oauth_token: None,
            oauth_verifier: None,
            denied: Some("req-token".to_string()),
        };
        assert_eq!(denied.into_grant(), None);
    }
}
