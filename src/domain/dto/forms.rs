//! 폼 제출 DTO
//!
//! 로그인/회원가입/시크릿 제출 폼의 `application/x-www-form-urlencoded`
//! 본문을 매핑합니다.

use serde::Deserialize;
use validator::Validate;

/// 로컬 로그인 폼 (자격증명 쌍)
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "사용자명을 입력해주세요"))]
    pub username: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 회원가입 폼
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "사용자명을 입력해주세요"))]
    pub username: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 시크릿 제출 폼
///
/// 빈 제출은 검증 에러가 아니라 폼 재표시로 처리하므로
/// validator 제약을 걸지 않습니다.
#[derive(Debug, Deserialize)]
pub struct SecretForm {
    pub secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_validation() {
        let valid = LoginForm {
            username: "alice@example.com".to_string(),
            password: "p@ss".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing_password = LoginForm {
            username: "alice@example.com".to_string(),
            password: "".to_string(),
        };
        assert!(missing_password.validate().is_err());
    }

    #[test]
    fn test_register_form_validation() {
        let missing_username = RegisterForm {
            username: "".to_string(),
            password: "p@ss".to_string(),
        };
        assert!(missing_username.validate().is_err());
    }

    #[test]
    fn test_secret_form_field_mapping() {
        let form: SecretForm =
            serde_json::from_str(r#"{"secret": "I still sleep with a night light."}"#).unwrap();
        assert_eq!(form.secret, "I still sleep with a night light.");
    }
}
