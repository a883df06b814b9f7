//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 인증과 세 가지 소셜 로그인 연결을 모두 지원하는
//! 통합된 사용자 모델을 제공합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 로컬 인증(사용자명/패스워드)과 프로바이더 연결을 모두 지원하며,
/// 한 문서가 로컬 자격증명과 여러 프로바이더 연결을 동시에 가질 수 있습니다.
///
/// ## 불변식
///
/// - 문서는 `_id`로 유일하게 식별됩니다
/// - (프로바이더, 외부 ID) 쌍당 최대 한 개의 문서만 존재합니다
///   (저장소의 partial unique index + 원자적 find-or-create로 보장)
/// - `password_hash`에는 bcrypt 해시만 저장되며 평문은 저장되지 않습니다
///
/// ## 생명주기
///
/// - 로컬 회원가입 또는 프로바이더 최초 로그인 시 생성
/// - 이 시스템은 사용자를 삭제하지 않습니다
/// - 변경은 시크릿 추가(`secrets` push)뿐입니다
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로컬 로그인 식별자 (관례상 이메일). 프로바이더 전용 계정은 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// 해시된 비밀번호 (프로바이더 전용 계정은 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Google 프로필 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    /// Facebook 프로필 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_id: Option<String>,
    /// Twitter 사용자 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,
    /// 사용자가 제출한 시크릿 목록
    #[serde(default)]
    pub secrets: Vec<String>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (사용자명/패스워드)
    ///
    /// 로컬 인증용 사용자를 생성합니다. 프로바이더 연결 없이 시작됩니다.
    pub fn new_local(username: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username: Some(username),
            password_hash: Some(password_hash),
            google_id: None,
            facebook_id: None,
            twitter_id: None,
            secrets: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.username.is_some() && self.password_hash.is_some()
    }

    /// 해당 프로바이더에 연결된 외부 ID를 반환합니다
    pub fn provider_link(&self, provider: AuthProvider) -> Option<&str> {
        match provider {
            AuthProvider::Local => None,
            AuthProvider::Google => self.google_id.as_deref(),
            AuthProvider::Facebook => self.facebook_id.as_deref(),
            AuthProvider::Twitter => self.twitter_id.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_user() {
        let user = User::new_local("alice@example.com".to_string(), "$2b$04$hash".to_string());

        assert!(user.id.is_none());
        assert_eq!(user.username.as_deref(), Some("alice@example.com"));
        assert!(user.can_authenticate_with_password());
        assert!(user.google_id.is_none());
        assert!(user.facebook_id.is_none());
        assert!(user.twitter_id.is_none());
        assert!(user.secrets.is_empty());
    }

    #[test]
    fn test_provider_link_lookup() {
        let mut user = User::new_local("alice@example.com".to_string(), "hash".to_string());
        user.google_id = Some("g-123".to_string());

        assert_eq!(user.provider_link(AuthProvider::Google), Some("g-123"));
        assert_eq!(user.provider_link(AuthProvider::Facebook), None);
        assert_eq!(user.provider_link(AuthProvider::Twitter), None);
        assert_eq!(user.provider_link(AuthProvider::Local), None);
    }

    #[test]
    fn test_provider_only_user_cannot_password_authenticate() {
        // find-or-create로 생성된 문서 형태를 흉내낸다
        let user = User {
            id: Some(ObjectId::new()),
            username: None,
            password_hash: None,
            google_id: Some("g-123".to_string()),
            facebook_id: None,
            twitter_id: None,
            secrets: Vec::new(),
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        };

        assert!(!user.can_authenticate_with_password());
        assert!(user.id_string().is_some());
    }

    #[test]
    fn test_secrets_field_defaults_on_deserialize() {
        use mongodb::bson::doc;

        // secrets 필드가 없는 기존 문서도 빈 목록으로 읽힌다
        let document = doc! {
            "username": "alice@example.com",
            "created_at": DateTime::now(),
            "updated_at": DateTime::now(),
        };

        let user: User = mongodb::bson::from_document(document).unwrap();
        assert!(user.secrets.is_empty());
        assert!(user.id.is_none());
    }
}
