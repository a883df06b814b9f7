//! # 사용자 서비스 구현
//!
//! 로컬 계정의 등록과 비밀번호 인증을 담당하는 서비스입니다.
//! 비밀번호는 bcrypt로 해싱되어 저장되며 평문은 어디에도 남지 않습니다.

use std::sync::Arc;
use bcrypt::hash;
use crate::{
    config::PasswordConfig,
    domain::entities::users::user::User,
    repositories::users::user_repo::UserRepository,
    utils::string_utils::validate_required_string,
};
use crate::errors::errors::AppError;

/// 사용자 관리 서비스
///
/// 로컬 인증 경로의 비즈니스 로직을 담당합니다.
/// 소셜 로그인 경로의 계정 생성은 리포지토리의 find-or-create가
/// 직접 수행하므로 이 서비스를 거치지 않습니다.
///
/// ## 주요 책임
///
/// 1. **회원가입**: 입력 검증, 비밀번호 해싱, 계정 생성
/// 2. **비밀번호 인증**: 자격증명 쌍 검증 후 사용자 엔티티 반환
///
/// ## 보안 고려사항
///
/// - **단일 실패 메시지**: 사용자명이 존재하지 않는 경우와 비밀번호가
///   틀린 경우를 구분하지 않습니다
/// - **환경별 cost**: 개발 환경에서는 낮은 bcrypt cost로 빠른 반복을,
///   프로덕션에서는 높은 cost로 보안을 확보합니다
pub struct UserService {
    /// 사용자 데이터 액세스 리포지토리
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// 새 서비스 인스턴스를 생성합니다.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// 새 로컬 계정 등록
    ///
    /// # 인자
    ///
    /// * `username` - 로컬 로그인 식별자 (관례상 이메일)
    /// * `password` - 평문 비밀번호 (즉시 해싱됨)
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 엔티티 (ID 포함)
    /// * `Err(AppError::ValidationError)` - 빈 사용자명/비밀번호
    /// * `Err(AppError::ConflictError)` - 사용자명 중복
    /// * `Err(AppError::InternalError)` - 비밀번호 해싱 실패
    /// * `Err(AppError::DatabaseError)` - 저장 실패
    ///
    /// # 처리 과정
    ///
    /// 1. 입력값 검증 및 정리
    /// 2. 환경별 cost로 bcrypt 해싱
    /// 3. 로컬 사용자 엔티티 생성 후 저장
    pub async fn register_local(&self, username: &str, password: &str) -> Result<User, AppError> {
        let username = validate_required_string(username, "사용자명")?;
        if password.is_empty() {
            return Err(AppError::ValidationError("비밀번호는 필수입니다".to_string()));
        }

        // 환경별 bcrypt cost 사용
        let bcrypt_cost = PasswordConfig::bcrypt_cost();

        let hash_start = std::time::Instant::now();
        let password_hash = hash(password, bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = User::new_local(username, password_hash);

        let created_user = self.user_repo.create(user).await?;

        log::info!(
            "새 로컬 사용자 등록: {}",
            created_user.username.as_deref().unwrap_or_default()
        );

        Ok(created_user)
    }

    /// 자격증명 쌍 검증
    ///
    /// # 인자
    ///
    /// * `username` - 로컬 로그인 식별자
    /// * `password` - 평문 비밀번호
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 인증된 사용자 엔티티
    /// * `Err(AppError::AuthenticationError)` - 사용자명 없음, 비밀번호
    ///   불일치, 또는 비밀번호 인증이 불가능한 프로바이더 전용 계정
    /// * `Err(AppError::DatabaseError)` - 저장소 조회 실패
    ///
    /// # 보안
    ///
    /// 실패 사유와 관계없이 동일한 메시지를 반환하여
    /// 사용자명 존재 여부가 노출되지 않도록 합니다.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<User, AppError> {
        const FAILURE: &str = "잘못된 사용자명 또는 비밀번호입니다";

        let user = self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(FAILURE.to_string()))?;

        // 프로바이더 전용 계정은 비밀번호 인증 불가
        if !user.can_authenticate_with_password() {
            return Err(AppError::AuthenticationError(FAILURE.to_string()));
        }

        let password_hash = user.password_hash.as_ref()
            .ok_or_else(|| AppError::InternalError("비밀번호 해시가 없습니다".to_string()))?;

        let verify_start = std::time::Instant::now();
        let is_valid = bcrypt::verify(password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            return Err(AppError::AuthenticationError(FAILURE.to_string()));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_roundtrip() {
        // 해싱/검증 자체는 저장소 없이 확인할 수 있다
        let hashed = hash("p@ss", 4).unwrap();
        assert!(bcrypt::verify("p@ss", &hashed).unwrap());
        assert!(!bcrypt::verify("wrong", &hashed).unwrap());
    }

    #[test]
    fn test_hash_is_never_plaintext() {
        let hashed = hash("p@ss", 4).unwrap();
        assert_ne!(hashed, "p@ss");
        assert!(hashed.starts_with("$2"));
    }
}
