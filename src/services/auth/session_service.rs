//! # 세션 주체 코덱 구현
//!
//! 브라우저 세션과 사용자 레코드 사이의 변환을 담당하는 서비스입니다.
//!
//! ## 직렬화 / 역직렬화
//!
//! ```text
//! serialize   : User ──► ObjectId hex ──► Redis("session:{sid}")
//! deserialize : 쿠키 sid ──► Redis 조회 ──► MongoDB 재조회 ──► User
//! ```
//!
//! 브라우저는 무작위 세션 ID만 보유하며, 누가 로그인했는지는
//! 전적으로 서버 사이드(Redis)에만 기록됩니다.
//!
//! ## 실패 동작
//!
//! 복원 경로의 어떤 실패도(쿠키 없음, Redis 키 만료, 저장소 장애,
//! 계정이 외부에서 삭제됨) 요청을 중단시키지 않고
//! "익명 요청"으로 강등됩니다.

use std::sync::Arc;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use uuid::Uuid;
use crate::{
    caching::redis::RedisClient,
    config::SessionConfig,
    domain::entities::users::user::User,
    repositories::users::user_repo::UserRepository,
};
use crate::errors::errors::AppError;

/// 세션 관리 서비스
///
/// 세션 발급(serialize), 복원(deserialize), 파기를 담당합니다.
///
/// ## 저장 구조
///
/// | 위치 | 내용 | 수명 |
/// |------|------|------|
/// | 브라우저 쿠키 `sid` | 무작위 UUID (HttpOnly) | `SESSION_TTL_SECONDS` |
/// | Redis `session:{sid}` | 사용자 ObjectId hex | `SESSION_TTL_SECONDS` |
///
/// ## 사용 예제
///
/// ```rust,ignore
/// // 인증 성공 직후
/// let cookie = session_service.issue(&user).await?;
/// HttpResponse::Found()
///     .cookie(cookie)
///     .insert_header((header::LOCATION, "/secrets"))
///     .finish()
///
/// // 요청마다
/// match session_service.resolve(sid).await {
///     Some(user) => { /* 인증됨 */ },
///     None => { /* 익명 */ },
/// }
/// ```
pub struct SessionService {
    /// 세션 저장소
    redis: Arc<RedisClient>,
    /// 세션 복원 시 사용자 재조회에 사용
    user_repo: Arc<UserRepository>,
}

impl SessionService {
    /// 새 서비스 인스턴스를 생성합니다.
    pub fn new(redis: Arc<RedisClient>, user_repo: Arc<UserRepository>) -> Self {
        Self { redis, user_repo }
    }

    /// 세션 ID에 대한 Redis 키를 구성합니다
    fn session_key(sid: &str) -> String {
        format!("session:{}", sid)
    }

    /// 새 세션을 발급합니다 (serialize)
    ///
    /// 사용자 레코드에서 세션에 보관할 것은 불투명 식별자뿐입니다.
    /// 전체 프로필은 요청마다 저장소에서 다시 읽습니다.
    ///
    /// # 인자
    ///
    /// * `user` - 인증에 성공한 사용자 (ID가 있어야 함)
    ///
    /// # 반환값
    ///
    /// * `Ok(Cookie)` - 브라우저에 설정할 세션 쿠키
    /// * `Err(AppError::InternalError)` - 사용자 ID 없음
    /// * `Err(AppError::RedisError)` - 세션 저장 실패
    pub async fn issue(&self, user: &User) -> Result<Cookie<'static>, AppError> {
        let user_id = user.id_string().ok_or_else(|| {
            AppError::InternalError("사용자 ID가 없습니다".to_string())
        })?;

        let sid = Uuid::new_v4().simple().to_string();
        let ttl = SessionConfig::ttl_seconds();

        self.redis
            .set_with_expiry(&Self::session_key(&sid), &user_id, ttl)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        log::debug!("세션 발급: 사용자 ID {}", user_id);

        Ok(Self::build_session_cookie(sid, ttl))
    }

    /// 세션 ID로 사용자 레코드를 복원합니다 (deserialize)
    ///
    /// # 인자
    ///
    /// * `sid` - 쿠키에서 추출한 세션 ID
    ///
    /// # 반환값
    ///
    /// * `Some(User)` - 유효한 세션과 살아있는 사용자 레코드
    /// * `None` - 그 외 모든 경우 (익명으로 처리)
    ///
    /// # 실패 강등
    ///
    /// 저장소 장애나 세션이 가리키는 계정의 소실은 요청 실패가 아니라
    /// "로그인되어 있지 않음"으로 처리됩니다. 보호된 라우트라면
    /// 미들웨어가 `/login`으로 리다이렉트하게 됩니다.
    pub async fn resolve(&self, sid: &str) -> Option<User> {
        let user_id: String = match self.redis.get(&Self::session_key(sid)).await {
            Ok(Some(id)) => id,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("세션 저장소 조회 실패: {}", e);
                return None;
            }
        };

        match self.user_repo.find_by_id(&user_id).await {
            Ok(Some(user)) => Some(user),
            Ok(None) => {
                log::warn!("세션이 가리키는 사용자가 존재하지 않습니다: {}", user_id);
                None
            }
            Err(e) => {
                log::warn!("세션 사용자 재조회 실패: {}", e);
                None
            }
        }
    }

    /// 세션을 파기합니다
    ///
    /// Redis 키를 삭제하고, 브라우저 쿠키를 제거하는 removal 쿠키를
    /// 반환합니다. 삭제 실패는 경고만 남깁니다 (키는 TTL로 소멸).
    ///
    /// # 인자
    ///
    /// * `sid` - 파기할 세션 ID
    pub async fn destroy(&self, sid: &str) -> Cookie<'static> {
        if let Err(e) = self.redis.del(&Self::session_key(sid)).await {
            log::warn!("세션 삭제 실패: {}", e);
        }

        Self::removal_cookie()
    }

    /// 세션 쿠키를 구성합니다
    ///
    /// - `HttpOnly`: 스크립트에서 접근 불가
    /// - `SameSite=Lax`: OAuth 콜백 리다이렉트는 통과시키면서 CSRF 완화
    /// - `Path=/`: 전체 사이트에 적용
    pub fn build_session_cookie(sid: String, ttl_seconds: u64) -> Cookie<'static> {
        Cookie::build(SessionConfig::COOKIE_NAME, sid)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(ttl_seconds as i64))
            .finish()
    }

    /// 브라우저의 세션 쿠키를 제거하는 removal 쿠키를 구성합니다
    pub fn removal_cookie() -> Cookie<'static> {
        let mut cookie = Cookie::new(SessionConfig::COOKIE_NAME, "");
        cookie.set_path("/");
        cookie.make_removal();
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_format() {
        assert_eq!(SessionService::session_key("abc123"), "session:abc123");
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = SessionService::build_session_cookie("deadbeef".to_string(), 3600);

        assert_eq!(cookie.name(), "sid");
        assert_eq!(cookie.value(), "deadbeef");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(3600)));
    }

    #[test]
    fn test_removal_cookie_clears_value() {
        let cookie = SessionService::removal_cookie();

        assert_eq!(cookie.name(), "sid");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        // removal 쿠키는 과거 만료 시각을 가진다
        assert!(cookie.expires().is_some());
    }
}
