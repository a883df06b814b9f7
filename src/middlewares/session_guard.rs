//! 세션 가드 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 세션 쿠키를 복원하고
//! 인증 여부에 따라 접근을 제어합니다.
//!
//! 요청마다 상태는 둘 중 하나입니다: **익명** 또는 **인증됨**.
//! 판정은 세션 주체 코덱([`crate::services::auth::SessionService`])을
//! 통해 매 요청 새로 이루어지며, 프로세스에 장기 상태를 두지 않습니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::guard_inner::SessionGuardService;

/// 세션 가드 미들웨어
///
/// 이 미들웨어로 감싼 스코프의 모든 라우트는 유효한 세션을 요구합니다.
/// 세션이 복원되면 사용자 엔티티가 request extension에 저장되어
/// 핸들러에서 `web::ReqData<User>`로 꺼내 쓸 수 있고,
/// 복원에 실패하면 `/login`으로 302 리다이렉트됩니다.
pub struct SessionGuard;

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardService {
            service: Rc::new(service),
        }))
    }
}
