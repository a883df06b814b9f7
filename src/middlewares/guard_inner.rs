//! SessionGuard 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use crate::config::SessionConfig;
use crate::domain::entities::users::user::User;
use crate::state::AppState;

/// 실제 세션 복원과 접근 제어를 수행하는 서비스
pub struct SessionGuardService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            // 세션 복원 시도 (쿠키 없음/만료/저장소 장애는 모두 익명 처리)
            let auth_result = resolve_session_user(&req).await;

            match auth_result {
                Some(user) => {
                    log::debug!(
                        "세션 복원 성공: 사용자 ID {}",
                        user.id_string().unwrap_or_default()
                    );

                    // 사용자 정보를 Request Extensions에 저장
                    req.extensions_mut().insert(user);
                }
                None => {
                    // 익명 요청은 로그인 페이지로 보낸다
                    let response = HttpResponse::Found()
                        .insert_header((header::LOCATION, "/login"))
                        .finish();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    return Ok(res);
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청의 세션 쿠키로 사용자 레코드를 복원
async fn resolve_session_user(req: &ServiceRequest) -> Option<User> {
    // 세션 쿠키 추출
    let sid_cookie = req.cookie(SessionConfig::COOKIE_NAME)?;
    let sid = sid_cookie.value();
    if sid.is_empty() {
        return None;
    }

    // 조립 루트에서 주입된 앱 상태
    let state = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state,
        None => {
            log::error!("AppState가 등록되지 않았습니다");
            return None;
        }
    };

    // 세션 주체 복원 (Redis → MongoDB)
    state.session_service.resolve(sid).await
}
