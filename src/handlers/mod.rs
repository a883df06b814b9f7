//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! ActixWeb 프레임워크를 기반으로 구현되었습니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! HTTP Layer Architecture
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - 페이지/인증 엔드포인트       ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 인증 전략, 세션 코덱                 ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 리다이렉트 규약
//!
//! 모든 인증 실패(잘못된 자격증명, 거부된 동의, state 불일치)는
//! 세션을 만들지 않고 `/login`으로 302 리다이렉트합니다.
//! 인증 성공은 새 세션을 만들고 `/secrets`로 302 리다이렉트합니다.
//! 시스템 장애(저장소/프로바이더 통신 오류)만이
//! [`AppError`](crate::errors::AppError)로 전파되어 500이 됩니다.

use actix_web::http::header;
use actix_web::HttpResponse;

pub mod pages;
pub mod auth;

/// 지정된 경로로 302 리다이렉트 응답을 생성합니다
pub(crate) fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_redirect_response_shape() {
        let response = redirect_to("/login");

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login"
        );
    }
}
