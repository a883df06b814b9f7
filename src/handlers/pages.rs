//! 페이지 렌더링 핸들러
//!
//! 서버 사이드 렌더링되는 페이지 엔드포인트들입니다.
//! `/secrets`와 `/submit`은 세션 가드 스코프 안에 등록되어
//! 익명 요청이 이 핸들러에 도달하지 않습니다.

use actix_web::{get, web, HttpResponse};
use crate::errors::errors::AppError;
use crate::state::AppState;
use crate::views;

/// 랜딩 페이지
///
/// 인증 여부와 무관하게 동일하게 렌더링됩니다.
///
/// # Endpoint
/// `GET /`
#[get("/")]
pub async fn home_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(views::home_page())
}

/// 로그인 페이지
///
/// 이미 인증된 세션이라도 리다이렉트하지 않고 폼을 다시 보여줍니다
/// (재로그인 허용).
///
/// # Endpoint
/// `GET /login`
#[get("/login")]
pub async fn login_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(views::login_page())
}

/// 회원가입 페이지
///
/// # Endpoint
/// `GET /register`
#[get("/register")]
pub async fn register_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(views::register_page())
}

/// 시크릿 페이지 (보호됨)
///
/// 모든 사용자가 제출한 시크릿을 제출자 정보 없이 나열합니다.
/// 저장소 조회 실패는 일반 500으로 전파됩니다.
///
/// # Endpoint
/// `GET /secrets`
#[get("/secrets")]
pub async fn secrets_page(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let secrets = state.user_repo.list_all_secrets().await?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(views::secrets_page(&secrets)))
}

/// 시크릿 제출 페이지 (보호됨)
///
/// # Endpoint
/// `GET /submit`
#[get("/submit")]
pub async fn submit_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(views::submit_page())
}
