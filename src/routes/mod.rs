//! 라우트 설정 모듈
//!
//! 페이지와 인증 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 접근 제어 규칙은 단 하나입니다: `/secrets`와 `/submit`은
//! 유효한 세션을 요구하고, 나머지 라우트는 모두 공개입니다.
//!
//! # Route Table
//!
//! | 라우트 | 메서드 | 접근 |
//! |--------|--------|------|
//! | `/` | GET | 공개 |
//! | `/login` | GET, POST | 공개 |
//! | `/register` | GET, POST | 공개 |
//! | `/logout` | GET | 공개 |
//! | `/auth/{provider}`, 콜백 | GET | 공개 |
//! | `/secrets` | GET | 세션 필요 |
//! | `/submit` | GET, POST | 세션 필요 |
//! | `/health` | GET | 공개 |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(state))
//!     .configure(configure_all_routes);
//! ```

use crate::handlers;
use crate::middlewares::SessionGuard;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// 기능별로 분할된 라우트들을 통합하여 애플리케이션에 등록합니다.
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_public_routes(cfg);

    // 보호 스코프는 prefix가 없으므로 반드시 마지막에 등록해야 한다
    configure_protected_routes(cfg);
}

/// 공개 라우트를 설정합니다
///
/// 페이지 렌더링과 인증 시작/완료 엔드포인트를 등록합니다.
/// 인증 엔드포인트 자체는 인증을 요구하지 않습니다.
///
/// # Available Routes
///
/// ## 페이지
/// - `GET /` - 랜딩 페이지
/// - `GET /login`, `GET /register` - 폼 페이지
///
/// ## 로컬 인증
/// - `POST /login` - 사용자명/비밀번호 로그인
/// - `POST /register` - 회원가입
/// - `GET /logout` - 세션 종료
///
/// ## 소셜 로그인
/// - `GET /auth/google` → `GET /auth/google/secrets`
/// - `GET /auth/facebook` → `GET /auth/facebook/secrets`
/// - `GET /auth/twitter` → `GET /auth/twitter/callback`
fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::pages::home_page)
        .service(handlers::pages::login_page)
        .service(handlers::pages::register_page)
        .service(handlers::auth::local_login)
        .service(handlers::auth::register)
        .service(handlers::auth::logout)
        .service(handlers::auth::google_begin)
        .service(handlers::auth::google_callback)
        .service(handlers::auth::facebook_begin)
        .service(handlers::auth::facebook_callback)
        .service(handlers::auth::twitter_begin)
        .service(handlers::auth::twitter_callback);
}

/// 세션이 필요한 라우트를 설정합니다
///
/// [`SessionGuard`]가 세션을 복원하지 못한 요청을
/// `/login`으로 302 리다이렉트합니다.
fn configure_protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .wrap(SessionGuard)
            .service(handlers::pages::secrets_page)
            .service(handlers::pages::submit_page)
            .service(handlers::auth::submit_secret),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Returns
///
/// * `HttpResponse` - 서비스 상태 정보를 포함한 JSON 응답
///
/// # Examples
///
/// ```bash
/// curl http://localhost:3000/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "secrets_web_service",
///   "version": "0.1.0",
///   "timestamp": "2023-01-01T00:00:00Z",
///   "features": {
///     "database": "MongoDB",
///     "sessions": "Redis",
///     "providers": ["local", "google", "facebook", "twitter"]
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "secrets_web_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "sessions": "Redis",
            "providers": ["local", "google", "facebook", "twitter"]
        }
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};

    use super::*;
    use crate::caching::redis::RedisClient;
    use crate::db::Database;
    use crate::state::AppState;

    /// 실제 스토어 연결 없이 전체 라우트 트리를 구성한다.
    ///
    /// 세션 쿠키가 없는 요청은 Redis/MongoDB에 접근하지 않으므로
    /// 아래 테스트들은 외부 프로세스 없이 동작한다.
    async fn test_state() -> AppState {
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .expect("클라이언트 구성 실패");

        AppState::build(
            Arc::new(Database::with_client(client, "user_db_test")),
            Arc::new(RedisClient::default()),
        )
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_state().await))
                    .configure(configure_all_routes),
            )
            .await
        };
    }

    fn location_of(response: &actix_web::dev::ServiceResponse) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn test_anonymous_secrets_redirects_to_login() {
        let app = test_app!();

        let request = test::TestRequest::get().uri("/secrets").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location_of(&response), "/login");
    }

    #[actix_web::test]
    async fn test_anonymous_submit_redirects_to_login() {
        let app = test_app!();

        let request = test::TestRequest::get().uri("/submit").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location_of(&response), "/login");
    }

    #[actix_web::test]
    async fn test_anonymous_submit_post_redirects_to_login() {
        let app = test_app!();

        let request = test::TestRequest::post()
            .uri("/submit")
            .set_form([("secret", "누설 금지")])
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location_of(&response), "/login");
    }

    #[actix_web::test]
    async fn test_home_page_is_public() {
        let app = test_app!();

        let request = test::TestRequest::get().uri("/").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = test::read_body(response).await;
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("Secrets"));
    }

    #[actix_web::test]
    async fn test_login_and_register_pages_are_public() {
        let app = test_app!();

        for uri in ["/login", "/register"] {
            let request = test::TestRequest::get().uri(uri).to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::OK, "{} 페이지", uri);
        }
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = test_app!();

        let request = test::TestRequest::get().uri("/health").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_logout_without_session_redirects_home() {
        let app = test_app!();

        let request = test::TestRequest::get().uri("/logout").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location_of(&response), "/");
    }

    #[actix_web::test]
    async fn test_login_with_empty_fields_redirects_back() {
        // 빈 자격증명은 저장소 조회 없이 되돌려 보낸다
        let app = test_app!();

        let request = test::TestRequest::post()
            .uri("/login")
            .set_form([("username", ""), ("password", "")])
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location_of(&response), "/login");
    }

    #[actix_web::test]
    async fn test_register_with_empty_username_redirects_back() {
        let app = test_app!();

        let request = test::TestRequest::post()
            .uri("/register")
            .set_form([("username", ""), ("password", "p@ss")])
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location_of(&response), "/register");
    }

    #[actix_web::test]
    async fn test_oauth2_callback_with_denied_consent_redirects_to_login() {
        // 사용자가 동의 화면에서 거부하면 code 없이 error만 돌아온다
        let app = test_app!();

        let request = test::TestRequest::get()
            .uri("/auth/google/secrets?error=access_denied&state=xyz")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location_of(&response), "/login");
    }

    #[actix_web::test]
    async fn test_twitter_callback_with_denial_redirects_to_login() {
        let app = test_app!();

        let request = test::TestRequest::get()
            .uri("/auth/twitter/callback?denied=req-token")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location_of(&response), "/login");
    }
}
