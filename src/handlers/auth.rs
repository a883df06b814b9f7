//! Authentication HTTP Handlers
//!
//! 사용자 인증과 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 로컬 인증(폼 제출)과 세 가지 소셜 로그인을 지원하며,
//! 성공 시 서버 사이드 세션을 발급합니다.
//!
//! # Auth Providers
//!
//! - **로컬 인증**: 사용자명/비밀번호 폼 (`POST /login`, `POST /register`)
//! - **OAuth 2.0**: Google (`GET /auth/google`, `/auth/google/secrets`),
//!   Facebook (`GET /auth/facebook`, `/auth/facebook/secrets`)
//! - **OAuth 1.0a**: Twitter (`GET /auth/twitter`, `/auth/twitter/callback`)
//! - **세션 종료**: `GET /logout`

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use actix_web::http::header;
use validator::Validate;

use crate::config::SessionConfig;
use crate::domain::dto::forms::{LoginForm, RegisterForm, SecretForm};
use crate::domain::dto::queries::{OAuth2CallbackQuery, TwitterCallbackQuery};
use crate::domain::entities::users::user::User;
use crate::errors::errors::AppError;
use crate::handlers::redirect_to;
use crate::state::AppState;
use crate::utils::string_utils::{is_valid_string, trim_string};
use crate::views;

/// 새 세션을 발급하고 `/secrets`로 리다이렉트합니다
///
/// 모든 인증 전략의 공통 성공 경로입니다.
async fn establish_session(state: &AppState, user: &User) -> Result<HttpResponse, AppError> {
    let cookie = state.session_service.issue(user).await?;

    Ok(HttpResponse::Found()
        .cookie(cookie)
        .insert_header((header::LOCATION, "/secrets"))
        .finish())
}

/// 인증 전략 결과를 응답으로 변환합니다
///
/// - 성공: 세션 발급 + `/secrets` 리다이렉트
/// - 인증 실패: 세션 없이 `/login` 리다이렉트
/// - 시스템 장애: 에러 전파 (일반 500)
async fn respond_to_auth_outcome(
    state: &AppState,
    outcome: Result<User, AppError>,
) -> Result<HttpResponse, AppError> {
    match outcome {
        Ok(user) => establish_session(state, &user).await,
        Err(AppError::AuthenticationError(reason)) => {
            log::warn!("인증 실패: {}", reason);
            Ok(redirect_to("/login"))
        }
        Err(e) => Err(e),
    }
}

/// 로컬 로그인 핸들러
///
/// 폼으로 제출된 자격증명 쌍을 검증합니다. 실패 시 사용자명
/// 존재 여부를 노출하지 않고 `/login`으로 돌려보냅니다.
///
/// # Endpoint
/// `POST /login`
#[post("/login")]
pub async fn local_login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사 (빈 필드는 인증 시도 없이 되돌림)
    if form.validate().is_err() {
        return Ok(redirect_to("/login"));
    }

    log::info!("로컬 로그인 시도: {}", form.username);

    let outcome = state
        .user_service
        .verify_password(&form.username, &form.password)
        .await;

    respond_to_auth_outcome(&state, outcome).await
}

/// 회원가입 핸들러
///
/// 계정 생성에 성공하면 즉시 로그인 상태로 만들어 `/secrets`로
/// 보냅니다. 중복 사용자명을 포함한 모든 실패는 `/register`로
/// 되돌립니다.
///
/// # Endpoint
/// `POST /register`
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    if form.validate().is_err() {
        return Ok(redirect_to("/register"));
    }

    match state
        .user_service
        .register_local(&form.username, &form.password)
        .await
    {
        Ok(user) => establish_session(&state, &user).await,
        Err(e) => {
            log::warn!("회원가입 실패: {}", e);
            Ok(redirect_to("/register"))
        }
    }
}

/// 로그아웃 핸들러
///
/// 세션을 파기하고 랜딩 페이지로 돌려보냅니다.
/// 세션이 없는 요청도 동일하게 리다이렉트됩니다.
///
/// # Endpoint
/// `GET /logout`
#[get("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> HttpResponse {
    let mut response = HttpResponse::Found();
    response.insert_header((header::LOCATION, "/"));

    if let Some(cookie) = req.cookie(SessionConfig::COOKIE_NAME) {
        let removal = state.session_service.destroy(cookie.value()).await;
        response.cookie(removal);
    }

    response.finish()
}

/// 시크릿 제출 핸들러 (보호됨)
///
/// 세션 가드가 복원해 둔 사용자에게 시크릿을 추가합니다.
/// 빈 제출은 저장소를 건드리지 않고 폼을 다시 보여줍니다.
///
/// # Endpoint
/// `POST /submit`
#[post("/submit")]
pub async fn submit_secret(
    state: web::Data<AppState>,
    user: web::ReqData<User>,
    form: web::Form<SecretForm>,
) -> Result<HttpResponse, AppError> {
    if !is_valid_string(&form.secret) {
        return Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(views::submit_page()));
    }

    let secret = trim_string(&form.secret);

    let user_id = user.id.as_ref().ok_or_else(|| {
        AppError::InternalError("사용자 ID가 없습니다".to_string())
    })?;

    state.user_repo.push_secret(user_id, &secret).await?;

    Ok(redirect_to("/secrets"))
}

/// Google OAuth 핸드셰이크 시작
///
/// # Endpoint
/// `GET /auth/google`
#[get("/auth/google")]
pub async fn google_begin(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let authorize_url = state.google_login.begin().await?;
    Ok(redirect_to(&authorize_url))
}

/// Google OAuth 콜백 처리
///
/// # Endpoint
/// `GET /auth/google/secrets?code={code}&state={state}`
#[get("/auth/google/secrets")]
pub async fn google_callback(
    state: web::Data<AppState>,
    query: web::Query<OAuth2CallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let Some((code, oauth_state)) = query.into_inner().into_grant() else {
        // 거부된 동의 또는 누락된 파라미터
        return Ok(redirect_to("/login"));
    };

    let outcome = state.google_login.complete(&code, &oauth_state).await;
    respond_to_auth_outcome(&state, outcome).await
}

/// Facebook OAuth 핸드셰이크 시작
///
/// # Endpoint
/// `GET /auth/facebook`
#[get("/auth/facebook")]
pub async fn facebook_begin(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let authorize_url = state.facebook_login.begin().await?;
    Ok(redirect_to(&authorize_url))
}

/// Facebook OAuth 콜백 처리
///
/// # Endpoint
/// `GET /auth/facebook/secrets?code={code}&state={state}`
#[get("/auth/facebook/secrets")]
pub async fn facebook_callback(
    state: web::Data<AppState>,
    query: web::Query<OAuth2CallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let Some((code, oauth_state)) = query.into_inner().into_grant() else {
        return Ok(redirect_to("/login"));
    };

    let outcome = state.facebook_login.complete(&code, &oauth_state).await;
    respond_to_auth_outcome(&state, outcome).await
}

/// Twitter OAuth 핸드셰이크 시작
///
/// # Endpoint
/// `GET /auth/twitter`
#[get("/auth/twitter")]
pub async fn twitter_begin(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let authenticate_url = state.twitter_login.begin().await?;
    Ok(redirect_to(&authenticate_url))
}

/// Twitter OAuth 콜백 처리
///
/// # Endpoint
/// `GET /auth/twitter/callback?oauth_token={token}&oauth_verifier={verifier}`
#[get("/auth/twitter/callback")]
pub async fn twitter_callback(
    state: web::Data<AppState>,
    query: web::Query<TwitterCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let Some((oauth_token, oauth_verifier)) = query.into_inner().into_grant() else {
        return Ok(redirect_to("/login"));
    };

    let outcome = state
        .twitter_login
        .complete(&oauth_token, &oauth_verifier)
        .await;
    respond_to_auth_outcome(&state, outcome).await
}
