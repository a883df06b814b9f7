//! # 애플리케이션 조립 루트 (Composition Root)
//!
//! 모든 리포지토리와 서비스를 첫 요청이 처리되기 전에 정확히 한 번
//! 구성하여 불변 핸들러 그래프로 제공하는 모듈입니다.
//!
//! 전역 가변 레지스트리에 전략을 등록해 나가는 방식 대신,
//! 의존성을 생성자 인자로 명시하고 완성된 [`AppState`]를
//! `actix_web::web::Data`로 앱에 넘깁니다. 그래프는 구성 이후
//! 변경되지 않습니다.
//!
//! ## 의존성 그래프
//!
//! ```text
//! Database ──► UserRepository ──┬─► UserService
//!                               ├─► SessionService ◄── RedisClient
//!                               ├─► OAuth2LoginService(Google)   ◄── RedisClient, reqwest
//!                               ├─► OAuth2LoginService(Facebook) ◄── RedisClient, reqwest
//!                               └─► TwitterAuthService           ◄── RedisClient, reqwest
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let state = AppState::build(database, redis_client);
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(web::Data::new(state.clone()))
//!         .configure(configure_all_routes)
//! })
//! ```

use std::sync::Arc;

use crate::caching::redis::RedisClient;
use crate::db::Database;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::{
    FacebookProvider, GoogleProvider, OAuth2LoginService, SessionService, TwitterAuthService,
};
use crate::services::users::user_service::UserService;
use crate::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};

/// 불변 애플리케이션 상태
///
/// 한 번 구성된 뒤에는 공유 참조로만 사용됩니다.
/// `Clone`은 내부 `Arc`들의 참조 카운트 증가일 뿐입니다.
#[derive(Clone)]
pub struct AppState {
    /// 사용자 저장소
    pub user_repo: Arc<UserRepository>,
    /// 로컬 회원가입/비밀번호 인증
    pub user_service: Arc<UserService>,
    /// 세션 주체 코덱
    pub session_service: Arc<SessionService>,
    /// Google OAuth 2.0 로그인
    pub google_login: Arc<OAuth2LoginService>,
    /// Facebook OAuth 2.0 로그인
    pub facebook_login: Arc<OAuth2LoginService>,
    /// Twitter OAuth 1.0a 로그인
    pub twitter_login: Arc<TwitterAuthService>,
}

impl AppState {
    /// 전체 핸들러 그래프를 구성합니다.
    ///
    /// 데이터 스토어 연결은 호출자(main)가 먼저 수행하며,
    /// 이 함수는 순수하게 객체 그래프 조립만 담당하므로
    /// 테스트에서 임의의 연결로도 호출할 수 있습니다.
    ///
    /// # 인자
    ///
    /// * `database` - 연결된 MongoDB 래퍼
    /// * `redis` - 연결된 Redis 클라이언트
    pub fn build(database: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        print_boxed_title("🔄 BUILDING APPLICATION STATE");

        // 프로바이더 왕복에 공유되는 HTTP 클라이언트
        let http = reqwest::Client::new();

        // 1단계: 리포지토리
        print_step_start(1, "Creating Repository instances");
        let user_repo = Arc::new(UserRepository::new(database));
        print_sub_task("UserRepository", "✓ Created");
        print_step_complete(1, "Repository instances created", 1);

        // 2단계: 서비스
        print_step_start(2, "Wiring Service instances");

        let user_service = Arc::new(UserService::new(user_repo.clone()));
        print_sub_task("UserService", "✓ Wired");

        let session_service = Arc::new(SessionService::new(redis.clone(), user_repo.clone()));
        print_sub_task("SessionService", "✓ Wired");

        let google_login = Arc::new(OAuth2LoginService::new(
            Box::new(GoogleProvider),
            user_repo.clone(),
            redis.clone(),
            http.clone(),
        ));
        print_sub_task("OAuth2LoginService(google)", "✓ Wired");

        let facebook_login = Arc::new(OAuth2LoginService::new(
            Box::new(FacebookProvider),
            user_repo.clone(),
            redis.clone(),
            http.clone(),
        ));
        print_sub_task("OAuth2LoginService(facebook)", "✓ Wired");

        let twitter_login = Arc::new(TwitterAuthService::new(
            user_repo.clone(),
            redis.clone(),
            http,
        ));
        print_sub_task("TwitterAuthService", "✓ Wired");

        print_step_complete(2, "Service instances wired", 5);
        print_final_summary(1, 5);

        Self {
            user_repo,
            user_service,
            session_service,
            google_login,
            facebook_login,
            twitter_login,
        }
    }
}
