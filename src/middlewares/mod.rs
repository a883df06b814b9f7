//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//! 횡단 관심사(Cross-cutting concerns)를 처리합니다.
//!
//! # 제공 미들웨어
//!
//! ### 세션 가드 (SessionGuard)
//! - 세션 쿠키에서 세션 주체를 복원
//! - 복원된 사용자를 request extension에 저장
//! - 익명 요청은 `/login`으로 302 리다이렉트
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::SessionGuard;
//!
//! App::new()
//!     .service(
//!         web::scope("")
//!             .wrap(SessionGuard)          // 보호된 페이지 묶음
//!             .service(handlers::pages::secrets_page)
//!             .service(handlers::pages::submit_page)
//!     )
//!     .service(handlers::pages::home_page)  // 공개 페이지는 스코프 밖
//! ```

pub mod session_guard;
mod guard_inner;

// 미들웨어 재export
pub use session_guard::SessionGuard;
