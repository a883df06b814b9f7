//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 조립 루트에서 생성되어 `Arc`로 공유되는 서비스들을 제공합니다.
//! 도메인별로 모듈화되어 사용자 관리와 인증/세션 기능을 담당합니다.
//!
//! # Features
//!
//! - 로컬 회원가입/비밀번호 검증
//! - OAuth 2.0 소셜 로그인 (Google, Facebook)
//! - OAuth 1.0a 소셜 로그인 (Twitter)
//! - Redis 기반 서버 사이드 세션 발급/복원/파기
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{users::user_service::UserService, auth::SessionService};
//!
//! let user = user_service.verify_password("alice@example.com", "p@ss").await?;
//! let cookie = session_service.issue(&user).await?;
//! ```

pub mod users;
pub mod auth;
