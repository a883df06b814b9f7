//! # Configuration Module
//!
//! 웹 서비스의 설정 관리를 담당하는 모듈입니다.
//! Spring Framework의 `@Configuration` 클래스와 유사한 역할을 수행하며,
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 세션, 환경 관련 설정
//! - [`auth_config`] - 인증 프로바이더(OAuth) 관련 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리 (Environment Separation)
//!
//! 개발, 테스트, 스테이징, 프로덕션 환경별로 다른 설정값을 제공합니다.
//! Spring Profile과 유사한 방식으로 동작합니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! - 프로바이더 client secret 등 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전
//! - 프로덕션에서는 필수 설정값 누락 시 패닉
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="3000"
//!
//! # 세션 설정
//! export SESSION_TTL_SECONDS="86400"
//!
//! # Google OAuth 2.0
//! export GOOGLE_CLIENT_ID="your-client-id"
//! export GOOGLE_CLIENT_SECRET="your-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:3000/auth/google/secrets"
//!
//! # Facebook OAuth 2.0
//! export FACEBOOK_APP_ID="your-app-id"
//! export FACEBOOK_APP_SECRET="your-app-secret"
//! export FACEBOOK_REDIRECT_URI="http://localhost:3000/auth/facebook/secrets"
//!
//! # Twitter OAuth 1.0a
//! export TWITTER_CONSUMER_KEY="your-consumer-key"
//! export TWITTER_CONSUMER_SECRET="your-consumer-secret"
//! export TWITTER_CALLBACK_URI="http://127.0.0.1:3000/auth/twitter/callback"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
