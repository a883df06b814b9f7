//! OAuth 프로바이더 응답 모델 모듈
//!
//! - [`oauth2_models`] - Google/Facebook의 토큰 및 프로필 JSON 응답
//! - [`twitter_models`] - Twitter OAuth 1.0a의 form-urlencoded 응답

pub mod oauth2_models;
pub mod twitter_models;

pub use oauth2_models::*;
pub use twitter_models::*;
