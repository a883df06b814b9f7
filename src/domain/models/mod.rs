//! 외부 시스템 통합 모델 모듈
//!
//! OAuth 프로바이더의 HTTP 응답을 역직렬화하는 모델들을 정의합니다.
//! 도메인 엔티티와 달리 외부 API의 형태를 그대로 따릅니다.

pub mod oauth;

pub use oauth::*;
