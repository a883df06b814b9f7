//! 캐싱/세션 저장 계층 모듈
//!
//! Redis를 백엔드로 하는 세션 및 일회용 OAuth 상태 저장과
//! JSON 기반 객체 직렬화를 제공합니다.
//!
//! # 주요 기능
//!
//! - Redis 통합 및 멀티플렉싱 연결
//! - JSON 기반 자동 직렬화/역직렬화
//! - TTL 지원 및 일회용(GETDEL) 조회
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let store = RedisClient::new().await?;
//! store.set_with_expiry("session:abc", &user_id, 86400).await?;
//!
//! let user_id: Option<String> = store.get("session:abc").await?;
//! let state: Option<String> = store.take("oauth:state:xyz").await?; // 읽는 즉시 삭제
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
