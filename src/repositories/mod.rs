//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! MongoDB를 주 저장소로 사용하는 리포지토리들을 제공합니다.
//! 인스턴스는 조립 루트([`crate::state::AppState`])에서 한 번 생성되어
//! `Arc`로 공유됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::user_repo::UserRepository;
//!
//! let user_repo = UserRepository::new(database);
//! let user = user_repo.find_by_username("alice@example.com").await?;
//! ```

pub mod users;
