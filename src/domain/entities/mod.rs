//! # Domain Entities Module
//!
//! MongoDB 컬렉션과 1:1로 대응되는 문서 구조체들입니다.
//!
//! | 엔티티 | 컬렉션 | 식별자 |
//! |--------|--------|--------|
//! | [`users::User`] | `users` | `_id: i64` (`counters` 컬렉션에서 할당) |
//! | [`tokens::RefreshToken`] | `refresh_tokens` | `_id: ObjectId` |
//!
//! 시간 필드는 모두 `bson::DateTime`(밀리초 정밀도, UTC)을 사용합니다.

pub mod users;
pub mod tokens;

pub use users::{Role, User};
pub use tokens::RefreshToken;
