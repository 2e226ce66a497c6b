//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 사용자 조회 캐시를 제공합니다.
//! 값은 JSON으로 직렬화되어 TTL과 함께 저장됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use campstation_auth::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("user:email:a@x.com", &user, 600).await?;
//! let cached: Option<User> = cache.get("user:email:a@x.com").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
