//! # 사용자 리포지토리 구현
//!
//! MongoDB `users` 컬렉션을 주 저장소로 사용하고, 이메일 조회 결과를
//! Redis에 캐싱합니다. 캐시 오류는 로그만 남기고 DB 결과를 그대로 사용합니다.
//!
//! 사용자 ID는 `counters` 컬렉션의 `{ _id: "users", seq }` 문서를
//! 원자적으로 증가시켜 할당합니다.

use async_trait::async_trait;
use mongodb::{
    Collection, IndexModel,
    bson::{Document, doc},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
};

use crate::{
    caching::redis::RedisClient,
    db::Database,
    domain::entities::users::User,
    errors::{AppError, AppResult},
    repositories::is_duplicate_key_error,
};

use super::UserRepository;

const USERS_COLLECTION: &str = "users";
const COUNTERS_COLLECTION: &str = "counters";

pub struct MongoUserRepository {
    db: Database,
    redis: Option<RedisClient>,
    cache_ttl_seconds: u64,
}

impl MongoUserRepository {
    /// `redis`가 `None`이면 캐시 없이 동작합니다.
    pub fn new(db: Database, redis: Option<RedisClient>, cache_ttl_seconds: u64) -> Self {
        Self {
            db,
            redis,
            cache_ttl_seconds,
        }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(USERS_COLLECTION)
    }

    fn email_cache_key(email: &str) -> String {
        format!("user:email:{}", email)
    }

    async fn cached(&self, email: &str) -> Option<User> {
        let redis = self.redis.as_ref()?;

        match redis.get::<User>(&Self::email_cache_key(email)).await {
            Ok(user) => user,
            Err(e) => {
                log::warn!("사용자 캐시 조회 실패 (DB로 폴백): {}", e);
                None
            }
        }
    }

    async fn cache(&self, user: &User) {
        if let Some(redis) = &self.redis {
            if let Err(e) = redis
                .set_with_expiry(&Self::email_cache_key(&user.email), user, self.cache_ttl_seconds)
                .await
            {
                log::warn!("사용자 캐시 저장 실패: {}", e);
            }
        }
    }

    async fn evict(&self, email: &str) {
        if let Some(redis) = &self.redis {
            if let Err(e) = redis.del(&Self::email_cache_key(email)).await {
                log::warn!("사용자 캐시 삭제 실패: {}", e);
            }
        }
    }

    /// 다음 사용자 ID를 할당합니다.
    async fn next_id(&self) -> AppResult<i64> {
        let counters = self
            .db
            .get_database()
            .collection::<Document>(COUNTERS_COLLECTION);

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = counters
            .find_one_and_update(
                doc! { "_id": USERS_COLLECTION },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::DatabaseError("사용자 ID 시퀀스를 할당하지 못했습니다".to_string()))?;

        counter
            .get_i64("seq")
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        if let Some(cached) = self.cached(email).await {
            return Ok(Some(cached));
        }

        let user = self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            self.cache(user).await;
        }

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        if self.exists_by_email(&user.email).await? {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        user.id = self.next_id().await?;

        // 동시 가입은 unique 인덱스가 막는다
        self.collection()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("이미 사용 중인 이메일입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        self.evict(&user.email).await;

        log::debug!("사용자 저장 완료 - ID: {}", user.id);
        Ok(user)
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        self.collection()
            .delete_one(doc! { "_id": user.id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.evict(&user.email).await;

        log::debug!("사용자 삭제 완료 - ID: {}", user.id);
        Ok(())
    }
}
