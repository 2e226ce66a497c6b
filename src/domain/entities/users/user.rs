//! User Entity Implementation
//!
//! 이메일/비밀번호로 가입한 사용자를 표현합니다.
//! 가입 이후 이 서비스 안에서는 변경되지 않습니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 저장소와 API 응답 모두 `USER` / `ADMIN` 문자열로 표현됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 숫자형 사용자 ID
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    /// 사용자 이메일 (unique, 소문자로 정규화되어 저장)
    pub email: String,
    /// bcrypt 해시
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성
    ///
    /// ID는 저장 시 리포지토리가 할당하며, 그 전까지는 0입니다.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: 0,
            name,
            email,
            password_hash,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }
}
