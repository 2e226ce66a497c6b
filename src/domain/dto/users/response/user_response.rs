use serde::{Deserialize, Serialize};

use crate::domain::entities::users::{Role, User};
use crate::domain::models::token::TokenPair;

/// 사용자 응답 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            name,
            email,
            role,
            ..
        } = user;

        Self {
            id,
            name,
            email,
            role,
        }
    }
}

/// 가입/로그인/갱신 공통 응답 DTO
///
/// 액세스 토큰은 기존 클라이언트와의 호환을 위해 `token` 필드로 직렬화됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(rename = "token")]
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(tokens: TokenPair, user: User) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.expires_in,
            user: UserResponse::from(user),
        }
    }
}
