//! # 사용자 관리 서비스 구현
//!
//! 회원가입, 자격 증명 확인, 사용자 조회를 담당합니다.
//!
//! ## 보안 설계 원칙
//!
//! - **bcrypt 해싱**: cost는 환경별로 다르며 (`PasswordConfig`) 해싱은
//!   actix 블로킹 스레드 풀에서 수행해 워커를 막지 않습니다.
//! - **동일한 실패 메시지**: 존재하지 않는 이메일과 잘못된 비밀번호는
//!   같은 401 메시지를 반환해 계정 존재 여부를 노출하지 않습니다.
//! - **민감 정보 제거**: 비밀번호 해시는 DTO 변환 시 제외됩니다.

use std::sync::Arc;
use std::time::Instant;

use actix_web::web;

use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::users::UserRepository;
use crate::utils::string_utils::{normalize_email, validate_required_string};

const INVALID_CREDENTIALS: &str = "잘못된 이메일 또는 비밀번호입니다";

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self {
            user_repo,
            bcrypt_cost,
        }
    }

    /// 새 사용자를 등록합니다. (역할: USER)
    ///
    /// 이메일이 이미 사용 중이면 `ConflictError`를 반환합니다.
    pub async fn register_user(&self, name: &str, email: &str, password: &str) -> AppResult<User> {
        let start_time = Instant::now();

        let name = validate_required_string(name, "이름")?;
        let email = normalize_email(email);

        // 해싱 비용을 치르기 전에 중복부터 확인
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let password = password.to_string();
        let cost = self.bcrypt_cost;
        let password_hash = web::block(move || bcrypt::hash(password, cost))
            .await
            .context("비밀번호 해싱 작업 실패")?
            .context("비밀번호 해싱 실패")?;

        let created = self.user_repo
            .create(User::new(name, email, password_hash))
            .await?;

        log::info!("신규 사용자 등록 - ID: {}, took {:?}", created.id, start_time.elapsed());
        Ok(created)
    }

    /// 이메일/비밀번호를 확인하고 사용자를 반환합니다.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email);

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                log::warn!("로그인 실패 - 등록되지 않은 이메일");
                return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
            }
        };

        let verify_start = Instant::now();
        let password = password.to_string();
        let password_hash = user.password_hash.clone();
        let is_valid = web::block(move || bcrypt::verify(password, &password_hash))
            .await
            .context("비밀번호 검증 작업 실패")?
            .context("비밀번호 검증 실패")?;

        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            log::warn!("로그인 실패 - 비밀번호 불일치, 사용자 ID: {}", user.id);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.user_repo.find_by_email(&normalize_email(email)).await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.user_repo.find_by_id(id).await
    }

    /// 가입 직후 후속 처리가 실패했을 때 방금 만든 사용자를 되돌립니다.
    pub async fn remove_user(&self, user: &User) -> AppResult<()> {
        self.user_repo.delete(user).await?;
        log::info!("사용자 삭제 - ID: {}", user.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::Role;
    use crate::repositories::users::InMemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::new()), 4)
    }

    #[actix_web::test]
    async fn test_register_hashes_password() {
        let service = service();

        let user = service.register_user(" a ", "A@X.com", "pw").await.unwrap();

        assert_eq!(user.name, "a");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "pw");
        assert!(bcrypt::verify("pw", &user.password_hash).unwrap());
    }

    #[actix_web::test]
    async fn test_register_duplicate_email_is_conflict() {
        let service = service();
        service.register_user("a", "a@x.com", "pw").await.unwrap();

        let result = service.register_user("b", "A@x.com", "other").await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_register_rejects_blank_name() {
        let result = service().register_user("   ", "a@x.com", "pw").await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_authenticate_uses_same_message_for_both_failures() {
        let service = service();
        service.register_user("a", "a@x.com", "pw").await.unwrap();

        assert_eq!(service.authenticate("a@x.com", "pw").await.unwrap().email, "a@x.com");

        let wrong_password = service.authenticate("a@x.com", "nope").await.unwrap_err();
        let unknown_email = service.authenticate("b@x.com", "pw").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, AppError::AuthenticationError(_)));
    }
}
