//! # 인증 흐름 서비스
//!
//! 사용자 저장소, 토큰 서명기, 리프레시 토큰 원장을 조합해
//! 가입/로그인/토큰 갱신/내 정보/로그아웃을 구현합니다.
//!
//! ## 리프레시 토큰 수명 주기
//!
//! ```text
//! register ──► replace_for_user(새 레코드)        // 실패 시 사용자 삭제
//! login    ──► replace_for_user(새 레코드)        // 기존 세션 전부 폐기
//! refresh  ──► find_by_token ─► 만료? delete : rotate(기존 → 새 레코드)
//! logout   ──► delete_by_user
//! ```
//!
//! 사용자당 활성 리프레시 토큰은 항상 최대 1개입니다.
//! 같은 리프레시 토큰으로 동시에 갱신을 요청하면 `rotate`에 먼저 성공한
//! 요청 하나만 새 토큰을 받고 나머지는 401을 받습니다.

use std::sync::Arc;

use mongodb::bson::DateTime;

use crate::domain::dto::{AuthResponse, UserResponse};
use crate::domain::entities::tokens::RefreshToken;
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenPair;
use crate::errors::{AppError, AppResult};
use crate::repositories::tokens::RefreshTokenRepository;
use crate::services::auth::TokenService;
use crate::services::users::UserService;

const USER_NOT_FOUND: &str = "사용자를 찾을 수 없습니다";

pub struct AuthService {
    user_service: Arc<UserService>,
    token_service: Arc<TokenService>,
    token_repo: Arc<dyn RefreshTokenRepository>,
}

impl AuthService {
    pub fn new(
        user_service: Arc<UserService>,
        token_service: Arc<TokenService>,
        token_repo: Arc<dyn RefreshTokenRepository>,
    ) -> Self {
        Self {
            user_service,
            token_service,
            token_repo,
        }
    }

    /// 사용자에게 새 토큰 쌍을 발급하고 원장에 넣을 레코드를 함께 만듭니다.
    fn issue_tokens(&self, user: &User) -> AppResult<(TokenPair, RefreshToken)> {
        let tokens = self.token_service.generate_token_pair(&user.email)?;
        let record = RefreshToken::issue(
            user.id,
            &tokens.refresh_token,
            DateTime::now(),
            self.token_service.refresh_ttl(),
        );

        Ok((tokens, record))
    }

    /// 회원가입 후 바로 로그인된 상태의 토큰을 반환합니다.
    ///
    /// 토큰 발급이나 원장 기록이 실패하면 방금 만든 사용자를 삭제하므로
    /// 같은 이메일로 다시 가입할 수 있습니다.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<AuthResponse> {
        let user = self.user_service.register_user(name, email, password).await?;

        match self.start_session(&user).await {
            Ok(tokens) => Ok(AuthResponse::new(tokens, user)),
            Err(err) => {
                log::warn!("가입 후 세션 생성 실패, 사용자 롤백 - ID: {}: {}", user.id, err);
                if let Err(e) = self.user_service.remove_user(&user).await {
                    log::error!("가입 롤백 실패 - ID: {}: {}", user.id, e);
                }
                Err(err)
            }
        }
    }

    /// 토큰 쌍을 발급하고 사용자의 원장 레코드를 새 토큰으로 교체합니다.
    async fn start_session(&self, user: &User) -> AppResult<TokenPair> {
        let (tokens, record) = self.issue_tokens(user)?;
        self.token_repo.replace_for_user(record).await?;
        Ok(tokens)
    }

    /// 자격 증명을 확인하고, 기존 리프레시 토큰을 모두 폐기한 뒤 새 토큰을 발급합니다.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
        let user = self.user_service.authenticate(email, password).await?;

        let tokens = self.start_session(&user).await?;

        log::info!("로그인 성공 - 사용자 ID: {}", user.id);
        Ok(AuthResponse::new(tokens, user))
    }

    /// 리프레시 토큰을 새 토큰 쌍으로 교환합니다.
    ///
    /// 제시된 토큰은 교환과 동시에 원장에서 사라지므로 재사용할 수 없습니다.
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        if !self.token_service.validate_token(refresh_token) {
            log::warn!("Refresh Token 서명/만료 검증 실패");
            return Err(AppError::AuthenticationError("유효하지 않은 Refresh Token입니다".to_string()));
        }

        let current = self.token_repo
            .find_by_token(refresh_token)
            .await?
            .ok_or_else(|| {
                log::warn!("원장에 없는 Refresh Token 사용 시도");
                AppError::AuthenticationError("Refresh Token을 찾을 수 없습니다".to_string())
            })?;

        if current.is_expired(DateTime::now()) {
            self.token_repo.delete(&current).await?;
            return Err(AppError::AuthenticationError("만료된 Refresh Token입니다".to_string()));
        }

        let user = match self.user_service.find_by_id(current.user_id).await? {
            Some(user) => user,
            None => {
                // 주인 없는 레코드는 더 이상 쓸 수 없음
                self.token_repo.delete(&current).await?;
                return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
            }
        };

        let (tokens, next) = self.issue_tokens(&user)?;

        if !self.token_repo.rotate(&current, next).await? {
            log::warn!("Refresh Token 교체 경합에서 밀림 - 사용자 ID: {}", user.id);
            return Err(AppError::AuthenticationError("Refresh Token을 찾을 수 없습니다".to_string()));
        }

        log::debug!("Refresh Token 교체 완료 - 사용자 ID: {}", user.id);
        Ok(AuthResponse::new(tokens, user))
    }

    pub async fn get_current_user(&self, principal: &AuthenticatedUser) -> AppResult<UserResponse> {
        self.user_service
            .find_by_email(&principal.email)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    /// 사용자의 모든 리프레시 토큰을 폐기합니다.
    ///
    /// 이미 발급된 액세스 토큰은 만료될 때까지 유효합니다.
    pub async fn logout(&self, principal: &AuthenticatedUser) -> AppResult<()> {
        let user = self.user_service
            .find_by_email(&principal.email)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

        let revoked = self.token_repo.delete_by_user(user.id).await?;

        log::info!("로그아웃 - 사용자 ID: {}, 폐기된 Refresh Token: {}", user.id, revoked);
        Ok(())
    }

    /// 만료된 원장 레코드를 정리합니다. (백그라운드 작업용)
    pub async fn purge_expired_tokens(&self) -> AppResult<u64> {
        self.token_repo.purge_expired(DateTime::now()).await
    }
}
