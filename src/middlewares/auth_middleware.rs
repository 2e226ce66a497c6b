//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Bearer 액세스 토큰을 검증하고
//! 요청 주체를 추출합니다. 토큰 검증에는 앱에 등록된
//! `web::Data<TokenService>`를 사용합니다.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인증이 필요한 라우트에 적용하는 미들웨어
///
/// 토큰이 없거나 유효하지 않으면 핸들러를 호출하지 않고 401을 반환합니다.
pub struct AuthMiddleware;

impl AuthMiddleware {
    pub fn required() -> Self {
        AuthMiddleware
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
