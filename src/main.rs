//! 캠프스테이션 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 조립합니다.
//! 저장소(MongoDB + Redis 또는 인메모리)를 선택하고, 만료된 리프레시 토큰을
//! 주기적으로 정리하는 백그라운드 작업을 띄웁니다.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use campstation_auth::caching::redis::RedisClient;
use campstation_auth::config::{JwtConfig, PasswordConfig, ServerConfig, StorageBackend, StorageConfig};
use campstation_auth::db::Database;
use campstation_auth::repositories::{
    InMemoryRefreshTokenRepository, InMemoryUserRepository, MongoRefreshTokenRepository,
    MongoUserRepository, RefreshTokenRepository, UserRepository,
};
use campstation_auth::routes::configure_all_routes;
use campstation_auth::services::auth::{AuthService, TokenService};
use campstation_auth::services::users::UserService;

/// 만료 리프레시 토큰 정리 주기
const TOKEN_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 캠프스테이션 인증 서비스 시작중...");

    let (user_repo, token_repo) = initialize_repositories().await?;

    let jwt_settings = JwtConfig::settings();
    info!("🔑 JWT 설정 로드됨: {:?}", jwt_settings);

    let token_service = Arc::new(TokenService::new(jwt_settings));
    let user_service = Arc::new(UserService::new(user_repo, PasswordConfig::bcrypt_cost()));
    let auth_service = web::Data::new(AuthService::new(
        user_service,
        token_service.clone(),
        token_repo,
    ));
    let token_service = web::Data::from(token_service);

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    spawn_token_purge(auth_service.clone());

    // HTTP 서버 시작
    start_http_server(auth_service, token_service).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화, Rate Limiting 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    auth_service: web::Data<AuthService>,
    token_service: web::Data<TokenService>,
) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Auth API: http://{}/api/auth", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = load_cors_origins();

    HttpServer::new(move || {
        let cors = configure_cors(&allowed_origins);

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))

            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            .app_data(auth_service.clone())
            .app_data(token_service.clone())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 표준 에러로 직접 출력
    eprintln!("Current profile: {}", profile);

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => eprintln!("{} 파일 로드 됨", file),
        Err(e) => eprintln!("환경 파일 로드 실패 ({}), 프로세스 환경 변수만 사용합니다", e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=campstation_auth::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// `STORAGE_BACKEND`에 따라 사용자/리프레시 토큰 저장소를 준비합니다
///
/// MongoDB 백엔드에서는 연결 후 인덱스를 생성합니다. Redis는 선택 사항이라
/// 연결에 실패해도 캐시 없이 계속 진행합니다.
async fn initialize_repositories()
-> io::Result<(Arc<dyn UserRepository>, Arc<dyn RefreshTokenRepository>)> {
    match StorageConfig::backend() {
        StorageBackend::Memory => {
            warn!("⚠️ 인메모리 저장소 사용 중 - 재시작하면 모든 데이터가 사라집니다");
            Ok((
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryRefreshTokenRepository::new()),
            ))
        }
        StorageBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");

            let database = Database::new().await.map_err(|e| {
                error!("데이터베이스 연결 실패: {}", e);
                io::Error::other(e.to_string())
            })?;

            let redis_client = match RedisClient::new().await {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("⚠️ Redis 연결 실패, 캐시 없이 실행합니다: {}", e);
                    None
                }
            };

            let user_repo = MongoUserRepository::new(
                database.clone(),
                redis_client,
                StorageConfig::user_cache_ttl_seconds(),
            );
            let token_repo = MongoRefreshTokenRepository::new(database);

            user_repo.create_indexes().await.map_err(|e| io::Error::other(e.to_string()))?;
            token_repo.create_indexes().await.map_err(|e| io::Error::other(e.to_string()))?;

            info!("✅ MongoDB 인덱스 준비 완료");

            Ok((Arc::new(user_repo), Arc::new(token_repo)))
        }
    }
}

/// 만료된 리프레시 토큰을 주기적으로 정리합니다
///
/// MongoDB에는 TTL 인덱스도 걸려 있지만, 인메모리 저장소는 이 작업으로만 정리됩니다.
fn spawn_token_purge(auth_service: web::Data<AuthService>) {
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(TOKEN_PURGE_INTERVAL);

        loop {
            interval.tick().await;

            match auth_service.purge_expired_tokens().await {
                Ok(0) => {}
                Ok(purged) => info!("🧹 만료된 Refresh Token {}개 정리", purged),
                Err(e) => warn!("만료 토큰 정리 실패: {}", e),
            }
        }
    });
}

/// `CORS_ALLOWED_ORIGINS` (쉼표 구분)에서 허용 Origin 목록을 읽습니다
///
/// 기본값은 로컬 프론트엔드 개발 서버들입니다.
fn load_cors_origins() -> Vec<String> {
    let origins: Vec<String> = std::env::var("CORS_ALLOWED_ORIGINS")
        .map(|value| {
            value
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect()
        })
        .unwrap_or_else(|_| {
            [
                "http://localhost:3000",
                "http://127.0.0.1:3000",
                "http://localhost:5173",
                "http://127.0.0.1:5173",
                "http://localhost:8080",
                "http://127.0.0.1:8080",
            ]
            .iter()
            .map(|origin| origin.to_string())
            .collect()
        });

    info!("CORS 허용 Origin: {:?}", origins);
    origins
}

/// CORS 설정을 구성합니다
fn configure_cors(allowed_origins: &[String]) -> Cors {
    let cors = allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
