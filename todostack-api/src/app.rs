/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use todostack_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = todostack_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::admin_log, weather::WeatherClient};
use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use todostack_shared::auth::middleware::{create_jwt_middleware, require_admin};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Client for the external weather feed
    pub weather: WeatherClient,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        let weather = WeatherClient::new(config.weather.url.clone());
        Self {
            db,
            config: Arc::new(config),
            weather,
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                  # Health check (public)
/// ├── /v1/
/// │   ├── /auth/
/// │   │   ├── POST /signup
/// │   │   └── POST /signin
/// │   ├── /users/                              # JWT required
/// │   │   ├── GET /:id
/// │   │   └── PUT /password
/// │   ├── /todos/                              # JWT required
/// │   │   ├── POST   /
/// │   │   ├── GET    /?page=&size=
/// │   │   ├── GET    /:todo_id
/// │   │   ├── POST   /:todo_id/comments
/// │   │   ├── GET    /:todo_id/comments
/// │   │   ├── POST   /:todo_id/managers
/// │   │   ├── GET    /:todo_id/managers
/// │   │   └── DELETE /:todo_id/managers/:manager_id
/// │   └── /admin/                              # JWT + admin role + audit
/// │       ├── PATCH  /users/:id/role
/// │       └── DELETE /comments/:id
/// ```
///
/// # Middleware Stack
///
/// Layers are added innermost first, so on the admin subtree the JWT
/// middleware runs before the role guard, which runs before the audit
/// logger.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Owned secret: the closure must not borrow from `state`, which is
    // moved into the router below.
    let jwt = create_jwt_middleware(state.jwt_secret().to_string());

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/signin", post(routes::auth::signin));

    // User routes (require JWT authentication)
    let user_routes = Router::new()
        .route("/password", put(routes::users::change_password))
        .route("/:id", get(routes::users::get_user))
        .layer(middleware::from_fn(jwt.clone()));

    // Todo routes with nested comments and managers (require JWT)
    let todo_routes = Router::new()
        .route("/", post(routes::todos::save_todo).get(routes::todos::get_todos))
        .route("/:todo_id", get(routes::todos::get_todo))
        .route(
            "/:todo_id/comments",
            post(routes::comments::save_comment).get(routes::comments::get_comments),
        )
        .route(
            "/:todo_id/managers",
            post(routes::managers::save_manager).get(routes::managers::get_managers),
        )
        .route(
            "/:todo_id/managers/:manager_id",
            delete(routes::managers::delete_manager),
        )
        .layer(middleware::from_fn(jwt.clone()));

    // Admin routes: JWT, then role guard, then audit logging
    let admin_routes = Router::new()
        .route("/users/:id/role", patch(routes::admin::change_user_role))
        .route("/comments/:id", delete(routes::admin::delete_comment))
        .layer(middleware::from_fn(admin_log::admin_audit_middleware))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn(jwt));

    // Build complete v1 API
    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/todos", todo_routes)
        .nest("/admin", admin_routes);

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ApiConfig, DatabaseConfig, JwtConfig, WeatherConfig, DEFAULT_WEATHER_URL,
    };

    // Builds the full router from an owned state. The auth layers must
    // capture the JWT secret by value, not borrow it from `state`.
    #[tokio::test]
    async fn test_build_router_takes_ownership_of_state() {
        let db = PgPool::connect_lazy("postgresql://localhost/unused")
            .expect("lazy pool creation should not touch the network");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/unused".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            weather: WeatherConfig {
                url: DEFAULT_WEATHER_URL.to_string(),
            },
        };

        let state = AppState::new(db, config);
        let _app = build_router(state);
    }
}
