/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (skipped when `DATABASE_URL` is not set)
/// - Test user creation with signed tokens
/// - Direct todo creation bypassing the weather feed
/// - API request helpers

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use tower::Service as _;
use uuid::Uuid;

use todostack_api::app::{build_router, AppState};
use todostack_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig, WeatherConfig};
use todostack_shared::auth::jwt::{create_token, Claims};
use todostack_shared::auth::password::hash_password;
use todostack_shared::models::todo::{CreateTodo, Todo};
use todostack_shared::models::user::{CreateUser, User, UserRole};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context, or `None` when `DATABASE_URL` is not
    /// set (so the suite can run without Postgres)
    ///
    /// The weather feed points at an unroutable address; tests that
    /// exercise the feed use [`TestContext::with_weather_url`] and a
    /// local stub server.
    pub async fn new() -> Option<Self> {
        Self::with_weather_url("http://127.0.0.1:1/weather.json").await
    }

    /// Creates a test context whose weather client targets `weather_url`
    pub async fn with_weather_url(weather_url: &str) -> Option<Self> {
        let database_url = std::env::var("DATABASE_URL").ok()?;

        let db = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        // Path relative to Cargo.toml, not this file
        sqlx::migrate!("../todostack-shared/migrations")
            .run(&db)
            .await
            .expect("Failed to run migrations");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
            },
            weather: WeatherConfig {
                url: weather_url.to_string(),
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Some(TestContext { db, app })
    }

    /// Creates a user directly and returns it with a valid bearer token
    pub async fn create_user(&self, role: UserRole) -> (User, String) {
        let email = format!("test-{}@example.com", Uuid::new_v4());
        let password_hash = hash_password("Password1!").unwrap();

        let user = User::create(
            &self.db,
            CreateUser {
                email,
                password_hash,
                role,
            },
        )
        .await
        .expect("Failed to create test user");

        let claims = Claims::new(user.id, user.email.clone(), user.role);
        let token = create_token(&claims, TEST_JWT_SECRET).unwrap();

        (user, token)
    }

    /// Creates a todo directly, bypassing the weather feed
    pub async fn create_todo(&self, owner: Option<&User>, title: &str) -> Todo {
        match owner {
            Some(owner) => Todo::create(
                &self.db,
                CreateTodo {
                    title: title.to_string(),
                    contents: "integration test contents".to_string(),
                    weather: "Sunny".to_string(),
                    user_id: owner.id,
                },
            )
            .await
            .expect("Failed to create test todo"),
            None => sqlx::query_as::<_, Todo>(
                r#"
                INSERT INTO todos (title, contents, weather, user_id)
                VALUES ($1, 'orphaned', 'Sunny', NULL)
                RETURNING id, title, contents, weather, user_id, created_at, updated_at
                "#,
            )
            .bind(title)
            .fetch_one(&self.db)
            .await
            .expect("Failed to create ownerless todo"),
        }
    }

    /// Sends a JSON request and returns (status, parsed body)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Deletes a test user and everything cascading from it
    pub async fn delete_user(&self, user: &User) {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id)
            .execute(&self.db)
            .await
            .expect("Failed to delete test user");
    }

    /// Deletes a test todo and its comments/managers
    pub async fn delete_todo(&self, todo_id: Uuid) {
        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(todo_id)
            .execute(&self.db)
            .await
            .expect("Failed to delete test todo");
    }
}
