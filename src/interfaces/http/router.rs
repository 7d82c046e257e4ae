//! API Router with Swagger UI

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{CategoryService, ProductService, UserService};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{
    CategoryRepository, ProductRepository, UserRepository,
};
use crate::interfaces::http::common::{ApiError, MessageResponse};
use crate::interfaces::http::middleware::{
    guard, AllowedRoles, AuthState, Stage, SESSION, SESSION_WITH_CREDENTIAL, SESSION_COOKIE,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{categories, health, products, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        categories::create_category,
        categories::list_categories,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        products::create_product,
        products::list_products,
        products::paginate_products,
        products::get_product,
        products::update_product,
        products::delete_product,
        users::register,
        users::login,
        users::update_password,
    ),
    components(
        schemas(
            MessageResponse,
            health::HealthResponse,
            health::ComponentHealth,
            categories::CategoryDto,
            categories::CategoryRefDto,
            categories::CategoryRequest,
            products::ProductDto,
            products::ProductPageDto,
            products::CreateProductRequest,
            products::UpdateProductRequest,
            users::RegisterRequest,
            users::LoginRequest,
            users::UpdatePasswordRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Categories", description = "Catalog categories"),
        (name = "Products", description = "Catalog products and paginated search"),
        (name = "Users", description = "Registration, cookie login and password change"),
    ),
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = "REST API for a small e-commerce catalog"
    )
)]
pub struct ApiDoc;

/// Roles allowed to create products
const PRODUCT_CREATORS: [i32; 2] = [0, 1];

fn panic_response(_: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked");
    ApiError::internal("Internal server error").into_response()
}

pub fn create_api_router(db: DatabaseConnection, jwt_config: JwtConfig, bcrypt_cost: u32) -> Router {
    let user_repository = Arc::new(UserRepository::new(db.clone()));

    let auth = AuthState {
        jwt_config: jwt_config.clone(),
        users: user_repository.clone(),
    };

    let category_state = categories::CategoryHandlerState {
        category_service: Arc::new(CategoryService::new(Arc::new(CategoryRepository::new(
            db.clone(),
        )))),
    };
    let product_state = products::ProductHandlerState {
        product_service: Arc::new(ProductService::new(Arc::new(ProductRepository::new(
            db.clone(),
        )))),
    };
    let user_state = users::UserHandlerState {
        user_service: Arc::new(UserService::new(user_repository, jwt_config, bcrypt_cost)),
    };
    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    let category_routes = Router::new()
        .route(
            "/category",
            get(categories::list_categories).merge(guard(
                post(categories::create_category),
                &auth,
                SESSION_WITH_CREDENTIAL,
            )),
        )
        .route(
            "/category/{id}",
            get(categories::get_category).merge(guard(
                put(categories::update_category).delete(categories::delete_category),
                &auth,
                SESSION_WITH_CREDENTIAL,
            )),
        )
        .with_state(category_state);

    let product_routes = Router::new()
        .route(
            "/product",
            get(products::list_products).merge(guard(
                post(products::create_product),
                &auth,
                &[
                    Stage::Authenticate,
                    Stage::GetCredential,
                    Stage::Authorize(AllowedRoles::new(PRODUCT_CREATORS)),
                ],
            )),
        )
        .route("/product/page", get(products::paginate_products))
        .route(
            "/product/{id}",
            get(products::get_product).merge(guard(
                put(products::update_product).delete(products::delete_product),
                &auth,
                SESSION_WITH_CREDENTIAL,
            )),
        )
        .with_state(product_state);

    let user_routes = Router::new()
        .route("/user/register", post(users::register))
        .route("/user/Login", post(users::login))
        .route(
            "/user/update-password",
            guard(put(users::update_password), &auth, SESSION),
        )
        .with_state(user_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let api_routes = Router::new()
        .merge(category_routes)
        .merge(product_routes)
        .merge(user_routes);

    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/api/v1", api_routes)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use sea_orm::prelude::Expr;
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::crypto::jwt::{create_token, verify_token};
    use crate::infrastructure::crypto::password::TEST_COST;
    use crate::infrastructure::database::connect_in_memory;
    use crate::infrastructure::database::entities::user;

    const SECRET: &str = "router-secret";

    struct TestApp {
        router: Router,
        db: DatabaseConnection,
    }

    async fn app() -> TestApp {
        let db = connect_in_memory().await;
        let router = create_api_router(db.clone(), JwtConfig::new(SECRET), TEST_COST);
        TestApp { router, db }
    }

    struct Reply {
        status: StatusCode,
        headers: axum::http::HeaderMap,
        body: Value,
    }

    impl TestApp {
        async fn send(
            &self,
            method: &str,
            uri: &str,
            body: Option<Value>,
            cookie: Option<&str>,
        ) -> Reply {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(cookie) = cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            let req = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let resp = self.router.clone().oneshot(req).await.unwrap();
            let status = resp.status();
            let headers = resp.headers().clone();
            let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            Reply {
                status,
                headers,
                body,
            }
        }

        /// Register + login, returning the `token=...` cookie pair.
        async fn session(&self, username: &str, email: &str) -> String {
            let reg = self
                .send(
                    "POST",
                    "/api/v1/user/register",
                    Some(json!({
                        "username": username,
                        "email": email,
                        "phone_number": "555",
                        "password": "secret1"
                    })),
                    None,
                )
                .await;
            assert_eq!(reg.status, StatusCode::CREATED);

            let login = self
                .send(
                    "POST",
                    "/api/v1/user/Login",
                    Some(json!({"email": email, "password": "secret1"})),
                    None,
                )
                .await;
            assert_eq!(login.status, StatusCode::OK);

            let set_cookie = login.headers[header::SET_COOKIE].to_str().unwrap();
            set_cookie.split(';').next().unwrap().to_string()
        }

        async fn set_role(&self, email: &str, role: i32) {
            user::Entity::update_many()
                .col_expr(user::Column::Role, Expr::value(role))
                .filter(user::Column::Email.eq(email))
                .exec(&self.db)
                .await
                .unwrap();
        }

        async fn category(&self, cookie: &str, name: &str) -> i64 {
            let created = self
                .send("POST", "/api/v1/category", Some(json!({"name": name})), Some(cookie))
                .await;
            assert_eq!(created.status, StatusCode::CREATED);

            let all = self.send("GET", "/api/v1/category", None, None).await;
            all.body
                .as_array()
                .unwrap()
                .iter()
                .find(|c| c["name"] == name)
                .and_then(|c| c["id"].as_i64())
                .unwrap()
        }
    }

    #[tokio::test]
    async fn register_login_and_wrong_password() {
        let app = app().await;

        let reg = app
            .send(
                "POST",
                "/api/v1/user/register",
                Some(json!({
                    "username": "alice1",
                    "email": "a@x.com",
                    "phone_number": "555",
                    "password": "secret1"
                })),
                None,
            )
            .await;
        assert_eq!(reg.status, StatusCode::CREATED);
        assert_eq!(reg.body["message"], "registration success");

        let login = app
            .send(
                "POST",
                "/api/v1/user/Login",
                Some(json!({"email": "a@x.com", "password": "secret1"})),
                None,
            )
            .await;
        assert_eq!(login.status, StatusCode::OK);
        assert_eq!(login.body["message"], "login successful");

        let cookie = login.headers[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));

        let token = cookie["token=".len()..].split(';').next().unwrap();
        let claims = verify_token(token, &JwtConfig::new(SECRET)).unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);

        let wrong = app
            .send(
                "POST",
                "/api/v1/user/Login",
                Some(json!({"email": "a@x.com", "password": "wrong"})),
                None,
            )
            .await;
        let unknown = app
            .send(
                "POST",
                "/api/v1/user/Login",
                Some(json!({"email": "nobody@x.com", "password": "secret1"})),
                None,
            )
            .await;
        assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.body, unknown.body);
        assert_eq!(wrong.body["message"], "invalid username or password");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let app = app().await;
        app.session("alice1", "a@x.com").await;

        let dup = app
            .send(
                "POST",
                "/api/v1/user/register",
                Some(json!({
                    "username": "alice2",
                    "email": "a@x.com",
                    "phone_number": "555",
                    "password": "secret1"
                })),
                None,
            )
            .await;
        assert_eq!(dup.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn protected_routes_need_a_session() {
        let app = app().await;

        let missing = app
            .send("POST", "/api/v1/category", Some(json!({"name": "Books"})), None)
            .await;
        assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
        assert_eq!(missing.body["message"], "Cannot access resources");

        let garbage = app
            .send(
                "POST",
                "/api/v1/category",
                Some(json!({"name": "Books"})),
                Some("token=not-a-jwt"),
            )
            .await;
        assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
        assert_eq!(garbage.body["message"], "your session has expired");
    }

    #[tokio::test]
    async fn category_lifecycle() {
        let app = app().await;
        let cookie = app.session("alice1", "a@x.com").await;
        let id = app.category(&cookie, "Books").await;

        let fetched = app
            .send("GET", &format!("/api/v1/category/{}", id), None, None)
            .await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body["name"], "Books");

        let updated = app
            .send(
                "PUT",
                &format!("/api/v1/category/{}", id),
                Some(json!({"name": "Comics"})),
                Some(&cookie),
            )
            .await;
        assert_eq!(updated.status, StatusCode::OK);
        assert_eq!(updated.body["message"], "category updated");

        let invalid = app
            .send(
                "PUT",
                &format!("/api/v1/category/{}", id),
                Some(json!({"name": ""})),
                Some(&cookie),
            )
            .await;
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

        let deleted = app
            .send("DELETE", &format!("/api/v1/category/{}", id), None, Some(&cookie))
            .await;
        assert_eq!(deleted.status, StatusCode::OK);
        assert_eq!(deleted.body["message"], "category deleted");

        let again = app
            .send("DELETE", &format!("/api/v1/category/{}", id), None, Some(&cookie))
            .await;
        assert_eq!(again.status, StatusCode::NOT_FOUND);
        assert_eq!(again.body["message"], "Category not found");

        let gone = app
            .send("GET", &format!("/api/v1/category/{}", id), None, None)
            .await;
        assert_eq!(gone.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let app = app().await;
        let resp = app.send("GET", "/api/v1/product/abc", None, None).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn product_creation_is_role_gated() {
        let app = app().await;
        let cookie = app.session("alice1", "a@x.com").await;
        let category_id = app.category(&cookie, "Kitchen").await;
        let body = json!({"name": "Kettle", "price": 19.99, "category_id": category_id});

        let standard = app
            .send("POST", "/api/v1/product", Some(body.clone()), Some(&cookie))
            .await;
        assert_eq!(standard.status, StatusCode::CREATED);
        assert_eq!(standard.body["message"], "new product created");

        app.set_role("a@x.com", 1).await;
        let privileged = app
            .send("POST", "/api/v1/product", Some(body.clone()), Some(&cookie))
            .await;
        assert_eq!(privileged.status, StatusCode::CREATED);

        app.set_role("a@x.com", 2).await;
        let denied = app
            .send("POST", "/api/v1/product", Some(body), Some(&cookie))
            .await;
        assert_eq!(denied.status, StatusCode::FORBIDDEN);
        assert_eq!(denied.body["message"], "Access denied");
    }

    #[tokio::test]
    async fn product_crud_and_pages() {
        let app = app().await;
        let cookie = app.session("alice1", "a@x.com").await;
        let category_id = app.category(&cookie, "Kitchen").await;

        for name in ["Blue mug", "Red mug", "Plate", "Green mug"] {
            let resp = app
                .send(
                    "POST",
                    "/api/v1/product",
                    Some(json!({"name": name, "price": 5.5, "category_id": category_id, "stock": 3})),
                    Some(&cookie),
                )
                .await;
            assert_eq!(resp.status, StatusCode::CREATED);
        }

        let invalid = app
            .send(
                "POST",
                "/api/v1/product",
                Some(json!({"name": "Free", "price": 0, "category_id": category_id})),
                Some(&cookie),
            )
            .await;
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

        let page = app
            .send("GET", "/api/v1/product/page?search=MUG&limit=2&sort=desc", None, None)
            .await;
        assert_eq!(page.status, StatusCode::OK);
        assert_eq!(page.body["total_rows"], 3);
        assert_eq!(page.body["total_pages"], 2);
        assert_eq!(page.body["current_page"], 0);
        assert_eq!(page.body["data_limit"], 2);
        let data = page.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["name"], "Green mug");
        assert_eq!(data[0]["category"]["name"], "Kitchen");

        let defaults = app
            .send("GET", "/api/v1/product/page?page=x&limit=0", None, None)
            .await;
        assert_eq!(defaults.body["data_limit"], 10);
        assert_eq!(defaults.body["total_rows"], 4);

        let first_id = app.send("GET", "/api/v1/product", None, None).await.body[0]["id"]
            .as_i64()
            .unwrap();

        let updated = app
            .send(
                "PUT",
                &format!("/api/v1/product/{}", first_id),
                Some(json!({"price": 7.25})),
                Some(&cookie),
            )
            .await;
        assert_eq!(updated.status, StatusCode::OK);
        assert_eq!(updated.body["message"], "product updated");

        let fetched = app
            .send("GET", &format!("/api/v1/product/{}", first_id), None, None)
            .await;
        assert_eq!(fetched.body["name"], "Blue mug");
        assert_eq!(fetched.body["price"], 7.25);
        assert_eq!(fetched.body["stock"], 3);

        let deleted = app
            .send("DELETE", &format!("/api/v1/product/{}", first_id), None, Some(&cookie))
            .await;
        assert_eq!(deleted.body["message"], "product deleted");

        let again = app
            .send("DELETE", &format!("/api/v1/product/{}", first_id), None, Some(&cookie))
            .await;
        assert_eq!(again.status, StatusCode::NOT_FOUND);
        assert_eq!(again.body["message"], "Product not found");
    }

    #[tokio::test]
    async fn password_update_needs_session_and_takes_effect() {
        let app = app().await;

        let anonymous = app
            .send(
                "PUT",
                "/api/v1/user/update-password",
                Some(json!({"password": "secret2"})),
                None,
            )
            .await;
        assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

        let cookie = app.session("alice1", "a@x.com").await;
        let updated = app
            .send(
                "PUT",
                "/api/v1/user/update-password",
                Some(json!({"password": "secret2"})),
                Some(&cookie),
            )
            .await;
        assert_eq!(updated.status, StatusCode::OK);
        assert_eq!(updated.body["message"], "Password updated successfully");

        let login = app
            .send(
                "POST",
                "/api/v1/user/Login",
                Some(json!({"email": "a@x.com", "password": "secret2"})),
                None,
            )
            .await;
        assert_eq!(login.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn password_update_for_vanished_user_is_unauthorized() {
        let app = app().await;
        let token = create_token(&uuid::Uuid::new_v4().to_string(), &JwtConfig::new(SECRET))
            .unwrap();
        let cookie = format!("{}={}", SESSION_COOKIE, token);

        let resp = app
            .send(
                "PUT",
                "/api/v1/user/update-password",
                Some(json!({"password": "secret2"})),
                Some(&cookie),
            )
            .await;
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
        assert_eq!(resp.body["message"], "Invalid session");
    }

    #[tokio::test]
    async fn far_page_is_empty_not_an_error() {
        let app = app().await;
        let cookie = app.session("alice1", "a@x.com").await;
        let category_id = app.category(&cookie, "Books").await;
        let created = app
            .send(
                "POST",
                "/api/v1/product",
                Some(json!({"name": "Novel", "price": 9.5, "category_id": category_id})),
                Some(&cookie),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);

        for uri in [
            "/api/v1/product/page?page=1000000000000000000",
            "/api/v1/product/page?page=18446744073709551615&limit=100",
        ] {
            let page = app.send("GET", uri, None, None).await;
            assert_eq!(page.status, StatusCode::OK, "{}", uri);
            assert_eq!(page.body["data"], json!([]));
            assert_eq!(page.body["total_rows"], 1);
        }
    }

    #[tokio::test]
    async fn unsupported_method_on_guarded_path_is_405() {
        let app = app().await;

        for (method, uri) in [
            ("PATCH", "/api/v1/category"),
            ("PATCH", "/api/v1/category/1"),
            ("PATCH", "/api/v1/product/1"),
            ("GET", "/api/v1/user/update-password"),
            ("DELETE", "/api/v1/user/register"),
        ] {
            let resp = app.send(method, uri, None, None).await;
            assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, uri);
        }
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = app().await;
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/user/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let resp = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app().await;
        let resp = app.send("GET", "/health", None, None).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body["status"], "ok");
        assert_eq!(resp.body["version"], env!("CARGO_PKG_VERSION"));
        assert!(resp.headers.contains_key("x-request-id"));
    }
}
