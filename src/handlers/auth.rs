use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::auth::jwt::create_access_token;
use crate::auth::middleware::AuthenticatedUser;
use crate::auth::password::{DUMMY_HASH, verify_password};
use crate::config::Settings;
use crate::db::users as user_db;
use crate::models::users::{LoginForm, TokenResponse, UserResponse};

/// POST /api/v1/auth/token — exchange form credentials for a bearer token.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    settings: web::Data<Settings>,
    form: web::Form<LoginForm>,
) -> impl Responder {
    let form = form.into_inner();

    let user = match user_db::find_by_email(db.get_ref(), &form.username).await {
        Ok(user) => user,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let Some(user) = user else {
        // Burn a bcrypt verification so unknown emails take as long as
        // wrong passwords.
        let _ = verify_password(&form.password, DUMMY_HASH);
        return HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Incorrect email or password",
        }));
    };

    if !verify_password(&form.password, &user.password_hash) {
        return HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Incorrect email or password",
        }));
    }

    if !user.is_active {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Inactive user",
        }));
    }

    match create_access_token(
        &user.email,
        &settings.secret_key,
        settings.access_token_expire_minutes,
    ) {
        Ok(token) => HttpResponse::Ok().json(TokenResponse {
            access_token: token,
            token_type: "bearer".to_string(),
        }),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to issue token: {e}"),
        })),
    }
}

/// GET /api/v1/auth/me — return the authenticated user's profile.
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::validate_token;
    use crate::config::StorageBackend;
    use crate::models::users;
    use actix_web::{App, test};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    const TEST_SECRET: &str = "handler-test-secret";

    fn test_settings() -> Settings {
        Settings {
            database_url: "postgres://unused".to_string(),
            secret_key: TEST_SECRET.to_string(),
            access_token_expire_minutes: 30,
            upload_dir: "static/uploads".to_string(),
            storage_backend: StorageBackend::Local,
            s3: None,
            smtp: None,
            bootstrap_admin: None,
            port: 8080,
        }
    }

    // Low bcrypt cost keeps these tests quick.
    fn stored_user(password: &str, is_active: bool) -> users::Model {
        users::Model {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            full_name: "Admin".to_string(),
            company_name: None,
            role: "admin".to_string(),
            is_active,
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    async fn post_login(
        db: DatabaseConnection,
        username: &str,
        password: &str,
    ) -> (u16, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_settings()))
                .route("/auth/token", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/token")
            .set_form([("username", username), ("password", password)])
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let body: serde_json::Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_unknown_email_and_wrong_password_share_a_message() {
        let no_such_user = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();
        let (status, unknown_body) =
            post_login(no_such_user, "nobody@example.com", "whatever").await;
        assert_eq!(status, 401);

        let wrong_password = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_user("correct-horse", true)]])
            .into_connection();
        let (status, mismatch_body) =
            post_login(wrong_password, "admin@example.com", "tr0ub4dor").await;
        assert_eq!(status, 401);

        assert_eq!(unknown_body["error"], "Incorrect email or password");
        assert_eq!(unknown_body["error"], mismatch_body["error"]);
    }

    #[actix_web::test]
    async fn test_inactive_user_with_correct_password_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_user("secret", false)]])
            .into_connection();

        let (status, body) = post_login(db, "admin@example.com", "secret").await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "Inactive user");
        assert!(body.get("access_token").is_none());
    }

    #[actix_web::test]
    async fn test_active_user_with_correct_password_gets_a_token() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_user("secret", true)]])
            .into_connection();

        let (status, body) = post_login(db, "admin@example.com", "secret").await;
        assert_eq!(status, 200);
        assert_eq!(body["token_type"], "bearer");

        let token = body["access_token"].as_str().unwrap();
        let claims = validate_token(token, TEST_SECRET).unwrap();
        assert_eq!(claims.sub, "admin@example.com");
    }
}
