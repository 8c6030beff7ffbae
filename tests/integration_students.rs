mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{build_app, create_test_account, create_test_course, generate_unique_email};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

async fn admin_token(pool: &PgPool, app: axum::Router) -> String {
    let email = generate_unique_email();
    create_test_account(pool, &email, "adminpass123", "admin").await;
    get_auth_token(app, &email, "adminpass123").await
}

fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_as_admin(pool: PgPool) {
    let app = build_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    let student_email = generate_unique_email();
    let request = json_request(
        "POST",
        "/api/students",
        &token,
        json!({
            "name": "Student Test",
            "email": student_email,
            "password": "studentpass123"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["email"], student_email);
    assert_eq!(body["role"], "student");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_create_student(pool: PgPool) {
    let app = build_app(pool.clone());
    let email = generate_unique_email();
    create_test_account(&pool, &email, "studentpass123", "student").await;
    let token = get_auth_token(app.clone(), &email, "studentpass123").await;

    let request = json_request(
        "POST",
        "/api/students",
        &token,
        json!({
            "name": "Other Student",
            "email": generate_unique_email(),
            "password": "studentpass123"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_short_password_creates_no_identity(pool: PgPool) {
    let app = build_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    let student_email = generate_unique_email();
    let request = json_request(
        "POST",
        "/api/students",
        &token,
        json!({
            "name": "Student Test",
            "email": student_email,
            "password": "12345"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let identities: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM identities WHERE email = $1")
            .bind(&student_email)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(identities, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_with_enrollments(pool: PgPool) {
    let app = build_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    let course_id = create_test_course(&pool, "Rust 101").await;

    let student_email = generate_unique_email();
    let request = json_request(
        "POST",
        "/api/students",
        &token,
        json!({
            "name": "Enrolled Student",
            "email": student_email,
            "password": "studentpass123",
            "course_ids": [course_id]
        }),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let student_id = body["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/students/{}/enrollments", student_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let enrollments: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(enrollments.as_array().unwrap().len(), 1);
    assert_eq!(enrollments[0]["title"], "Rust 101");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_student_cascades_enrollments(pool: PgPool) {
    let app = build_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;
    let course_id = create_test_course(&pool, "Cascade Course").await;

    let student_email = generate_unique_email();
    let student = create_test_account(&pool, &student_email, "studentpass123", "student").await;
    sqlx::query("INSERT INTO enrollments (profile_id, course_id) VALUES ($1, $2)")
        .bind(student.id)
        .bind(course_id)
        .execute(&pool)
        .await
        .unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/students/{}", student.id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let enrollments: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE profile_id = $1")
            .bind(student.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(enrollments, 0);

    let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE id = $1")
        .bind(student.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(profiles, 0);

    let identities: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM identities WHERE id = $1")
        .bind(student.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(identities, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_csv_import_reports_per_row_outcome(pool: PgPool) {
    let app = build_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    let csv = "name,email\nA,a@x.com\n,bad\nB,b@x.com\n";
    let request = Request::builder()
        .method("POST")
        .uri("/api/students/import")
        .header("content-type", "text/csv")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(csv))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let report: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(report["total"], 3);
    assert_eq!(report["imported"], 2);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["invalid"], 1);

    assert_eq!(report["rows"][0]["status"], "imported");
    assert_eq!(report["rows"][1]["status"], "invalid");
    assert_eq!(
        report["rows"][1]["errors"],
        json!(["Name is required", "Invalid email address"])
    );
    assert_eq!(report["rows"][2]["status"], "imported");

    let students: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE role = 'student'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(students, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_csv_import_duplicate_email_fails_second_row_only(pool: PgPool) {
    let app = build_app(pool.clone());
    let token = admin_token(&pool, app.clone()).await;

    let csv = "name,email\nA,dup@x.com\nB,dup@x.com\n";
    let request = Request::builder()
        .method("POST")
        .uri("/api/students/import")
        .header("content-type", "text/csv")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(csv))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let report: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(report["imported"], 1);
    assert_eq!(report["failed"], 1);
    assert_eq!(report["rows"][0]["status"], "imported");
    assert_eq!(report["rows"][1]["status"], "failed");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_returns_current_profile(pool: PgPool) {
    let app = build_app(pool.clone());
    let email = generate_unique_email();
    create_test_account(&pool, &email, "studentpass123", "student").await;
    let token = get_auth_token(app.clone(), &email, "studentpass123").await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "student");
}
