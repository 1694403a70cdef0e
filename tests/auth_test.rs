mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, request, seeded_app};

#[tokio::test]
async fn signup_signs_in_and_logout_ends_the_session() {
    let app = app();

    let res = app
        .post(
            "/auth/api/signup",
            json!({"email": " Ada@Example.com ", "password": "correct horse", "name": "Ada"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["redirect"], "/auth/onboarding");
    assert!(body["user"].get("password_hash").is_none());

    let cookie = res.cookie();
    assert!(cookie.starts_with("sid="));

    let me = app
        .send(request(Method::GET, "/auth/api/me", None, Some(&cookie)))
        .await
        .json();
    assert_eq!(me["success"], true);
    assert_eq!(me["user"]["name"], "Ada");

    let logout = app
        .send(request(Method::POST, "/auth/api/logout", None, Some(&cookie)))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let me = app
        .send(request(Method::GET, "/auth/api/me", None, Some(&cookie)))
        .await
        .json();
    assert_eq!(me["success"], false);
    assert!(me["user"].is_null());
}

#[tokio::test]
async fn signup_validates_input() {
    let app = app();

    let res = app
        .post("/auth/api/signup", json!({"email": "nope", "password": "long enough", "name": "A"}))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["message"], "Invalid email address");

    let res = app
        .post("/auth/api/signup", json!({"email": "a@b.io", "password": "short", "name": "A"}))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["message"], "Password must be at least 8 characters");

    let res = app
        .post("/auth/api/signup", json!({"email": "a@b.io", "password": "long enough", "name": "  "}))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["message"], "Name is required");
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = app();
    let signup = json!({"email": "a@b.io", "password": "long enough", "name": "A"});

    assert_eq!(app.post("/auth/api/signup", signup.clone()).await.status, StatusCode::OK);
    let res = app.post("/auth/api/signup", signup).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.json()["success"], false);
}

#[tokio::test]
async fn demo_account_logs_in() {
    let app = seeded_app();

    let res = app
        .post("/auth/api/login", json!({"email": "demo@example.com", "password": "password123"}))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["redirect"], "/");

    let res = app
        .post("/auth/api/login", json!({"email": "demo@example.com", "password": "wrong-password"}))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app
        .post("/auth/api/login", json!({"email": "ghost@example.com", "password": "password123"}))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_endpoints_require_a_session() {
    let app = app();

    let res = app.put("/auth/api/profile", json!({"name": "Nobody"})).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.json()["message"], "Not authenticated");

    let res = app
        .send(request(Method::PUT, "/auth/api/settings", Some(json!({"theme": "dark"})), Some("sid=stale")))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn onboarding_and_profile_update() {
    let app = app();
    let cookie = app
        .post("/auth/api/signup", json!({"email": "a@b.io", "password": "long enough", "name": "A"}))
        .await
        .cookie();

    let res = app
        .send(request(
            Method::POST,
            "/auth/api/onboarding",
            Some(json!({"school": "Yale University", "major": "History", "year": "Senior"})),
            Some(&cookie),
        ))
        .await
        .json();
    assert_eq!(res["user"]["onboarding_complete"], true);
    assert_eq!(res["redirect"], "/");

    let res = app
        .send(request(
            Method::PUT,
            "/auth/api/profile",
            Some(json!({"bio": "Hi", "school": null})),
            Some(&cookie),
        ))
        .await
        .json();
    assert_eq!(res["user"]["bio"], "Hi");
    assert!(res["user"]["school"].is_null());
    assert_eq!(res["user"]["major"], "History");
}

#[tokio::test]
async fn change_password_checks_the_current_one() {
    let app = app();
    let cookie = app
        .post("/auth/api/signup", json!({"email": "a@b.io", "password": "first-pass", "name": "A"}))
        .await
        .cookie();

    let res = app
        .send(request(
            Method::POST,
            "/auth/api/change-password",
            Some(json!({"current_password": "not-it", "new_password": "second-pass"})),
            Some(&cookie),
        ))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app
        .send(request(
            Method::POST,
            "/auth/api/change-password",
            Some(json!({"current_password": "first-pass", "new_password": "second-pass"})),
            Some(&cookie),
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .post("/auth/api/login", json!({"email": "a@b.io", "password": "second-pass"}))
        .await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn oauth_creates_then_reuses_the_account() {
    let app = app();
    let profile = json!({"google_data": {"email": "g@gmail.com", "name": "G", "picture": ""}});

    let first = app.post("/auth/api/oauth/google", profile.clone()).await.json();
    assert_eq!(first["is_new"], true);
    assert_eq!(first["user"]["auth_provider"], "google");
    assert!(first["user"]["avatar"].is_null());

    let second = app.post("/auth/api/oauth/google", profile).await.json();
    assert!(second.get("is_new").is_none());
    assert_eq!(second["user"]["id"], first["user"]["id"]);

    let apple = app
        .post("/auth/api/oauth/apple", json!({"apple_data": {"email": "kim@icloud.com"}}))
        .await
        .json();
    assert_eq!(apple["user"]["name"], "kim");
}

#[tokio::test]
async fn delete_account_removes_the_login() {
    let app = app();
    let cookie = app
        .post("/auth/api/signup", json!({"email": "a@b.io", "password": "long enough", "name": "A"}))
        .await
        .cookie();

    let res = app
        .send(request(Method::DELETE, "/auth/api/delete-account", None, Some(&cookie)))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .post("/auth/api/login", json!({"email": "a@b.io", "password": "long enough"}))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn directory_search() {
    let app = app();
    let schools = app.get("/auth/api/schools?q=stan").await.json();
    assert!(
        schools["schools"]
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s["name"] == "Stanford University")
    );

    let majors = app.get("/auth/api/majors?q=computer").await.json();
    assert!(
        majors["majors"]
            .as_array()
            .unwrap()
            .iter()
            .any(|m| m == "Computer Science")
    );
}
