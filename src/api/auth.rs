use std::sync::LazyLock;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::info;
use uuid::Uuid;

use crate::db::users;
use crate::error::AppError;
use crate::models::user::{
    AppleOAuthRequest, AuthProvider, ChangePasswordRequest, GoogleOAuthRequest, LoginRequest,
    OnboardingRequest, SignupRequest, UpdateProfileRequest, User,
};
use crate::services::directory;
use crate::session::{self, CurrentUser, SessionToken};
use crate::state::AppState;

static EMAIL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("valid email format regex"));

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Default, Deserialize)]
struct DirectoryQuery {
    #[serde(default)]
    q: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/oauth/google", post(oauth_google))
        .route("/oauth/apple", post(oauth_apple))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/onboarding", post(onboarding))
        .route("/profile", put(update_profile))
        .route("/settings", put(update_settings))
        .route("/change-password", post(change_password))
        .route("/delete-account", delete(delete_account))
        .route("/schools", get(schools))
        .route("/majors", get(majors))
}

fn signed_in(user: &User, token: &str, redirect: &str) -> (HeaderMap, Json<Value>) {
    (
        session::set_cookie(token),
        Json(json!({ "success": true, "user": user, "redirect": redirect })),
    )
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(HeaderMap, Json<Value>), AppError> {
    let email = users::normalize_email(&req.email);
    let name = req.name.trim().to_string();

    if email.is_empty() || !EMAIL_FORMAT.is_match(&email) {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let mut ws = state.db.write().await;
    if users::fetch_user_by_email(&ws, &email).is_some() {
        return Err(AppError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let mut user = User::new(Uuid::new_v4().to_string(), email, name);
    user.password_hash = Some(users::hash_password(&req.password));
    let user = users::insert_user(&mut ws, user);
    let token = users::open_session(&mut ws, &user.id);

    info!(user_id = %user.id, "Account created");
    Ok(signed_in(&user, &token, "/auth/onboarding"))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<Value>), AppError> {
    let mut ws = state.db.write().await;
    let user = users::fetch_user_by_email(&ws, &req.email)
        .cloned()
        .ok_or_else(|| AppError::not_found("Account"))?;

    if !users::verify_password(&user, &req.password) {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let token = users::open_session(&mut ws, &user.id);
    Ok(signed_in(&user, &token, user.landing_path()))
}

/// Signs in the account registered under `email`, or creates one for the
/// provider. The provider's token is not verified.
async fn oauth_sign_in(
    state: &AppState,
    provider: AuthProvider,
    email: &str,
    name: String,
    avatar: Option<String>,
) -> Result<(HeaderMap, Json<Value>), AppError> {
    let email = users::normalize_email(email);
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    let mut ws = state.db.write().await;
    if let Some(user) = users::fetch_user_by_email(&ws, &email).cloned() {
        let token = users::open_session(&mut ws, &user.id);
        return Ok(signed_in(&user, &token, user.landing_path()));
    }

    let mut user = User::new(Uuid::new_v4().to_string(), email, name);
    user.avatar = avatar;
    user.auth_provider = Some(provider);
    let user = users::insert_user(&mut ws, user);
    let token = users::open_session(&mut ws, &user.id);

    info!(user_id = %user.id, ?provider, "Account created via OAuth");
    Ok((
        session::set_cookie(&token),
        Json(json!({
            "success": true,
            "user": user,
            "redirect": "/auth/onboarding",
            "is_new": true,
        })),
    ))
}

async fn oauth_google(
    State(state): State<AppState>,
    Json(req): Json<GoogleOAuthRequest>,
) -> Result<(HeaderMap, Json<Value>), AppError> {
    let profile = req.google_data;
    let avatar = profile.picture.filter(|p| !p.is_empty());
    oauth_sign_in(&state, AuthProvider::Google, &profile.email, profile.name, avatar).await
}

async fn oauth_apple(
    State(state): State<AppState>,
    Json(req): Json<AppleOAuthRequest>,
) -> Result<(HeaderMap, Json<Value>), AppError> {
    let profile = req.apple_data;
    let name = profile.name.unwrap_or_else(|| {
        let email = users::normalize_email(&profile.email);
        email.split('@').next().unwrap_or_default().to_string()
    });
    oauth_sign_in(&state, AuthProvider::Apple, &profile.email, name, None).await
}

async fn logout(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> (HeaderMap, Json<Value>) {
    if let Some(token) = token {
        let mut ws = state.db.write().await;
        users::close_session(&mut ws, &token);
    }
    (session::expire_cookie(), Json(json!({ "success": true })))
}

async fn me(State(state): State<AppState>, SessionToken(token): SessionToken) -> Json<Value> {
    let ws = state.db.read().await;
    match token.as_deref().and_then(|t| users::session_user(&ws, t)) {
        Some(user) => Json(json!({ "success": true, "user": user })),
        None => Json(json!({ "success": false, "user": null })),
    }
}

async fn onboarding(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<OnboardingRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let user = users::fetch_user_mut(&mut ws, &current.user.id).ok_or_else(AppError::not_authenticated)?;

    user.school = req.school;
    user.major = req.major;
    user.year = req.year;
    user.onboarding_complete = true;

    Ok(Json(json!({ "success": true, "user": user, "redirect": "/" })))
}

async fn update_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let user = users::fetch_user_mut(&mut ws, &current.user.id).ok_or_else(AppError::not_authenticated)?;

    if let Some(name) = req.name {
        user.name = name;
    }
    if let Some(bio) = req.bio {
        user.bio = bio;
    }
    if let Some(school) = req.school {
        user.school = school;
    }
    if let Some(major) = req.major {
        user.major = major;
    }
    if let Some(year) = req.year {
        user.year = year;
    }
    if let Some(avatar) = req.avatar {
        user.avatar = avatar;
    }

    Ok(Json(json!({ "success": true, "user": user })))
}

async fn update_settings(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<Value>, AppError> {
    let mut ws = state.db.write().await;
    let user = users::fetch_user_mut(&mut ws, &current.user.id).ok_or_else(AppError::not_authenticated)?;

    user.settings.extend(patch);

    Ok(Json(json!({ "success": true, "settings": user.settings })))
}

async fn change_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    if current.user.auth_provider.is_some() {
        return Err(AppError::BadRequest(
            "Cannot change password for OAuth accounts".to_string(),
        ));
    }
    if !users::verify_password(&current.user, &req.current_password) {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }
    if req.new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(
            "New password must be at least 8 characters".to_string(),
        ));
    }

    let mut ws = state.db.write().await;
    let user = users::fetch_user_mut(&mut ws, &current.user.id).ok_or_else(AppError::not_authenticated)?;
    user.password_hash = Some(users::hash_password(&req.new_password));

    Ok(Json(json!({ "success": true })))
}

async fn delete_account(
    State(state): State<AppState>,
    current: CurrentUser,
) -> (HeaderMap, Json<Value>) {
    let mut ws = state.db.write().await;
    users::delete_user(&mut ws, &current.user.id);
    info!(user_id = %current.user.id, "Account deleted");
    (session::expire_cookie(), Json(json!({ "success": true })))
}

async fn schools(Query(query): Query<DirectoryQuery>) -> Json<Value> {
    Json(json!({ "schools": directory::search_schools(&query.q) }))
}

async fn majors(Query(query): Query<DirectoryQuery>) -> Json<Value> {
    Json(json!({ "majors": directory::search_majors(&query.q) }))
}

#[cfg(test)]
mod tests {
    use super::EMAIL_FORMAT;

    #[test]
    fn email_format_matches_simple_addresses() {
        assert!(EMAIL_FORMAT.is_match("ada.lovelace@uni-x.ac.uk"));
        assert!(!EMAIL_FORMAT.is_match("no-at-sign.com"));
        assert!(!EMAIL_FORMAT.is_match("a@b"));
    }
}
