use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::double_option;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Google,
    Apple,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub name: String,
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<AuthProvider>,
    pub school: Option<String>,
    pub major: Option<String>,
    pub year: Option<String>,
    pub bio: String,
    pub onboarding_complete: bool,
    pub created_at: DateTime<Utc>,
    pub settings: Map<String, Value>,
}

impl User {
    pub fn new(id: String, email: String, name: String) -> Self {
        Self {
            id,
            email,
            password_hash: None,
            name,
            avatar: None,
            auth_provider: None,
            school: None,
            major: None,
            year: None,
            bio: String::new(),
            onboarding_complete: false,
            created_at: Utc::now(),
            settings: default_settings(),
        }
    }

    /// Where the client should go after signing in.
    pub fn landing_path(&self) -> &'static str {
        if self.onboarding_complete {
            "/"
        } else {
            "/auth/onboarding"
        }
    }
}

pub fn default_settings() -> Map<String, Value> {
    let value = json!({
        "theme": "system",
        "notifications": true,
        "email_notifications": true,
        "sidebar_collapsed": false,
        "default_view": "list",
        "font_size": "medium",
        "reduced_motion": false,
    });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct School {
    pub name: &'static str,
    pub state: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleProfile {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleOAuthRequest {
    #[serde(default)]
    pub google_data: GoogleProfile,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppleProfile {
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppleOAuthRequest {
    #[serde(default)]
    pub apple_data: AppleProfile,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OnboardingRequest {
    pub school: Option<String>,
    pub major: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub school: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub major: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub year: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}
