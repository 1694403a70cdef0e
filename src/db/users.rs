use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::Workspace;
use crate::models::user::User;

/// Hex-encoded SHA-256 of the password.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// OAuth accounts carry no hash and never match.
pub fn verify_password(user: &User, password: &str) -> bool {
    user.password_hash
        .as_deref()
        .is_some_and(|hash| hash == hash_password(password))
}

pub fn fetch_user<'a>(ws: &'a Workspace, id: &str) -> Option<&'a User> {
    ws.users.iter().find(|u| u.id == id)
}

pub fn fetch_user_mut<'a>(ws: &'a mut Workspace, id: &str) -> Option<&'a mut User> {
    ws.users.iter_mut().find(|u| u.id == id)
}

/// Emails are compared after trimming and lower-casing.
pub fn fetch_user_by_email<'a>(ws: &'a Workspace, email: &str) -> Option<&'a User> {
    let email = normalize_email(email);
    ws.users.iter().find(|u| u.email == email)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn insert_user(ws: &mut Workspace, user: User) -> User {
    ws.users.push(user.clone());
    user
}

/// Removes the user and every session they hold.
pub fn delete_user(ws: &mut Workspace, id: &str) -> bool {
    let before = ws.users.len();
    ws.users.retain(|u| u.id != id);
    ws.sessions.retain(|_, user_id| user_id != id);
    ws.users.len() != before
}

/// Opens a session and returns its token.
pub fn open_session(ws: &mut Workspace, user_id: &str) -> String {
    let token = Uuid::new_v4().to_string();
    ws.sessions.insert(token.clone(), user_id.to_string());
    token
}

pub fn close_session(ws: &mut Workspace, token: &str) {
    ws.sessions.remove(token);
}

pub fn session_user<'a>(ws: &'a Workspace, token: &str) -> Option<&'a User> {
    let user_id = ws.sessions.get(token)?;
    fetch_user(ws, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_stable_hex() {
        let hash = hash_password("password123");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_password("password123"));
        assert_ne!(hash, hash_password("password124"));
    }

    #[test]
    fn oauth_users_never_verify() {
        let user = User::new("u1".into(), "a@b.co".into(), "A".into());
        assert!(!verify_password(&user, ""));
    }

    #[test]
    fn deleting_user_drops_sessions() {
        let mut ws = Workspace::default();
        insert_user(&mut ws, User::new("u1".into(), "a@b.co".into(), "A".into()));
        let first = open_session(&mut ws, "u1");
        let second = open_session(&mut ws, "u1");
        assert_eq!(session_user(&ws, &first).map(|u| u.id.as_str()), Some("u1"));

        assert!(delete_user(&mut ws, "u1"));
        assert!(session_user(&ws, &first).is_none());
        assert!(session_user(&ws, &second).is_none());
        assert!(ws.sessions.is_empty());
    }

    #[test]
    fn email_lookup_is_case_insensitive() {
        let mut ws = Workspace::default();
        insert_user(&mut ws, User::new("u1".into(), "ada@example.com".into(), "Ada".into()));
        assert!(fetch_user_by_email(&ws, "  ADA@Example.com ").is_some());
    }
}
