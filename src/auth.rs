use chrono::{Duration, Utc};
use log::{info, warn};
use thiserror::Error;

use crate::models::user::{NewUser, User, UserRole};
use crate::store::Store;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    UserAlreadyExists,
    #[error("this account is not active")]
    AccountDisabled,
    #[error("permission denied")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Store(String),
}

impl From<String> for AuthError {
    fn from(e: String) -> Self {
        AuthError::Store(e)
    }
}

/// A signed-in user and the session token that identifies them.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, String> {
    bcrypt::hash(password, cost).map_err(|e| e.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn create_session(store: &dyn Store, user_id: i64) -> Result<String, String> {
    let expiry_hours = store.setting_get_i64("session_expiry_hours").max(1);
    let token = uuid::Uuid::new_v4().to_string();
    let expires = Utc::now().naive_utc() + Duration::hours(expiry_hours);
    store.session_create(
        user_id,
        &token,
        &expires.format("%Y-%m-%d %H:%M:%S").to_string(),
    )?;
    Ok(token)
}

pub fn login(store: &dyn Store, email: &str, password: &str) -> Result<AuthSession, AuthError> {
    let user = match store.user_get_by_email(&normalize_email(email)) {
        Some(u) => u,
        None => return Err(AuthError::InvalidCredentials),
    };
    if !verify_password(password, &user.password_hash) {
        warn!("Failed login for {}", user.email);
        return Err(AuthError::InvalidCredentials);
    }
    if !user.is_active() {
        return Err(AuthError::AccountDisabled);
    }

    let token = create_session(store, user.id)?;
    store.user_touch_last_login(user.id)?;
    info!("User {} signed in", user.email);
    Ok(AuthSession { user, token })
}

/// Create a plain `user` account and sign it in.
pub fn register(
    store: &dyn Store,
    username: &str,
    email: &str,
    password: &str,
) -> Result<AuthSession, AuthError> {
    let username = username.trim();
    let email = normalize_email(email);
    if username.is_empty() {
        return Err(AuthError::Validation("Username is required".into()));
    }
    if !email.contains('@') {
        return Err(AuthError::Validation("A valid email address is required".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if store.user_get_by_email(&email).is_some() {
        return Err(AuthError::UserAlreadyExists);
    }

    let hash = hash_password(password, store.bcrypt_cost())?;
    let avatar = format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        username.replace(' ', "+")
    );
    let id = store.user_create(&NewUser {
        username,
        email: &email,
        password_hash: &hash,
        display_name: username,
        role: UserRole::User,
        avatar: &avatar,
    })?;
    info!("Registered user {}", email);

    let token = create_session(store, id)?;
    let user = store
        .user_get_by_id(id)
        .ok_or_else(|| AuthError::Store(format!("user {} vanished after insert", id)))?;
    Ok(AuthSession { user, token })
}

pub fn logout(store: &dyn Store, token: &str) -> Result<(), AuthError> {
    store.session_delete(token)?;
    Ok(())
}

/// The user behind a session token, if the session is live and the account active.
pub fn current_user(store: &dyn Store, token: Option<&str>) -> Option<User> {
    let user = store.session_get_user(token?)?;
    if user.is_active() {
        Some(user)
    } else {
        None
    }
}

pub fn update_profile(
    store: &dyn Store,
    user_id: i64,
    display_name: &str,
    nickname: &str,
) -> Result<User, AuthError> {
    let display_name = display_name.trim();
    if display_name.is_empty() {
        return Err(AuthError::Validation("Display name is required".into()));
    }
    if store.user_get_by_id(user_id).is_none() {
        return Err(AuthError::Validation(format!("No user with id {}", user_id)));
    }
    store.user_update_profile(user_id, display_name, nickname.trim())?;
    store
        .user_get_by_id(user_id)
        .ok_or_else(|| AuthError::Store(format!("user {} vanished after update", user_id)))
}

pub fn require_staff(user: Option<&User>) -> Result<&User, AuthError> {
    match user {
        Some(u) if u.is_active() && u.is_staff() => Ok(u),
        _ => Err(AuthError::Forbidden),
    }
}

pub fn require_admin(user: Option<&User>) -> Result<&User, AuthError> {
    match user {
        Some(u) if u.is_active() && u.is_admin() => Ok(u),
        _ => Err(AuthError::Forbidden),
    }
}
