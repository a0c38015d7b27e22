// Password and anonymous accounts with bearer session tokens

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use rand::RngCore;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{now_millis, Account, AuthResponse, Session, SignInRequest, SignUpRequest, User};
use crate::store::Store;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Random bytes behind each session token
pub const SESSION_TOKEN_BYTES: usize = 32;

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Argon2id hash in PHC string form, salt included
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

pub fn verify_password(password: &str, stored: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| AppError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn generate_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn open_session(store: &Store, user: User) -> AppResult<AuthResponse> {
    let session = Session {
        token: generate_token(),
        user_id: user.id.clone(),
        created_at: now_millis(),
    };
    store.insert_session(&session)?;

    Ok(AuthResponse { token: session.token, user })
}

pub fn sign_up(store: &Store, request: SignUpRequest) -> AppResult<AuthResponse> {
    let email = normalize_email(&request.email);
    if !email.contains('@') {
        return Err(AppError::InvalidInput("email address is malformed".into()));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if store.account(&email)?.is_some() {
        return Err(AppError::Conflict("An account with this email already exists".into()));
    }

    let user = User {
        id: store.next_id("user")?,
        email: Some(email.clone()),
        name: request.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        is_anonymous: false,
        created_at: now_millis(),
    };
    let account = Account {
        email,
        user_id: user.id.clone(),
        password_hash: hash_password(&request.password)?,
    };

    store.insert_user_with_account(&user, &account)?;
    info!(user_id = %user.id, "account created");

    open_session(store, user)
}

pub fn sign_in(store: &Store, request: SignInRequest) -> AppResult<AuthResponse> {
    let email = normalize_email(&request.email);
    let account = store.account(&email)?.ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&request.password, &account.password_hash)? {
        debug!(user_id = %account.user_id, "password mismatch");
        return Err(AppError::InvalidCredentials);
    }

    let user = store
        .user(&account.user_id)?
        .ok_or_else(|| AppError::NotFound("User".into()))?;
    info!(user_id = %user.id, "signed in");

    open_session(store, user)
}

pub fn sign_in_anonymous(store: &Store) -> AppResult<AuthResponse> {
    let user = User {
        id: store.next_id("user")?,
        email: None,
        name: None,
        is_anonymous: true,
        created_at: now_millis(),
    };
    store.insert_user(&user)?;
    info!(user_id = %user.id, "anonymous user created");

    open_session(store, user)
}

pub fn sign_out(store: &Store, token: &str) -> AppResult<bool> {
    let removed = store.remove_session(token)?;
    debug!(removed, "sign out");
    Ok(removed)
}

/// Bearer token from the Authorization header, if any. The scheme name is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// User id of the principal behind the request, or None when unauthenticated
pub fn resolve_caller(store: &Store, headers: &HeaderMap) -> AppResult<Option<String>> {
    match bearer_token(headers) {
        Some(token) => Ok(store.session(token)?.map(|s| s.user_id)),
        None => Ok(None),
    }
}

pub fn require_caller(caller: Option<&str>) -> AppResult<&str> {
    caller.ok_or(AppError::NotAuthenticated)
}
