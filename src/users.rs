// Identity and admin registry

use tracing::{info, warn};

use crate::auth::{normalize_email, require_caller};
use crate::error::{AppError, AppResult};
use crate::models::{now_millis, Admin, CurrentUser};
use crate::store::Store;

pub fn is_admin(store: &Store, user_id: &str) -> AppResult<bool> {
    Ok(store.admin(user_id)?.is_some())
}

/// Authenticated caller who is also an admin
pub fn require_admin<'a>(store: &Store, caller: Option<&'a str>) -> AppResult<&'a str> {
    let user_id = require_caller(caller)?;
    if !is_admin(store, user_id)? {
        warn!(user_id, "admin operation refused");
        return Err(AppError::NotAuthorized);
    }
    Ok(user_id)
}

pub fn current_user(store: &Store, caller: Option<&str>) -> AppResult<Option<CurrentUser>> {
    let Some(user_id) = caller else {
        return Ok(None);
    };
    let Some(user) = store.user(user_id)? else {
        return Ok(None);
    };

    Ok(Some(CurrentUser {
        is_admin: is_admin(store, &user.id)?,
        user,
    }))
}

/// Grant admin to the account registered under `email`.
///
/// While no admin exists any signed-in user may grant; afterwards only admins can.
pub fn make_admin(store: &Store, caller: Option<&str>, email: &str) -> AppResult<()> {
    let user_id = require_caller(caller)?;
    if store.has_admins() && !is_admin(store, user_id)? {
        warn!(user_id, "make_admin refused");
        return Err(AppError::NotAuthorized);
    }

    let account = store
        .account(&normalize_email(email))?
        .ok_or_else(|| AppError::NotFound("User".into()))?;

    if is_admin(store, &account.user_id)? {
        return Err(AppError::Conflict("User is already an admin".into()));
    }

    store.insert_admin(&Admin {
        user_id: account.user_id.clone(),
        added_at: now_millis(),
    })?;
    info!(granted_by = user_id, user_id = %account.user_id, "admin granted");
    Ok(())
}

/// Make the caller the first admin. Returns false once any admin exists.
pub fn init_first_admin(store: &Store, caller: Option<&str>) -> AppResult<bool> {
    let user_id = require_caller(caller)?;
    if store.has_admins() {
        return Ok(false);
    }

    store.insert_admin(&Admin {
        user_id: user_id.to_string(),
        added_at: now_millis(),
    })?;
    info!(user_id, "first admin initialized");
    Ok(true)
}
