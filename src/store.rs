//! Persistence layer backed by sled.
//!
//! One tree per record kind. Values are JSON encoded. Record ids carry a kind
//! prefix and a zero-padded hex sequence from [`sled::Db::generate_id`], so keys
//! within a tree iterate in creation order and a reverse scan yields the newest
//! records first.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use sled::{
    transaction::{TransactionError, TransactionResult},
    Db, Transactional, Tree,
};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Account, Admin, Category, NewsItem, Session, User};

pub struct Store {
    db: Db,
    categories: Tree,
    news: Tree,
    admins: Tree,
    users: Tree,
    accounts: Tree,
    sessions: Tree,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        info!("Opening sled database at {}", path.display());
        Self::from_db(sled::open(path)?)
    }

    /// In-memory database removed on drop
    pub fn temporary() -> AppResult<Self> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: Db) -> AppResult<Self> {
        Ok(Self {
            categories: db.open_tree("categories")?,
            news: db.open_tree("news")?,
            admins: db.open_tree("admins")?,
            users: db.open_tree("users")?,
            accounts: db.open_tree("accounts")?,
            sessions: db.open_tree("sessions")?,
            db,
        })
    }

    pub fn next_id(&self, prefix: &str) -> AppResult<String> {
        Ok(format!("{}_{:016x}", prefix, self.db.generate_id()?))
    }

    pub fn flush(&self) -> AppResult<usize> {
        Ok(self.db.flush()?)
    }

    // ===== CATEGORIES =====

    pub fn categories(&self) -> AppResult<Vec<Category>> {
        scan(&self.categories, false)
    }

    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn insert_category(&self, category: &Category) -> AppResult<()> {
        put(&self.categories, &category.id, category)
    }

    // ===== NEWS =====

    pub fn news(&self, id: &str) -> AppResult<Option<NewsItem>> {
        get(&self.news, id)
    }

    /// All news items, newest first
    pub fn news_newest_first(&self) -> AppResult<Vec<NewsItem>> {
        scan(&self.news, true)
    }

    pub fn put_news(&self, item: &NewsItem) -> AppResult<()> {
        put(&self.news, &item.id, item)
    }

    pub fn remove_news(&self, id: &str) -> AppResult<bool> {
        Ok(self.news.remove(id.as_bytes())?.is_some())
    }

    // ===== ADMINS =====

    pub fn admin(&self, user_id: &str) -> AppResult<Option<Admin>> {
        get(&self.admins, user_id)
    }

    pub fn has_admins(&self) -> bool {
        !self.admins.is_empty()
    }

    pub fn insert_admin(&self, admin: &Admin) -> AppResult<()> {
        put(&self.admins, &admin.user_id, admin)
    }

    // ===== USERS, ACCOUNTS, SESSIONS =====

    pub fn user(&self, id: &str) -> AppResult<Option<User>> {
        get(&self.users, id)
    }

    pub fn insert_user(&self, user: &User) -> AppResult<()> {
        put(&self.users, &user.id, user)
    }

    pub fn account(&self, email: &str) -> AppResult<Option<Account>> {
        get(&self.accounts, email)
    }

    /// Write a password user and its account in one transaction
    pub fn insert_user_with_account(&self, user: &User, account: &Account) -> AppResult<()> {
        let user_bytes = serde_json::to_vec(user)?;
        let account_bytes = serde_json::to_vec(account)?;

        let result: TransactionResult<(), ()> =
            (&self.users, &self.accounts).transaction(|(users, accounts)| {
                users.insert(user.id.as_bytes(), user_bytes.as_slice())?;
                accounts.insert(account.email.as_bytes(), account_bytes.as_slice())?;
                Ok(())
            });

        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Storage(e)) => Err(e.into()),
            Err(TransactionError::Abort(())) => Err(AppError::Conflict("Account write aborted".into())),
        }
    }

    pub fn session(&self, token: &str) -> AppResult<Option<Session>> {
        get(&self.sessions, token)
    }

    pub fn insert_session(&self, session: &Session) -> AppResult<()> {
        put(&self.sessions, &session.token, session)
    }

    pub fn remove_session(&self, token: &str) -> AppResult<bool> {
        Ok(self.sessions.remove(token.as_bytes())?.is_some())
    }
}

fn get<T: DeserializeOwned>(tree: &Tree, key: &str) -> AppResult<Option<T>> {
    match tree.get(key.as_bytes())? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

fn put<T: Serialize>(tree: &Tree, key: &str, value: &T) -> AppResult<()> {
    tree.insert(key.as_bytes(), serde_json::to_vec(value)?)?;
    Ok(())
}

fn scan<T: DeserializeOwned>(tree: &Tree, reverse: bool) -> AppResult<Vec<T>> {
    let decode = |entry: sled::Result<(sled::IVec, sled::IVec)>| -> AppResult<T> {
        let (_, bytes) = entry?;
        Ok(serde_json::from_slice(&bytes)?)
    };

    if reverse {
        tree.iter().rev().map(decode).collect()
    } else {
        tree.iter().map(decode).collect()
    }
}
