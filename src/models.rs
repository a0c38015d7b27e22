// Data models for the truthdesk news verification service

use serde::{Deserialize, Serialize};

/// Unix epoch milliseconds
pub type Timestamp = i64;

pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

// ============================================================================
// VERDICTS
// ============================================================================

/// Final classification of a news item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Real => "real",
            Verdict::Fake => "fake",
        }
    }
}

/// Verdict produced by the automated stage, which may defer judgement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiVerdict {
    Real,
    Fake,
    Pending,
}

impl From<Verdict> for AiVerdict {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Real => AiVerdict::Real,
            Verdict::Fake => AiVerdict::Fake,
        }
    }
}

// ============================================================================
// RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub source_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub submitted_by: String,
    pub submitted_at: Timestamp,

    // Automated verdict
    #[serde(default)]
    pub ai_verdict: Option<AiVerdict>,
    #[serde(default)]
    pub ai_reason: Option<String>,
    #[serde(default)]
    pub ai_verified_at: Option<Timestamp>,

    // Manual verification by an admin
    pub is_manually_verified: bool,
    #[serde(default)]
    pub manual_verdict: Option<Verdict>,
    #[serde(default)]
    pub verified_by: Option<String>,
    #[serde(default)]
    pub verified_at: Option<Timestamp>,
}

impl NewsItem {
    /// Stamp a manual verdict, replacing any earlier one
    pub fn mark_verified(&mut self, verdict: Verdict, admin_id: &str, at: Timestamp) {
        self.is_manually_verified = true;
        self.manual_verdict = Some(verdict);
        self.verified_by = Some(admin_id.to_string());
        self.verified_at = Some(at);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub user_id: String,
    pub added_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub is_anonymous: bool,
    pub created_at: Timestamp,
}

/// Password credentials bound to a user, keyed by normalized email
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub email: String,
    pub user_id: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: Timestamp,
}

// ============================================================================
// REQUEST/RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitNewsRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub source_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreateRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub source_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub verdict: Verdict,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MakeAdminRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// The signed-in user as seen by the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(flatten)]
    pub user: User,
    pub is_admin: bool,
}
