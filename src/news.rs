//! News records: submission, moderation and feed projection.
//!
//! A submitted item starts unverified (`is_manually_verified == false`) and is
//! hidden from the public feed. An admin moves it to verified-real or
//! verified-fake with [`verify`], or removes it with [`delete`]. Re-verifying
//! overwrites the earlier manual verdict; nothing moves an item back to pending.

use tracing::info;

use crate::auth::require_caller;
use crate::error::{AppError, AppResult};
use crate::models::{now_millis, AdminCreateRequest, NewsItem, SubmitNewsRequest, Verdict};
use crate::store::Store;
use crate::users::{is_admin, require_admin};
use crate::verdict::VerdictProvider;

/// Category value that disables feed filtering
pub const ALL_CATEGORIES: &str = "all";

fn required(field: &str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Verified items, newest first, optionally restricted to one category
pub fn list_verified(store: &Store, category: Option<&str>) -> AppResult<Vec<NewsItem>> {
    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

    Ok(store
        .news_newest_first()?
        .into_iter()
        .filter(|n| n.is_manually_verified)
        .filter(|n| category.map_or(true, |c| n.category == c))
        .collect())
}

/// Items awaiting moderation, newest first. Callers who are not admins get nothing.
pub fn list_pending(store: &Store, caller: Option<&str>) -> AppResult<Vec<NewsItem>> {
    let Some(user_id) = caller else {
        return Ok(Vec::new());
    };
    if !is_admin(store, user_id)? {
        return Ok(Vec::new());
    }

    Ok(store
        .news_newest_first()?
        .into_iter()
        .filter(|n| !n.is_manually_verified)
        .collect())
}

pub fn submit(
    store: &Store,
    verdicts: &dyn VerdictProvider,
    caller: Option<&str>,
    request: SubmitNewsRequest,
) -> AppResult<NewsItem> {
    let user_id = require_caller(caller)?;
    let title = required("title", &request.title)?;
    let content = required("content", &request.content)?;
    let category = required("category", &request.category)?;

    let assessment = verdicts.assess(&request);
    let now = now_millis();

    let item = NewsItem {
        id: store.next_id("news")?,
        title,
        content,
        source_url: optional(request.source_url),
        category,
        image_url: optional(request.image_url),
        submitted_by: user_id.to_string(),
        submitted_at: now,
        ai_verdict: Some(assessment.verdict),
        ai_reason: assessment.reason,
        ai_verified_at: Some(now),
        is_manually_verified: false,
        manual_verdict: None,
        verified_by: None,
        verified_at: None,
    };
    store.put_news(&item)?;

    info!(
        news_id = %item.id,
        user_id,
        provider = verdicts.name(),
        ai_verdict = ?item.ai_verdict,
        "news submitted"
    );
    Ok(item)
}

/// Publish an item directly with an admin's verdict
pub fn admin_create(store: &Store, caller: Option<&str>, request: AdminCreateRequest) -> AppResult<NewsItem> {
    let admin_id = require_admin(store, caller)?;
    let title = required("title", &request.title)?;
    let content = required("content", &request.content)?;
    let category = required("category", &request.category)?;
    let reason = required("reason", &request.reason)?;
    let now = now_millis();

    let mut item = NewsItem {
        id: store.next_id("news")?,
        title,
        content,
        source_url: optional(request.source_url),
        category,
        image_url: optional(request.image_url),
        submitted_by: admin_id.to_string(),
        submitted_at: now,
        ai_verdict: Some(request.verdict.into()),
        ai_reason: Some(reason),
        ai_verified_at: Some(now),
        is_manually_verified: false,
        manual_verdict: None,
        verified_by: None,
        verified_at: None,
    };
    item.mark_verified(request.verdict, admin_id, now);
    store.put_news(&item)?;

    info!(news_id = %item.id, admin_id, verdict = request.verdict.as_str(), "news created by admin");
    Ok(item)
}

pub fn verify(store: &Store, caller: Option<&str>, news_id: &str, verdict: Verdict) -> AppResult<NewsItem> {
    let admin_id = require_admin(store, caller)?;
    let mut item = store
        .news(news_id)?
        .ok_or_else(|| AppError::NotFound("News item".into()))?;

    item.mark_verified(verdict, admin_id, now_millis());
    store.put_news(&item)?;

    info!(news_id, admin_id, verdict = verdict.as_str(), "news verified");
    Ok(item)
}

pub fn delete(store: &Store, caller: Option<&str>, news_id: &str) -> AppResult<()> {
    let admin_id = require_admin(store, caller)?;
    if !store.remove_news(news_id)? {
        return Err(AppError::NotFound("News item".into()));
    }

    info!(news_id, admin_id, "news deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sign_in_anonymous;
    use crate::models::AiVerdict;
    use crate::users::init_first_admin;
    use crate::verdict::{Assessment, PendingVerdictProvider, RandomVerdictProvider};

    /// Always answers with the same verdict
    struct FixedVerdict(AiVerdict);

    impl VerdictProvider for FixedVerdict {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn assess(&self, _submission: &SubmitNewsRequest) -> Assessment {
            Assessment { verdict: self.0, reason: Some("fixed".into()) }
        }
    }

    struct Fixture {
        store: Store,
        admin: String,
        member: String,
    }

    fn fixture() -> Fixture {
        let store = Store::temporary().unwrap();
        let admin = sign_in_anonymous(&store).unwrap().user.id;
        let member = sign_in_anonymous(&store).unwrap().user.id;
        assert!(init_first_admin(&store, Some(&admin)).unwrap());
        Fixture { store, admin, member }
    }

    fn submission(title: &str, category: &str) -> SubmitNewsRequest {
        SubmitNewsRequest {
            title: title.into(),
            content: format!("Body of {}", title),
            source_url: Some("  ".into()),
            category: category.into(),
            image_url: None,
        }
    }

    #[test]
    fn test_submit_is_unverified_with_real_or_fake_verdict() {
        let f = fixture();
        for i in 0..20 {
            let item = submit(
                &f.store,
                &RandomVerdictProvider,
                Some(&f.member),
                submission(&format!("Story {}", i), "science"),
            )
            .unwrap();

            assert!(!item.is_manually_verified);
            assert!(matches!(item.ai_verdict, Some(AiVerdict::Real) | Some(AiVerdict::Fake)));
            assert!(item.ai_reason.is_some());
            assert_eq!(item.submitted_by, f.member);
            assert_eq!(item.source_url, None);
        }
    }

    #[test]
    fn test_submit_requires_caller_and_content() {
        let f = fixture();
        assert!(matches!(
            submit(&f.store, &RandomVerdictProvider, None, submission("X", "science")),
            Err(AppError::NotAuthenticated)
        ));
        assert!(matches!(
            submit(&f.store, &RandomVerdictProvider, Some(&f.member), submission("   ", "science")),
            Err(AppError::InvalidInput(_))
        ));
        assert!(f.store.news_newest_first().unwrap().is_empty());
    }

    #[test]
    fn test_submit_then_verify_publishes() {
        let f = fixture();
        let item = submit(
            &f.store,
            &FixedVerdict(AiVerdict::Fake),
            Some(&f.member),
            submission("X", "science"),
        )
        .unwrap();
        assert_eq!(item.category, "science");
        assert!(list_verified(&f.store, None).unwrap().is_empty());

        let verified = verify(&f.store, Some(&f.admin), &item.id, Verdict::Real).unwrap();
        assert!(verified.is_manually_verified);
        assert_eq!(verified.manual_verdict, Some(Verdict::Real));
        assert_eq!(verified.verified_by.as_deref(), Some(f.admin.as_str()));
        assert_eq!(verified.ai_verdict, Some(AiVerdict::Fake));

        let feed = list_verified(&f.store, None).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, item.id);
    }

    #[test]
    fn test_verify_by_non_admin_leaves_record_unchanged() {
        let f = fixture();
        let item = submit(&f.store, &RandomVerdictProvider, Some(&f.member), submission("X", "health")).unwrap();

        assert!(matches!(
            verify(&f.store, Some(&f.member), &item.id, Verdict::Real),
            Err(AppError::NotAuthorized)
        ));
        assert!(matches!(
            verify(&f.store, None, &item.id, Verdict::Real),
            Err(AppError::NotAuthenticated)
        ));
        assert_eq!(f.store.news(&item.id).unwrap(), Some(item));
    }

    #[test]
    fn test_reverify_overwrites_manual_verdict() {
        let f = fixture();
        let item = submit(&f.store, &RandomVerdictProvider, Some(&f.member), submission("X", "world")).unwrap();

        verify(&f.store, Some(&f.admin), &item.id, Verdict::Real).unwrap();
        let again = verify(&f.store, Some(&f.admin), &item.id, Verdict::Fake).unwrap();

        assert_eq!(again.manual_verdict, Some(Verdict::Fake));
        assert!(again.is_manually_verified);
        assert!(matches!(
            verify(&f.store, Some(&f.admin), "news_missing", Verdict::Real),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_verified_filters_by_category_newest_first() {
        let f = fixture();
        let mut ids = Vec::new();
        for (title, category) in [("A", "technology"), ("B", "sports"), ("C", "technology")] {
            let item = submit(&f.store, &RandomVerdictProvider, Some(&f.member), submission(title, category)).unwrap();
            verify(&f.store, Some(&f.admin), &item.id, Verdict::Real).unwrap();
            ids.push(item.id);
        }
        submit(&f.store, &RandomVerdictProvider, Some(&f.member), submission("D", "technology")).unwrap();

        let tech = list_verified(&f.store, Some("technology")).unwrap();
        assert_eq!(tech.iter().map(|n| n.title.as_str()).collect::<Vec<_>>(), vec!["C", "A"]);
        assert!(tech.iter().all(|n| n.category == "technology" && n.is_manually_verified));

        let all = list_verified(&f.store, Some(ALL_CATEGORIES)).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, ids[2]);
        assert!(list_verified(&f.store, Some("politics")).unwrap().is_empty());
    }

    #[test]
    fn test_list_pending_is_admin_only() {
        let f = fixture();
        let first = submit(&f.store, &RandomVerdictProvider, Some(&f.member), submission("A", "health")).unwrap();
        let second = submit(&f.store, &RandomVerdictProvider, Some(&f.member), submission("B", "health")).unwrap();

        assert!(list_pending(&f.store, None).unwrap().is_empty());
        assert!(list_pending(&f.store, Some(&f.member)).unwrap().is_empty());

        let pending = list_pending(&f.store, Some(&f.admin)).unwrap();
        assert_eq!(pending.iter().map(|n| n.id.clone()).collect::<Vec<_>>(), vec![second.id.clone(), first.id]);

        verify(&f.store, Some(&f.admin), &second.id, Verdict::Fake).unwrap();
        assert_eq!(list_pending(&f.store, Some(&f.admin)).unwrap().len(), 1);
    }

    #[test]
    fn test_admin_create_is_published_immediately() {
        let f = fixture();
        let request = AdminCreateRequest {
            title: "Official".into(),
            content: "Statement".into(),
            source_url: Some("https://example.com/statement".into()),
            category: "politics".into(),
            image_url: None,
            verdict: Verdict::Real,
            reason: "Confirmed with the ministry.".into(),
        };

        assert!(matches!(
            admin_create(&f.store, Some(&f.member), request.clone()),
            Err(AppError::NotAuthorized)
        ));

        let item = admin_create(&f.store, Some(&f.admin), request).unwrap();
        assert!(item.is_manually_verified);
        assert_eq!(item.manual_verdict, Some(Verdict::Real));
        assert_eq!(item.ai_verdict, Some(AiVerdict::Real));
        assert_eq!(item.verified_by.as_deref(), Some(f.admin.as_str()));
        assert_eq!(list_verified(&f.store, Some("politics")).unwrap(), vec![item]);
    }

    #[test]
    fn test_submit_with_pending_provider_defers_verdict() {
        let f = fixture();
        let item = submit(
            &f.store,
            &PendingVerdictProvider,
            Some(&f.member),
            submission("Unclear", "health"),
        )
        .unwrap();

        assert_eq!(item.ai_verdict, Some(AiVerdict::Pending));
        assert_eq!(item.ai_reason, None);
        assert!(!item.is_manually_verified);
        assert_eq!(f.store.news(&item.id).unwrap(), Some(item.clone()));
        assert_eq!(list_pending(&f.store, Some(&f.admin)).unwrap(), vec![item]);
    }

    #[test]
    fn test_admin_create_rejects_blank_reason() {
        let f = fixture();
        let request = AdminCreateRequest {
            title: "Official".into(),
            content: "Statement".into(),
            source_url: None,
            category: "politics".into(),
            image_url: None,
            verdict: Verdict::Fake,
            reason: " \t ".into(),
        };

        match admin_create(&f.store, Some(&f.admin), request) {
            Err(AppError::InvalidInput(message)) => assert!(message.contains("reason")),
            other => panic!("expected invalid input, got {:?}", other),
        }
        assert!(f.store.news_newest_first().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let f = fixture();
        let item = submit(&f.store, &RandomVerdictProvider, Some(&f.member), submission("X", "sports")).unwrap();

        assert!(matches!(delete(&f.store, Some(&f.member), &item.id), Err(AppError::NotAuthorized)));
        assert!(f.store.news(&item.id).unwrap().is_some());

        delete(&f.store, Some(&f.admin), &item.id).unwrap();
        assert!(f.store.news(&item.id).unwrap().is_none());
        assert!(matches!(delete(&f.store, Some(&f.admin), &item.id), Err(AppError::NotFound(_))));
    }
}
