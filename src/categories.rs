// Category reference data

use tracing::info;

use crate::error::AppResult;
use crate::models::Category;
use crate::store::Store;

/// (name, slug, icon, color) in display order
pub const DEFAULT_CATEGORIES: [(&str, &str, &str, &str); 8] = [
    ("Politics", "politics", "🏛️", "#3B82F6"),
    ("Technology", "technology", "💻", "#8B5CF6"),
    ("Health", "health", "🏥", "#10B981"),
    ("Science", "science", "🔬", "#F59E0B"),
    ("Entertainment", "entertainment", "🎬", "#EC4899"),
    ("Sports", "sports", "⚽", "#EF4444"),
    ("Business", "business", "📈", "#6366F1"),
    ("World", "world", "🌍", "#14B8A6"),
];

pub fn list(store: &Store) -> AppResult<Vec<Category>> {
    store.categories()
}

/// Insert the default categories into an empty store. Returns how many were inserted.
pub fn seed(store: &Store) -> AppResult<usize> {
    if store.has_categories() {
        return Ok(0);
    }

    for (name, slug, icon, color) in DEFAULT_CATEGORIES {
        store.insert_category(&Category {
            id: store.next_id("cat")?,
            name: name.to_string(),
            slug: slug.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        })?;
    }

    info!("Seeded {} categories", DEFAULT_CATEGORIES.len());
    Ok(DEFAULT_CATEGORIES.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_idempotent() {
        let store = Store::temporary().unwrap();
        assert!(list(&store).unwrap().is_empty());

        assert_eq!(seed(&store).unwrap(), 8);
        assert_eq!(seed(&store).unwrap(), 0);
        assert_eq!(list(&store).unwrap().len(), 8);
    }

    #[test]
    fn test_list_keeps_seeding_order() {
        let store = Store::temporary().unwrap();
        seed(&store).unwrap();

        let slugs: Vec<String> = list(&store).unwrap().into_iter().map(|c| c.slug).collect();
        assert_eq!(
            slugs,
            vec!["politics", "technology", "health", "science", "entertainment", "sports", "business", "world"]
        );
    }
}
