//! First-run setup

use tracing::info;

use crate::config::paths::PocketPaths;
use crate::error::PocketResult;
use crate::models::DefaultCategory;

use super::categories::CategoryRepository;

/// Create the data directories and seed the default categories.
///
/// Returns the number of categories created; an existing category file is
/// left untouched.
pub fn initialize_storage(paths: &PocketPaths) -> PocketResult<usize> {
    paths.ensure_directories()?;

    if !needs_initialization(paths) {
        return Ok(0);
    }

    let categories = CategoryRepository::new(paths.categories_file());
    for default in DefaultCategory::all() {
        categories.upsert(default.to_category())?;
    }
    categories.save()?;

    let created = DefaultCategory::all().len();
    info!(created, "seeded default categories");
    Ok(created)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &PocketPaths) -> bool {
    !paths.categories_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryKind};
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        assert_eq!(initialize_storage(&paths).unwrap(), 13);
        assert!(!needs_initialization(&paths));

        let repo = CategoryRepository::new(paths.categories_file());
        repo.load().unwrap();
        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 13);
        assert!(all.iter().all(|c| !c.is_custom));
        assert_eq!(
            all.iter().filter(|c| c.kind == CategoryKind::Income).count(),
            5
        );
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());

        let repo = CategoryRepository::new(paths.categories_file());
        repo.upsert(Category::custom("Pets", "paw-outline", "#123456", CategoryKind::Expense))
            .unwrap();
        repo.save().unwrap();

        assert_eq!(initialize_storage(&paths).unwrap(), 0);

        let repo = CategoryRepository::new(paths.categories_file());
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 1);
    }
}
