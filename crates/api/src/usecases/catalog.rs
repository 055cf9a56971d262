//! Use-case shared by the category, ingredient and ingredient-unit catalogs.

use cookbook_core::error::CoreError;
use cookbook_core::pagination::Page;
use cookbook_core::types::DbId;
use cookbook_db::models::catalog::{CatalogEntity, CatalogPatch, CreateCatalogEntry};

use crate::error::AppResult;
use crate::usecases::store::CatalogStore;

pub struct CatalogUsecase<S> {
    store: S,
}

impl<S: CatalogStore> CatalogUsecase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn not_found(id: DbId) -> CoreError {
        CoreError::not_found(<S::Entity as CatalogEntity>::KIND, id)
    }

    pub async fn create(&self, input: &CreateCatalogEntry) -> AppResult<S::Entity> {
        Ok(self.store.create(input).await?)
    }

    pub async fn get(&self, id: DbId) -> AppResult<S::Entity> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id).into())
    }

    /// `limit` and `offset` fall back to the defaults when non-positive.
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<S::Entity>> {
        Ok(self.store.list(Page::resolve(limit, offset)).await?)
    }

    pub async fn update(&self, id: DbId, patch: &CatalogPatch) -> AppResult<S::Entity> {
        self.store
            .update(id, patch)
            .await?
            .ok_or_else(|| Self::not_found(id).into())
    }

    pub async fn delete(&self, id: DbId, actor: &str) -> AppResult<S::Entity> {
        self.store
            .soft_delete(id, actor)
            .await?
            .ok_or_else(|| Self::not_found(id).into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use cookbook_core::error::EntityKind;
    use cookbook_core::pagination::{DEFAULT_LIMIT, DEFAULT_OFFSET};
    use cookbook_db::models::catalog::Category;

    use super::*;
    use crate::error::AppError;

    /// In-memory category table.
    #[derive(Default)]
    struct FakeCategories {
        rows: Mutex<Vec<Category>>,
        pages: Mutex<Vec<Page>>,
    }

    impl FakeCategories {
        fn live_mut<'a>(rows: &'a mut [Category], id: DbId) -> Option<&'a mut Category> {
            rows.iter_mut().find(|row| row.id == id && !row.is_deleted)
        }
    }

    #[async_trait]
    impl CatalogStore for FakeCategories {
        type Entity = Category;

        async fn create(&self, input: &CreateCatalogEntry) -> Result<Category, sqlx::Error> {
            let mut rows = self.rows.lock().unwrap();
            let row = Category {
                id: rows.len() as DbId + 1,
                name: input.name.clone(),
                created_at: chrono::Utc::now(),
                created_by: input.actor.clone(),
                updated_at: None,
                updated_by: None,
                is_deleted: false,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, sqlx::Error> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|r| r.id == id && !r.is_deleted).cloned())
        }

        async fn list(&self, page: Page) -> Result<Vec<Category>, sqlx::Error> {
            self.pages.lock().unwrap().push(page);
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|r| !r.is_deleted)
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .cloned()
                .collect())
        }

        async fn update(
            &self,
            id: DbId,
            patch: &CatalogPatch,
        ) -> Result<Option<Category>, sqlx::Error> {
            let mut rows = self.rows.lock().unwrap();
            Ok(Self::live_mut(&mut rows, id).map(|row| {
                if let Some(name) = &patch.name {
                    row.name = name.clone();
                }
                row.updated_at = Some(chrono::Utc::now());
                row.updated_by = Some(patch.actor.clone());
                row.clone()
            }))
        }

        async fn soft_delete(
            &self,
            id: DbId,
            actor: &str,
        ) -> Result<Option<Category>, sqlx::Error> {
            let mut rows = self.rows.lock().unwrap();
            Ok(Self::live_mut(&mut rows, id).map(|row| {
                row.is_deleted = true;
                row.updated_at = Some(chrono::Utc::now());
                row.updated_by = Some(actor.to_string());
                row.clone()
            }))
        }
    }

    fn usecase() -> CatalogUsecase<FakeCategories> {
        CatalogUsecase::new(FakeCategories::default())
    }

    fn entry(name: &str) -> CreateCatalogEntry {
        CreateCatalogEntry {
            name: name.into(),
            actor: "alice".into(),
        }
    }

    #[tokio::test]
    async fn update_of_missing_category_is_category_not_found() {
        let uc = usecase();
        let existing = uc.create(&entry("Soups")).await.unwrap();

        let patch = CatalogPatch {
            name: Some("X".into()),
            actor: "bob".into(),
        };
        let err = uc.update(999, &patch).await.unwrap_err();

        assert_matches!(
            err,
            AppError::Core(CoreError::NotFound { entity: EntityKind::Category, id: 999 })
        );
        assert_eq!(uc.get(existing.id).await.unwrap(), existing);
    }

    #[tokio::test]
    async fn non_positive_pagination_resolves_to_defaults() {
        let uc = usecase();
        uc.list(0, -1).await.unwrap();
        uc.list(DEFAULT_LIMIT, DEFAULT_OFFSET).await.unwrap();

        let pages = uc.store.pages.lock().unwrap().clone();
        assert_eq!(pages[0], pages[1]);
        assert_eq!(pages[0], Page::default());
    }

    #[tokio::test]
    async fn delete_hides_row_and_second_delete_is_not_found() {
        let uc = usecase();
        let created = uc.create(&entry("Desserts")).await.unwrap();

        let deleted = uc.delete(created.id, "carol").await.unwrap();
        assert!(deleted.is_deleted);
        assert_eq!(deleted.name, "Desserts");

        assert_matches!(uc.get(created.id).await, Err(AppError::Core(CoreError::NotFound { .. })));
        assert_matches!(
            uc.delete(created.id, "carol").await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
        assert!(uc.list(0, 0).await.unwrap().is_empty());
    }
}
