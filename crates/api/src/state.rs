use std::sync::Arc;

use cookbook_db::models::catalog::{Category, Ingredient, IngredientUnit};

use crate::config::ServerConfig;
use crate::usecases::store::{PgCatalogStore, PgRecipeIngredientStore, PgRecipeStore};
use crate::usecases::{CatalogUsecase, RecipeUsecase};

pub type CatalogService<E> = CatalogUsecase<PgCatalogStore<E>>;
pub type RecipeService = RecipeUsecase<PgRecipeStore, PgRecipeIngredientStore>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cookbook_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    pub categories: Arc<CatalogService<Category>>,
    pub ingredients: Arc<CatalogService<Ingredient>>,
    pub ingredient_units: Arc<CatalogService<IngredientUnit>>,
    pub recipes: Arc<RecipeService>,
}

impl AppState {
    /// Wire every use-case to the given pool.
    pub fn new(pool: cookbook_db::DbPool, config: ServerConfig) -> Self {
        Self {
            categories: Arc::new(CatalogUsecase::new(PgCatalogStore::new(pool.clone()))),
            ingredients: Arc::new(CatalogUsecase::new(PgCatalogStore::new(pool.clone()))),
            ingredient_units: Arc::new(CatalogUsecase::new(PgCatalogStore::new(pool.clone()))),
            recipes: Arc::new(RecipeUsecase::new(
                PgRecipeStore::new(pool.clone()),
                PgRecipeIngredientStore::new(pool.clone()),
            )),
            config: Arc::new(config),
            pool,
        }
    }
}
