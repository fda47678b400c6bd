use async_trait::async_trait;

use super::domain::Product;
use crate::errors::ServiceError;

/// Persistence gateway for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every stored product, ordered by id.
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError>;
    /// Fails with `NotFound` when absent.
    async fn find_by_id(&self, id: i64) -> Result<Product, ServiceError>;
    /// Insert when `product.id` is `None`, otherwise overwrite the stored row.
    async fn save(&self, product: Product) -> Result<Product, ServiceError>;
    /// Fails with `NotFound` when absent.
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
    /// Case-insensitive substring match on `description`.
    async fn find_by_description_containing(&self, text: &str) -> Result<Vec<Product>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i64, Product>,
        last_id: i64,
    }

    #[derive(Default)]
    pub struct InMemoryProductRepository {
        state: Mutex<State>,
    }

    impl InMemoryProductRepository {
        fn lock(&self) -> Result<MutexGuard<'_, State>, ServiceError> {
            self.state.lock().map_err(|_| ServiceError::Db("product store lock poisoned".into()))
        }    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
            Ok(self.lock()?.rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Product, ServiceError> {
            self.lock()?.rows.get(&id).cloned().ok_or_else(|| ServiceError::not_found("product"))
        }

        async fn save(&self, mut product: Product) -> Result<Product, ServiceError> {
            let mut state = self.lock()?;
            let id = match product.id {
                Some(id) if state.rows.contains_key(&id) => id,
                Some(_) => return Err(ServiceError::not_found("product")),
                None => {
                    state.last_id += 1;
                    product.id = Some(state.last_id);
                    state.last_id
                }
            };
            state.rows.insert(id, product.clone());
            Ok(product)
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            self.lock()?
                .rows
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| ServiceError::not_found("product"))
        }

        async fn find_by_description_containing(&self, text: &str) -> Result<Vec<Product>, ServiceError> {
            let needle = text.to_lowercase();
            Ok(self
                .lock()?
                .rows
                .values()
                .filter(|p| p.description.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }
    }
}
