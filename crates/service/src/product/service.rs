use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::domain::{Product, ProductInput, ProductView};
use super::repository::ProductRepository;
use crate::errors::ServiceError;

/// Product business service: maps payloads to records, keeps `total_price` in sync.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list_all(&self) -> Result<Vec<ProductView>, ServiceError> {
        let rows = self.repo.find_all().await?;
        debug!(count = rows.len(), "products_listed");
        Ok(rows.into_iter().map(ProductView::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<ProductView, ServiceError> {
        self.repo.find_by_id(id).await.map(ProductView::from)
    }

    /// Create a product; `totalPrice` is derived from `unitPrice * quantity`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use rust_decimal::Decimal;
    /// use service::product::{ProductService, domain::{ProductInput, CostBreakdown}, repository::mock::InMemoryProductRepository};
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::default()));
    /// let input = ProductInput {
    ///     make: "Daikin".into(), model: "FTXM35".into(), description: "Wall split".into(),
    ///     quantity: 3, unit_price: Decimal::new(1999, 2),
    ///     country: None, gas: None, scope: None, costs: CostBreakdown::default(),
    /// };
    /// let view = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(view.total_price, Decimal::new(5997, 2));
    /// ```
    #[instrument(skip(self, input), fields(make = %input.make, model = %input.model))]
    pub async fn create(&self, input: ProductInput) -> Result<ProductView, ServiceError> {
        input.validate()?;
        let product = Product::from_input(input, Utc::now())?;
        let saved = self.repo.save(product).await?;
        info!(product_id = ?saved.id, total_price = %saved.total_price, "product_created");
        Ok(saved.into())
    }

    /// Replace all mutable fields of an existing product.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: ProductInput) -> Result<ProductView, ServiceError> {
        input.validate()?;
        let mut existing = self.repo.find_by_id(id).await?;
        existing.apply(input, Utc::now())?;
        let saved = self.repo.save(existing).await?;
        info!(product_id = id, total_price = %saved.total_price, "product_updated");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.repo.delete_by_id(id).await?;
        info!(product_id = id, "product_deleted");
        Ok(())
    }

    /// Case-insensitive substring search over descriptions.
    #[instrument(skip(self))]
    pub async fn search(&self, text: &str) -> Result<Vec<ProductView>, ServiceError> {
        let rows = self.repo.find_by_description_containing(text).await?;
        debug!(count = rows.len(), "products_matched");
        Ok(rows.into_iter().map(ProductView::from).collect())
    }
}
