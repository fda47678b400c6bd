use chrono::Utc;
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr, LikeExpr};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use models::product;

use crate::errors::ServiceError;
use crate::product::domain::{CostBreakdown, Product};
use crate::product::repository::ProductRepository;

pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

fn to_domain(m: product::Model) -> Product {
    Product {
        id: Some(m.id),
        make: m.make,
        model: m.model,
        country: m.country,
        gas: m.gas,
        scope: m.scope,
        description: m.description,
        quantity: m.quantity,
        costs: CostBreakdown {
            ex_work_cost: m.ex_work_cost,
            vat: m.vat,
            fitting: m.fitting,
            transport: m.transport,
            cd_vat: m.cd_vat,
            unit_cost: m.unit_cost,
            total_cost: m.total_cost,
            levy: m.levy,
            sub_total: m.sub_total,
            difference: m.difference,
        },
        unit_price: m.quoted_unit_price,
        total_price: m.total_price,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

fn to_active(p: Product) -> product::ActiveModel {
    let c = p.costs;
    product::ActiveModel {
        id: p.id.map(Set).unwrap_or(NotSet),
        make: Set(p.make),
        model: Set(p.model),
        country: Set(p.country),
        gas: Set(p.gas),
        scope: Set(p.scope),
        description: Set(p.description),
        quantity: Set(p.quantity),
        ex_work_cost: Set(c.ex_work_cost),
        vat: Set(c.vat),
        fitting: Set(c.fitting),
        transport: Set(c.transport),
        cd_vat: Set(c.cd_vat),
        unit_cost: Set(c.unit_cost),
        total_cost: Set(c.total_cost),
        levy: Set(c.levy),
        sub_total: Set(c.sub_total),
        quoted_unit_price: Set(p.unit_price),
        total_price: Set(p.total_price),
        difference: Set(c.difference),
        created_at: Set(p.created_at.into()),
        updated_at: Set(p.updated_at.into()),
    }
}

/// LIKE pattern matching `text` literally anywhere. Case folding is left to the database.
fn contains_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    format!("%{}%", escaped)
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Product, ServiceError> {
        product::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(to_domain)
            .ok_or_else(|| ServiceError::not_found("product"))
    }

    async fn save(&self, product: Product) -> Result<Product, ServiceError> {
        let is_new = product.id.is_none();
        let am = to_active(product);
        let saved = if is_new {
            am.insert(&self.db).await?
        } else {
            am.update(&self.db).await.map_err(|e| match e {
                DbErr::RecordNotUpdated => ServiceError::not_found("product"),
                other => ServiceError::from(other),
            })?
        };
        Ok(to_domain(saved))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        let res = product::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("product"));
        }
        Ok(())
    }

    async fn find_by_description_containing(&self, text: &str) -> Result<Vec<Product>, ServiceError> {
        let rows = product::Entity::find()
            .filter(
                Expr::col(product::Column::Description)
                    .ilike(LikeExpr::new(contains_pattern(text)).escape('\\')),
            )
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::domain::ProductInput;
    use crate::product::ProductService;
    use std::sync::Arc;
    use crate::test_support::get_db;
    use rust_decimal::Decimal;

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Desk"), "%Desk%");
        assert_eq!(contains_pattern("Écran"), "%Écran%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    fn sample(description: &str) -> Product {
        Product::from_input(sample_input(description), Utc::now()).unwrap()
    }

    fn sample_input(description: &str) -> ProductInput {
        ProductInput {
            make: "Gree".into(),
            model: "GWH12".into(),
            description: description.into(),
            quantity: 2,
            unit_price: Decimal::new(4550, 2),
            country: Some("China".into()),
            gas: Some("R32".into()),
            scope: None,
            costs: CostBreakdown { fitting: Some(Decimal::new(15, 0)), ..Default::default() },
        }
    }

    #[tokio::test]
    async fn product_repository_roundtrip() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmProductRepository { db };

        let tag = uuid::Uuid::new_v4().simple().to_string();
        let saved = repo.save(sample(&format!("Large DESK unit {tag}"))).await?;
        let id = saved.id.expect("assigned id");
        assert_eq!(saved.costs.fitting, Some(Decimal::new(15, 0)));

        let found = repo.find_by_id(id).await?;
        assert_eq!(found.total_price, Decimal::new(9100, 2));

        let hits = repo.find_by_description_containing(&format!("desk unit {tag}")).await?;
        assert_eq!(hits.len(), 1);
        let misses = repo.find_by_description_containing(&format!("desk_unit {tag}")).await?;
        assert!(misses.is_empty());

        let mut changed = found.clone();
        changed.quantity = 5;
        let updated = repo.save(changed).await?;
        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.quantity, 5);

        repo.delete_by_id(id).await?;
        assert!(matches!(repo.find_by_id(id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(repo.delete_by_id(id).await, Err(ServiceError::NotFound(_))));

        let mut ghost = sample("ghost");
        ghost.id = Some(id);
        assert!(matches!(repo.save(ghost).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn non_ascii_description_is_searchable() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmProductRepository { db };

        let tag = uuid::Uuid::new_v4().simple().to_string();
        let saved = repo.save(sample(&format!("Écran Desk {tag}"))).await?;
        let id = saved.id.expect("assigned id");

        let exact = repo.find_by_description_containing(&format!("Écran Desk {tag}")).await?;
        assert_eq!(exact.len(), 1);
        let ascii_case = repo.find_by_description_containing(&format!("Écran DESK {}", tag.to_uppercase())).await?;
        assert_eq!(ascii_case.len(), 1);
        let accent_only = repo.find_by_description_containing(&format!("cran desk {tag}")).await?;
        assert_eq!(accent_only.len(), 1);

        repo.delete_by_id(id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn stored_totals_stay_exact() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let svc = ProductService::new(Arc::new(SeaOrmProductRepository { db }));

        let mut input = sample_input("precise");
        input.unit_price = Decimal::new(1, 4);
        input.quantity = 3;
        let view = svc.create(input).await?;
        assert_eq!(view.unit_price, Decimal::new(1, 4));
        assert_eq!(view.total_price, Decimal::new(3, 4));
        assert_eq!(svc.get(view.id).await?, view);

        let mut sub_scale = sample_input("sub scale");
        sub_scale.unit_price = Decimal::new(5, 5);
        assert!(matches!(svc.create(sub_scale).await, Err(e) if e.is_client_error()));

        let mut overflow = sample_input("overflow");
        overflow.unit_price = Decimal::from(10_i64.pow(16));
        assert!(matches!(svc.create(overflow).await, Err(e) if e.is_client_error()));

        let mut long_country = sample_input("long country");
        long_country.country = Some("x".repeat(200));
        assert!(matches!(svc.create(long_country).await, Err(e) if e.is_client_error()));

        svc.delete(view.id).await?;
        Ok(())
    }
}
