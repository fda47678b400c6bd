//! Entity round-trips against a live database; skipped when none is reachable.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};
use rust_decimal::Decimal;

use crate::{db, product, user};

async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    let cfg = db::DatabaseConfig { url, max_connections: 2, min_connections: 1, ..Default::default() };
    let db = match db::connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = db::migrate(&db).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

#[tokio::test]
async fn product_insert_assigns_id_and_keeps_decimals() {
    let Some(db) = setup_test_db().await else { return };
    let now = Utc::now().into();
    let am = product::ActiveModel {
        id: NotSet,
        make: Set("Carrier".into()),
        model: Set("42QHC".into()),
        country: Set(Some("Oman".into())),
        gas: Set(Some("R410A".into())),
        scope: Set(None),
        description: Set("Ducted split unit".into()),
        quantity: Set(3),
        ex_work_cost: Set(Some(Decimal::new(120_050, 2))),
        vat: Set(None),
        fitting: Set(None),
        transport: Set(None),
        cd_vat: Set(None),
        unit_cost: Set(None),
        total_cost: Set(None),
        levy: Set(None),
        sub_total: Set(None),
        quoted_unit_price: Set(Decimal::new(1999, 2)),
        total_price: Set(Decimal::new(5997, 2)),
        difference: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let saved = am.insert(&db).await.expect("insert product");
    assert!(saved.id > 0);
    assert_eq!(saved.ex_work_cost, Some(Decimal::new(120_050, 2)));
    assert_eq!(saved.total_price, Decimal::new(5997, 2));

    product::Entity::delete_by_id(saved.id).exec(&db).await.expect("delete product");
    assert!(product::Entity::find_by_id(saved.id).one(&db).await.expect("find").is_none());
}

#[tokio::test]
async fn duplicate_username_violates_unique_key() {
    let Some(db) = setup_test_db().await else { return };
    let now = Utc::now().into();
    let username = format!("model_user_{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());
    let mk = || user::ActiveModel {
        id: NotSet,
        username: Set(username.clone()),
        password_hash: Set("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA".into()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let first = mk().insert(&db).await.expect("insert user");
    assert!(mk().insert(&db).await.is_err());
    user::Entity::delete_by_id(first.id).exec(&db).await.expect("delete user");
}
