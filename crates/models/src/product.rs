use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub make: String,
    pub model: String,
    pub country: Option<String>,
    pub gas: Option<String>,
    pub scope: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub quantity: i32,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub ex_work_cost: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub vat: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub fitting: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub transport: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub cd_vat: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub unit_cost: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub total_cost: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub levy: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub sub_total: Option<Decimal>,
    /// Canonical unit price of the line item.
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub quoted_unit_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub difference: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const MAX_LABEL_LEN: usize = 255;
pub const MAX_COUNTRY_LEN: usize = 128;
pub const MAX_GAS_LEN: usize = 128;
pub const MAX_SCOPE_LEN: usize = 255;

/// Fractional digits kept by the NUMERIC(19, 4) money columns.
pub const MONEY_SCALE: u32 = 4;
/// Integer digits available in NUMERIC(19, 4).
pub const MONEY_INTEGER_DIGITS: u32 = 15;

/// Make and model are required, single-line labels.
pub fn validate_label(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    if value.chars().count() > MAX_LABEL_LEN {
        return Err(ModelError::Validation(format!("{field} longer than {MAX_LABEL_LEN} characters")));
    }
    Ok(())
}

/// Country, gas and scope may be absent but must fit their columns.
pub fn validate_optional_label(field: &str, value: Option<&str>, max: usize) -> Result<(), ModelError> {
    match value {
        Some(v) if v.chars().count() > max => {
            Err(ModelError::Validation(format!("{field} longer than {max} characters")))
        }
        _ => Ok(()),
    }
}

pub fn validate_quantity(quantity: i32) -> Result<(), ModelError> {
    if quantity < 0 {
        return Err(ModelError::Validation("quantity must be >= 0".into()));
    }
    Ok(())
}

/// Any amount stored in a money column: at most 4 decimal places, 15 integer digits.
pub fn validate_amount(field: &str, value: Decimal) -> Result<(), ModelError> {
    if value.normalize().scale() > MONEY_SCALE {
        return Err(ModelError::Validation(format!("{field} has more than {MONEY_SCALE} decimal places")));
    }
    let limit = Decimal::from(10_i64.pow(MONEY_INTEGER_DIGITS));
    if value.abs() >= limit {
        return Err(ModelError::Validation(format!("{field} exceeds {MONEY_INTEGER_DIGITS} integer digits")));
    }
    Ok(())
}

pub fn validate_unit_price(price: Decimal) -> Result<(), ModelError> {
    if price < Decimal::ZERO {
        return Err(ModelError::Validation("unitPrice must be >= 0".into()));
    }
    validate_amount("unitPrice", price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_label_rejected() {
        assert!(validate_label("make", "   ").is_err());
        assert!(validate_label("make", "Daikin").is_ok());
        assert!(validate_label("model", &"x".repeat(MAX_LABEL_LEN + 1)).is_err());
    }

    #[test]
    fn negative_quantity_rejected() {
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(0).is_ok());
    }

    #[test]
    fn negative_price_rejected_zero_allowed() {
        assert!(validate_unit_price(Decimal::new(-1, 2)).is_err());
        assert!(validate_unit_price(Decimal::ZERO).is_ok());
        assert!(validate_unit_price(-Decimal::ZERO).is_ok());
        assert!(validate_unit_price(Decimal::new(1999, 2)).is_ok());
    }

    #[test]
    fn amount_must_fit_money_column() {
        assert!(validate_amount("vat", Decimal::new(12345, 4)).is_ok());
        // trailing zeros beyond the fourth place are harmless
        assert!(validate_amount("vat", Decimal::new(1_500_000, 6)).is_ok());
        assert!(validate_amount("vat", Decimal::new(5, 5)).is_err());
        assert!(validate_unit_price(Decimal::new(5, 5)).is_err());

        let largest: Decimal = "999999999999999.9999".parse().unwrap();
        assert!(validate_amount("unitPrice", largest).is_ok());
        assert!(validate_amount("difference", -largest).is_ok());
        assert!(validate_unit_price(Decimal::from(10_i64.pow(16))).is_err());
        assert!(validate_amount("difference", Decimal::from(-(10_i64.pow(15)))).is_err());
    }

    #[test]
    fn optional_labels_limited_to_column_width() {
        assert!(validate_optional_label("country", None, MAX_COUNTRY_LEN).is_ok());
        assert!(validate_optional_label("country", Some("Oman"), MAX_COUNTRY_LEN).is_ok());
        let long = "x".repeat(200);
        assert!(validate_optional_label("country", Some(&long), MAX_COUNTRY_LEN).is_err());
        assert!(validate_optional_label("scope", Some(&long), MAX_SCOPE_LEN).is_ok());
    }
}
