use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use models::product::{
    validate_amount, validate_label, validate_optional_label, validate_quantity, validate_unit_price,
    MAX_COUNTRY_LEN, MAX_GAS_LEN, MAX_SCOPE_LEN, MONEY_SCALE,
};

use crate::errors::ServiceError;

/// Internal cost breakdown of a quote line. Stored as-is, never exposed in views.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    #[serde(default)]
    pub ex_work_cost: Option<Decimal>,
    #[serde(default, alias = "uaeVat")]
    pub vat: Option<Decimal>,
    #[serde(default)]
    pub fitting: Option<Decimal>,
    #[serde(default, alias = "trp")]
    pub transport: Option<Decimal>,
    #[serde(default)]
    pub cd_vat: Option<Decimal>,
    #[serde(default, alias = "uC")]
    pub unit_cost: Option<Decimal>,
    #[serde(default, alias = "tC")]
    pub total_cost: Option<Decimal>,
    #[serde(default, alias = "levie")]
    pub levy: Option<Decimal>,
    #[serde(default)]
    pub sub_total: Option<Decimal>,
    #[serde(default)]
    pub difference: Option<Decimal>,
}

/// Stored product record. `id` is `None` until the gateway assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Option<i64>,
    pub make: String,
    pub model: String,
    pub country: Option<String>,
    pub gas: Option<String>,
    pub scope: Option<String>,
    pub description: String,
    pub quantity: i32,
    pub costs: CostBreakdown,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub description: String,
    pub quantity: i32,
    #[serde(alias = "quotedUnitPrice")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub gas: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(flatten)]
    pub costs: CostBreakdown,
}

/// External shape of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `unit_price * quantity`, exact. The result must fit the money columns as well.
pub fn line_total(unit_price: Decimal, quantity: i32) -> Result<Decimal, ServiceError> {
    let total = unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| ServiceError::Validation("total price out of range".into()))?;
    validate_amount("totalPrice", total)?;
    Ok(total)
}

/// Fixed money scale on the way out, so every gateway renders the same digits.
fn money(mut value: Decimal) -> Decimal {
    value.rescale(MONEY_SCALE);
    value
}

impl CostBreakdown {
    fn entries(&self) -> [(&'static str, Option<Decimal>); 10] {
        [
            ("exWorkCost", self.ex_work_cost),
            ("vat", self.vat),
            ("fitting", self.fitting),
            ("transport", self.transport),
            ("cdVat", self.cd_vat),
            ("unitCost", self.unit_cost),
            ("totalCost", self.total_cost),
            ("levy", self.levy),
            ("subTotal", self.sub_total),
            ("difference", self.difference),
        ]
    }
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_label("make", &self.make)?;
        validate_label("model", &self.model)?;
        validate_optional_label("country", self.country.as_deref(), MAX_COUNTRY_LEN)?;
        validate_optional_label("gas", self.gas.as_deref(), MAX_GAS_LEN)?;
        validate_optional_label("scope", self.scope.as_deref(), MAX_SCOPE_LEN)?;
        validate_quantity(self.quantity)?;
        validate_unit_price(self.unit_price)?;
        for (field, value) in self.costs.entries() {
            if let Some(v) = value {
                validate_amount(field, v)?;
            }
        }
        line_total(self.unit_price, self.quantity)?;
        Ok(())
    }
}

impl Product {
    /// Build an unsaved record from a validated input.
    pub fn from_input(input: ProductInput, now: DateTime<Utc>) -> Result<Self, ServiceError> {
        let total_price = line_total(input.unit_price, input.quantity)?;
        Ok(Self {
            id: None,
            make: input.make,
            model: input.model,
            country: input.country,
            gas: input.gas,
            scope: input.scope,
            description: input.description,
            quantity: input.quantity,
            costs: input.costs,
            unit_price: input.unit_price,
            total_price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite every mutable field; `id` and `created_at` are kept.
    pub fn apply(&mut self, input: ProductInput, now: DateTime<Utc>) -> Result<(), ServiceError> {
        let total_price = line_total(input.unit_price, input.quantity)?;
        self.make = input.make;
        self.model = input.model;
        self.country = input.country;
        self.gas = input.gas;
        self.scope = input.scope;
        self.description = input.description;
        self.quantity = input.quantity;
        self.costs = input.costs;
        self.unit_price = input.unit_price;
        self.total_price = total_price;
        self.updated_at = now;
        Ok(())
    }
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        Self {
            // persisted records always carry an id
            id: p.id.unwrap_or_default(),
            make: p.make,
            model: p.model,
            description: p.description,
            quantity: p.quantity,
            unit_price: money(p.unit_price),
            total_price: money(p.total_price),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
