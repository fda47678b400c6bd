use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Row of the `users` table. `password_hash` is a PHC string, never a raw password.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const MAX_USERNAME_LEN: usize = 64;

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    if username.trim().is_empty() {
        return Err(ModelError::Validation("username required".into()));
    }
    if username.trim() != username {
        return Err(ModelError::Validation("username must not start or end with whitespace".into()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(ModelError::Validation(format!("username longer than {MAX_USERNAME_LEN} characters")));
    }
    Ok(())
}
