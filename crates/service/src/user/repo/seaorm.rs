use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder, Set, SqlErr};

use models::user;

use crate::user::domain::User;
use crate::user::errors::AuthError;
use crate::user::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

fn to_domain(m: user::Model) -> User {
    User {
        id: Some(m.id),
        username: m.username,
        password_hash: m.password_hash,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

fn to_active(u: User) -> user::ActiveModel {
    user::ActiveModel {
        id: u.id.map(Set).unwrap_or(NotSet),
        username: Set(u.username),
        password_hash: Set(u.password_hash),
        created_at: Set(u.created_at.into()),
        updated_at: Set(u.updated_at.into()),
    }
}

fn map_write_err(e: DbErr) -> AuthError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
        return AuthError::Conflict;
    }
    match e {
        DbErr::RecordNotUpdated => AuthError::NotFound,
        other => AuthError::from(other),
    }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, AuthError> {
        let rows = user::Entity::find().order_by_asc(user::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<User, AuthError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(to_domain)
            .ok_or(AuthError::NotFound)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let row = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(row.map(to_domain))
    }

    async fn save(&self, user: User) -> Result<User, AuthError> {
        let is_new = user.id.is_none();
        let am = to_active(user);
        let saved = if is_new {
            am.insert(&self.db).await.map_err(map_write_err)?
        } else {
            am.update(&self.db).await.map_err(map_write_err)?
        };
        Ok(to_domain(saved))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AuthError> {
        let res = user::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AuthError::NotFound);
        }
        Ok(())
    }
}
