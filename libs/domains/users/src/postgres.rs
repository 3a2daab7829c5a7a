use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::User,
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM.
///
/// Uniqueness is enforced by the database's two named unique indexes; both
/// constraints are checked atomically by the insert/update statement itself,
/// so racing writers resolve to exactly one winner.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Translate a save-time database error into the domain taxonomy.
///
/// The violation kind is recognized from the driver's typed error
/// (`SqlErr::UniqueConstraintViolation`), never by matching free-text
/// messages; the violated field is then attributed by the constraint
/// identifiers declared in [`entity`].
fn translate_save_err(err: DbErr, user: &User) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(constraint)) => {
            if constraint.contains(entity::LOGIN_NAME_CONSTRAINT) {
                UserError::DuplicateName(user.name.clone())
            } else if constraint.contains(entity::EMAIL_ADDRESS_CONSTRAINT) {
                UserError::DuplicateEmail(user.email_address.clone())
            } else {
                UserError::Internal(format!("Unexpected unique constraint: {}", constraint))
            }
        }
        _ => UserError::Internal(format!("Database error: {}", err)),
    }
}

fn internal(err: DbErr) -> UserError {
    UserError::Internal(format!("Database error: {}", err))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::LoginName.eq(name))
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn save(&self, user: User) -> UserResult<User> {
        // Timestamps are assigned here, right before the statement runs.
        let now = Utc::now();

        match user.id {
            None => {
                let model = entity::ActiveModel {
                    id: NotSet,
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                    login_name: Set(user.name.clone()),
                    email_address: Set(user.email_address.clone()),
                    first_name: Set(user.first_name.clone()),
                    last_name: Set(user.last_name.clone()),
                };

                let inserted = entity::Entity::insert(model)
                    .exec_with_returning(&self.db)
                    .await
                    .map_err(|e| translate_save_err(e, &user))?;

                tracing::info!(user_id = inserted.id, login_name = %inserted.login_name, "Created user");
                Ok(inserted.into())
            }
            Some(id) => {
                let model = entity::ActiveModel {
                    id: Set(id),
                    // created_at stays whatever the row already has
                    created_at: NotSet,
                    updated_at: Set(now.into()),
                    login_name: Set(user.name.clone()),
                    email_address: Set(user.email_address.clone()),
                    first_name: Set(user.first_name.clone()),
                    last_name: Set(user.last_name.clone()),
                };

                let updated = entity::Entity::update(model)
                    .exec(&self.db)
                    .await
                    .map_err(|e| match e {
                        DbErr::RecordNotUpdated => UserError::NotFound(id),
                        other => translate_save_err(other, &user),
                    })?;

                tracing::info!(user_id = id, "Updated user");
                Ok(updated.into())
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn clear(&self) -> UserResult<()> {
        entity::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(internal)?;

        Ok(())
    }

    async fn reset_identity_sequence(&self) -> UserResult<()> {
        self.db
            .execute_unprepared("ALTER SEQUENCE users_id_seq RESTART WITH 1")
            .await
            .map_err(internal)?;

        Ok(())
    }
}
