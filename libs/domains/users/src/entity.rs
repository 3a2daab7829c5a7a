use sea_orm::entity::prelude::*;

/// Sea-ORM entity for the users table.
///
/// Both uniqueness constraints live here, enforced atomically by the store
/// at save time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    #[sea_orm(unique)]
    pub login_name: String,
    #[sea_orm(unique)]
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
}

/// Identifier of the login-name uniqueness constraint, as named by the
/// migration. Used to attribute a unique-key violation to the field.
pub const LOGIN_NAME_CONSTRAINT: &str = "users_login_name_key";

/// Identifier of the email-address uniqueness constraint.
pub const EMAIL_ADDRESS_CONSTRAINT: &str = "users_email_address_key";

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::User {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            created_at: Some(model.created_at.into()),
            updated_at: Some(model.updated_at.into()),
            name: model.login_name,
            email_address: model.email_address,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}
