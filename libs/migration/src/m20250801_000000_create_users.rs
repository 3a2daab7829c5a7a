use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table. Timestamps are written by the repository save
        // path, not by column defaults or triggers.
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(big_pk_auto(Users::Id))
                    .col(timestamp_with_time_zone(Users::CreatedAt))
                    .col(timestamp_with_time_zone(Users::UpdatedAt))
                    .col(string(Users::LoginName))
                    .col(string(Users::EmailAddress))
                    .col(string(Users::FirstName))
                    .col(string(Users::LastName))
                    .to_owned(),
            )
            .await?;

        // Unique indexes carry fixed names; the repository maps a violation
        // back to the offending field by these identifiers.
        manager
            .create_index(
                Index::create()
                    .name("users_login_name_key")
                    .table(Users::Table)
                    .col(Users::LoginName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("users_email_address_key")
                    .table(Users::Table)
                    .col(Users::EmailAddress)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    LoginName,
    EmailAddress,
    FirstName,
    LastName,
}
