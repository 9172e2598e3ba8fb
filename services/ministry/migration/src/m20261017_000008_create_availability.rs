use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Availability::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Availability::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Availability::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Availability::MinistryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Availability::StartDate).date().not_null())
                    .col(ColumnDef::new(Availability::EndDate).date().not_null())
                    .col(ColumnDef::new(Availability::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Availability::Table, Availability::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Availability::Table, Availability::MinistryId)
                            .to(Ministries::Table, Ministries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Availability::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Availability {
    Table,
    Id,
    UserId,
    MinistryId,
    StartDate,
    EndDate,
    Notes,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Ministries {
    Table,
    Id,
}
