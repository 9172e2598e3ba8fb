use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MinistryMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MinistryMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MinistryMembers::MinistryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MinistryMembers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MinistryMembers::Role).string().not_null())
                    .col(ColumnDef::new(MinistryMembers::Position).string())
                    .col(
                        ColumnDef::new(MinistryMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MinistryMembers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MinistryMembers::Table, MinistryMembers::MinistryId)
                            .to(Ministries::Table, Ministries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MinistryMembers::Table, MinistryMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MinistryMembers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MinistryMembers {
    Table,
    Id,
    MinistryId,
    UserId,
    Role,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Ministries {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
