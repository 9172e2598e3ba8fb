use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Services::MinistryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(ColumnDef::new(Services::Date).date().not_null())
                    .col(ColumnDef::new(Services::Time).time().not_null())
                    .col(ColumnDef::new(Services::Type).string())
                    .col(ColumnDef::new(Services::Notes).text())
                    .col(
                        ColumnDef::new(Services::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Services::Table, Services::MinistryId)
                            .to(Ministries::Table, Ministries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Services {
    Table,
    Id,
    MinistryId,
    Name,
    Date,
    Time,
    Type,
    Notes,
    Status,
}

#[derive(Iden)]
enum Ministries {
    Table,
    Id,
}
