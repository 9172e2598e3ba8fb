use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceSongs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceSongs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ServiceSongs::ServiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceSongs::SongId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServiceSongs::Order).integer().not_null())
                    .col(ColumnDef::new(ServiceSongs::Key).string())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ServiceSongs::Table, ServiceSongs::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ServiceSongs::Table, ServiceSongs::SongId)
                            .to(Songs::Table, Songs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceSongs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ServiceSongs {
    Table,
    Id,
    ServiceId,
    SongId,
    Order,
    Key,
}

#[derive(Iden)]
enum Services {
    Table,
    Id,
}

#[derive(Iden)]
enum Songs {
    Table,
    Id,
}
