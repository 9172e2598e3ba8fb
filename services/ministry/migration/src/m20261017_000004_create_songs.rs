use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Songs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Songs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Songs::MinistryId).big_integer().not_null())
                    .col(ColumnDef::new(Songs::Title).string().not_null())
                    .col(ColumnDef::new(Songs::Artist).string())
                    .col(ColumnDef::new(Songs::Key).string())
                    .col(ColumnDef::new(Songs::Bpm).integer())
                    .col(ColumnDef::new(Songs::Duration).string())
                    .col(ColumnDef::new(Songs::Category).string())
                    .col(ColumnDef::new(Songs::ChordLink).string())
                    .col(ColumnDef::new(Songs::LyricsLink).string())
                    .col(ColumnDef::new(Songs::AudioLink).string())
                    .col(ColumnDef::new(Songs::VideoLink).string())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Songs::Table, Songs::MinistryId)
                            .to(Ministries::Table, Ministries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Songs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Songs {
    Table,
    Id,
    MinistryId,
    Title,
    Artist,
    Key,
    Bpm,
    Duration,
    Category,
    ChordLink,
    LyricsLink,
    AudioLink,
    VideoLink,
}

#[derive(Iden)]
enum Ministries {
    Table,
    Id,
}
