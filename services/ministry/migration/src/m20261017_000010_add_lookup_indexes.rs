use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[&str] = &[
    "uq_ministry_members_ministry_id_user_id",
    "idx_ministry_members_user_id",
    "idx_songs_ministry_id",
    "idx_services_ministry_id_date",
    "idx_service_members_service_id",
    "idx_service_songs_service_id_order",
    "idx_availability_user_id_ministry_id",
    "idx_messages_ministry_id_created_at",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(MinistryMembers::Table)
                    .col(MinistryMembers::MinistryId)
                    .col(MinistryMembers::UserId)
                    .name(INDEXES[0])
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(MinistryMembers::Table)
                    .col(MinistryMembers::UserId)
                    .name(INDEXES[1])
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Songs::Table)
                    .col(Songs::MinistryId)
                    .name(INDEXES[2])
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Services::Table)
                    .col(Services::MinistryId)
                    .col(Services::Date)
                    .name(INDEXES[3])
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ServiceMembers::Table)
                    .col(ServiceMembers::ServiceId)
                    .name(INDEXES[4])
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ServiceSongs::Table)
                    .col(ServiceSongs::ServiceId)
                    .col(ServiceSongs::Order)
                    .name(INDEXES[5])
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Availability::Table)
                    .col(Availability::UserId)
                    .col(Availability::MinistryId)
                    .name(INDEXES[6])
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Messages::Table)
                    .col(Messages::MinistryId)
                    .col(Messages::CreatedAt)
                    .name(INDEXES[7])
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum MinistryMembers {
    Table,
    MinistryId,
    UserId,
}

#[derive(Iden)]
enum Songs {
    Table,
    MinistryId,
}

#[derive(Iden)]
enum Services {
    Table,
    MinistryId,
    Date,
}

#[derive(Iden)]
enum ServiceMembers {
    Table,
    ServiceId,
}

#[derive(Iden)]
enum ServiceSongs {
    Table,
    ServiceId,
    Order,
}

#[derive(Iden)]
enum Availability {
    Table,
    UserId,
    MinistryId,
}

#[derive(Iden)]
enum Messages {
    Table,
    MinistryId,
    CreatedAt,
}
