use sea_orm_migration::prelude::*;

mod m20261017_000001_create_users;
mod m20261017_000002_create_ministries;
mod m20261017_000003_create_ministry_members;
mod m20261017_000004_create_songs;
mod m20261017_000005_create_services;
mod m20261017_000006_create_service_members;
mod m20261017_000007_create_service_songs;
mod m20261017_000008_create_availability;
mod m20261017_000009_create_messages;
mod m20261017_000010_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261017_000001_create_users::Migration),
            Box::new(m20261017_000002_create_ministries::Migration),
            Box::new(m20261017_000003_create_ministry_members::Migration),
            Box::new(m20261017_000004_create_songs::Migration),
            Box::new(m20261017_000005_create_services::Migration),
            Box::new(m20261017_000006_create_service_members::Migration),
            Box::new(m20261017_000007_create_service_songs::Migration),
            Box::new(m20261017_000008_create_availability::Migration),
            Box::new(m20261017_000009_create_messages::Migration),
            Box::new(m20261017_000010_add_lookup_indexes::Migration),
        ]
    }
}
