use sea_orm::entity::prelude::*;

/// Scheduled worship service.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ministry_id: i64,
    pub name: String,
    pub date: chrono::NaiveDate,
    pub time: chrono::NaiveTime,
    #[sea_orm(column_name = "type")]
    pub service_type: Option<String>,
    pub notes: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ministries::Entity",
        from = "Column::MinistryId",
        to = "super::ministries::Column::Id"
    )]
    Ministry,
    #[sea_orm(has_many = "super::service_members::Entity")]
    ServiceMembers,
    #[sea_orm(has_many = "super::service_songs::Entity")]
    ServiceSongs,
}

impl Related<super::ministries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ministry.def()
    }
}

impl Related<super::service_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceMembers.def()
    }
}

impl Related<super::service_songs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceSongs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
