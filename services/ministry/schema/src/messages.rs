use sea_orm::entity::prelude::*;

/// Team message. A null `recipient_id` is a broadcast to the whole ministry.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ministry_id: i64,
    pub sender_id: i64,
    pub recipient_id: Option<i64>,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub read: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ministries::Entity",
        from = "Column::MinistryId",
        to = "super::ministries::Column::Id"
    )]
    Ministry,
}

impl Related<super::ministries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ministry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
