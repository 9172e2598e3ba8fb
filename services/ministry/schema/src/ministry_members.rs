use sea_orm::entity::prelude::*;

/// A user's membership in a ministry.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ministry_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ministry_id: i64,
    pub user_id: i64,
    pub role: String,
    pub position: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ministries::Entity",
        from = "Column::MinistryId",
        to = "super::ministries::Column::Id"
    )]
    Ministry,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::ministries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ministry.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
