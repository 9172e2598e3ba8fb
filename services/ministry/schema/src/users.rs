use sea_orm::entity::prelude::*;

/// User account. `external_id` holds the identity-provider subject when the
/// account was materialised from an upstream login.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub external_id: Option<String>,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ministry_members::Entity")]
    MinistryMembers,
    #[sea_orm(has_many = "super::availabilities::Entity")]
    Availabilities,
}

impl Related<super::ministry_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MinistryMembers.def()
    }
}

impl Related<super::availabilities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Availabilities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
