use sea_orm::entity::prelude::*;

/// Song in a ministry's repertoire.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "songs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ministry_id: i64,
    pub title: String,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub bpm: Option<i32>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub chord_link: Option<String>,
    pub lyrics_link: Option<String>,
    pub audio_link: Option<String>,
    pub video_link: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ministries::Entity",
        from = "Column::MinistryId",
        to = "super::ministries::Column::Id"
    )]
    Ministry,
    #[sea_orm(has_many = "super::service_songs::Entity")]
    ServiceSongs,
}

impl Related<super::ministries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ministry.def()
    }
}

impl Related<super::service_songs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceSongs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
