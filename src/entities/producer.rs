use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "producers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::track::Entity> for Entity {
    fn to() -> RelationDef {
        super::track_producer::Relation::Track.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::track_producer::Relation::Producer.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
