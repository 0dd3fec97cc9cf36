use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "workstation_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub type_name: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::workstation::Entity")]
    Workstation,
}

impl Related<super::workstation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workstation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
