use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Directory DN, e.g. "a123z".
    #[sea_orm(unique)]
    pub distinguished_name: String,
    pub name: String,
    pub department_id: i32,
    pub notes: Option<String>,
    /// 0 = inactive, 1 = active, 2 = on leave.
    pub status: i32,
    pub office_location: Option<String>,
    pub date_of_arrival: Option<String>,
    pub date_of_leave: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id",
        on_delete = "Restrict"
    )]
    Department,
    #[sea_orm(has_many = "super::workstation::Entity")]
    Workstation,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::workstation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workstation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
