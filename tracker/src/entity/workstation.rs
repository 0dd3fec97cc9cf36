use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "workstations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub hostname: String,
    pub type_id: i32,
    pub user_id: i32,
    pub department_id: i32,
    pub date_of_arrival: Option<String>,
    pub video_ram_gb: Option<i32>,
    pub system_ram_gb: Option<i32>,
    pub total_storage_tb: Option<i32>,
    pub hardware_description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workstation_type::Entity",
        from = "Column::TypeId",
        to = "super::workstation_type::Column::Id",
        on_delete = "Restrict"
    )]
    WorkstationType,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Restrict"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id",
        on_delete = "Restrict"
    )]
    Department,
}

impl Related<super::workstation_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkstationType.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
