use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Workstations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Workstations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Workstations::Hostname)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Workstations::TypeId).integer().not_null())
                    .col(ColumnDef::new(Workstations::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Workstations::DepartmentId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Workstations::DateOfArrival).string().null())
                    .col(ColumnDef::new(Workstations::VideoRamGb).integer().null())
                    .col(ColumnDef::new(Workstations::SystemRamGb).integer().null())
                    .col(
                        ColumnDef::new(Workstations::TotalStorageTb)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Workstations::HardwareDescription)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(Workstations::Notes).text().null())
                    .col(
                        ColumnDef::new(Workstations::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Workstations::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workstations_type")
                            .from(Workstations::Table, Workstations::TypeId)
                            .to(WorkstationTypes::Table, WorkstationTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workstations_user")
                            .from(Workstations::Table, Workstations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workstations_department")
                            .from(Workstations::Table, Workstations::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_workstations_user")
                    .table(Workstations::Table)
                    .col(Workstations::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_workstations_department")
                    .table(Workstations::Table)
                    .col(Workstations::DepartmentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Workstations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Workstations {
    Table,
    Id,
    Hostname,
    TypeId,
    UserId,
    DepartmentId,
    DateOfArrival,
    VideoRamGb,
    SystemRamGb,
    TotalStorageTb,
    HardwareDescription,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum WorkstationTypes {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
}
