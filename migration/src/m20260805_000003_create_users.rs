use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::DistinguishedName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::DepartmentId).integer().not_null())
                    .col(ColumnDef::new(Users::Notes).text().null())
                    .col(
                        ColumnDef::new(Users::Status)
                            .integer()
                            .not_null()
                            .default(1)
                            .check(
                                Expr::col(Users::Status)
                                    .gte(0)
                                    .and(Expr::col(Users::Status).lte(2)),
                            ),
                    )
                    .col(ColumnDef::new(Users::OfficeLocation).string().null())
                    .col(ColumnDef::new(Users::DateOfArrival).string().null())
                    .col(ColumnDef::new(Users::DateOfLeave).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_department")
                            .from(Users::Table, Users::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_department")
                    .table(Users::Table)
                    .col(Users::DepartmentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    DistinguishedName,
    Name,
    DepartmentId,
    Notes,
    Status,
    OfficeLocation,
    DateOfArrival,
    DateOfLeave,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
}
