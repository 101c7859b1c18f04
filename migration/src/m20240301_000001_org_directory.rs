use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Department {
    Table,
    DepartmentId,
    DepartmentCode,
    DepartmentName,
    Description,
    CreatedDate,
    CreatedBy,
    ModifiedDate,
    ModifiedBy,
}

#[derive(DeriveIden)]
enum Position {
    Table,
    PositionId,
    PositionCode,
    PositionName,
    Description,
    CreatedDate,
    CreatedBy,
    ModifiedDate,
    ModifiedBy,
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    EmployeeId,
    EmployeeCode,
    FullName,
    Email,
    PhoneNumber,
    IdentityNumber,
    PositionId,
    DepartmentId,
    DateOfBirth,
    Gender,
    TelephoneNumber,
    Address,
    IdentityDate,
    IdentityPlace,
    BankAccount,
    BankName,
    Branch,
    CreatedDate,
    CreatedBy,
    ModifiedDate,
    ModifiedBy,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Department::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Department::DepartmentId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Department::DepartmentCode)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Department::DepartmentName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Department::Description).text())
                    .col(ColumnDef::new(Department::CreatedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Department::CreatedBy).string_len(100))
                    .col(ColumnDef::new(Department::ModifiedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Department::ModifiedBy).string_len(100))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_department_code")
                    .table(Department::Table)
                    .col(Department::DepartmentCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Position::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Position::PositionId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Position::PositionCode).string_len(20).not_null())
                    .col(ColumnDef::new(Position::PositionName).string_len(255).not_null())
                    .col(ColumnDef::new(Position::Description).text())
                    .col(ColumnDef::new(Position::CreatedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Position::CreatedBy).string_len(100))
                    .col(ColumnDef::new(Position::ModifiedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Position::ModifiedBy).string_len(100))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_position_code")
                    .table(Position::Table)
                    .col(Position::PositionCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employee::EmployeeId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employee::EmployeeCode).string_len(20).not_null())
                    .col(ColumnDef::new(Employee::FullName).string_len(255).not_null())
                    .col(ColumnDef::new(Employee::Email).string_len(320).not_null())
                    .col(ColumnDef::new(Employee::PhoneNumber).string_len(50).not_null())
                    .col(ColumnDef::new(Employee::IdentityNumber).string_len(50).not_null())
                    .col(ColumnDef::new(Employee::PositionId).uuid().not_null())
                    .col(ColumnDef::new(Employee::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Employee::DateOfBirth).date())
                    .col(ColumnDef::new(Employee::Gender).integer())
                    .col(ColumnDef::new(Employee::TelephoneNumber).string_len(50))
                    .col(ColumnDef::new(Employee::Address).string_len(255))
                    .col(ColumnDef::new(Employee::IdentityDate).date())
                    .col(ColumnDef::new(Employee::IdentityPlace).string_len(255))
                    .col(ColumnDef::new(Employee::BankAccount).string_len(50))
                    .col(ColumnDef::new(Employee::BankName).string_len(255))
                    .col(ColumnDef::new(Employee::Branch).string_len(255))
                    .col(ColumnDef::new(Employee::CreatedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Employee::CreatedBy).string_len(100))
                    .col(ColumnDef::new(Employee::ModifiedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Employee::ModifiedBy).string_len(100))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_department")
                            .from(Employee::Table, Employee::DepartmentId)
                            .to(Department::Table, Department::DepartmentId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_position")
                            .from(Employee::Table, Employee::PositionId)
                            .to(Position::Table, Position::PositionId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_code")
                    .table(Employee::Table)
                    .col(Employee::EmployeeCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_department")
                    .table(Employee::Table)
                    .col(Employee::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_position")
                    .table(Employee::Table)
                    .col(Employee::PositionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employee::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Position::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Department::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
