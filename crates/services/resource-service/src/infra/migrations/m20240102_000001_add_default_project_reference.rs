//! Migration: Add explicit default-project reference to organizations.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const FK_NAME: &str = "fk_organizations_default_project_id";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Organizations::Table)
                    .add_column(ColumnDef::new(Organizations::DefaultProjectId).uuid().null())
                    .to_owned(),
            )
            .await?;

        // Deleting the referenced project falls back to the first project
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_NAME)
                    .from(Organizations::Table, Organizations::DefaultProjectId)
                    .to(Projects::Table, Projects::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_NAME)
                    .table(Organizations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Organizations::Table)
                    .drop_column(Organizations::DefaultProjectId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Organizations {
    Table,
    DefaultProjectId,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
}
