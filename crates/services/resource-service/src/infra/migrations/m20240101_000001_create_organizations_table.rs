//! Migration: Create organizations table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Organizations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Organizations::Name).string().not_null().unique_key())
                    .col(flag(Organizations::AssessmentsEnforced))
                    .col(flag(Organizations::CostEstimationEnabled))
                    .col(text(Organizations::DefaultExecutionMode))
                    .col(ColumnDef::new(Organizations::Email).string().not_null())
                    .col(text(Organizations::ExternalId))
                    .col(flag(Organizations::IsUnified))
                    .col(text(Organizations::OwnersTeamSamlRoleId))
                    .col(flag(Organizations::SamlEnabled))
                    .col(
                        ColumnDef::new(Organizations::SessionRemember)
                            .integer()
                            .not_null()
                            .default(20160),
                    )
                    .col(
                        ColumnDef::new(Organizations::SessionTimeout)
                            .integer()
                            .not_null()
                            .default(20160),
                    )
                    .col(
                        ColumnDef::new(Organizations::TrialExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(flag(Organizations::TwoFactorConformant))
                    .col(flag(Organizations::SendPassingStatusesForUntriggeredSpeculativePlans))
                    .col(
                        ColumnDef::new(Organizations::RemainingTestableCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(flag(Organizations::SpeculativePlanManagementEnabled))
                    .col(flag(Organizations::AggregatedCommitStatusEnabled))
                    .col(flag(Organizations::AllowForceDeleteWorkspaces))
                    .col(
                        ColumnDef::new(Organizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Organizations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await
    }
}

fn flag(column: Organizations) -> ColumnDef {
    ColumnDef::new(column).boolean().not_null().default(false).to_owned()
}

fn text(column: Organizations) -> ColumnDef {
    ColumnDef::new(column).string().not_null().default("").to_owned()
}

#[derive(Iden)]
enum Organizations {
    Table,
    Id,
    Name,
    AssessmentsEnforced,
    CostEstimationEnabled,
    DefaultExecutionMode,
    Email,
    ExternalId,
    IsUnified,
    OwnersTeamSamlRoleId,
    SamlEnabled,
    SessionRemember,
    SessionTimeout,
    TrialExpiresAt,
    TwoFactorConformant,
    SendPassingStatusesForUntriggeredSpeculativePlans,
    RemainingTestableCount,
    SpeculativePlanManagementEnabled,
    AggregatedCommitStatusEnabled,
    AllowForceDeleteWorkspaces,
    CreatedAt,
    UpdatedAt,
}
