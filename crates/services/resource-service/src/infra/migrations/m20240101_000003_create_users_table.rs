//! Migration: Create users table.

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
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::AvatarUrl).string().not_null().default(""))
                    .col(flag(Users::IsServiceAccount))
                    .col(flag(Users::TwoFactorEnabled))
                    .col(flag(Users::TwoFactorVerified))
                    .col(
                        ColumnDef::new(Users::UnconfirmedEmail)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(flag(Users::IsSiteAdmin))
                    .col(flag(Users::IsAdmin))
                    .col(flag(Users::IsSsoLogin))
                    .col(flag(Users::PermissionsCanCreateOrganizations))
                    .col(flag(Users::PermissionsCanChangeEmail))
                    .col(flag(Users::PermissionsCanChangeUsername))
                    .col(flag(Users::PermissionsCanManageUserTokens))
                    .col(flag(Users::PermissionsCanView2faSettings))
                    .col(flag(Users::PermissionsCanManageHcpAccount))
                    .col(
                        ColumnDef::new(Users::LastLoginAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
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
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

fn flag(column: Users) -> ColumnDef {
    ColumnDef::new(column).boolean().not_null().default(false).to_owned()
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    AvatarUrl,
    IsServiceAccount,
    TwoFactorEnabled,
    TwoFactorVerified,
    UnconfirmedEmail,
    IsSiteAdmin,
    IsAdmin,
    IsSsoLogin,
    PermissionsCanCreateOrganizations,
    PermissionsCanChangeEmail,
    PermissionsCanChangeUsername,
    PermissionsCanManageUserTokens,
    #[iden = "permissions_can_view_2fa_settings"]
    PermissionsCanView2faSettings,
    PermissionsCanManageHcpAccount,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}
