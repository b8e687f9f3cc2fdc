//! Create broadcast_reports table
//!
//! One row per shift; staff names are a JSON array in a text column.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BroadcastReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BroadcastReports::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BroadcastReports::Date).date().not_null())
                    .col(ColumnDef::new(BroadcastReports::StartTime).time().not_null())
                    .col(ColumnDef::new(BroadcastReports::EndTime).time().not_null())
                    .col(
                        ColumnDef::new(BroadcastReports::Program)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BroadcastReports::VideoQuality)
                            .string_len(16)
                            .not_null()
                            .default("Baik"),
                    )
                    .col(
                        ColumnDef::new(BroadcastReports::AudioQuality)
                            .string_len(16)
                            .not_null()
                            .default("Baik"),
                    )
                    .col(
                        ColumnDef::new(BroadcastReports::Staff)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(BroadcastReports::Issue).text().null())
                    .col(ColumnDef::new(BroadcastReports::Remediation).text().null())
                    .col(ColumnDef::new(BroadcastReports::Notes).text().null())
                    .col(ColumnDef::new(BroadcastReports::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(BroadcastReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BroadcastReports::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_broadcast_reports_created_at")
                    .table(BroadcastReports::Table)
                    .col(BroadcastReports::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BroadcastReports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BroadcastReports {
    Table,
    Id,
    Date,
    StartTime,
    EndTime,
    Program,
    VideoQuality,
    AudioQuality,
    Staff,
    Issue,
    Remediation,
    Notes,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
