use crate::HASH_LENGTH;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Batch::Table)
                    .if_not_exists()
                    .col(big_unsigned(Batch::Index).primary_key())
                    .col(binary_len(Batch::Hash, HASH_LENGTH).unique_key())
                    .col(big_unsigned(Batch::StartChunkIndex))
                    .col(big_unsigned(Batch::EndChunkIndex))
                    .col(binary_len(Batch::StartChunkHash, HASH_LENGTH))
                    .col(binary_len(Batch::EndChunkHash, HASH_LENGTH))
                    .col(binary(Batch::BatchHeader))
                    .col(small_integer(Batch::ProvingStatus))
                    .col(small_integer(Batch::RollupStatus))
                    .col(small_integer(Batch::OracleStatus))
                    .col(binary_len_null(Batch::CommitTxHash, HASH_LENGTH))
                    .col(binary_len_null(Batch::FinalizeTxHash, HASH_LENGTH))
                    .col(binary_len_null(Batch::OracleTxHash, HASH_LENGTH))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Batch::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Batch {
    Table,
    Index,
    Hash,
    StartChunkIndex,
    EndChunkIndex,
    StartChunkHash,
    EndChunkHash,
    BatchHeader,
    ProvingStatus,
    RollupStatus,
    OracleStatus,
    CommitTxHash,
    FinalizeTxHash,
    OracleTxHash,
}
