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
                    .table(Chunk::Table)
                    .if_not_exists()
                    .col(big_unsigned(Chunk::Index).primary_key())
                    .col(binary_len(Chunk::Hash, HASH_LENGTH).unique_key())
                    .col(big_unsigned(Chunk::StartBlockNumber))
                    .col(big_unsigned(Chunk::EndBlockNumber))
                    .col(big_unsigned(Chunk::TotalL1MessagesPoppedBefore))
                    .col(big_unsigned(Chunk::L1MessageCount))
                    .col(small_integer(Chunk::ProvingStatus))
                    .col(binary_len_null(Chunk::BatchHash, HASH_LENGTH))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Chunk::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Chunk {
    Table,
    Index,
    Hash,
    StartBlockNumber,
    EndBlockNumber,
    TotalL1MessagesPoppedBefore,
    L1MessageCount,
    ProvingStatus,
    BatchHash,
}
