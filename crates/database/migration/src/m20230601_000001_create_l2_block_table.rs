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
                    .table(L2Block::Table)
                    .if_not_exists()
                    .col(big_unsigned(L2Block::BlockNumber).primary_key())
                    .col(binary_len(L2Block::BlockHash, HASH_LENGTH))
                    .col(big_unsigned(L2Block::Timestamp))
                    .col(binary_len(L2Block::BaseFee, HASH_LENGTH))
                    .col(big_unsigned(L2Block::GasLimit))
                    .col(binary(L2Block::Payload))
                    .col(small_unsigned(L2Block::TransactionCount))
                    .col(small_unsigned(L2Block::L1MessageCount))
                    .col(binary_len_null(L2Block::ChunkHash, HASH_LENGTH))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(L2Block::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum L2Block {
    Table,
    BlockNumber,
    BlockHash,
    Timestamp,
    BaseFee,
    GasLimit,
    Payload,
    TransactionCount,
    L1MessageCount,
    ChunkHash,
}
