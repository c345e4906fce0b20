use alloy_primitives::B256;
use bridge_primitives::BatchData;
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a batch.
///
/// Batches are the permanent settlement ledger: rows are never deleted and
/// the three status columns only move through the legal transitions enforced
/// by the update operations.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "batch")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    index: i64,
    hash: Vec<u8>,
    start_chunk_index: i64,
    end_chunk_index: i64,
    start_chunk_hash: Vec<u8>,
    end_chunk_hash: Vec<u8>,
    batch_header: Vec<u8>,
    proving_status: i16,
    rollup_status: i16,
    oracle_status: i16,
    commit_tx_hash: Option<Vec<u8>>,
    finalize_tx_hash: Option<Vec<u8>>,
    oracle_tx_hash: Option<Vec<u8>>,
}

/// The relation for the batch model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the batch model.
impl ActiveModelBehavior for ActiveModel {}

impl From<BatchData> for ActiveModel {
    fn from(batch: BatchData) -> Self {
        Self {
            index: ActiveValue::Set(batch.index.try_into().expect("index should fit in i64")),
            hash: ActiveValue::Set(batch.hash.to_vec()),
            start_chunk_index: ActiveValue::Set(
                batch.start_chunk_index.try_into().expect("index should fit in i64"),
            ),
            end_chunk_index: ActiveValue::Set(
                batch.end_chunk_index.try_into().expect("index should fit in i64"),
            ),
            start_chunk_hash: ActiveValue::Set(batch.start_chunk_hash.to_vec()),
            end_chunk_hash: ActiveValue::Set(batch.end_chunk_hash.to_vec()),
            batch_header: ActiveValue::Set(batch.header.to_vec()),
            proving_status: ActiveValue::Set(batch.proving_status as i16),
            rollup_status: ActiveValue::Set(batch.rollup_status as i16),
            oracle_status: ActiveValue::Set(batch.oracle_status as i16),
            commit_tx_hash: ActiveValue::Set(batch.commit_tx_hash.map(|h| h.to_vec())),
            finalize_tx_hash: ActiveValue::Set(batch.finalize_tx_hash.map(|h| h.to_vec())),
            oracle_tx_hash: ActiveValue::Set(batch.oracle_tx_hash.map(|h| h.to_vec())),
        }
    }
}

impl From<Model> for BatchData {
    fn from(value: Model) -> Self {
        Self {
            index: value.index as u64,
            hash: B256::from_slice(&value.hash),
            start_chunk_index: value.start_chunk_index as u64,
            end_chunk_index: value.end_chunk_index as u64,
            start_chunk_hash: B256::from_slice(&value.start_chunk_hash),
            end_chunk_hash: B256::from_slice(&value.end_chunk_hash),
            header: value.batch_header.into(),
            proving_status: value
                .proving_status
                .try_into()
                .expect("data persisted in database is valid"),
            rollup_status: value
                .rollup_status
                .try_into()
                .expect("data persisted in database is valid"),
            oracle_status: value
                .oracle_status
                .try_into()
                .expect("data persisted in database is valid"),
            commit_tx_hash: value.commit_tx_hash.map(|h| B256::from_slice(&h)),
            finalize_tx_hash: value.finalize_tx_hash.map(|h| B256::from_slice(&h)),
            oracle_tx_hash: value.oracle_tx_hash.map(|h| B256::from_slice(&h)),
        }
    }
}
