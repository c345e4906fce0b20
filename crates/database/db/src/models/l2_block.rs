use alloy_primitives::{B256, U256};
use bridge_primitives::L2BlockData;
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a fetched L2 block.
///
/// `chunk_hash` is the claim stamp: it is null until the block is aggregated
/// into a chunk and set exactly once afterwards.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "l2_block")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    block_number: i64,
    block_hash: Vec<u8>,
    timestamp: i64,
    base_fee: Vec<u8>,
    gas_limit: i64,
    payload: Vec<u8>,
    transaction_count: i32,
    l1_message_count: i32,
    chunk_hash: Option<Vec<u8>>,
}

/// The relation for the L2 block model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A relation with the chunk table, where the chunk hash column of the
    /// L2 block table belongs to the hash column of the chunk table.
    #[sea_orm(
        belongs_to = "super::chunk::Entity",
        from = "Column::ChunkHash",
        to = "super::chunk::Column::Hash"
    )]
    Chunk,
}

impl Related<super::chunk::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chunk.def()
    }
}

/// The active model behavior for the L2 block model.
impl ActiveModelBehavior for ActiveModel {}

impl From<L2BlockData> for ActiveModel {
    fn from(block: L2BlockData) -> Self {
        Self {
            block_number: ActiveValue::Set(
                block.number.try_into().expect("block number should fit in i64"),
            ),
            block_hash: ActiveValue::Set(block.hash.to_vec()),
            timestamp: ActiveValue::Set(
                block.timestamp.try_into().expect("timestamp should fit in i64"),
            ),
            base_fee: ActiveValue::Set(block.base_fee.to_be_bytes::<32>().to_vec()),
            gas_limit: ActiveValue::Set(
                block.gas_limit.try_into().expect("gas limit should fit in i64"),
            ),
            payload: ActiveValue::Set(block.payload.to_vec()),
            transaction_count: ActiveValue::Set(block.transaction_count as i32),
            l1_message_count: ActiveValue::Set(block.l1_message_count as i32),
            chunk_hash: ActiveValue::Set(None),
        }
    }
}

impl From<Model> for L2BlockData {
    fn from(value: Model) -> Self {
        Self {
            number: value.block_number as u64,
            hash: B256::from_slice(&value.block_hash),
            timestamp: value.timestamp as u64,
            base_fee: U256::from_be_slice(&value.base_fee),
            gas_limit: value.gas_limit as u64,
            payload: value.payload.into(),
            transaction_count: value
                .transaction_count
                .try_into()
                .expect("data persisted in database is valid"),
            l1_message_count: value
                .l1_message_count
                .try_into()
                .expect("data persisted in database is valid"),
        }
    }
}
