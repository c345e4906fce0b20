use alloy_primitives::B256;
use bridge_primitives::ChunkData;
use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a chunk.
///
/// `batch_hash` is the claim stamp: it is null until the chunk is aggregated
/// into a batch and set exactly once afterwards.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chunk")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    index: i64,
    hash: Vec<u8>,
    start_block_number: i64,
    end_block_number: i64,
    total_l1_messages_popped_before: i64,
    l1_message_count: i64,
    proving_status: i16,
    batch_hash: Option<Vec<u8>>,
}

/// The relation for the chunk model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A relation with the batch table, where the batch hash column of the
    /// chunk table belongs to the hash column of the batch table.
    #[sea_orm(
        belongs_to = "super::batch::Entity",
        from = "Column::BatchHash",
        to = "super::batch::Column::Hash"
    )]
    Batch,
}

impl Related<super::batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batch.def()
    }
}

/// The active model behavior for the chunk model.
impl ActiveModelBehavior for ActiveModel {}

impl From<ChunkData> for ActiveModel {
    fn from(chunk: ChunkData) -> Self {
        Self {
            index: ActiveValue::Set(chunk.index.try_into().expect("index should fit in i64")),
            hash: ActiveValue::Set(chunk.hash.to_vec()),
            start_block_number: ActiveValue::Set(
                chunk.start_block_number.try_into().expect("block number should fit in i64"),
            ),
            end_block_number: ActiveValue::Set(
                chunk.end_block_number.try_into().expect("block number should fit in i64"),
            ),
            total_l1_messages_popped_before: ActiveValue::Set(
                chunk
                    .total_l1_messages_popped_before
                    .try_into()
                    .expect("message count should fit in i64"),
            ),
            l1_message_count: ActiveValue::Set(
                chunk.l1_message_count.try_into().expect("message count should fit in i64"),
            ),
            proving_status: ActiveValue::Set(chunk.proving_status as i16),
            batch_hash: ActiveValue::Set(chunk.batch_hash.map(|h| h.to_vec())),
        }
    }
}

impl From<Model> for ChunkData {
    fn from(value: Model) -> Self {
        Self {
            index: value.index as u64,
            hash: B256::from_slice(&value.hash),
            start_block_number: value.start_block_number as u64,
            end_block_number: value.end_block_number as u64,
            total_l1_messages_popped_before: value.total_l1_messages_popped_before as u64,
            l1_message_count: value.l1_message_count as u64,
            proving_status: value
                .proving_status
                .try_into()
                .expect("data persisted in database is valid"),
            batch_hash: value.batch_hash.map(|h| B256::from_slice(&h)),
        }
    }
}
