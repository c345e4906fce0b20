use super::{models, DatabaseError};
use crate::DatabaseConnectionProvider;

use alloy_primitives::B256;
use bridge_codec::{chunk_hash, hash_pair, BatchHeader, BATCH_HEADER_VERSION};
use bridge_primitives::{
    BatchData, Chunk, ChunkData, GasOracleStatus, L2BlockData, ProvingStatus, RollupStatus,
};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

/// The [`DatabaseOperations`] trait provides the repository operations for blocks, chunks and
/// batches.
///
/// The trait is blanket-implemented for every [`DatabaseConnectionProvider`], so the same
/// operations run on a plain [`crate::Database`] or inside a [`crate::DatabaseTransaction`].
/// [`Self::insert_chunk`] is internally atomic; pairing [`Self::insert_batch`] with
/// [`Self::mark_chunks_batched`] should still happen inside a caller transaction so the batch
/// and its chunk stamps become visible together.
#[async_trait::async_trait]
pub trait DatabaseOperations: DatabaseConnectionProvider {
    /// Insert the provided [`L2BlockData`]s into the database.
    ///
    /// The insert is an idempotent upsert keyed by block number; the chunk claim stamp of an
    /// existing row is left untouched.
    async fn insert_l2_blocks(&self, blocks: Vec<L2BlockData>) -> Result<(), DatabaseError> {
        if blocks.is_empty() {
            return Ok(())
        }
        tracing::trace!(target: "bridge::db", count = blocks.len(), "Inserting L2 blocks into database.");
        let blocks = blocks.into_iter().map(models::l2_block::ActiveModel::from);
        models::l2_block::Entity::insert_many(blocks)
            .on_conflict(
                OnConflict::column(models::l2_block::Column::BlockNumber)
                    .update_columns([
                        models::l2_block::Column::BlockHash,
                        models::l2_block::Column::Timestamp,
                        models::l2_block::Column::BaseFee,
                        models::l2_block::Column::GasLimit,
                        models::l2_block::Column::Payload,
                        models::l2_block::Column::TransactionCount,
                        models::l2_block::Column::L1MessageCount,
                    ])
                    .to_owned(),
            )
            .exec(self.get_connection())
            .await?;
        Ok(())
    }

    /// Get the highest L2 block number in the database, if any.
    async fn get_l2_blocks_latest_height(&self) -> Result<Option<u64>, DatabaseError> {
        Ok(models::l2_block::Entity::find()
            .order_by_desc(models::l2_block::Column::BlockNumber)
            .select_only()
            .column(models::l2_block::Column::BlockNumber)
            .into_tuple::<i64>()
            .one(self.get_connection())
            .await
            .map(|x| x.map(|number| number as u64))?)
    }

    /// Get the [`L2BlockData`]s in the inclusive block number range, in ascending order.
    async fn get_l2_blocks_in_range(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<L2BlockData>, DatabaseError> {
        Ok(models::l2_block::Entity::find()
            .filter(models::l2_block::Column::BlockNumber.between(from as i64, to as i64))
            .order_by_asc(models::l2_block::Column::BlockNumber)
            .all(self.get_connection())
            .await
            .map(|blocks| blocks.into_iter().map(Into::into).collect())?)
    }

    /// Get every [`L2BlockData`] not yet claimed by a chunk, in ascending block number order.
    async fn get_unchunked_blocks(&self) -> Result<Vec<L2BlockData>, DatabaseError> {
        Ok(models::l2_block::Entity::find()
            .filter(models::l2_block::Column::ChunkHash.is_null())
            .order_by_asc(models::l2_block::Column::BlockNumber)
            .all(self.get_connection())
            .await
            .map(|blocks| blocks.into_iter().map(Into::into).collect())?)
    }

    /// Insert a [`Chunk`] into the database and claim every covered block.
    ///
    /// Computes the chunk index and the cumulative L1 message count from the latest stored
    /// chunk, derives the content hash, inserts the row with proving status
    /// [`ProvingStatus::Unassigned`] and stamps the chunk hash on every covered block via a
    /// conditional update. Fails without claiming anything if the block sequence is empty or
    /// gapped, and fails with [`DatabaseError::BlockClaimFailed`] if any covered block is
    /// missing or already claimed. The insert and claim run in a nested transaction, so a
    /// claim failure leaves no partial state on any connection.
    async fn insert_chunk(&self, chunk: &Chunk) -> Result<ChunkData, DatabaseError> {
        let txn = self.get_connection().begin().await?;

        let parent: Option<ChunkData> = models::chunk::Entity::find()
            .order_by_desc(models::chunk::Column::Index)
            .one(&txn)
            .await?
            .map(Into::into);
        let (index, total_l1_messages_popped_before) = parent
            .map(|p| (p.index + 1, p.total_l1_messages_popped_before + p.l1_message_count))
            .unwrap_or_default();

        // validates the chunk is non-empty and gap-free.
        let hash = chunk_hash(&chunk.blocks, total_l1_messages_popped_before)?;
        let start_block_number = chunk.start_block_number().expect("chunk validated non-empty");
        let end_block_number = chunk.end_block_number().expect("chunk validated non-empty");

        tracing::trace!(target: "bridge::db", chunk_hash = ?hash, chunk_index = index, start_block_number, end_block_number, "Inserting chunk into database.");

        let chunk_data = ChunkData {
            index,
            hash,
            start_block_number,
            end_block_number,
            total_l1_messages_popped_before,
            l1_message_count: chunk.l1_message_count(),
            proving_status: ProvingStatus::Unassigned,
            batch_hash: None,
        };
        models::chunk::ActiveModel::from(chunk_data.clone()).insert(&txn).await?;

        // conditional claim: at most one chunk ever stamps a block.
        let expected = chunk.blocks.len() as u64;
        let claimed = models::l2_block::Entity::update_many()
            .col_expr(models::l2_block::Column::ChunkHash, Expr::value(hash.to_vec()))
            .filter(
                Condition::all()
                    .add(
                        models::l2_block::Column::BlockNumber
                            .between(start_block_number as i64, end_block_number as i64),
                    )
                    .add(models::l2_block::Column::ChunkHash.is_null()),
            )
            .exec(&txn)
            .await?
            .rows_affected;
        if claimed != expected {
            txn.rollback().await?;
            return Err(DatabaseError::BlockClaimFailed { expected, claimed })
        }

        txn.commit().await?;
        Ok(chunk_data)
    }

    /// Get every [`ChunkData`] not yet claimed by a batch, in ascending index order.
    async fn get_unbatched_chunks(&self) -> Result<Vec<ChunkData>, DatabaseError> {
        Ok(models::chunk::Entity::find()
            .filter(models::chunk::Column::BatchHash.is_null())
            .order_by_asc(models::chunk::Column::Index)
            .all(self.get_connection())
            .await
            .map(|chunks| chunks.into_iter().map(Into::into).collect())?)
    }

    /// Get the [`ChunkData`]s in the inclusive index range, in ascending order.
    async fn get_chunks_in_range(
        &self,
        start_index: u64,
        end_index: u64,
    ) -> Result<Vec<ChunkData>, DatabaseError> {
        Ok(models::chunk::Entity::find()
            .filter(models::chunk::Column::Index.between(start_index as i64, end_index as i64))
            .order_by_asc(models::chunk::Column::Index)
            .all(self.get_connection())
            .await
            .map(|chunks| chunks.into_iter().map(Into::into).collect())?)
    }

    /// Advance the proving status of the chunk with the provided hash.
    ///
    /// Fails with [`DatabaseError::ChunkNotFound`] if the chunk does not exist and with
    /// [`DatabaseError::InvalidStatusTransition`] if the transition is not legal.
    async fn update_chunk_proving_status(
        &self,
        chunk_hash: B256,
        status: ProvingStatus,
    ) -> Result<(), DatabaseError> {
        let chunk = models::chunk::Entity::find()
            .filter(models::chunk::Column::Hash.eq(chunk_hash.to_vec()))
            .one(self.get_connection())
            .await?
            .ok_or(DatabaseError::ChunkNotFound(chunk_hash))?;
        let current = ChunkData::from(chunk.clone()).proving_status;
        if !current.can_transition(&status) {
            return Err(DatabaseError::InvalidStatusTransition {
                kind: "proving",
                from: current.as_str(),
                to: status.as_str(),
            })
        }

        tracing::trace!(target: "bridge::db", chunk_hash = ?chunk_hash, status = %status, "Updating chunk proving status.");
        let mut chunk: models::chunk::ActiveModel = chunk.into();
        chunk.proving_status = Set(status as i16);
        chunk.update(self.get_connection()).await?;
        Ok(())
    }

    /// Atomically stamp the provided chunks with their owning batch.
    ///
    /// The stamp is a conditional update on unclaimed rows only; fails with
    /// [`DatabaseError::ChunkClaimFailed`] if any chunk is missing or already batched.
    async fn mark_chunks_batched(
        &self,
        chunk_hashes: &[B256],
        batch_hash: B256,
    ) -> Result<(), DatabaseError> {
        tracing::trace!(target: "bridge::db", batch_hash = ?batch_hash, count = chunk_hashes.len(), "Marking chunks as batched.");
        let expected = chunk_hashes.len() as u64;
        let claimed = models::chunk::Entity::update_many()
            .col_expr(models::chunk::Column::BatchHash, Expr::value(batch_hash.to_vec()))
            .filter(
                Condition::all()
                    .add(
                        models::chunk::Column::Hash
                            .is_in(chunk_hashes.iter().map(|hash| hash.to_vec())),
                    )
                    .add(models::chunk::Column::BatchHash.is_null()),
            )
            .exec(self.get_connection())
            .await?
            .rows_affected;
        if claimed != expected {
            return Err(DatabaseError::ChunkClaimFailed { expected, claimed })
        }
        Ok(())
    }

    /// Insert a batch covering the provided chunk range into the database.
    ///
    /// Builds the batch header from the ordered chunk list: the index and parent hash continue
    /// the latest stored batch, the L1 message totals extend the parent header's running count
    /// and the data hash folds every stored chunk hash through `hash_pair`. The row is inserted
    /// with proving status [`ProvingStatus::Unassigned`], rollup status [`RollupStatus::Pending`]
    /// and gas-oracle status [`GasOracleStatus::Pending`].
    ///
    /// Fails if the chunk range does not extend the previous batch, if the stored chunk rows do
    /// not match the provided boundary hashes, or if any covered chunk is already batched.
    async fn insert_batch(
        &self,
        start_chunk_index: u64,
        end_chunk_index: u64,
        start_chunk_hash: B256,
        end_chunk_hash: B256,
        chunks: &[Chunk],
    ) -> Result<BatchData, DatabaseError> {
        if chunks.is_empty() || end_chunk_index < start_chunk_index {
            return Err(DatabaseError::EmptyBatch)
        }

        let parent = self.get_latest_batch().await?;
        let (index, parent_batch_hash, total_popped_before) = match parent {
            Some(parent) => {
                if start_chunk_index != parent.end_chunk_index + 1 {
                    return Err(DatabaseError::BatchNotContiguous {
                        expected: parent.end_chunk_index + 1,
                        got: start_chunk_index,
                    })
                }
                let header = BatchHeader::try_from_buf(&mut parent.header.as_ref())?;
                (parent.index + 1, parent.hash, header.total_l1_message_popped)
            }
            None => {
                if start_chunk_index != 0 {
                    return Err(DatabaseError::BatchNotContiguous {
                        expected: 0,
                        got: start_chunk_index,
                    })
                }
                (0, B256::ZERO, 0)
            }
        };

        let rows = self.get_chunks_in_range(start_chunk_index, end_chunk_index).await?;
        if rows.len() != chunks.len() ||
            rows.len() as u64 != end_chunk_index - start_chunk_index + 1
        {
            return Err(DatabaseError::ChunkMismatch("chunk range is not fully stored"))
        }
        let (first, last) = (rows.first().expect("rows non-empty"), rows.last().expect("rows non-empty"));
        if first.hash != start_chunk_hash || last.hash != end_chunk_hash {
            return Err(DatabaseError::ChunkMismatch("boundary chunk hashes do not match"))
        }
        if first.total_l1_messages_popped_before != total_popped_before {
            return Err(DatabaseError::ChunkMismatch("L1 message totals do not continue the parent batch"))
        }
        if rows.iter().any(|chunk| chunk.batch_hash.is_some()) {
            return Err(DatabaseError::ChunkClaimFailed {
                expected: rows.len() as u64,
                claimed: 0,
            })
        }

        let l1_message_popped: u64 = chunks.iter().map(Chunk::l1_message_count).sum();
        let data_hash =
            rows[1..].iter().fold(rows[0].hash, |acc, chunk| hash_pair(acc, chunk.hash));

        let header = BatchHeader::new(
            BATCH_HEADER_VERSION,
            index,
            l1_message_popped,
            total_popped_before + l1_message_popped,
            data_hash,
            parent_batch_hash,
        );
        let hash = header.hash_slow();
        tracing::trace!(target: "bridge::db", batch_hash = ?hash, batch_index = index, start_chunk_index, end_chunk_index, "Inserting batch into database.");

        let batch = BatchData {
            index,
            hash,
            start_chunk_index,
            end_chunk_index,
            start_chunk_hash,
            end_chunk_hash,
            header: header.encode().into(),
            proving_status: ProvingStatus::Unassigned,
            rollup_status: RollupStatus::Pending,
            oracle_status: GasOracleStatus::Pending,
            commit_tx_hash: None,
            finalize_tx_hash: None,
            oracle_tx_hash: None,
        };
        models::batch::ActiveModel::from(batch.clone()).insert(self.get_connection()).await?;

        Ok(batch)
    }

    /// Get a [`BatchData`] from the database by its batch index.
    async fn get_batch_by_index(
        &self,
        batch_index: u64,
    ) -> Result<Option<BatchData>, DatabaseError> {
        Ok(models::batch::Entity::find_by_id(
            TryInto::<i64>::try_into(batch_index).expect("index should fit in i64"),
        )
        .one(self.get_connection())
        .await
        .map(|x| x.map(Into::into))?)
    }

    /// Get the latest [`BatchData`] by index, if any.
    async fn get_latest_batch(&self) -> Result<Option<BatchData>, DatabaseError> {
        Ok(models::batch::Entity::find()
            .order_by_desc(models::batch::Column::Index)
            .one(self.get_connection())
            .await
            .map(|x| x.map(Into::into))?)
    }

    /// Get the total number of batches ever inserted.
    async fn get_batch_count(&self) -> Result<u64, DatabaseError> {
        Ok(models::batch::Entity::find().count(self.get_connection()).await?)
    }

    /// Get the batches with rollup status [`RollupStatus::Pending`], oldest first, capped at
    /// `limit`.
    async fn get_pending_batches(&self, limit: u64) -> Result<Vec<BatchData>, DatabaseError> {
        Ok(models::batch::Entity::find()
            .filter(models::batch::Column::RollupStatus.eq(RollupStatus::Pending as i16))
            .order_by_asc(models::batch::Column::Index)
            .limit(limit)
            .all(self.get_connection())
            .await
            .map(|batches| batches.into_iter().map(Into::into).collect())?)
    }

    /// Get the rollup status of every provided batch hash, preserving input order.
    ///
    /// Fails with [`DatabaseError::BatchNotFound`] if any hash is absent.
    async fn get_rollup_status_by_hash_list(
        &self,
        batch_hashes: &[B256],
    ) -> Result<Vec<RollupStatus>, DatabaseError> {
        let statuses: HashMap<B256, RollupStatus> = models::batch::Entity::find()
            .filter(
                models::batch::Column::Hash.is_in(batch_hashes.iter().map(|hash| hash.to_vec())),
            )
            .all(self.get_connection())
            .await?
            .into_iter()
            .map(|model| {
                let batch = BatchData::from(model);
                (batch.hash, batch.rollup_status)
            })
            .collect();
        batch_hashes
            .iter()
            .map(|hash| statuses.get(hash).copied().ok_or(DatabaseError::BatchNotFound(*hash)))
            .collect()
    }

    /// Advance the proving status of the batch with the provided hash.
    async fn update_batch_proving_status(
        &self,
        batch_hash: B256,
        status: ProvingStatus,
    ) -> Result<(), DatabaseError> {
        let batch = find_batch_by_hash(self.get_connection(), batch_hash).await?;
        let current = BatchData::from(batch.clone()).proving_status;
        if !current.can_transition(&status) {
            return Err(DatabaseError::InvalidStatusTransition {
                kind: "proving",
                from: current.as_str(),
                to: status.as_str(),
            })
        }

        tracing::trace!(target: "bridge::db", batch_hash = ?batch_hash, status = %status, "Updating batch proving status.");
        let mut batch: models::batch::ActiveModel = batch.into();
        batch.proving_status = Set(status as i16);
        batch.update(self.get_connection()).await?;
        Ok(())
    }

    /// Advance the rollup status of the batch with the provided hash.
    async fn update_rollup_status(
        &self,
        batch_hash: B256,
        status: RollupStatus,
    ) -> Result<(), DatabaseError> {
        let batch = find_batch_by_hash(self.get_connection(), batch_hash).await?;
        check_rollup_transition(&batch, &status)?;

        tracing::trace!(target: "bridge::db", batch_hash = ?batch_hash, status = %status, "Updating batch rollup status.");
        let mut batch: models::batch::ActiveModel = batch.into();
        batch.rollup_status = Set(status as i16);
        batch.update(self.get_connection()).await?;
        Ok(())
    }

    /// Advance the rollup status of the batch and stamp the L1 commit transaction hash.
    async fn update_commit_tx_hash_and_rollup_status(
        &self,
        batch_hash: B256,
        commit_tx_hash: B256,
        status: RollupStatus,
    ) -> Result<(), DatabaseError> {
        let batch = find_batch_by_hash(self.get_connection(), batch_hash).await?;
        check_rollup_transition(&batch, &status)?;

        tracing::trace!(target: "bridge::db", batch_hash = ?batch_hash, commit_tx_hash = ?commit_tx_hash, status = %status, "Updating batch commit tx hash and rollup status.");
        let mut batch: models::batch::ActiveModel = batch.into();
        batch.commit_tx_hash = Set(Some(commit_tx_hash.to_vec()));
        batch.rollup_status = Set(status as i16);
        batch.update(self.get_connection()).await?;
        Ok(())
    }

    /// Advance the rollup status of the batch and stamp the L1 finalize transaction hash.
    async fn update_finalize_tx_hash_and_rollup_status(
        &self,
        batch_hash: B256,
        finalize_tx_hash: B256,
        status: RollupStatus,
    ) -> Result<(), DatabaseError> {
        let batch = find_batch_by_hash(self.get_connection(), batch_hash).await?;
        check_rollup_transition(&batch, &status)?;

        tracing::trace!(target: "bridge::db", batch_hash = ?batch_hash, finalize_tx_hash = ?finalize_tx_hash, status = %status, "Updating batch finalize tx hash and rollup status.");
        let mut batch: models::batch::ActiveModel = batch.into();
        batch.finalize_tx_hash = Set(Some(finalize_tx_hash.to_vec()));
        batch.rollup_status = Set(status as i16);
        batch.update(self.get_connection()).await?;
        Ok(())
    }

    /// Advance the gas-oracle status of the batch and stamp the L1 oracle transaction hash.
    async fn update_l2_gas_oracle_status_and_oracle_tx_hash(
        &self,
        batch_hash: B256,
        status: GasOracleStatus,
        oracle_tx_hash: B256,
    ) -> Result<(), DatabaseError> {
        let batch = find_batch_by_hash(self.get_connection(), batch_hash).await?;
        let current = BatchData::from(batch.clone()).oracle_status;
        if !current.can_transition(&status) {
            return Err(DatabaseError::InvalidStatusTransition {
                kind: "gas oracle",
                from: current.as_str(),
                to: status.as_str(),
            })
        }

        tracing::trace!(target: "bridge::db", batch_hash = ?batch_hash, oracle_tx_hash = ?oracle_tx_hash, status = %status, "Updating batch gas oracle status.");
        let mut batch: models::batch::ActiveModel = batch.into();
        batch.oracle_status = Set(status as i16);
        batch.oracle_tx_hash = Set(Some(oracle_tx_hash.to_vec()));
        batch.update(self.get_connection()).await?;
        Ok(())
    }

    /// Bulk transition: every batch whose rollup status is [`RollupStatus::Committed`] and whose
    /// proving status is [`ProvingStatus::Skipped`] or [`ProvingStatus::Failed`] is moved to
    /// [`RollupStatus::FinalizationSkipped`].
    ///
    /// Returns the number of batches affected. Idempotent: a second sweep with no newly
    /// eligible batches returns 0.
    async fn update_skipped_batches(&self) -> Result<u64, DatabaseError> {
        let affected = models::batch::Entity::update_many()
            .col_expr(
                models::batch::Column::RollupStatus,
                Expr::value(RollupStatus::FinalizationSkipped as i16),
            )
            .filter(
                Condition::all()
                    .add(models::batch::Column::RollupStatus.eq(RollupStatus::Committed as i16))
                    .add(models::batch::Column::ProvingStatus.is_in([
                        ProvingStatus::Skipped as i16,
                        ProvingStatus::Failed as i16,
                    ])),
            )
            .exec(self.get_connection())
            .await?
            .rows_affected;
        tracing::trace!(target: "bridge::db", affected, "Swept skipped batches to finalization skipped.");
        Ok(affected)
    }
}

impl<T> DatabaseOperations for T where T: DatabaseConnectionProvider {}

async fn find_batch_by_hash<C: ConnectionTrait>(
    conn: &C,
    batch_hash: B256,
) -> Result<models::batch::Model, DatabaseError> {
    models::batch::Entity::find()
        .filter(models::batch::Column::Hash.eq(batch_hash.to_vec()))
        .one(conn)
        .await?
        .ok_or(DatabaseError::BatchNotFound(batch_hash))
}

fn check_rollup_transition(
    batch: &models::batch::Model,
    status: &RollupStatus,
) -> Result<(), DatabaseError> {
    let current = BatchData::from(batch.clone()).rollup_status;
    if !current.can_transition(status) {
        return Err(DatabaseError::InvalidStatusTransition {
            kind: "rollup",
            from: current.as_str(),
            to: status.as_str(),
        })
    }
    Ok(())
}
