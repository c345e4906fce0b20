use super::{transaction::DatabaseTransaction, DatabaseConnectionProvider};
use crate::error::DatabaseError;

use sea_orm::{Database as SeaOrmDatabase, DatabaseConnection, TransactionTrait};

/// The [`Database`] struct is responsible for interacting with the database.
///
/// The [`Database`] type wraps a [`sea_orm::DatabaseConnection`]. We implement
/// [`DatabaseConnectionProvider`] for [`Database`] such that it can be used to perform the
/// operations defined in [`crate::DatabaseOperations`]. Atomic operations can be performed using
/// the [`Database::tx`] method which returns a [`DatabaseTransaction`] that also implements the
/// [`DatabaseConnectionProvider`] trait and therefore the [`crate::DatabaseOperations`] trait.
#[derive(Debug)]
pub struct Database {
    /// The underlying database connection.
    connection: DatabaseConnection,
}

impl Database {
    /// Creates a new [`Database`] instance associated with the provided database URL.
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let connection = SeaOrmDatabase::connect(database_url).await?;
        Ok(Self { connection })
    }

    /// Creates a new [`DatabaseTransaction`] which can be used for atomic operations.
    pub async fn tx(&self) -> Result<DatabaseTransaction, DatabaseError> {
        Ok(DatabaseTransaction::new(self.connection.begin().await?))
    }
}

impl DatabaseConnectionProvider for Database {
    type Connection = DatabaseConnection;

    fn get_connection(&self) -> &Self::Connection {
        &self.connection
    }
}

impl From<DatabaseConnection> for Database {
    fn from(connection: DatabaseConnection) -> Self {
        Self { connection }
    }
}

#[cfg(test)]
mod test {
    use crate::{test_utils::setup_test_db, DatabaseError, DatabaseOperations};
    use alloy_primitives::{B256, U256};
    use bridge_codec::BatchHeader;
    use bridge_primitives::{Chunk, GasOracleStatus, L2BlockData, ProvingStatus, RollupStatus};

    fn block(number: u64) -> L2BlockData {
        L2BlockData {
            number,
            hash: B256::with_last_byte(number as u8),
            timestamp: 1693900000 + number,
            base_fee: U256::from(1_000_000_000u64),
            gas_limit: 10_000_000,
            payload: vec![number as u8; 32].into(),
            transaction_count: 2,
            l1_message_count: 1,
        }
    }

    #[tokio::test]
    async fn test_l2_block_queries() {
        let db = setup_test_db().await;

        // The insert is an idempotent upsert: a second insert of the same heights is a no-op.
        db.insert_l2_blocks(vec![block(2), block(3)]).await.unwrap();
        db.insert_l2_blocks(vec![block(2), block(3)]).await.unwrap();

        assert_eq!(db.get_l2_blocks_latest_height().await.unwrap(), Some(3));

        let blocks = db.get_unchunked_blocks().await.unwrap();
        assert_eq!(blocks, vec![block(2), block(3)]);

        let blocks = db.get_l2_blocks_in_range(2, 3).await.unwrap();
        assert_eq!(blocks, vec![block(2), block(3)]);

        assert!(db.get_l2_blocks_in_range(4, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chunk_lifecycle() {
        let db = setup_test_db().await;
        db.insert_l2_blocks(vec![block(2), block(3)]).await.unwrap();

        let tx = db.tx().await.unwrap();
        let chunk1 = tx.insert_chunk(&Chunk::new(vec![block(2)])).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(chunk1.index, 0);
        assert_eq!(chunk1.total_l1_messages_popped_before, 0);
        assert_eq!(chunk1.l1_message_count, 1);

        // block 3 stays unclaimed.
        assert_eq!(db.get_unchunked_blocks().await.unwrap(), vec![block(3)]);

        let tx = db.tx().await.unwrap();
        let chunk2 = tx.insert_chunk(&Chunk::new(vec![block(3)])).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(chunk2.index, 1);
        assert_eq!(chunk2.total_l1_messages_popped_before, 1);
        assert!(db.get_unchunked_blocks().await.unwrap().is_empty());

        let chunks = db.get_unbatched_chunks().await.unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].hash, chunk1.hash);
        assert_eq!(chunks[1].hash, chunk2.hash);

        db.update_chunk_proving_status(chunk1.hash, ProvingStatus::Assigned).await.unwrap();
        db.update_chunk_proving_status(chunk1.hash, ProvingStatus::Proved).await.unwrap();
        db.update_chunk_proving_status(chunk1.hash, ProvingStatus::Verified).await.unwrap();
        db.update_chunk_proving_status(chunk2.hash, ProvingStatus::Assigned).await.unwrap();

        let chunks = db.get_chunks_in_range(0, 1).await.unwrap();
        assert_eq!(chunks[0].proving_status, ProvingStatus::Verified);
        assert_eq!(chunks[1].proving_status, ProvingStatus::Assigned);

        let batch_hash = B256::with_last_byte(0xbb);
        db.mark_chunks_batched(&[chunk1.hash], batch_hash).await.unwrap();
        let unbatched = db.get_unbatched_chunks().await.unwrap();
        assert_eq!(unbatched.len(), 1);
        assert_eq!(unbatched[0].hash, chunk2.hash);
    }

    #[tokio::test]
    async fn test_failed_block_claim_leaves_no_partial_state() {
        let db = setup_test_db().await;
        db.insert_l2_blocks(vec![block(2), block(3)]).await.unwrap();

        db.insert_chunk(&Chunk::new(vec![block(2)])).await.unwrap();

        // a second claim on block 2, on a plain connection, fails without
        // inserting an orphan chunk row or stamping block 3.
        let res = db.insert_chunk(&Chunk::new(vec![block(2), block(3)])).await;
        assert!(matches!(res, Err(DatabaseError::BlockClaimFailed { expected: 2, claimed: 1 })));
        assert_eq!(db.get_chunks_in_range(0, 100).await.unwrap().len(), 1);
        assert_eq!(db.get_unchunked_blocks().await.unwrap(), vec![block(3)]);

        // claiming a block that was never inserted fails as well.
        let res = db.insert_chunk(&Chunk::new(vec![block(10)])).await;
        assert!(matches!(res, Err(DatabaseError::BlockClaimFailed { expected: 1, claimed: 0 })));
        assert_eq!(db.get_chunks_in_range(0, 100).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_chunk_claim_exclusivity() {
        let db = setup_test_db().await;
        db.insert_l2_blocks(vec![block(2), block(3)]).await.unwrap();

        let chunk1 = db.insert_chunk(&Chunk::new(vec![block(2)])).await.unwrap();
        let batch1 = db
            .insert_batch(0, 0, chunk1.hash, chunk1.hash, &[Chunk::new(vec![block(2)])])
            .await
            .unwrap();
        db.mark_chunks_batched(&[chunk1.hash], batch1.hash).await.unwrap();

        // re-marking an already batched chunk fails the conditional claim.
        let res = db.mark_chunks_batched(&[chunk1.hash], B256::with_last_byte(0xbb)).await;
        assert!(matches!(res, Err(DatabaseError::ChunkClaimFailed { expected: 1, claimed: 0 })));

        // a contiguous batch over an already batched chunk is rejected before
        // any write.
        let chunk2 = db.insert_chunk(&Chunk::new(vec![block(3)])).await.unwrap();
        db.mark_chunks_batched(&[chunk2.hash], B256::with_last_byte(0xcc)).await.unwrap();
        let res =
            db.insert_batch(1, 1, chunk2.hash, chunk2.hash, &[Chunk::new(vec![block(3)])]).await;
        assert!(matches!(res, Err(DatabaseError::ChunkClaimFailed { expected: 1, claimed: 0 })));
        assert_eq!(db.get_batch_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_chunk_input_validation() {
        let db = setup_test_db().await;
        db.insert_l2_blocks(vec![block(2), block(4)]).await.unwrap();

        assert!(db.insert_chunk(&Chunk::new(vec![])).await.is_err());
        assert!(db.insert_chunk(&Chunk::new(vec![block(2), block(4)])).await.is_err());
    }

    #[tokio::test]
    async fn test_batch_scenario() {
        let db = setup_test_db().await;
        db.insert_l2_blocks(vec![block(2), block(3)]).await.unwrap();
        assert_eq!(db.get_l2_blocks_latest_height().await.unwrap(), Some(3));
        assert_eq!(db.get_unchunked_blocks().await.unwrap().len(), 2);

        // one chunk from block 2 alone, leaving block 3 unclaimed.
        let chunk1 = db.insert_chunk(&Chunk::new(vec![block(2)])).await.unwrap();
        assert_eq!(db.get_unchunked_blocks().await.unwrap().len(), 1);

        let batch1 = db
            .insert_batch(0, 0, chunk1.hash, chunk1.hash, &[Chunk::new(vec![block(2)])])
            .await
            .unwrap();
        db.mark_chunks_batched(&[chunk1.hash], batch1.hash).await.unwrap();

        // the hash is re-derivable from the stored header bytes.
        let stored = db.get_batch_by_index(0).await.unwrap().unwrap();
        let header = BatchHeader::try_from_buf(&mut stored.header.as_ref()).unwrap();
        assert_eq!(header.hash_slow(), stored.hash);
        assert_eq!(stored.hash, batch1.hash);

        let chunk2 = db.insert_chunk(&Chunk::new(vec![block(3)])).await.unwrap();
        let batch2 = db
            .insert_batch(1, 1, chunk2.hash, chunk2.hash, &[Chunk::new(vec![block(3)])])
            .await
            .unwrap();
        db.mark_chunks_batched(&[chunk2.hash], batch2.hash).await.unwrap();

        let stored = db.get_batch_by_index(1).await.unwrap().unwrap();
        let header = BatchHeader::try_from_buf(&mut stored.header.as_ref()).unwrap();
        assert_eq!(header.hash_slow(), stored.hash);
        assert_eq!(header.parent_batch_hash, batch1.hash);

        assert_eq!(db.get_batch_count().await.unwrap(), 2);
        assert_eq!(db.get_pending_batches(100).await.unwrap().len(), 2);

        let statuses =
            db.get_rollup_status_by_hash_list(&[batch1.hash, batch2.hash]).await.unwrap();
        assert_eq!(statuses, vec![RollupStatus::Pending, RollupStatus::Pending]);

        // batch 1: proving skipped, committed; batch 2: proving failed, committed.
        db.update_batch_proving_status(batch1.hash, ProvingStatus::Skipped).await.unwrap();
        db.update_rollup_status(batch1.hash, RollupStatus::Committed).await.unwrap();
        db.update_batch_proving_status(batch2.hash, ProvingStatus::Assigned).await.unwrap();
        db.update_batch_proving_status(batch2.hash, ProvingStatus::Failed).await.unwrap();
        db.update_rollup_status(batch2.hash, RollupStatus::Committed).await.unwrap();

        assert_eq!(db.update_skipped_batches().await.unwrap(), 2);
        let swept = db.get_batch_by_index(1).await.unwrap().unwrap();
        assert_eq!(swept.rollup_status, RollupStatus::FinalizationSkipped);

        // a second sweep with no newly eligible batches is a no-op.
        assert_eq!(db.update_skipped_batches().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_batch_contiguity() {
        let db = setup_test_db().await;
        db.insert_l2_blocks(vec![block(2), block(3)]).await.unwrap();
        let chunk1 = db.insert_chunk(&Chunk::new(vec![block(2)])).await.unwrap();

        // the first batch must start at chunk 0.
        let res =
            db.insert_batch(1, 1, chunk1.hash, chunk1.hash, &[Chunk::new(vec![block(2)])]).await;
        assert!(matches!(
            res,
            Err(DatabaseError::BatchNotContiguous { expected: 0, got: 1 })
        ));

        let batch1 = db
            .insert_batch(0, 0, chunk1.hash, chunk1.hash, &[Chunk::new(vec![block(2)])])
            .await
            .unwrap();
        db.mark_chunks_batched(&[chunk1.hash], batch1.hash).await.unwrap();

        // the next batch must extend the previous end chunk index.
        let chunk2 = db.insert_chunk(&Chunk::new(vec![block(3)])).await.unwrap();
        let res =
            db.insert_batch(2, 2, chunk2.hash, chunk2.hash, &[Chunk::new(vec![block(3)])]).await;
        assert!(matches!(
            res,
            Err(DatabaseError::BatchNotContiguous { expected: 1, got: 2 })
        ));

        // replaying the previous batch range is rejected on contiguity.
        let res =
            db.insert_batch(0, 0, chunk1.hash, chunk1.hash, &[Chunk::new(vec![block(2)])]).await;
        assert!(matches!(
            res,
            Err(DatabaseError::BatchNotContiguous { expected: 1, got: 0 })
        ));
    }

    #[tokio::test]
    async fn test_rollup_status_monotonicity() {
        let db = setup_test_db().await;
        db.insert_l2_blocks(vec![block(2)]).await.unwrap();
        let chunk = db.insert_chunk(&Chunk::new(vec![block(2)])).await.unwrap();
        let batch = db
            .insert_batch(0, 0, chunk.hash, chunk.hash, &[Chunk::new(vec![block(2)])])
            .await
            .unwrap();

        // Pending -> Finalized skips Committed and is rejected.
        assert!(db.update_rollup_status(batch.hash, RollupStatus::Finalized).await.is_err());

        db.update_rollup_status(batch.hash, RollupStatus::Committed).await.unwrap();
        db.update_rollup_status(batch.hash, RollupStatus::Finalized).await.unwrap();

        // Finalized is terminal.
        for status in [
            RollupStatus::Pending,
            RollupStatus::Committed,
            RollupStatus::FinalizeFailed,
            RollupStatus::FinalizationSkipped,
        ] {
            assert!(matches!(
                db.update_rollup_status(batch.hash, status).await,
                Err(DatabaseError::InvalidStatusTransition { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_tx_hash_stamped_updates() {
        let db = setup_test_db().await;
        db.insert_l2_blocks(vec![block(2)]).await.unwrap();
        let chunk = db.insert_chunk(&Chunk::new(vec![block(2)])).await.unwrap();
        let batch = db
            .insert_batch(0, 0, chunk.hash, chunk.hash, &[Chunk::new(vec![block(2)])])
            .await
            .unwrap();

        let commit_tx = B256::with_last_byte(0xc0);
        db.update_commit_tx_hash_and_rollup_status(batch.hash, commit_tx, RollupStatus::Committed)
            .await
            .unwrap();
        let stored = db.get_latest_batch().await.unwrap().unwrap();
        assert_eq!(stored.commit_tx_hash, Some(commit_tx));
        assert_eq!(stored.rollup_status, RollupStatus::Committed);

        let finalize_tx = B256::with_last_byte(0xf0);
        db.update_finalize_tx_hash_and_rollup_status(
            batch.hash,
            finalize_tx,
            RollupStatus::FinalizeFailed,
        )
        .await
        .unwrap();
        let stored = db.get_latest_batch().await.unwrap().unwrap();
        assert_eq!(stored.finalize_tx_hash, Some(finalize_tx));
        assert_eq!(stored.rollup_status, RollupStatus::FinalizeFailed);

        // retry the finalization after the failure.
        db.update_finalize_tx_hash_and_rollup_status(
            batch.hash,
            B256::with_last_byte(0xf1),
            RollupStatus::Finalized,
        )
        .await
        .unwrap();

        let oracle_tx = B256::with_last_byte(0x0a);
        db.update_l2_gas_oracle_status_and_oracle_tx_hash(
            batch.hash,
            GasOracleStatus::Importing,
            oracle_tx,
        )
        .await
        .unwrap();
        db.update_l2_gas_oracle_status_and_oracle_tx_hash(
            batch.hash,
            GasOracleStatus::Imported,
            oracle_tx,
        )
        .await
        .unwrap();
        let stored = db.get_latest_batch().await.unwrap().unwrap();
        assert_eq!(stored.oracle_status, GasOracleStatus::Imported);
        assert_eq!(stored.oracle_tx_hash, Some(oracle_tx));

        // Imported is terminal.
        assert!(db
            .update_l2_gas_oracle_status_and_oracle_tx_hash(
                batch.hash,
                GasOracleStatus::Importing,
                oracle_tx,
            )
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_rollup_status_by_hash_list_order_and_misses() {
        let db = setup_test_db().await;
        db.insert_l2_blocks(vec![block(2), block(3)]).await.unwrap();
        let chunk1 = db.insert_chunk(&Chunk::new(vec![block(2)])).await.unwrap();
        let batch1 = db
            .insert_batch(0, 0, chunk1.hash, chunk1.hash, &[Chunk::new(vec![block(2)])])
            .await
            .unwrap();
        db.mark_chunks_batched(&[chunk1.hash], batch1.hash).await.unwrap();
        let chunk2 = db.insert_chunk(&Chunk::new(vec![block(3)])).await.unwrap();
        let batch2 = db
            .insert_batch(1, 1, chunk2.hash, chunk2.hash, &[Chunk::new(vec![block(3)])])
            .await
            .unwrap();

        db.update_rollup_status(batch1.hash, RollupStatus::Committed).await.unwrap();

        // input order is preserved, not index order.
        let statuses =
            db.get_rollup_status_by_hash_list(&[batch2.hash, batch1.hash]).await.unwrap();
        assert_eq!(statuses, vec![RollupStatus::Pending, RollupStatus::Committed]);

        let missing = B256::with_last_byte(0xff);
        assert!(matches!(
            db.get_rollup_status_by_hash_list(&[batch1.hash, missing]).await,
            Err(DatabaseError::BatchNotFound(hash)) if hash == missing
        ));

        // point lookups surface absence as None, updates as a not found error.
        assert!(db.get_batch_by_index(17).await.unwrap().is_none());
        assert!(matches!(
            db.update_rollup_status(missing, RollupStatus::Committed).await,
            Err(DatabaseError::BatchNotFound(hash)) if hash == missing
        ));
        assert!(matches!(
            db.update_chunk_proving_status(missing, ProvingStatus::Assigned).await,
            Err(DatabaseError::ChunkNotFound(hash)) if hash == missing
        ));
    }
}
