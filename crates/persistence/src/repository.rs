//! The tender repository: read-only loads against `tenders_info`,
//! `tenders_positions`, `tenders_position_attributes`, and transactional
//! writes to `tender_matches`/`tenders_position_attributes_matches`.
//!
//! Per §5 and §6, the first three tables are never mutated by this service,
//! and each position's write happens under a fresh connection/transaction
//! rather than a session shared across the tender.

use attrmodel::{Position, PositionAttribute};
use scoring::CandidateScore;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::PersistenceError;
use crate::models::{TenderMatchRecord, TenderPositionAttributeMatchRecord, TenderPositionAttributeRow, TenderPositionRow};

#[derive(Clone)]
pub struct TenderRepository {
    pool: PgPool,
}

impl TenderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, PersistenceError> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// `company_id` owning a tender. Used by the consumer before retrieval.
    pub async fn load_company_id(&self, tender_id: i64) -> Result<i64, PersistenceError> {
        let row: (i64,) = sqlx::query_as("SELECT company_id FROM tenders_info WHERE id = $1")
            .bind(tender_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// Loads every position of `tender_id` with its attributes, ordered by
    /// `tender_position ASC NULLS LAST` per §4.7 step 1.
    pub async fn load_positions(&self, tender_id: i64) -> Result<Vec<Position>, PersistenceError> {
        let position_rows: Vec<TenderPositionRow> = sqlx::query_as(
            "SELECT id, tender_id, title, category
             FROM tenders_positions
             WHERE tender_id = $1
             ORDER BY tender_position ASC NULLS LAST",
        )
        .bind(tender_id)
        .fetch_all(&self.pool)
        .await?;

        let mut positions = Vec::with_capacity(position_rows.len());
        for row in position_rows {
            let attr_rows: Vec<TenderPositionAttributeRow> = sqlx::query_as(
                "SELECT characteristic_id, tender_position_id, name, value, unit
                 FROM tenders_position_attributes
                 WHERE tender_position_id = $1",
            )
            .bind(row.id)
            .fetch_all(&self.pool)
            .await?;

            let attributes = attr_rows
                .into_iter()
                .map(|a| PositionAttribute { id: a.characteristic_id, name: a.name, value: a.value, unit: a.unit })
                .collect();

            positions.push(Position { id: row.id, tender_id: row.tender_id, title: row.title, category: row.category, attributes });
        }

        Ok(positions)
    }

    /// Writes one position's matches under a fresh transaction: increments
    /// `processed_positions`, then bulk-inserts both record shapes, per
    /// §4.6 step 6 / §4.8 / the `_finalize_results` ordering.
    ///
    /// `candidate_mongo_ids` must align 1:1 with `scores` by candidate id —
    /// the caller already holds the retrieved `ProductCandidate`s and is
    /// best placed to supply it.
    pub async fn persist_position_matches(
        &self,
        tender_id: i64,
        position_id: i64,
        total_attrs: usize,
        scores: &[CandidateScore],
        candidate_mongo_ids: impl Fn(i64) -> String,
    ) -> Result<(), PersistenceError> {
        let mut tx: Transaction<'_, Postgres> = self.pool.begin().await?;

        sqlx::query("UPDATE tenders_info SET processed_positions = processed_positions + 1 WHERE id = $1")
            .bind(tender_id)
            .execute(&mut *tx)
            .await?;

        for score in scores {
            let record = TenderMatchRecord::new(position_id, score.candidate_id, score.points, total_attrs);
            sqlx::query(
                "INSERT INTO tender_matches
                 (tender_position_id, product_id, match_score, max_match_score, percentage_match_score)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(record.tender_position_id)
            .bind(record.product_id)
            .bind(record.match_score)
            .bind(record.max_match_score)
            .bind(record.percentage_match_score)
            .execute(&mut *tx)
            .await?;

            let mongo_id = candidate_mongo_ids(score.candidate_id);
            for matched in &score.matched {
                let attr_record = TenderPositionAttributeMatchRecord {
                    tender_id,
                    tender_position_id: position_id,
                    product_mongo_id: mongo_id.clone(),
                    position_attr_id: matched.position_attr_id,
                    position_attr_name: matched.position_name.clone(),
                    position_attr_value: matched.position_value.clone(),
                    position_attr_unit: matched.position_unit.clone(),
                    product_attr_name: matched.candidate_name.clone(),
                    product_attr_value: matched.candidate_value.clone(),
                };
                sqlx::query(
                    "INSERT INTO tenders_position_attributes_matches
                     (tender_id, tender_position_id, product_mongo_id, position_attr_id,
                      position_attr_name, position_attr_value, position_attr_unit,
                      product_attr_name, product_attr_value)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                )
                .bind(attr_record.tender_id)
                .bind(attr_record.tender_position_id)
                .bind(attr_record.product_mongo_id)
                .bind(attr_record.position_attr_id)
                .bind(attr_record.position_attr_name)
                .bind(attr_record.position_attr_value)
                .bind(attr_record.position_attr_unit)
                .bind(attr_record.product_attr_name)
                .bind(attr_record.product_attr_value)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Increments `processed_positions` on its own, for the empty-attributes
    /// path (§4.6 step 1 / the "Empty position attributes" boundary case)
    /// where no match rows are written at all.
    pub async fn increment_processed_positions(&self, tender_id: i64) -> Result<(), PersistenceError> {
        sqlx::query("UPDATE tenders_info SET processed_positions = processed_positions + 1 WHERE id = $1")
            .bind(tender_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
