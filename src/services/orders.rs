use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entities::print_batch::{self, BatchStatus};
use crate::entities::{print_file, setting};
use crate::models::orders::{ActiveBatch, NewPrintFile, SubmittedBatch};
use crate::models::settings::PriceTable;
use crate::services::pricing;

/// Reads and writes batches, their files and the price settings.
///
/// Holds a pool handle; every call checks a connection out and returns it when done.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    db: DatabaseConnection,
}

impl OrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the batch and all of its files in one transaction.
    ///
    /// The stored total is the exact sum of the file costs. Nothing is written if any
    /// insert fails.
    pub async fn create_batch(
        &self,
        mobile_number: &str,
        files: Vec<NewPrintFile>,
    ) -> Result<SubmittedBatch, DbErr> {
        let total_cost = pricing::total_cost(files.iter().map(|f| f.file_cost))
            .ok_or_else(|| DbErr::Custom("batch total overflows".to_string()))?;
        let txn = self.db.begin().await?;

        let batch = print_batch::ActiveModel {
            mobile_number: Set(mobile_number.to_string()),
            status: Set(BatchStatus::Waiting),
            total_cost: Set(total_cost),
            created_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let rows: Vec<print_file::ActiveModel> = files
            .into_iter()
            .map(|f| print_file::ActiveModel {
                batch_id: Set(batch.batch_id),
                file_name_original: Set(f.file_name_original),
                file_path_saved: Set(f.file_path_saved),
                page_count_original: Set(f.page_count_original),
                page_range: Set(f.page_range),
                page_count_final: Set(f.page_count_final),
                copies: Set(f.copies),
                print_color: Set(f.print_color),
                print_duplex: Set(f.print_duplex),
                file_cost: Set(f.file_cost),
                ..Default::default()
            })
            .collect();
        let file_count = rows.len();

        if !rows.is_empty() {
            print_file::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;

        tracing::debug!(
            "Created batch {} with {} files, total {}",
            batch.batch_id,
            file_count,
            total_cost
        );

        Ok(SubmittedBatch {
            batch_id: batch.batch_id,
            total_cost,
            file_count,
        })
    }

    /// Overwrites the status whatever it was before. Returns false when the batch does not exist.
    pub async fn update_status(&self, batch_id: i32, status: BatchStatus) -> Result<bool, DbErr> {
        let exists = print_batch::Entity::find_by_id(batch_id)
            .one(&self.db)
            .await?
            .is_some();
        if !exists {
            return Ok(false);
        }

        print_batch::Entity::update_many()
            .col_expr(print_batch::Column::Status, Expr::value(status.as_str()))
            .filter(print_batch::Column::BatchId.eq(batch_id))
            .exec(&self.db)
            .await?;

        Ok(true)
    }

    /// Waiting and Printing batches, oldest first, each with its file names.
    pub async fn list_active(&self) -> Result<Vec<ActiveBatch>, DbErr> {
        let batches = print_batch::Entity::find()
            .filter(print_batch::Column::Status.is_in(BatchStatus::ACTIVE.iter().map(BatchStatus::as_str)))
            .order_by_asc(print_batch::Column::CreatedAt)
            .order_by_asc(print_batch::Column::BatchId)
            .all(&self.db)
            .await?;

        let files = batches.load_many(print_file::Entity, &self.db).await?;

        Ok(batches
            .into_iter()
            .zip(files)
            .map(|(batch, mut files)| {
                files.sort_by_key(|f| f.file_id);
                ActiveBatch {
                    batch_id: batch.batch_id,
                    mobile_number: batch.mobile_number,
                    status: batch.status,
                    total_cost: batch.total_cost,
                    created_at: batch.created_at,
                    files: files.into_iter().map(|f| f.file_name_original).collect(),
                }
            })
            .collect())
    }

    pub async fn price_table(&self) -> Result<PriceTable, DbErr> {
        let rows = setting::Entity::find().all(&self.db).await?;
        Ok(PriceTable::from_settings(rows))
    }
}
