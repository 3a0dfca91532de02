use rust_decimal::Decimal;

use crate::entities::print_batch::BatchStatus;

/// One validated job ready to be written as a PrintFiles row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrintFile {
    pub file_name_original: String,
    pub file_path_saved: String,
    pub page_count_original: i32,
    pub page_range: String,
    pub page_count_final: i32,
    pub copies: i32,
    pub print_color: bool,
    pub print_duplex: bool,
    pub file_cost: Decimal,
}

/// Result of a committed submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedBatch {
    pub batch_id: i32,
    pub total_cost: Decimal,
    pub file_count: usize,
}

/// A queued batch as the operator dashboard shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveBatch {
    pub batch_id: i32,
    pub mobile_number: String,
    pub status: BatchStatus,
    pub total_cost: Decimal,
    pub created_at: chrono::NaiveDateTime,
    pub files: Vec<String>,
}

impl ActiveBatch {
    /// Original file names, comma separated.
    pub fn file_list(&self) -> String {
        self.files.join(", ")
    }

    pub fn created_at_display(&self) -> String {
        self.created_at.format("%d-%m-%Y %H:%M").to_string()
    }

    pub fn total_cost_display(&self) -> String {
        format!("{:.2}", self.total_cost)
    }
}
