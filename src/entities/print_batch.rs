use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "PrintBatches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub batch_id: i32,
    pub mobile_number: String,
    pub status: BatchStatus,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_cost: Decimal,
    pub created_at: DateTime,
}

/// Where a batch sits in the print queue. Any status may follow any other.
#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum BatchStatus {
    #[sea_orm(string_value = "Waiting")]
    Waiting,
    #[sea_orm(string_value = "Printing")]
    Printing,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

impl BatchStatus {
    /// Statuses that still need operator attention.
    pub const ACTIVE: [BatchStatus; 2] = [BatchStatus::Waiting, BatchStatus::Printing];

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Waiting => "Waiting",
            BatchStatus::Printing => "Printing",
            BatchStatus::Completed => "Completed",
            BatchStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl FromStr for BatchStatus {
    type Err = UnknownStatus;

    // Exact match only, "waiting" is not a status
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Waiting" => Ok(BatchStatus::Waiting),
            "Printing" => Ok(BatchStatus::Printing),
            "Completed" => Ok(BatchStatus::Completed),
            "Cancelled" => Ok(BatchStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::print_file::Entity")]
    PrintFile,
}

impl Related<super::print_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PrintFile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
