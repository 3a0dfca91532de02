use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "PrintFiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub file_id: i32,
    pub batch_id: i32,
    pub file_name_original: String,
    pub file_path_saved: String,
    pub page_count_original: i32,
    pub page_range: String,
    pub page_count_final: i32,
    pub copies: i32,
    pub print_color: bool,
    pub print_duplex: bool,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub file_cost: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::print_batch::Entity",
        from = "Column::BatchId",
        to = "super::print_batch::Column::BatchId",
        on_delete = "Cascade"
    )]
    PrintBatch,
}

impl Related<super::print_batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PrintBatch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
