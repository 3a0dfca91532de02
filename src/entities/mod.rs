pub mod print_batch;
pub mod print_file;
pub mod setting;
