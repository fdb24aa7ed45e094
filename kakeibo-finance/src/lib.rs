//! kakeibo-finance: merchant category mapping and spreadsheet-import row
//! formatting for parsed statement TSVs.

pub mod category_map;
pub mod numbers;

pub use category_map::{Mapping, find_category, load_mappings, needs_confirmation};
pub use numbers::{numbers_row, read_raw_transactions};
