pub mod csv_table;
pub mod discovery;
pub mod error;

pub use csv_table::{read_raw_table, read_raw_table_from_reader};
pub use discovery::{SourceTables, TableFiles, load_tables};
pub use error::{IngestError, Result};
