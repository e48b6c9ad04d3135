mod record;
mod table;

pub use record::RecordFormat;
pub use record::attach_image_bytes;
pub use record::persist;
pub use record::read_record;
pub use record::write_record;

pub use table::IndexRow;
pub use table::index_table;
pub use table::write_table;
pub use table::write_table_csv;
pub use table::write_table_pq;
pub use table::write_table_tsv;
