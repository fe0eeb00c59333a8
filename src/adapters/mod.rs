// Adapters layer: loosely-typed sources and CSV emission/ingestion built on the core mapper.

pub mod csv_io;
pub mod json_record;
pub mod text_record;

pub use json_record::JsonRecord;
pub use text_record::TextRecord;
