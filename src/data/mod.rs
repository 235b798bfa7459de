//! Data module - CSV loading, date parsing and aggregation

pub mod dates;
mod loader;
mod processor;

pub use loader::{CovidTables, DataLoader, LoaderError, TableKind, TablePreview, DATE_COLUMN};
pub use processor::{
    DataProcessor, DeathRate, GroupSums, GroupValue, MonthlyTotal, ProcessorError, Share,
};
