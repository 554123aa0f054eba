//! Data structures and preprocessing module
//!
//! Provides raw record/table types, CSV I/O, the numeric dataset container,
//! feature standardization, and synthetic demo data.

mod dataset;
mod loader;
mod record;
mod scaler;
pub mod synthetic;

pub use dataset::{Dataset, Split};
pub use loader::DataLoader;
pub use record::{RawRecord, RawTable};
pub use scaler::StandardScaler;
