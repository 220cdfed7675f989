pub mod driver;
pub mod error;
pub mod migrate;
pub mod path;
pub mod sections;

pub use driver::MigrationArgs;
pub use error::{MigrationError, Result};
pub use migrate::process_genesis;
