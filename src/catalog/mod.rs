pub use catalog::{Catalog, HISTORY, MAX_ATTEMPTS, RETRY_DELAY};

mod catalog;
