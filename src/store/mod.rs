pub use cloudwatch::CloudWatch;
pub use store::{EventPage, LogStore, LogStream, StreamPage};

mod cloudwatch;
mod store;
