pub use engine::{Engine, TimeFormat, NONE, NX};
pub use flow::Flow;
pub use record::Record;

mod engine;
mod flow;
mod record;
