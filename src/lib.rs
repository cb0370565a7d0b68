pub mod args;
pub mod catalog;
pub mod enrich;
pub mod fetch;
pub mod lookup;
pub mod poll;
pub mod store;
