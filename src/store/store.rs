use anyhow::Result;
use async_trait::async_trait;
use crate::fetch::Window;

/// Paginated query contract of the log store. One call returns one page;
/// callers drive the pagination with the returned token.
#[async_trait]
pub trait LogStore: Send + Sync {
    async fn streams(&self, group: &str, token: Option<String>) -> Result<StreamPage>;
    async fn events(&self, group: &str, stream: &str, window: Window, token: Option<String>) -> Result<EventPage>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogStream {
    pub name:       String,
    pub last_event: i64,
}

#[derive(Clone, Debug, Default)]
pub struct StreamPage {
    pub streams: Vec<LogStream>,
    pub next:    Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct EventPage {
    pub events: Vec<String>,
    pub next:   Option<String>,
}
