use std::collections::HashMap;
use std::collections::VecDeque;
use std::time::Duration;
use anyhow::{bail, Result};
use log::{debug, info, warn};
use tokio::time::sleep;
use crate::store::{LogStore, LogStream};

pub const MAX_ATTEMPTS: usize    = 8;
pub const RETRY_DELAY:  Duration = Duration::from_secs(10);

/// Last-event timestamps kept per stream, newest last.
pub const HISTORY: usize = 16;

/// Tracks the known log streams across polling cycles. Discovery is
/// retried with a fixed delay; exhaustion is fatal to the process
/// because there is nothing left to poll.
pub struct Catalog {
    attempts: usize,
    delay:    Duration,
    history:  HashMap<String, VecDeque<i64>>,
}

impl Catalog {
    pub fn new(attempts: usize, delay: Duration) -> Self {
        Self {
            attempts: attempts,
            delay:    delay,
            history:  HashMap::new(),
        }
    }

    pub async fn discover(&mut self, store: &dyn LogStore, group: &str) -> Result<Vec<LogStream>> {
        for attempt in 1..=self.attempts {
            let streams = match self.list(store, group).await {
                Ok(streams) => streams,
                Err(e)      => {
                    warn!("stream discovery in group {} failed: {:?}", group, e);
                    Vec::new()
                },
            };

            if !streams.is_empty() {
                info!("{} log streams in group {}", streams.len(), group);
                self.observe(&streams);
                return Ok(streams);
            }

            info!("no log streams in group {}, attempt {}/{}", group, attempt, self.attempts);

            if attempt < self.attempts {
                sleep(self.delay).await;
            }
        }

        bail!("no log streams in group {} after {} attempts", group, self.attempts)
    }

    pub fn history(&self) -> &HashMap<String, VecDeque<i64>> {
        &self.history
    }

    async fn list(&self, store: &dyn LogStore, group: &str) -> Result<Vec<LogStream>> {
        let mut streams = Vec::new();
        let mut token   = None;

        loop {
            let page = store.streams(group, token).await?;
            streams.extend(page.streams);

            token = page.next;
            if token.is_none() {
                return Ok(streams);
            }
        }
    }

    fn observe(&mut self, streams: &[LogStream]) {
        for stream in streams {
            let seen = self.history.entry(stream.name.clone()).or_default();
            seen.push_back(stream.last_event);
            while seen.len() > HISTORY {
                seen.pop_front();
            }
        }
        debug!("stream history: {:?}", self.history.keys());
    }
}
