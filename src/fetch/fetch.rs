use std::sync::Arc;
use anyhow::Result;
use log::{debug, warn};
use tokio::sync::mpsc::{channel, Receiver, Sender};
use crate::store::{LogStore, LogStream};
use super::Window;

/// Produces the raw egress records for one window as a single lazy
/// sequence, stream by stream, page by page, over a bounded channel.
/// A failing stream is logged and skipped; it gets another chance
/// against the next window. The window was validated at construction,
/// so no query carries an inverted time range.
pub fn fetch(store: Arc<dyn LogStore>, group: String, streams: Vec<LogStream>, window: Window) -> Receiver<String> {
    let (tx, rx) = channel(1024);

    tokio::spawn(async move {
        for stream in streams {
            match drain(&*store, &group, &stream.name, window, &tx).await {
                Ok(true)  => (),
                Ok(false) => break,
                Err(e)    => warn!("stream {} in group {} failed for window {}: {:?}",
                                   stream.name, group, window, e),
            }
        }
    });

    rx
}

/// Pages one stream into the channel. Returns false once the receiver
/// is gone and producing more is pointless.
async fn drain(store: &dyn LogStore, group: &str, stream: &str, window: Window, tx: &Sender<String>) -> Result<bool> {
    let mut token = None;

    loop {
        let page = store.events(group, stream, window, token).await?;
        debug!("{} events from stream {} for window {}", page.events.len(), stream, window);

        for event in page.events {
            if tx.send(event).await.is_err() {
                return Ok(false);
            }
        }

        token = page.next;
        if token.is_none() {
            return Ok(true);
        }
    }
}
