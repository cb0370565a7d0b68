use anyhow::Result;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudwatchlogs::Client;
use aws_sdk_cloudwatchlogs::types::OrderBy;
use log::debug;
use crate::fetch::Window;
use super::{EventPage, LogStore, LogStream, StreamPage};

pub struct CloudWatch {
    client:  Client,
    pattern: String,
}

impl CloudWatch {
    pub fn new(config: &SdkConfig, prefix: &str) -> Self {
        Self {
            client:  Client::new(config),
            pattern: pattern(prefix),
        }
    }
}

#[async_trait]
impl LogStore for CloudWatch {
    async fn streams(&self, group: &str, token: Option<String>) -> Result<StreamPage> {
        let res = self.client.describe_log_streams()
            .log_group_name(group)
            .order_by(OrderBy::LastEventTime)
            .set_next_token(token)
            .send().await?;

        let streams = res.log_streams.unwrap_or_default().into_iter().filter_map(|s| {
            Some(LogStream {
                name:       s.log_stream_name?,
                last_event: s.last_event_timestamp.unwrap_or(0),
            })
        }).collect();

        Ok(StreamPage {
            streams: streams,
            next:    res.next_token,
        })
    }

    async fn events(&self, group: &str, stream: &str, window: Window, token: Option<String>) -> Result<EventPage> {
        // endTime is inclusive, the window upper bound is not
        let res = self.client.filter_log_events()
            .log_group_name(group)
            .log_stream_names(stream)
            .filter_pattern(&self.pattern)
            .start_time(window.start as i64 * 1000)
            .end_time(window.end as i64 * 1000 - 1)
            .set_next_token(token)
            .send().await?;

        let events: Vec<String> = res.events.unwrap_or_default()
            .into_iter()
            .filter_map(|e| e.message)
            .collect();

        debug!("{} events in page from stream {}", events.len(), stream);

        Ok(EventPage {
            events: events,
            next:   res.next_token,
        })
    }
}

fn pattern(prefix: &str) -> String {
    format!("[version, account_id, interface_id, \
             srcaddr = {0}*, dstaddr != {0}*, srcport, dstport, \
             protocol, packets, bytes, start, end, action, log_status]", prefix)
}
