use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use chrono::{Local, TimeZone};
use log::{debug, warn};
use tokio::time::timeout;
use crate::lookup::{Inventory, Resolver};
use super::flow::Flow;
use super::record::Record;

pub const NX:   &str = "NX";
pub const NONE: &str = "-";

pub struct Engine {
    inventory: Arc<dyn Inventory>,
    resolver:  Arc<dyn Resolver>,
    format:    TimeFormat,
    timeout:   Duration,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TimeFormat {
    Dashed,
    Spaced,
}

#[derive(Debug)]
struct Meta {
    id:     String,
    kind:   String,
    name:   String,
    subnet: String,
    image:  String,
}

impl Engine {
    pub fn new(inventory: Arc<dyn Inventory>, resolver: Arc<dyn Resolver>, format: TimeFormat, timeout: Duration) -> Self {
        Self {
            inventory: inventory,
            resolver:  resolver,
            format:    format,
            timeout:   timeout,
        }
    }

    /// Joins one raw record with the reverse-DNS and inventory lookups.
    /// Lookup failures degrade to sentinels; only a malformed record
    /// is an error, and the caller drops just that record.
    pub async fn enrich(&self, raw: &str) -> Result<Record> {
        let flow = Flow::parse(raw)?;
        let host = self.reverse(&flow.dstaddr).await;
        let meta = self.instance(&flow.srcaddr).await;

        Ok(Record {
            version:       flow.version,
            account:       flow.account,
            interface:     flow.interface,
            srcaddr:       flow.srcaddr,
            dstaddr:       flow.dstaddr,
            srcport:       flow.srcport,
            dstport:       flow.dstport,
            protocol:      flow.protocol,
            packets:       flow.packets,
            bytes:         flow.bytes,
            start:         flow.start.to_string(),
            end:           flow.end.to_string(),
            action:        flow.action,
            status:        flow.status,
            rstart:        self.format.render(flow.start),
            rend:          self.format.render(flow.end),
            instance_id:   meta.id,
            instance_type: meta.kind,
            instance_name: meta.name,
            subnet_id:     meta.subnet,
            image:         meta.image,
            hostname:      host,
        })
    }

    async fn reverse(&self, addr: &str) -> String {
        let addr: IpAddr = match addr.parse() {
            Ok(addr) => addr,
            Err(_)   => return NX.to_string(),
        };

        match timeout(self.timeout, self.resolver.reverse(addr)).await {
            Ok(Ok(name)) => name,
            Ok(Err(e))   => {
                debug!("reverse lookup of {} failed: {:?}", addr, e);
                NX.to_string()
            },
            Err(_)       => {
                debug!("reverse lookup of {} timed out", addr);
                NX.to_string()
            },
        }
    }

    async fn instance(&self, addr: &str) -> Meta {
        let mut meta = Meta::default();

        let reservations = match self.inventory.describe(addr).await {
            Ok(rs) => rs,
            Err(e) => {
                warn!("instance lookup for {} failed: {:?}", addr, e);
                return meta;
            },
        };

        let instance = reservations.first().and_then(|r| r.instances.first());

        match instance {
            Some(i) => {
                let take = |v: &Option<String>| v.clone().unwrap_or_else(|| NONE.to_string());
                meta.id     = take(&i.id);
                meta.kind   = take(&i.kind);
                meta.subnet = take(&i.subnet);
                meta.image  = take(&i.image);
                // tag keys are matched by substring, first match wins
                meta.name   = i.tags.iter().find(|t| t.key.contains("Name")).map(|t| {
                    t.value.clone()
                }).unwrap_or_else(|| NONE.to_string());
            },
            None => debug!("no instance with private address {}", addr),
        }

        meta
    }
}

impl TimeFormat {
    pub fn render(&self, epoch: i64) -> String {
        match Local.timestamp_opt(epoch, 0).single() {
            Some(t) => t.format(self.pattern()).to_string(),
            None    => NONE.to_string(),
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Self::Dashed => "%Y-%m-%d-%H-%M-%S",
            Self::Spaced => "%Y-%m-%d %H:%M:%S",
        }
    }
}

impl FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashed" => Ok(Self::Dashed),
            "spaced" => Ok(Self::Spaced),
            _        => Err(format!("unknown time format '{}'", s)),
        }
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            id:     NONE.to_string(),
            kind:   NONE.to_string(),
            name:   NONE.to_string(),
            subnet: NONE.to_string(),
            image:  NONE.to_string(),
        }
    }
}
