use std::net::IpAddr;
use anyhow::Result;
use async_trait::async_trait;

/// Compute-inventory lookup by private address. Queried fresh for every
/// flow record, addresses are reused across instance lifetimes.
#[async_trait]
pub trait Inventory: Send + Sync {
    async fn describe(&self, addr: &str) -> Result<Vec<Reservation>>;
}

/// Reverse-DNS lookup. Callers bound the call with a timeout.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn reverse(&self, addr: IpAddr) -> Result<String>;
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Reservation {
    pub instances: Vec<Instance>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Instance {
    pub id:     Option<String>,
    pub kind:   Option<String>,
    pub vpc:    Option<String>,
    pub subnet: Option<String>,
    pub image:  Option<String>,
    pub tags:   Vec<Tag>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tag {
    pub key:   String,
    pub value: String,
}
