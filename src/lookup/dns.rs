use std::net::IpAddr;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use trust_dns_resolver::TokioAsyncResolver;
use super::Resolver;

pub struct Dns {
    resolver: TokioAsyncResolver,
}

impl Dns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            resolver: TokioAsyncResolver::tokio_from_system_conf()?,
        })
    }
}

#[async_trait]
impl Resolver for Dns {
    async fn reverse(&self, addr: IpAddr) -> Result<String> {
        let ptr  = self.resolver.reverse_lookup(addr).await?;
        let name = ptr.iter().next().ok_or_else(|| anyhow!("no PTR record for {}", addr))?;
        Ok(name.0.to_utf8().trim_end_matches('.').to_string())
    }
}
