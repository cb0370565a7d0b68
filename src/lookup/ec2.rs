use anyhow::Result;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::types::Filter;
use super::{Instance, Inventory, Reservation, Tag};

pub struct Ec2 {
    client: Client,
}

impl Ec2 {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl Inventory for Ec2 {
    async fn describe(&self, addr: &str) -> Result<Vec<Reservation>> {
        let filter = Filter::builder()
            .name("private-ip-address")
            .values(addr)
            .build();

        let res = self.client.describe_instances().filters(filter).send().await?;

        Ok(res.reservations.unwrap_or_default().into_iter().map(|r| {
            Reservation {
                instances: r.instances.unwrap_or_default().into_iter().map(instance).collect(),
            }
        }).collect())
    }
}

fn instance(i: aws_sdk_ec2::types::Instance) -> Instance {
    Instance {
        id:     i.instance_id,
        kind:   i.instance_type.map(|t| t.as_str().to_string()),
        vpc:    i.vpc_id,
        subnet: i.subnet_id,
        image:  i.image_id,
        tags:   i.tags.unwrap_or_default().into_iter().filter_map(|t| {
            Some(Tag {
                key:   t.key?,
                value: t.value.unwrap_or_default(),
            })
        }).collect(),
    }
}
