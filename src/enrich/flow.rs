use anyhow::{anyhow, ensure, Result};

/// One raw VPC flow-log record: 14 fixed-position whitespace-delimited
/// fields. Window bounds are parsed, everything else is kept verbatim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Flow {
    pub version:   String,
    pub account:   String,
    pub interface: String,
    pub srcaddr:   String,
    pub dstaddr:   String,
    pub srcport:   String,
    pub dstport:   String,
    pub protocol:  String,
    pub packets:   String,
    pub bytes:     String,
    pub start:     i64,
    pub end:       i64,
    pub action:    String,
    pub status:    String,
}

impl Flow {
    pub fn parse(raw: &str) -> Result<Self> {
        let fields: Vec<&str> = raw.split_whitespace().collect();
        ensure!(fields.len() >= 14, "malformed flow record, {} of 14 fields: '{}'", fields.len(), raw);

        let epoch = |n: usize| -> Result<i64> {
            fields[n].parse().map_err(|_| {
                anyhow!("malformed flow record, field {} is not an epoch: '{}'", n, fields[n])
            })
        };

        Ok(Self {
            version:   fields[0].to_string(),
            account:   fields[1].to_string(),
            interface: fields[2].to_string(),
            srcaddr:   fields[3].to_string(),
            dstaddr:   fields[4].to_string(),
            srcport:   fields[5].to_string(),
            dstport:   fields[6].to_string(),
            protocol:  fields[7].to_string(),
            packets:   fields[8].to_string(),
            bytes:     fields[9].to_string(),
            start:     epoch(10)?,
            end:       epoch(11)?,
            action:    fields[12].to_string(),
            status:    fields[13].to_string(),
        })
    }
}
