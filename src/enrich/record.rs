use serde::{Serialize, Deserialize};

/// The emitted record. Field order here is the wire order: raw flow
/// fields first, then the enrichment.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "flow_log_version")]
    pub version: String,
    #[serde(rename = "aws_account_id")]
    pub account: String,
    #[serde(rename = "nw_interface_id")]
    pub interface: String,
    pub srcaddr: String,
    pub dstaddr: String,
    pub srcport: String,
    pub dstport: String,
    pub protocol: String,
    pub packets: String,
    pub bytes: String,
    #[serde(rename = "estart_time")]
    pub start: String,
    #[serde(rename = "eend_time")]
    pub end: String,
    #[serde(rename = "nw_acl_action")]
    pub action: String,
    #[serde(rename = "flowlog_status")]
    pub status: String,
    #[serde(rename = "rstart_time")]
    pub rstart: String,
    #[serde(rename = "rend_time")]
    pub rend: String,
    pub instance_id: String,
    pub instance_type: String,
    pub instance_name: String,
    pub subnet_id: String,
    #[serde(rename = "ami_id")]
    pub image: String,
    #[serde(rename = "dst_domainname")]
    pub hostname: String,
}
