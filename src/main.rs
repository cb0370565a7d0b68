use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use anyhow::Result;
use aws_config::{BehaviorVersion, Region};
use clap::{App, load_yaml, value_t};
use env_logger::Builder;
use log::info;
use log::LevelFilter::*;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag::register;
use tokio::runtime::Runtime;
use efflux::args::opt;
use efflux::catalog::{Catalog, MAX_ATTEMPTS, RETRY_DELAY};
use efflux::enrich::{Engine, TimeFormat};
use efflux::lookup::{Dns, Ec2};
use efflux::poll::{Config, Poll, Watermark};
use efflux::store::CloudWatch;

const DNS_TIMEOUT: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    let yaml = load_yaml!("args.yml");
    let ver  = env!("CARGO_PKG_VERSION");
    let args = App::from_yaml(&yaml).version(ver).get_matches();

    let region = value_t!(args, "region", String)?;
    let vpc    = value_t!(args, "vpc",    String)?;
    let group  = value_t!(args, "group",  String)?;
    let sleep  = value_t!(args, "sleep",  u64)?;
    let start  = value_t!(args, "start",  u64)?;
    let prefix = value_t!(args, "prefix", String)?;
    let format = opt(args.value_of("timefmt"))?.unwrap_or(TimeFormat::Dashed);
    let state  = args.value_of("watermark").map(PathBuf::from);

    let (module, level) = match args.occurrences_of("verbose") {
        0 => (Some(module_path!()), Info),
        1 => (Some(module_path!()), Debug),
        2 => (Some(module_path!()), Trace),
        _ => (None,                 Trace),
    };
    Builder::from_default_env().filter(module, level).init();

    info!("initializing efflux {}", ver);
    info!("reading egress flows for {} from log group {}", vpc, group);

    let shutdown = Arc::new(AtomicBool::new(false));
    register(SIGTERM, shutdown.clone())?;
    register(SIGINT,  shutdown.clone())?;

    let rt = Runtime::new()?;

    let aws = rt.block_on({
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region)).load()
    });

    let store = Arc::new(CloudWatch::new(&aws, &prefix));
    let ec2   = Arc::new(Ec2::new(&aws));
    let dns   = Arc::new(Dns::new()?);

    let engine  = Engine::new(ec2, dns, format, DNS_TIMEOUT);
    let catalog = Catalog::new(MAX_ATTEMPTS, RETRY_DELAY);

    let config = Config {
        group: group,
        sleep: Duration::from_secs(sleep),
        start: start,
    };

    let mut poll = Poll::new(store, catalog, engine, config, Watermark::new(state), shutdown);
    rt.block_on(poll.run(&mut io::stdout()))
}
