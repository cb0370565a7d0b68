use std::env;
use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use anyhow::{bail, Result};
use async_trait::async_trait;
use crate::catalog::Catalog;
use crate::enrich::{Engine, Record, TimeFormat, NONE, NX};
use crate::fetch::Window;
use crate::lookup::{Inventory, Reservation, Resolver};
use crate::store::{EventPage, LogStore, LogStream, StreamPage};
use super::{Config, Poll, Watermark};

const RAW: &str = "2 123456789012 eni-1234 10.0.1.5 93.184.216.34 443 51820 6 10 840 1000000000 1000000060 ACCEPT OK";

struct Recorder {
    windows:  Mutex<Vec<Window>>,
    cycles:   usize,
    shutdown: Arc<AtomicBool>,
}

struct Empty {
    queries: AtomicUsize,
}

struct NoInventory;
struct NoResolver;

#[async_trait]
impl LogStore for Recorder {
    async fn streams(&self, _group: &str, _token: Option<String>) -> Result<StreamPage> {
        Ok(StreamPage {
            streams: vec![LogStream { name: "eni-a".to_string(), last_event: 0 }],
            next:    None,
        })
    }

    async fn events(&self, _group: &str, _stream: &str, window: Window, _token: Option<String>) -> Result<EventPage> {
        let mut windows = self.windows.lock().unwrap();
        windows.push(window);
        if windows.len() >= self.cycles {
            self.shutdown.store(true, Ordering::Release);
        }

        Ok(EventPage {
            events: vec![RAW.to_string()],
            next:   None,
        })
    }
}

#[async_trait]
impl LogStore for Empty {
    async fn streams(&self, _group: &str, _token: Option<String>) -> Result<StreamPage> {
        Ok(StreamPage::default())
    }

    async fn events(&self, _group: &str, _stream: &str, _window: Window, _token: Option<String>) -> Result<EventPage> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        bail!("must not be reached")
    }
}

#[async_trait]
impl Inventory for NoInventory {
    async fn describe(&self, _addr: &str) -> Result<Vec<Reservation>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl Resolver for NoResolver {
    async fn reverse(&self, addr: IpAddr) -> Result<String> {
        bail!("no PTR record for {}", addr)
    }
}

fn engine() -> Engine {
    Engine::new(Arc::new(NoInventory), Arc::new(NoResolver), TimeFormat::Dashed, Duration::from_millis(50))
}

fn poll(store: Arc<dyn LogStore>, attempts: usize, start: u64, mark: Option<PathBuf>, shutdown: Arc<AtomicBool>) -> Poll {
    let catalog = Catalog::new(attempts, Duration::from_millis(1));
    let config  = Config {
        group: "vpcflow".to_string(),
        sleep: Duration::from_millis(1),
        start: start,
    };
    Poll::new(store, catalog, engine(), config, Watermark::new(mark), shutdown)
}

fn tick() -> u64 {
    static T: AtomicU64 = AtomicU64::new(1_000);
    T.fetch_add(60, Ordering::SeqCst)
}

fn tick_late() -> u64 {
    static T: AtomicU64 = AtomicU64::new(901_000);
    T.fetch_add(60, Ordering::SeqCst)
}

fn scratch(name: &str) -> PathBuf {
    env::temp_dir().join(format!("efflux-{}-{}", name, std::process::id()))
}

#[tokio::test]
async fn windows_advance_without_gaps() -> Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let store    = Arc::new(Recorder {
        windows:  Mutex::new(Vec::new()),
        cycles:   3,
        shutdown: shutdown.clone(),
    });

    let mut out = Vec::new();
    poll(store.clone(), 1, 0, None, shutdown).clock(tick).run(&mut out).await?;

    let windows = store.windows.lock().unwrap();
    assert_eq!(windows.len(), 3);
    for pair in windows.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
        assert!(pair[1].end > pair[1].start);
    }

    let lines: Vec<&str> = std::str::from_utf8(&out)?.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        let record: Record = serde_json::from_str(line)?;
        assert_eq!(record.hostname,    NX);
        assert_eq!(record.instance_id, NONE);
        assert_eq!(record.srcaddr,     "10.0.1.5");
    }

    Ok(())
}

#[tokio::test]
async fn exhausted_discovery_exits_before_fetching() {
    let store = Arc::new(Empty { queries: AtomicUsize::new(0) });

    let mut out = Vec::new();
    let res = poll(store.clone(), 2, 0, None, Arc::new(AtomicBool::new(false))).run(&mut out).await;

    assert!(res.is_err());
    assert_eq!(store.queries.load(Ordering::SeqCst), 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn watermark_overrides_operator_start() -> Result<()> {
    let path = scratch("mark");
    fs::write(&path, "900000")?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let store    = Arc::new(Recorder {
        windows:  Mutex::new(Vec::new()),
        cycles:   1,
        shutdown: shutdown.clone(),
    });

    let mut out = Vec::new();
    poll(store.clone(), 1, 7, Some(path.clone()), shutdown).clock(tick_late).run(&mut out).await?;

    let windows = store.windows.lock().unwrap();
    assert_eq!(windows[0], Window::new(900_000, 901_000)?);
    assert_eq!(fs::read_to_string(&path)?, "901000");

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn watermark_roundtrip() {
    let path = scratch("roundtrip");
    let mark = Watermark::new(Some(path.clone()));

    assert_eq!(mark.load(), None);
    mark.store(42);
    assert_eq!(mark.load(), Some(42));

    fs::remove_file(&path).unwrap();
}

#[test]
fn watermark_tolerates_garbage_and_missing_dirs() {
    let path = scratch("garbage");
    fs::write(&path, "not an epoch").unwrap();
    assert_eq!(Watermark::new(Some(path.clone())).load(), None);
    fs::remove_file(&path).unwrap();

    let gone = scratch("no-such-dir").join("mark");
    let mark = Watermark::new(Some(gone));
    mark.store(7);
    assert_eq!(mark.load(), None);

    let off = Watermark::new(None);
    off.store(7);
    assert_eq!(off.load(), None);
}
