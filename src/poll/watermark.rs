use std::fs;
use std::path::PathBuf;
use log::{debug, warn};

/// Best-effort persisted window upper bound, a single integer of epoch
/// seconds. A missing or unreadable file falls back to the configured
/// start; a failed write is logged and polling continues without
/// persistence.
pub struct Watermark {
    path: Option<PathBuf>,
}

impl Watermark {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path,
        }
    }

    pub fn load(&self) -> Option<u64> {
        let path = self.path.as_ref()?;
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e)   => {
                debug!("no watermark at {:?}: {}", path, e);
                return None;
            },
        };

        match text.trim().parse() {
            Ok(mark) => Some(mark),
            Err(_)   => {
                warn!("ignoring unreadable watermark in {:?}: '{}'", path, text.trim());
                None
            },
        }
    }

    pub fn store(&self, mark: u64) {
        if let Some(path) = &self.path {
            if let Err(e) = fs::write(path, mark.to_string()) {
                warn!("watermark write to {:?} failed: {}", path, e);
            }
        }
    }
}
