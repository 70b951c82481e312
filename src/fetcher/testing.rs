//! Scripted stand-ins for the network, shared by adapter and command tests.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::app::{GramError, Result};
use crate::fetcher::{Downloader, Transport};

#[derive(Default)]
struct Script {
    queued: HashMap<String, VecDeque<Value>>,
    fixed: HashMap<String, Value>,
    calls: Vec<(String, Vec<(String, String)>)>,
}

/// Answers `get_json` from per-path scripts and records every call.
///
/// Queued responses are consumed in order; once a path's queue is empty its
/// fixed response (if any) is returned for every further call.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, body: Value) -> &Self {
        self.script
            .lock()
            .unwrap()
            .fixed
            .insert(path.to_string(), body);
        self
    }

    pub fn respond_seq(&self, path: &str, bodies: Vec<Value>) -> &Self {
        self.script
            .lock()
            .unwrap()
            .queued
            .entry(path.to_string())
            .or_default()
            .extend(bodies);
        self
    }

    pub fn calls(&self, path: &str) -> usize {
        self.script
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.script.lock().unwrap().calls.len()
    }

    /// Query parameters of every call made to `path`, in order.
    pub fn queries(&self, path: &str) -> Vec<Vec<(String, String)>> {
        self.script
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut script = self.script.lock().unwrap();
        script.calls.push((
            path.to_string(),
            query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));

        if let Some(body) = script.queued.get_mut(path).and_then(VecDeque::pop_front) {
            return Ok(body);
        }

        script.fixed.get(path).cloned().ok_or_else(|| GramError::Api {
            status: 404,
            message: format!("no scripted response for {}", path),
        })
    }
}

/// Records download requests and writes a marker file instead of fetching.
#[derive(Clone, Default)]
pub struct RecordingDownloader {
    requests: Arc<Mutex<Vec<(String, PathBuf)>>>,
}

impl RecordingDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<(String, PathBuf)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Downloader for RecordingDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, url.as_bytes())?;
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), dest.to_path_buf()));
        Ok(())
    }
}
