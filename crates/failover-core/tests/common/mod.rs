//! Test doubles and common utilities for reconciler contract tests
//!
//! The doubles record every call so tests can assert on exactly which
//! remote operations a run performed.

#![allow(dead_code)]

use failover_core::error::{Error, Result};
use failover_core::traits::{
    CNAME, OperatorPrompt, RecordFilter, RecordUpdate, ZoneId, ZoneRecord, ZoneRecordStore,
};
use failover_core::{ReconcileContext, Reconciler, ReconcilerConfig};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const DOMAIN: &str = "example.com";
pub const ZONE_ID: &str = "zone-1";
pub const IDP: &str = "acme";

/// A recording in-memory zone store
///
/// Clones share state, so a test can keep one handle and give another to
/// the reconciler.
#[derive(Clone, Default)]
pub struct MockZoneStore {
    /// Records keyed by fully-qualified name
    records: Arc<Mutex<HashMap<String, Vec<ZoneRecord>>>>,
    resolve_call_count: Arc<AtomicUsize>,
    list_call_count: Arc<AtomicUsize>,
    update_call_count: Arc<AtomicUsize>,
    /// Names passed to list_records, in order
    listed: Arc<Mutex<Vec<String>>>,
    /// Updates received, in order
    updates: Arc<Mutex<Vec<RecordUpdate>>>,
    fail_lookups: Arc<AtomicBool>,
    fail_updates: Arc<AtomicBool>,
}

impl MockZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a CNAME record; ids are derived from the name
    pub fn with_cname(self, fqdn: &str, content: &str) -> Self {
        let id = format!("id-{}", fqdn);
        self.with_record(ZoneRecord {
            id,
            name: fqdn.to_string(),
            content: content.to_string(),
            record_type: CNAME.to_string(),
        })
    }

    /// Add a raw record (duplicates allowed)
    pub fn with_record(self, record: ZoneRecord) -> Self {
        self.records
            .lock()
            .unwrap()
            .entry(record.name.clone())
            .or_default()
            .push(record);
        self
    }

    /// Make every list_records call fail
    pub fn failing_lookups(self) -> Self {
        self.fail_lookups.store(true, Ordering::SeqCst);
        self
    }

    /// Make every update_record call fail
    pub fn failing_updates(self) -> Self {
        self.fail_updates.store(true, Ordering::SeqCst);
        self
    }

    pub fn resolve_call_count(&self) -> usize {
        self.resolve_call_count.load(Ordering::SeqCst)
    }

    pub fn list_call_count(&self) -> usize {
        self.list_call_count.load(Ordering::SeqCst)
    }

    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }

    pub fn listed(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<RecordUpdate> {
        self.updates.lock().unwrap().clone()
    }

    /// Current content of a record
    pub fn content(&self, fqdn: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .get(fqdn)
            .and_then(|records| records.first())
            .map(|record| record.content.clone())
    }
}

#[async_trait::async_trait]
impl ZoneRecordStore for MockZoneStore {
    async fn resolve_zone_id(&self, domain_name: &str) -> Result<ZoneId> {
        self.resolve_call_count.fetch_add(1, Ordering::SeqCst);
        if domain_name == DOMAIN {
            Ok(ZoneId::new(ZONE_ID))
        } else {
            Err(Error::not_found(format!("Zone not found: {}", domain_name)))
        }
    }

    async fn list_records(&self, zone: &ZoneId, filter: &RecordFilter) -> Result<Vec<ZoneRecord>> {
        self.list_call_count.fetch_add(1, Ordering::SeqCst);
        self.listed.lock().unwrap().push(filter.name.clone());
        assert_eq!(zone.as_str(), ZONE_ID, "lookup against the resolved zone");

        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(Error::http("connection reset"));
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&filter.name)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_record(&self, zone: &ZoneId, update: &RecordUpdate) -> Result<ZoneRecord> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);
        self.updates.lock().unwrap().push(update.clone());
        assert_eq!(zone.as_str(), ZONE_ID, "update against the resolved zone");

        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(Error::provider("mock", "HTTP 500"));
        }

        let mut records = self.records.lock().unwrap();
        let record = records
            .values_mut()
            .flatten()
            .find(|record| record.id == update.id)
            .ok_or_else(|| Error::not_found(update.id.clone()))?;
        record.content = update.content.clone();
        Ok(record.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A prompt that replays scripted answers
///
/// Once the script is exhausted every prompt reads as end of input (an
/// empty answer). Clones share state.
#[derive(Clone, Default)]
pub struct ScriptedPrompt {
    answers: Arc<Mutex<VecDeque<String>>>,
    messages: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().map(Into::into).collect())),
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times the operator was asked
    pub fn prompt_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    /// Messages shown to the operator
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl OperatorPrompt for ScriptedPrompt {
    fn prompt(&self, message: &str) -> Result<String> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Build a reconciler for `example.com` / idp `acme` against the doubles
pub async fn reconciler(store: &MockZoneStore, prompt: &ScriptedPrompt, dry_run: bool) -> Reconciler {
    let config = ReconcilerConfig::new(DOMAIN, IDP).with_dry_run(dry_run);
    let context = ReconcileContext::connect(Arc::new(store.clone()), config, None)
        .await
        .expect("context connects");
    Reconciler::new(context, Box::new(prompt.clone()))
}

/// Narration written during a run
pub fn lines(out: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(out).lines().map(str::to_string).collect()
}
