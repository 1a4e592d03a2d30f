//! Record reconciler
//!
//! The reconciler walks the resolved catalog one record at a time and
//! decides, for each, whether a CNAME write is needed and allowed.
//!
//! ## Per-record flow
//!
//! ```text
//! ResolvedRecord
//!      │
//!      ▼
//! value empty? ──yes──▶ Skipped
//!      │
//!      ▼
//! lookup <name>.<domain> ──0 or >1 matches──▶ Err (run aborts)
//!      │
//!      ▼
//! content == value? ──yes──▶ AlreadySet
//!      │
//!      ▼
//! dry run? ──yes──▶ DryRun
//!      │
//!      ▼
//! operator types "yes"? ──no──▶ Declined
//!      │
//!      ▼
//! update ──fails──▶ Err (run aborts)
//!      │
//!      ▼
//!   Updated
//! ```
//!
//! Soft outcomes never escalate. Errors are returned to the caller, which
//! decides how to abort; records already updated stay updated.

mod context;

pub use context::ReconcileContext;

use std::fmt;
use std::io::Write;

use tracing::{debug, info, warn};

use crate::catalog::{SERVICE_CATALOG, ServiceSpec};
use crate::error::{Error, Result};
use crate::resolver::{self, ResolvedRecord};
use crate::traits::{CNAME, OperatorPrompt, OptionSource, RecordFilter, RecordUpdate, ZoneRecord};

/// Challenge shown before every live write
pub const CONFIRMATION_CHALLENGE: &str = r#"Type "yes" to set this DNS record"#;

/// The only answer that approves a write (case-sensitive, untrimmed)
pub const CONFIRMATION_ACCEPTANCE: &str = "yes";

/// Terminal outcome for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// No value was configured for the record
    Skipped,
    /// The record already points at the desired value
    AlreadySet,
    /// A write was needed but the run is in dry-run mode
    DryRun {
        /// Current record content
        current: String,
    },
    /// The operator did not approve the write
    Declined,
    /// The record was updated
    Updated {
        /// Content before the update
        previous: String,
    },
}

impl RecordOutcome {
    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            RecordOutcome::Skipped => "skipped",
            RecordOutcome::AlreadySet => "already set",
            RecordOutcome::DryRun { .. } => "dry run",
            RecordOutcome::Declined => "declined",
            RecordOutcome::Updated { .. } => "updated",
        }
    }
}

/// Outcome counts for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub skipped: usize,
    pub already_set: usize,
    pub dry_run: usize,
    pub declined: usize,
    pub updated: usize,
}

impl RunSummary {
    /// Count one outcome
    pub fn record(&mut self, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Skipped => self.skipped += 1,
            RecordOutcome::AlreadySet => self.already_set += 1,
            RecordOutcome::DryRun { .. } => self.dry_run += 1,
            RecordOutcome::Declined => self.declined += 1,
            RecordOutcome::Updated { .. } => self.updated += 1,
        }
    }

    /// Number of records processed
    pub fn total(&self) -> usize {
        self.skipped + self.already_set + self.dry_run + self.declined + self.updated
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} record(s): {} updated, {} already set, {} dry run, {} declined, {} skipped",
            self.total(),
            self.updated,
            self.already_set,
            self.dry_run,
            self.declined,
            self.skipped
        )
    }
}

/// Reconciles resolved records against the zone store
///
/// ## Threading
///
/// Records are processed strictly one after another. The operator prompt
/// blocks the run, so two records are never in flight at once.
pub struct Reconciler {
    context: ReconcileContext,
    prompt: Box<dyn OperatorPrompt>,
}

impl Reconciler {
    /// Create a reconciler for one run
    pub fn new(context: ReconcileContext, prompt: Box<dyn OperatorPrompt>) -> Self {
        Self { context, prompt }
    }

    /// The run context
    pub fn context(&self) -> &ReconcileContext {
        &self.context
    }

    /// Reconcile the whole service catalog
    ///
    /// Narration goes to `out`, one line per record outcome. Returns on the
    /// first fatal error, leaving later records unprocessed.
    pub async fn run<W: Write>(&self, options: &dyn OptionSource, out: &mut W) -> Result<RunSummary> {
        self.run_catalog(&SERVICE_CATALOG, options, out).await
    }

    /// Reconcile an explicit catalog
    pub async fn run_catalog<W: Write>(
        &self,
        catalog: &[ServiceSpec],
        options: &dyn OptionSource,
        out: &mut W,
    ) -> Result<RunSummary> {
        let config = self.context.config();

        writeln!(
            out,
            "Using domain name {} with ID {}",
            config.domain_name,
            self.context.zone_id()
        )?;
        writeln!(out, "Setting DNS records to secondary...")?;

        let records = resolver::resolve(catalog, &config.idp_key, options);
        self.run_records(records, out).await
    }

    /// Reconcile a sequence of resolved records in order
    pub async fn run_records<I, W>(&self, records: I, out: &mut W) -> Result<RunSummary>
    where
        I: IntoIterator<Item = ResolvedRecord>,
        W: Write,
    {
        let mut summary = RunSummary::default();

        for record in records {
            let outcome = self.reconcile_record(&record, out).await?;
            debug!("{}: {}", record.name, outcome.label());
            summary.record(&outcome);
        }

        info!("Reconciliation finished: {}", summary);
        Ok(summary)
    }

    /// Reconcile a single record
    pub async fn reconcile_record<W: Write>(
        &self,
        record: &ResolvedRecord,
        out: &mut W,
    ) -> Result<RecordOutcome> {
        let config = self.context.config();

        if !record.has_value() {
            writeln!(out, "  skipping {} (no value provided)", record.name)?;
            return Ok(RecordOutcome::Skipped);
        }

        writeln!(
            out,
            "  {}.{} --> {}",
            record.name, config.domain_name, record.desired_value
        )?;

        let current = self.lookup(record).await?;

        if current.content == record.desired_value {
            writeln!(
                out,
                "CNAME {} is already set to {}",
                record.name, record.desired_value
            )?;
            return Ok(RecordOutcome::AlreadySet);
        }

        if config.dry_run {
            info!(
                "[DRY-RUN] Would update {} -> {} (was: {})",
                current.name, record.desired_value, current.content
            );
            writeln!(out, "  test mode: skipping API call")?;
            return Ok(RecordOutcome::DryRun {
                current: current.content,
            });
        }

        let answer = self.prompt.prompt(CONFIRMATION_CHALLENGE)?;
        if answer != CONFIRMATION_ACCEPTANCE {
            debug!("Operator declined update of {}", record.name);
            writeln!(out, "  declined, {} left unchanged", record.name)?;
            return Ok(RecordOutcome::Declined);
        }

        let update = RecordUpdate::cname(&current, record.desired_value.as_str());
        self.context
            .store()
            .update_record(self.context.zone_id(), &update)
            .await
            .map_err(|e| Error::update(&record.name, e.to_string()))?;

        info!(
            "Updated {} -> {} (was: {})",
            current.name, record.desired_value, current.content
        );
        writeln!(
            out,
            "  updated {} to {}",
            config.fqdn(&record.name),
            record.desired_value
        )?;

        Ok(RecordOutcome::Updated {
            previous: current.content,
        })
    }

    /// Find the single zone record for `record`
    async fn lookup(&self, record: &ResolvedRecord) -> Result<ZoneRecord> {
        let fqdn = self.context.config().fqdn(&record.name);
        debug!("Looking up record {}", fqdn);

        let mut matches = self
            .context
            .store()
            .list_records(self.context.zone_id(), &RecordFilter::by_name(&fqdn))
            .await
            .map_err(|e| Error::lookup(&record.name, e.to_string()))?;

        if matches.len() != 1 {
            return Err(Error::LookupMismatch {
                name: record.name.clone(),
                matches: matches.len(),
            });
        }

        let current = matches.remove(0);
        if current.record_type != CNAME {
            warn!(
                "Record {} is type {}, expected {}",
                fqdn, current.record_type, CNAME
            );
        }

        debug!("Found record {} (ID {}) -> {}", fqdn, current.id, current.content);
        Ok(current)
    }
}
