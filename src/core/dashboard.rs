//! Keeps the displayed summary consistent with committed mutations.
//!
//! The summary is only ever replaced by a full recomputation over freshly
//! fetched data. A committed mutation marks it stale; a failed or abandoned
//! one leaves it authoritative.

use std::collections::BTreeMap;

use crate::core::services::{DerivedSummary, SummaryOptions, SummaryService};
use crate::core::time::Clock;
use crate::domain::{Insight, MutationRequest, Snapshot};
use crate::errors::{DashboardError, DashboardResult};

/// Supplies the records a summary is computed from.
pub trait DataSource {
    fn fetch(&self) -> DashboardResult<Snapshot>;
}

/// Accepts deposit and transfer requests.
pub trait MutationSink {
    fn submit(&self, request: &MutationRequest) -> DashboardResult<()>;
}

/// Opaque advice generator.
pub trait InsightSource {
    fn generate(&self) -> DashboardResult<Vec<Insight>>;
}

/// Handle for a request handed to the mutation sink and not yet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MutationTicket(u64);

impl MutationTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Committed; a refresh is due.
    Committed,
    /// Rejected or aborted; the current summary stands.
    Discarded,
}

pub struct DashboardState {
    options: SummaryOptions,
    summary: Option<DerivedSummary>,
    stale: bool,
    pending: BTreeMap<MutationTicket, MutationRequest>,
    next_ticket: u64,
    insights: Vec<Insight>,
}

impl DashboardState {
    pub fn new(options: SummaryOptions) -> Self {
        Self {
            options,
            summary: None,
            stale: true,
            pending: BTreeMap::new(),
            next_ticket: 1,
            insights: Vec::new(),
        }
    }

    pub fn options(&self) -> &SummaryOptions {
        &self.options
    }

    /// Last successfully computed summary.
    pub fn summary(&self) -> Option<&DerivedSummary> {
        self.summary.as_ref()
    }

    /// True until the first refresh and after every committed mutation.
    pub fn needs_refresh(&self) -> bool {
        self.stale
    }

    pub fn pending_mutations(&self) -> usize {
        self.pending.len()
    }

    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    /// Refetches and recomputes. If the fetch fails the previous summary is
    /// kept and staleness is left untouched.
    pub fn refresh(
        &mut self,
        source: &dyn DataSource,
        clock: &dyn Clock,
    ) -> DashboardResult<&DerivedSummary> {
        let snapshot = source.fetch().map_err(|err| {
            tracing::warn!(error = %err, "snapshot fetch failed; keeping previous summary");
            err
        })?;
        Ok(self.apply_snapshot(&snapshot, clock))
    }

    /// Recomputes from an already fetched snapshot.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot, clock: &dyn Clock) -> &DerivedSummary {
        let summary = SummaryService::summarize_snapshot(&self.options, snapshot, clock.now());
        self.stale = false;
        self.summary.insert(summary)
    }

    /// Validates and registers a request before it is sent.
    pub fn begin_mutation(&mut self, request: MutationRequest) -> DashboardResult<MutationTicket> {
        request.validate()?;
        let ticket = MutationTicket(self.next_ticket);
        self.next_ticket += 1;
        tracing::info!(
            ticket = ticket.id(),
            kind = ?request.mutation_kind(),
            amount = %request.amount,
            "mutation submitted"
        );
        self.pending.insert(ticket, request);
        Ok(ticket)
    }

    /// Records how a request resolved.
    pub fn complete_mutation(
        &mut self,
        ticket: MutationTicket,
        result: DashboardResult<()>,
    ) -> DashboardResult<MutationOutcome> {
        self.pending
            .remove(&ticket)
            .ok_or(DashboardError::UnknownMutation(ticket.id()))?;
        match result {
            Ok(()) => {
                tracing::info!(ticket = ticket.id(), "mutation committed; summary is stale");
                self.stale = true;
                Ok(MutationOutcome::Committed)
            }
            Err(err) => {
                tracing::warn!(ticket = ticket.id(), error = %err, "mutation failed; summary unchanged");
                Ok(MutationOutcome::Discarded)
            }
        }
    }

    /// Drops a request that will never resolve, e.g. a cancelled dialog.
    pub fn abandon_mutation(&mut self, ticket: MutationTicket) -> DashboardResult<()> {
        self.pending
            .remove(&ticket)
            .map(|_| ())
            .ok_or(DashboardError::UnknownMutation(ticket.id()))
    }

    /// Sends a request through `sink` and, when it commits, refreshes from
    /// `source`.
    ///
    /// A committed request is reported as committed even if the follow-up
    /// refresh fails; the state then stays stale until the next successful
    /// [`refresh`](Self::refresh). Callers must not resubmit it.
    pub fn submit(
        &mut self,
        request: MutationRequest,
        sink: &dyn MutationSink,
        source: &dyn DataSource,
        clock: &dyn Clock,
    ) -> DashboardResult<MutationOutcome> {
        let ticket = self.begin_mutation(request.clone())?;
        let outcome = self.complete_mutation(ticket, sink.submit(&request))?;
        if outcome == MutationOutcome::Committed {
            if let Err(err) = self.refresh(source, clock) {
                tracing::warn!(
                    ticket = ticket.id(),
                    error = %err,
                    "refresh after committed mutation failed; summary stays stale"
                );
            }
        }
        Ok(outcome)
    }

    /// Replaces the advice list; on failure the previous list stays.
    pub fn load_insights(&mut self, source: &dyn InsightSource) -> DashboardResult<&[Insight]> {
        self.insights = source.generate()?;
        Ok(&self.insights)
    }
}
