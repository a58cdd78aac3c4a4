use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use splitbook_core::{DomainResult, Entity, SettlementId, SplitId, find_by_id, find_by_id_mut, snapshot};

use crate::clock::{Clock, SystemClock};
use crate::config::LedgerConfig;
use crate::locale;
use crate::model::{
    Calculations, Expense, NewSplit, OldBalance, Settlement, SettlementIntent, SettlementRef,
    Split,
};

/// Actor label recorded when a settlement is completed without naming who did it.
pub const DEFAULT_ACTOR: &str = "User";

/// Ledger-level bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub app_name: String,
    pub version: String,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Full ledger state, exposed read-only for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    pub metadata: Metadata,
    /// Splits in insertion order.
    pub splits: Vec<Split>,
    pub next_id: SplitId,
}

impl LedgerState {
    fn empty(config: &LedgerConfig, now: DateTime<Utc>) -> Self {
        Self {
            metadata: Metadata {
                app_name: config.app_name.clone(),
                version: config.schema_version.clone(),
                created: now,
                last_updated: now,
            },
            splits: Vec::new(),
            next_id: SplitId::new(1),
        }
    }
}

/// Aggregate counters over every split in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_splits: usize,
    pub completed_splits: usize,
    pub pending_splits: usize,
    pub total_amount: f64,
    pub total_settlements: usize,
    pub completed_settlements: usize,
    pub pending_settlements: usize,
}

/// In-memory store of splits.
///
/// Single owner, `&mut self` mutators. Wrap in [`crate::SharedLedger`] when
/// several callers need access.
#[derive(Debug)]
pub struct Ledger<C = SystemClock> {
    state: LedgerState,
    config: LedgerConfig,
    offset: FixedOffset,
    clock: C,
}

impl Ledger<SystemClock> {
    /// Empty ledger with default configuration and wall-clock time.
    pub fn new() -> Self {
        let config = LedgerConfig::default();
        let clock = SystemClock;
        Self {
            state: LedgerState::empty(&config, clock.now()),
            config,
            offset: locale::ist(),
            clock,
        }
    }
}

impl Default for Ledger<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Ledger<C> {
    /// Empty ledger with explicit configuration and time source.
    pub fn with_config(config: LedgerConfig, clock: C) -> DomainResult<Self> {
        config.validate()?;
        let offset = config.display_offset()?;
        let state = LedgerState::empty(&config, clock.now());
        Ok(Self {
            state,
            config,
            offset,
            clock,
        })
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn metadata(&self) -> &Metadata {
        &self.state.metadata
    }

    /// Splits in insertion order.
    pub fn splits(&self) -> &[Split] {
        &self.state.splits
    }

    /// Identifier the next `create` will assign.
    pub fn next_id(&self) -> SplitId {
        self.state.next_id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.state.metadata.last_updated = now;
    }

    /// Record a new split.
    ///
    /// Inputs are copied; later changes to the caller's collections do not
    /// reach the stored split. Values are not validated.
    pub fn create(
        &mut self,
        members: &[String],
        expenses: &[Expense],
        old_balances: &[OldBalance],
        calculations: Calculations,
        settlements: &[SettlementIntent],
    ) -> &Split {
        let now = self.clock.now();
        let id = self.state.next_id;

        let settlements: Vec<Settlement> = settlements
            .iter()
            .map(|intent| Settlement::pending(SettlementId::new(), intent))
            .collect();

        let split = Split::active(NewSplit {
            id,
            timestamp: now,
            date: locale::format_date(now, self.offset),
            time: locale::format_time(now, self.offset),
            members: snapshot(members),
            expenses: snapshot(expenses),
            old_balances: snapshot(old_balances),
            calculations,
            settlements,
        });

        self.state.next_id = id.next();
        self.touch(now);

        tracing::info!(
            split_id = %id,
            members = split.members().len(),
            settlements = split.settlements().len(),
            total_expenses = calculations.total_expenses,
            "split saved"
        );

        self.state.splits.push(split);
        let index = self.state.splits.len() - 1;
        &self.state.splits[index]
    }

    /// All splits, most recent first.
    ///
    /// Splits sharing a timestamp are ordered by id, highest first.
    pub fn list_all(&self) -> Vec<&Split> {
        let mut splits: Vec<&Split> = self.state.splits.iter().collect();
        splits.sort_by(|a, b| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| b.id().cmp(a.id()))
        });
        splits
    }

    pub fn get_by_id(&self, id: SplitId) -> Option<&Split> {
        find_by_id(&self.state.splits, &id)
    }

    /// Mark a settlement as paid by [`DEFAULT_ACTOR`].
    pub fn complete_settlement(
        &mut self,
        split_id: SplitId,
        settlement: impl Into<SettlementRef>,
    ) -> bool {
        self.complete_settlement_by(split_id, settlement, DEFAULT_ACTOR)
    }

    /// Mark a settlement as paid, recording who confirmed it.
    ///
    /// Completing the last pending settlement completes the split. Returns
    /// `false` without touching state when either id is unknown.
    pub fn complete_settlement_by(
        &mut self,
        split_id: SplitId,
        settlement: impl Into<SettlementRef>,
        completed_by: impl Into<String>,
    ) -> bool {
        let now = self.clock.now();
        let settlement = settlement.into();

        let Some(split) = find_by_id_mut(&mut self.state.splits, &split_id) else {
            tracing::debug!(split_id = %split_id, "complete: split not found");
            return false;
        };
        let Some(settlement_id) = settlement.resolve() else {
            tracing::debug!(split_id = %split_id, ?settlement, "complete: unparseable settlement id");
            return false;
        };
        let Some(target) = split.settlement_mut(settlement_id) else {
            tracing::debug!(split_id = %split_id, settlement_id = %settlement_id, "complete: settlement not found");
            return false;
        };

        let completed_by = completed_by.into();
        tracing::info!(
            split_id = %split_id,
            settlement_id = %settlement_id,
            completed_by = %completed_by,
            "settlement completed"
        );
        target.complete(now, completed_by);
        split.refresh_status(now);

        if split.is_completed() {
            tracing::info!(split_id = %split_id, "split completed");
        }

        self.touch(now);
        true
    }

    /// Undo a settlement completion.
    ///
    /// The owning split always returns to active, whatever the state of its
    /// other settlements.
    pub fn revert_settlement(
        &mut self,
        split_id: SplitId,
        settlement: impl Into<SettlementRef>,
    ) -> bool {
        let now = self.clock.now();
        let settlement = settlement.into();

        let Some(split) = find_by_id_mut(&mut self.state.splits, &split_id) else {
            tracing::debug!(split_id = %split_id, "revert: split not found");
            return false;
        };
        let Some(settlement_id) = settlement.resolve() else {
            tracing::debug!(split_id = %split_id, ?settlement, "revert: unparseable settlement id");
            return false;
        };
        let Some(target) = split.settlement_mut(settlement_id) else {
            tracing::debug!(split_id = %split_id, settlement_id = %settlement_id, "revert: settlement not found");
            return false;
        };

        target.revert();
        split.reactivate();
        tracing::info!(split_id = %split_id, settlement_id = %settlement_id, "settlement reverted");

        self.touch(now);
        true
    }

    /// Remove a split. Returns whether anything was removed.
    pub fn delete(&mut self, id: SplitId) -> bool {
        let Some(index) = self.state.splits.iter().position(|s| *s.id() == id) else {
            tracing::debug!(split_id = %id, "delete: split not found");
            return false;
        };

        self.state.splits.remove(index);
        let now = self.clock.now();
        self.touch(now);
        tracing::info!(split_id = %id, "split deleted");
        true
    }

    pub fn statistics(&self) -> Statistics {
        let splits = &self.state.splits;

        let total_splits = splits.len();
        let completed_splits = splits.iter().filter(|s| s.is_completed()).count();
        let total_amount: f64 = splits
            .iter()
            .map(|s| s.calculations().total_expenses)
            .sum();
        let total_settlements: usize = splits.iter().map(|s| s.settlements().len()).sum();
        let completed_settlements: usize = splits
            .iter()
            .map(Split::completed_settlement_count)
            .sum();

        Statistics {
            total_splits,
            completed_splits,
            pending_splits: total_splits - completed_splits,
            total_amount,
            total_settlements,
            completed_settlements,
            pending_settlements: total_settlements - completed_settlements,
        }
    }

    /// Drop every split and start over with fresh metadata; ids restart at 1.
    pub fn reset(&mut self) {
        let removed = self.state.splits.len();
        self.state = LedgerState::empty(&self.config, self.clock.now());
        tracing::info!(removed, "ledger reset");
    }
}
