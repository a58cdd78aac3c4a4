//! Split and settlement records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use splitbook_core::{Entity, SettlementId, SplitId, ValueObject};

/// Split lifecycle, derived from its settlements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStatus {
    Active,
    Completed,
}

/// Payment status of a single settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    Pending,
    Completed,
}

/// One expense as recorded by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub paid_by: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

impl ValueObject for Expense {}

/// A balance carried over from before the split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OldBalance {
    pub member: String,
    /// Positive: the member is owed; negative: the member owes.
    pub amount: f64,
}

impl ValueObject for OldBalance {}

/// Totals computed by the caller, stored verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculations {
    pub total_expenses: f64,
    pub total_members: u32,
    pub per_person_share: f64,
}

impl ValueObject for Calculations {}

/// A payment instruction produced by the settlement calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementIntent {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl ValueObject for SettlementIntent {}

/// A settlement reference as handed in by a caller.
///
/// Text-based interfaces pass ids as strings; those are parsed before
/// comparison and anything unparseable matches no settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementRef {
    Id(SettlementId),
    Text(String),
}

impl SettlementRef {
    pub fn resolve(&self) -> Option<SettlementId> {
        match self {
            SettlementRef::Id(id) => Some(*id),
            SettlementRef::Text(text) => text.parse().ok(),
        }
    }
}

impl From<SettlementId> for SettlementRef {
    fn from(value: SettlementId) -> Self {
        Self::Id(value)
    }
}

impl From<&SettlementId> for SettlementRef {
    fn from(value: &SettlementId) -> Self {
        Self::Id(*value)
    }
}

impl From<String> for SettlementRef {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SettlementRef {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One directional payment obligation within a split.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    id: SettlementId,
    from: String,
    to: String,
    amount: f64,
    status: SettlementStatus,
    completed_date: Option<DateTime<Utc>>,
    completed_by: Option<String>,
}

impl Settlement {
    pub(crate) fn pending(id: SettlementId, intent: &SettlementIntent) -> Self {
        Self {
            id,
            from: intent.from.clone(),
            to: intent.to.clone(),
            amount: intent.amount,
            status: SettlementStatus::Pending,
            completed_date: None,
            completed_by: None,
        }
    }

    pub fn id_typed(&self) -> SettlementId {
        self.id
    }

    /// Member who pays.
    pub fn payer(&self) -> &str {
        &self.from
    }

    /// Member who receives.
    pub fn payee(&self) -> &str {
        &self.to
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn status(&self) -> SettlementStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == SettlementStatus::Completed
    }

    pub fn completed_date(&self) -> Option<DateTime<Utc>> {
        self.completed_date
    }

    pub fn completed_by(&self) -> Option<&str> {
        self.completed_by.as_deref()
    }

    pub(crate) fn complete(&mut self, at: DateTime<Utc>, by: String) {
        self.status = SettlementStatus::Completed;
        self.completed_date = Some(at);
        self.completed_by = Some(by);
    }

    pub(crate) fn revert(&mut self) {
        self.status = SettlementStatus::Pending;
        self.completed_date = None;
        self.completed_by = None;
    }
}

impl Entity for Settlement {
    type Id = SettlementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One expense-splitting event.
///
/// Snapshots (`members`, `expenses`, `old_balances`) and `calculations` are
/// fixed at creation; only settlement statuses change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    id: SplitId,
    timestamp: DateTime<Utc>,
    date: String,
    time: String,
    members: Vec<String>,
    expenses: Vec<Expense>,
    old_balances: Vec<OldBalance>,
    calculations: Calculations,
    settlements: Vec<Settlement>,
    status: SplitStatus,
    completed_date: Option<DateTime<Utc>>,
}

pub(crate) struct NewSplit {
    pub id: SplitId,
    pub timestamp: DateTime<Utc>,
    pub date: String,
    pub time: String,
    pub members: Vec<String>,
    pub expenses: Vec<Expense>,
    pub old_balances: Vec<OldBalance>,
    pub calculations: Calculations,
    pub settlements: Vec<Settlement>,
}

impl Split {
    pub(crate) fn active(new: NewSplit) -> Self {
        Self {
            id: new.id,
            timestamp: new.timestamp,
            date: new.date,
            time: new.time,
            members: new.members,
            expenses: new.expenses,
            old_balances: new.old_balances,
            calculations: new.calculations,
            settlements: new.settlements,
            status: SplitStatus::Active,
            completed_date: None,
        }
    }

    pub fn id_typed(&self) -> SplitId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Creation date, `en-IN` style (`d/m/yyyy`).
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Creation time, `en-IN` style (`h:mm:ss am`).
    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn old_balances(&self) -> &[OldBalance] {
        &self.old_balances
    }

    pub fn calculations(&self) -> &Calculations {
        &self.calculations
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn settlement(&self, id: SettlementId) -> Option<&Settlement> {
        splitbook_core::find_by_id(&self.settlements, &id)
    }

    pub fn pending_settlements(&self) -> impl Iterator<Item = &Settlement> {
        self.settlements.iter().filter(|s| !s.is_completed())
    }

    pub fn completed_settlement_count(&self) -> usize {
        self.settlements.iter().filter(|s| s.is_completed()).count()
    }

    pub fn status(&self) -> SplitStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == SplitStatus::Completed
    }

    pub fn completed_date(&self) -> Option<DateTime<Utc>> {
        self.completed_date
    }

    pub(crate) fn settlement_mut(&mut self, id: SettlementId) -> Option<&mut Settlement> {
        splitbook_core::find_by_id_mut(&mut self.settlements, &id)
    }

    /// Re-derive status after a settlement was completed.
    ///
    /// Invariant: a split with settlements is completed iff all of them are.
    pub(crate) fn refresh_status(&mut self, at: DateTime<Utc>) {
        if !self.settlements.is_empty() && self.settlements.iter().all(Settlement::is_completed) {
            self.status = SplitStatus::Completed;
            self.completed_date = Some(at);
        } else {
            self.reactivate();
        }
    }

    pub(crate) fn reactivate(&mut self) {
        self.status = SplitStatus::Active;
        self.completed_date = None;
    }
}

impl Entity for Split {
    type Id = SplitId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn intent(from: &str, to: &str, amount: f64) -> SettlementIntent {
        SettlementIntent {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        }
    }

    fn split_with(settlements: Vec<Settlement>) -> Split {
        Split::active(NewSplit {
            id: SplitId::new(1),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            date: "1/5/2024".to_string(),
            time: "5:30:00 pm".to_string(),
            members: vec!["asha".to_string(), "ravi".to_string()],
            expenses: vec![],
            old_balances: vec![],
            calculations: Calculations {
                total_expenses: 0.0,
                total_members: 2,
                per_person_share: 0.0,
            },
            settlements,
        })
    }

    #[test]
    fn text_reference_resolves_only_when_parseable() {
        let id = SettlementId::new();
        assert_eq!(SettlementRef::from(id.to_string()).resolve(), Some(id));
        assert_eq!(SettlementRef::from("not-an-id").resolve(), None);
        assert_eq!(SettlementRef::from(&id).resolve(), Some(id));
    }

    #[test]
    fn completing_then_reverting_clears_audit_fields() {
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap();
        let mut s = Settlement::pending(SettlementId::new(), &intent("ravi", "asha", 150.0));

        s.complete(at, "asha".to_string());
        assert_eq!(s.status(), SettlementStatus::Completed);
        assert_eq!(s.completed_date(), Some(at));
        assert_eq!(s.completed_by(), Some("asha"));

        s.revert();
        assert_eq!(s.status(), SettlementStatus::Pending);
        assert_eq!(s.completed_date(), None);
        assert_eq!(s.completed_by(), None);
    }

    #[test]
    fn split_without_settlements_never_derives_completed() {
        let mut split = split_with(vec![]);
        split.refresh_status(Utc::now());
        assert_eq!(split.status(), SplitStatus::Active);
        assert!(split.completed_date().is_none());
    }

    #[test]
    fn serializes_with_camel_case_fields_and_lowercase_statuses() {
        let split = split_with(vec![Settlement::pending(
            SettlementId::new(),
            &intent("ravi", "asha", 150.0),
        )]);
        let json = serde_json::to_value(&split).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["status"], "active");
        assert!(json["completedDate"].is_null());
        assert_eq!(json["calculations"]["totalMembers"], 2);
        assert_eq!(json["settlements"][0]["status"], "pending");
        assert!(json["settlements"][0]["completedBy"].is_null());
        assert!(json.get("oldBalances").is_some());
    }
}
