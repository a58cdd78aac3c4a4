//! Split ledger (in-memory record store for expense-splitting events).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. Share and
//! settlement math happen elsewhere; the ledger records the results and tracks
//! each settlement's payment status.

pub mod clock;
pub mod config;
pub mod ledger;
pub mod locale;
pub mod model;
pub mod shared;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LedgerConfig;
pub use ledger::{DEFAULT_ACTOR, Ledger, LedgerState, Metadata, Statistics};
pub use model::{
    Calculations, Expense, OldBalance, Settlement, SettlementIntent, SettlementRef,
    SettlementStatus, Split, SplitStatus,
};
pub use shared::SharedLedger;
pub use splitbook_core::{SettlementId, SplitId};
