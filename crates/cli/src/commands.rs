//! JSON-lines command protocol between a presentation layer and the ledger.
//!
//! One command per line, tagged by `op`:
//!
//! ```text
//! {"op":"create","members":["asha","ravi"],"expenses":[],"oldBalances":[],
//!  "calculations":{"totalExpenses":200,"totalMembers":2,"perPersonShare":100},
//!  "settlements":[{"from":"ravi","to":"asha","amount":100}]}
//! {"op":"complete","splitId":1,"settlementId":"0190...","completedBy":"asha"}
//! {"op":"stats"}
//! ```

use anyhow::Context;
use serde::Deserialize;
use serde_json::{Value, json};

use splitbook_ledger::{
    Calculations, Clock, Expense, Ledger, OldBalance, SettlementIntent, SplitId,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    Create {
        #[serde(default)]
        members: Vec<String>,
        #[serde(default)]
        expenses: Vec<Expense>,
        #[serde(default)]
        old_balances: Vec<OldBalance>,
        calculations: Calculations,
        #[serde(default)]
        settlements: Vec<SettlementIntent>,
    },
    List,
    Get {
        id: SplitId,
    },
    Complete {
        split_id: SplitId,
        settlement_id: String,
        completed_by: Option<String>,
    },
    Revert {
        split_id: SplitId,
        settlement_id: String,
    },
    Delete {
        id: SplitId,
    },
    Stats,
    State,
    Reset,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        serde_json::from_str(line).context("invalid command")
    }
}

/// Apply one command and render its result.
///
/// Lookup misses are results (`"ok": false`), not errors.
pub fn execute<C: Clock>(
    ledger: &mut Ledger<C>,
    command: Command,
    default_actor: &str,
) -> anyhow::Result<Value> {
    let response = match command {
        Command::Create {
            members,
            expenses,
            old_balances,
            calculations,
            settlements,
        } => {
            let split = ledger.create(&members, &expenses, &old_balances, calculations, &settlements);
            json!({ "ok": true, "split": serde_json::to_value(split)? })
        }
        Command::List => {
            json!({ "ok": true, "splits": serde_json::to_value(ledger.list_all())? })
        }
        Command::Get { id } => match ledger.get_by_id(id) {
            Some(split) => json!({ "ok": true, "split": serde_json::to_value(split)? }),
            None => json!({ "ok": false, "split": null }),
        },
        Command::Complete {
            split_id,
            settlement_id,
            completed_by,
        } => {
            let actor = completed_by.unwrap_or_else(|| default_actor.to_string());
            json!({ "ok": ledger.complete_settlement_by(split_id, settlement_id, actor) })
        }
        Command::Revert {
            split_id,
            settlement_id,
        } => json!({ "ok": ledger.revert_settlement(split_id, settlement_id) }),
        Command::Delete { id } => json!({ "ok": ledger.delete(id) }),
        Command::Stats => {
            json!({ "ok": true, "statistics": serde_json::to_value(ledger.statistics())? })
        }
        Command::State => {
            json!({ "ok": true, "state": serde_json::to_value(ledger.state())? })
        }
        Command::Reset => {
            ledger.reset();
            json!({ "ok": true })
        }
    };
    Ok(response)
}
