//! Ledger configuration.

use chrono::FixedOffset;
use splitbook_core::{DomainError, DomainResult};

use crate::locale::IST_OFFSET_MINUTES;

const MAX_OFFSET_MINUTES: u32 = 24 * 60;

/// Settings applied to ledger metadata and split display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub app_name: String,
    pub schema_version: String,
    /// Offset used to render `Split::date`/`Split::time`, in minutes east of UTC.
    pub utc_offset_minutes: i32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            app_name: "Splitbook".to_string(),
            schema_version: "1.0".to_string(),
            utc_offset_minutes: IST_OFFSET_MINUTES,
        }
    }
}

impl LedgerConfig {
    /// Resolve the display offset, rejecting anything outside ±24h.
    pub fn display_offset(&self) -> DomainResult<FixedOffset> {
        if self.utc_offset_minutes.unsigned_abs() >= MAX_OFFSET_MINUTES {
            return Err(DomainError::validation(format!(
                "utc offset {} minutes is out of range",
                self.utc_offset_minutes
            )));
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            DomainError::validation(format!(
                "utc offset {} minutes is out of range",
                self.utc_offset_minutes
            ))
        })
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.app_name.trim().is_empty() {
            return Err(DomainError::validation("app name must not be empty"));
        }
        if self.schema_version.trim().is_empty() {
            return Err(DomainError::validation("schema version must not be empty"));
        }
        self.display_offset().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_uses_ist() {
        let config = LedgerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.display_offset().unwrap().local_minus_utc(), 19_800);
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let config = LedgerConfig {
            utc_offset_minutes: 24 * 60,
            ..LedgerConfig::default()
        };
        assert!(matches!(config.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn extreme_offsets_are_rejected_without_overflow() {
        for minutes in [i32::MIN, i32::MAX, -(24 * 60)] {
            let config = LedgerConfig {
                utc_offset_minutes: minutes,
                ..LedgerConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(DomainError::Validation(_))),
                "offset {minutes} should be rejected"
            );
        }
    }

    #[test]
    fn blank_app_name_is_rejected() {
        let config = LedgerConfig {
            app_name: "  ".to_string(),
            ..LedgerConfig::default()
        };
        match config.validate() {
            Err(DomainError::Validation(msg)) if msg.contains("app name") => {}
            other => panic!("expected app name validation error, got {other:?}"),
        }
    }
}
