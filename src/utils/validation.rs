//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an account code is valid
pub fn validate_account_code(code: &str) -> LedgerResult<()> {
    if code.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Account code cannot be empty".to_string(),
        ));
    }

    if code.len() > 50 {
        return Err(LedgerError::Validation(
            "Account code cannot exceed 50 characters".to_string(),
        ));
    }

    // Check for valid characters (alphanumeric, dashes, underscores)
    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(LedgerError::Validation(
            "Account code can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate that an account name is valid
pub fn validate_account_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Account name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(LedgerError::Validation(
            "Account name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a journal entry description is valid
pub fn validate_entry_description(description: &str) -> LedgerResult<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Entry description cannot be empty".to_string(),
        ));
    }

    if description.len() > 500 {
        return Err(LedgerError::Validation(
            "Entry description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced journal entry validator with detailed checks
pub struct EnhancedEntryValidator;

impl EntryValidator for EnhancedEntryValidator {
    fn validate_entry(&self, entry: &JournalEntry) -> LedgerResult<()> {
        // Basic double-entry validation
        entry.validate()?;

        // Enhanced validations
        validate_entry_description(&entry.description)?;

        for line in &entry.lines {
            validate_account_code(&line.account_code)?;
        }

        // Same account cannot appear twice on the same side
        let mut seen = std::collections::HashSet::new();
        for line in &entry.lines {
            let side = if line.debit > BigDecimal::from(0) {
                BalanceSide::Debit
            } else {
                BalanceSide::Credit
            };
            if !seen.insert((&line.account_code, side)) {
                return Err(LedgerError::Validation(format!(
                    "Account '{}' appears multiple times on the same side of the entry",
                    line.account_code
                )));
            }
        }

        Ok(())
    }
}

/// Enhanced account validator with detailed checks
pub struct EnhancedAccountValidator;

impl AccountValidator for EnhancedAccountValidator {
    fn validate_account(&self, account: &Account) -> LedgerResult<()> {
        validate_account_code(&account.code)?;
        validate_account_name(&account.name)?;

        Ok(())
    }

    fn validate_account_deletion(&self, _code: &str) -> LedgerResult<()> {
        // Storage enforces the in-use check; nothing further here
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn account_codes_reject_bad_characters() {
        assert!(validate_account_code("1000").is_ok());
        assert!(validate_account_code("bank-main_01").is_ok());
        assert!(validate_account_code("").is_err());
        assert!(validate_account_code("10 00").is_err());
        assert!(validate_account_code(&"9".repeat(51)).is_err());
    }

    #[test]
    fn enhanced_validator_rejects_duplicate_account_side() {
        let mut entry = JournalEntry::new(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            "TXN-9".to_string(),
            "Split payment".to_string(),
            JournalEntryType::Expense,
        );
        entry.add_line(JournalLine::debit("5200".to_string(), BigDecimal::from(30)));
        entry.add_line(JournalLine::debit("5200".to_string(), BigDecimal::from(20)));
        entry.add_line(JournalLine::credit("1000".to_string(), BigDecimal::from(50)));

        let result = EnhancedEntryValidator.validate_entry(&entry);
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[test]
    fn enhanced_validator_allows_same_account_on_both_sides() {
        let mut entry = JournalEntry::new(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            "TXN-10".to_string(),
            "Cash transfer".to_string(),
            JournalEntryType::Manual,
        );
        entry.add_line(JournalLine::debit("1000".to_string(), BigDecimal::from(75)));
        entry.add_line(JournalLine::credit("1000".to_string(), BigDecimal::from(75)));

        assert!(EnhancedEntryValidator.validate_entry(&entry).is_ok());
    }
}
