//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::types::*;

/// Storage abstraction for the journal-posting system
///
/// This trait allows the accounting core to work with any storage backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these methods.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Save an account to storage
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()>;

    /// Get an account by code
    async fn get_account(&self, code: &str) -> LedgerResult<Option<Account>>;

    /// List all accounts, optionally filtered by type, ordered by code
    async fn list_accounts(&self, account_type: Option<AccountType>) -> LedgerResult<Vec<Account>>;

    /// Update an existing account
    async fn update_account(&mut self, account: &Account) -> LedgerResult<()>;

    /// Delete an account; fails with [`LedgerError::AccountInUse`] if any
    /// journal line references it
    async fn delete_account(&mut self, code: &str) -> LedgerResult<()>;

    /// Persist a journal entry together with all of its lines.
    ///
    /// All-or-nothing: either the entry and every line are stored, or
    /// nothing is. Fails with [`LedgerError::DuplicateReference`] when an
    /// entry with the same `(reference, entry_type)` pair already exists.
    async fn save_entry(&mut self, entry: &JournalEntry) -> LedgerResult<()>;

    /// Get a journal entry by ID
    async fn get_entry(&self, entry_id: Uuid) -> LedgerResult<Option<JournalEntry>>;

    /// Find the entry posted for a source document, identified by its
    /// reference and entry type
    async fn find_entry_by_source(
        &self,
        reference: &str,
        entry_type: JournalEntryType,
    ) -> LedgerResult<Option<JournalEntry>>;

    /// Delete the entry (and its lines) posted for a source document.
    ///
    /// Returns `true` if an entry was removed, `false` if none existed;
    /// absence is not an error.
    async fn delete_entry_by_source(
        &mut self,
        reference: &str,
        entry_type: JournalEntryType,
    ) -> LedgerResult<bool>;

    /// List journal entries within a date range, ordered by date then by
    /// insertion order
    async fn get_entries(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<JournalEntry>>;

    /// List journal entries that touch a specific account, same ordering
    /// as [`LedgerStorage::get_entries`]
    async fn get_entries_for_account(
        &self,
        code: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<JournalEntry>>;
}

/// Trait for implementing custom account validation rules
pub trait AccountValidator: Send + Sync {
    /// Validate an account before saving
    fn validate_account(&self, account: &Account) -> LedgerResult<()>;

    /// Validate account deletion (e.g., check for existing references)
    fn validate_account_deletion(&self, code: &str) -> LedgerResult<()>;
}

/// Trait for implementing custom journal entry validation rules
pub trait EntryValidator: Send + Sync {
    /// Validate a journal entry before saving
    fn validate_entry(&self, entry: &JournalEntry) -> LedgerResult<()>;
}

/// Default account validator with basic rules
pub struct DefaultAccountValidator;

impl AccountValidator for DefaultAccountValidator {
    fn validate_account(&self, account: &Account) -> LedgerResult<()> {
        if account.code.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Account code cannot be empty".to_string(),
            ));
        }

        if account.name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Account name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_account_deletion(&self, _code: &str) -> LedgerResult<()> {
        // Storage enforces the in-use check; nothing further here
        Ok(())
    }
}

/// Default entry validator enforcing the double-entry rules
pub struct DefaultEntryValidator;

impl EntryValidator for DefaultEntryValidator {
    fn validate_entry(&self, entry: &JournalEntry) -> LedgerResult<()> {
        entry.validate()
    }
}
