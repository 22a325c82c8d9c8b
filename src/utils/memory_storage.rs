//! In-memory storage implementation for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

/// An entry plus its insertion sequence, which breaks ordering ties
/// between entries posted on the same date
#[derive(Debug, Clone)]
struct StoredEntry {
    seq: u64,
    entry: JournalEntry,
}

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    entries: Arc<RwLock<HashMap<Uuid, StoredEntry>>>,
    next_seq: Arc<AtomicU64>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            entries: Arc::new(RwLock::new(HashMap::new())),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.accounts.write().unwrap().clear();
        self.entries.write().unwrap().clear();
    }

    fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        if let Some(start) = start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = end {
            if date > end {
                return false;
            }
        }
        true
    }

    fn collect_sorted(
        stored: impl Iterator<Item = StoredEntry>,
    ) -> Vec<JournalEntry> {
        let mut stored: Vec<StoredEntry> = stored.collect();
        stored.sort_by_key(|s| (s.entry.date, s.seq));
        stored.into_iter().map(|s| s.entry).collect()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStorage for MemoryStorage {
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()> {
        self.accounts
            .write()
            .unwrap()
            .insert(account.code.clone(), account.clone());
        Ok(())
    }

    async fn get_account(&self, code: &str) -> LedgerResult<Option<Account>> {
        Ok(self.accounts.read().unwrap().get(code).cloned())
    }

    async fn list_accounts(&self, account_type: Option<AccountType>) -> LedgerResult<Vec<Account>> {
        let accounts = self.accounts.read().unwrap();
        let mut filtered: Vec<Account> = accounts
            .values()
            .filter(|account| {
                account_type
                    .as_ref()
                    .is_none_or(|t| &account.account_type == t)
            })
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(filtered)
    }

    async fn update_account(&mut self, account: &Account) -> LedgerResult<()> {
        if self.accounts.read().unwrap().contains_key(&account.code) {
            self.accounts
                .write()
                .unwrap()
                .insert(account.code.clone(), account.clone());
            Ok(())
        } else {
            Err(LedgerError::AccountNotFound(account.code.clone()))
        }
    }

    async fn delete_account(&mut self, code: &str) -> LedgerResult<()> {
        let in_use = self
            .entries
            .read()
            .unwrap()
            .values()
            .any(|s| s.entry.lines.iter().any(|line| line.account_code == code));
        if in_use {
            return Err(LedgerError::AccountInUse(code.to_string()));
        }

        if self.accounts.write().unwrap().remove(code).is_some() {
            Ok(())
        } else {
            Err(LedgerError::AccountNotFound(code.to_string()))
        }
    }

    async fn save_entry(&mut self, entry: &JournalEntry) -> LedgerResult<()> {
        // Single write lock makes the duplicate check and the insert atomic
        let mut entries = self.entries.write().unwrap();

        let duplicate = entries.values().any(|s| {
            s.entry.reference == entry.reference && s.entry.entry_type == entry.entry_type
        });
        if duplicate {
            return Err(LedgerError::DuplicateReference {
                reference: entry.reference.clone(),
                entry_type: entry.entry_type,
            });
        }

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        entries.insert(
            entry.id,
            StoredEntry {
                seq,
                entry: entry.clone(),
            },
        );
        Ok(())
    }

    async fn get_entry(&self, entry_id: Uuid) -> LedgerResult<Option<JournalEntry>> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .get(&entry_id)
            .map(|s| s.entry.clone()))
    }

    async fn find_entry_by_source(
        &self,
        reference: &str,
        entry_type: JournalEntryType,
    ) -> LedgerResult<Option<JournalEntry>> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .values()
            .find(|s| s.entry.reference == reference && s.entry.entry_type == entry_type)
            .map(|s| s.entry.clone()))
    }

    async fn delete_entry_by_source(
        &mut self,
        reference: &str,
        entry_type: JournalEntryType,
    ) -> LedgerResult<bool> {
        let mut entries = self.entries.write().unwrap();

        let id = entries
            .values()
            .find(|s| s.entry.reference == reference && s.entry.entry_type == entry_type)
            .map(|s| s.entry.id);

        match id {
            Some(id) => {
                entries.remove(&id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_entries(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<JournalEntry>> {
        let entries = self.entries.read().unwrap();
        Ok(Self::collect_sorted(
            entries
                .values()
                .filter(|s| Self::in_range(s.entry.date, start_date, end_date))
                .cloned(),
        ))
    }

    async fn get_entries_for_account(
        &self,
        code: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<JournalEntry>> {
        let entries = self.entries.read().unwrap();
        Ok(Self::collect_sorted(
            entries
                .values()
                .filter(|s| {
                    s.entry.lines.iter().any(|line| line.account_code == code)
                        && Self::in_range(s.entry.date, start_date, end_date)
                })
                .cloned(),
        ))
    }
}
