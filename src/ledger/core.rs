//! Main ledger orchestrator that coordinates accounts, posting, and reports

use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::AccountingConfig;
use crate::ledger::posting::{PostingEngine, PostingOutcome};
use crate::ledger::reports::*;
use crate::ledger::{AccountManager, AccountResolver, LedgerAggregator};
use crate::traits::*;
use crate::types::*;

/// Main facade that orchestrates all journal-posting operations:
/// chart-of-accounts management, event posting, and report aggregation
/// over one shared storage backend.
pub struct Ledger<S: LedgerStorage> {
    account_manager: AccountManager<S>,
    posting_engine: PostingEngine<S>,
    aggregator: LedgerAggregator<S>,
}

impl<S: LedgerStorage + Clone> Ledger<S> {
    /// Create a new ledger with the given storage backend and configuration
    pub fn new(storage: S, config: AccountingConfig) -> Self {
        Self {
            account_manager: AccountManager::new(storage.clone()),
            posting_engine: PostingEngine::new(storage.clone(), config.clone()),
            aggregator: LedgerAggregator::new(storage, config),
        }
    }

    /// Create a new ledger with custom validators
    pub fn with_validators(
        storage: S,
        config: AccountingConfig,
        account_validator: Box<dyn AccountValidator>,
        entry_validator: Box<dyn EntryValidator>,
    ) -> Self {
        Self {
            account_manager: AccountManager::with_validator(storage.clone(), account_validator),
            posting_engine: PostingEngine::with_validator(
                storage.clone(),
                config.clone(),
                entry_validator,
            ),
            aggregator: LedgerAggregator::new(storage, config),
        }
    }
}

impl<S: LedgerStorage> Ledger<S> {
    /// The resolver the posting engine maps accounts through
    pub fn resolver(&self) -> &AccountResolver<S> {
        self.posting_engine.resolver()
    }

    // Account operations
    /// Create a new account
    pub async fn create_account(
        &mut self,
        code: String,
        name: String,
        account_type: AccountType,
    ) -> LedgerResult<Account> {
        self.account_manager
            .create_account(code, name, account_type)
            .await
    }

    /// Get an account by code
    pub async fn get_account(&self, code: &str) -> LedgerResult<Option<Account>> {
        self.account_manager.get_account(code).await
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.account_manager.list_accounts().await
    }

    /// List accounts by type
    pub async fn list_accounts_by_type(
        &self,
        account_type: AccountType,
    ) -> LedgerResult<Vec<Account>> {
        self.account_manager
            .list_accounts_by_type(account_type)
            .await
    }

    /// Update an account
    pub async fn update_account(&mut self, account: &Account) -> LedgerResult<()> {
        self.account_manager.update_account(account).await
    }

    /// Delete an account
    pub async fn delete_account(&mut self, code: &str) -> LedgerResult<()> {
        self.account_manager.delete_account(code).await
    }

    /// Seed the retail chart of accounts the posting defaults expect
    pub async fn seed_retail_chart(&mut self) -> LedgerResult<HashMap<String, Account>> {
        crate::ledger::account::utils::seed_retail_chart(&mut self.account_manager).await
    }

    // Posting operations
    /// Post the journal entry for a completed sale
    pub async fn create_from_sale(&mut self, sale: &Sale) -> PostingOutcome {
        self.posting_engine.create_from_sale(sale).await
    }

    /// Post the journal entry for a manual income/expense transaction
    pub async fn create_from_transaction(
        &mut self,
        transaction: &SourceTransaction,
    ) -> PostingOutcome {
        self.posting_engine.create_from_transaction(transaction).await
    }

    /// Delete the journal entry posted for a sale; idempotent
    pub async fn delete_for_sale(&mut self, sale: &Sale) -> LedgerResult<bool> {
        self.posting_engine.delete_for_sale(sale).await
    }

    /// Delete the journal entry posted for a transaction; idempotent
    pub async fn delete_for_transaction(
        &mut self,
        transaction: &SourceTransaction,
    ) -> LedgerResult<bool> {
        self.posting_engine.delete_for_transaction(transaction).await
    }

    /// Post a bookkeeper-authored entry directly
    pub async fn post_manual_entry(&mut self, entry: JournalEntry) -> LedgerResult<JournalEntry> {
        self.posting_engine.post_manual_entry(entry).await
    }

    // Journal queries
    /// Get a journal entry by ID
    pub async fn get_entry(&self, entry_id: Uuid) -> LedgerResult<Option<JournalEntry>> {
        self.account_manager.storage.get_entry(entry_id).await
    }

    /// Find the entry posted for a source document
    pub async fn find_entry_by_source(
        &self,
        reference: &str,
        entry_type: JournalEntryType,
    ) -> LedgerResult<Option<JournalEntry>> {
        self.account_manager
            .storage
            .find_entry_by_source(reference, entry_type)
            .await
    }

    /// List journal entries within a date range
    pub async fn get_entries(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<JournalEntry>> {
        self.account_manager
            .storage
            .get_entries(start_date, end_date)
            .await
    }

    /// List journal entries that touch a specific account
    pub async fn get_entries_for_account(
        &self,
        code: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<JournalEntry>> {
        self.account_manager
            .storage
            .get_entries_for_account(code, start_date, end_date)
            .await
    }

    // Reporting operations
    /// An account's balance as of the start of a date
    pub async fn opening_balance(
        &self,
        code: &str,
        as_of_date: NaiveDate,
    ) -> LedgerResult<bigdecimal::BigDecimal> {
        self.aggregator.opening_balance(code, as_of_date).await
    }

    /// General ledger for one account over a period
    pub async fn general_ledger(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LedgerResult<GeneralLedger> {
        self.aggregator
            .general_ledger(code, start_date, end_date)
            .await
    }

    /// Trial balance as of a date
    pub async fn trial_balance(&self, as_of_date: NaiveDate) -> LedgerResult<TrialBalance> {
        self.aggregator.trial_balance(as_of_date).await
    }

    /// Profit and loss statement for a period
    pub async fn profit_and_loss(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LedgerResult<ProfitAndLoss> {
        self.aggregator.profit_and_loss(start_date, end_date).await
    }

    /// Balance sheet as of a date
    pub async fn balance_sheet(&self, as_of_date: NaiveDate) -> LedgerResult<BalanceSheet> {
        self.aggregator.balance_sheet(as_of_date).await
    }

    /// Cash flow statement for a period
    pub async fn cash_flow(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LedgerResult<CashFlowStatement> {
        self.aggregator.cash_flow(start_date, end_date).await
    }

    /// Check the ledger's integrity as of a date
    pub async fn check_integrity(&self, as_of_date: NaiveDate) -> LedgerResult<IntegrityReport> {
        self.aggregator.check_integrity(as_of_date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;
    use bigdecimal::BigDecimal;

    #[tokio::test]
    async fn sale_flows_from_posting_to_reports() {
        let storage = MemoryStorage::new();
        let mut ledger = Ledger::new(storage, AccountingConfig::default());
        ledger.seed_retail_chart().await.unwrap();

        let sale = Sale {
            invoice_number: "INV-1".to_string(),
            total_amount: BigDecimal::from(110),
            subtotal: BigDecimal::from(100),
            discount: BigDecimal::from(0),
            tax: BigDecimal::from(10),
            payment_method: "cash".to_string(),
            customer_name: None,
            created_at: chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            user_id: None,
        };

        let outcome = ledger.create_from_sale(&sale).await;
        assert!(outcome.is_posted());

        let found = ledger
            .find_entry_by_source("INV-1", JournalEntryType::Sale)
            .await
            .unwrap();
        assert!(found.is_some());

        let as_of = chrono::NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let trial = ledger.trial_balance(as_of).await.unwrap();
        assert!(trial.is_balanced);
        assert_eq!(trial.total_debits, BigDecimal::from(110));

        let report = ledger.check_integrity(as_of).await.unwrap();
        assert!(report.is_valid);

        // Deleting the sale reverses everything
        assert!(ledger.delete_for_sale(&sale).await.unwrap());
        let trial = ledger.trial_balance(as_of).await.unwrap();
        assert_eq!(trial.total_debits, BigDecimal::from(0));
    }
}
