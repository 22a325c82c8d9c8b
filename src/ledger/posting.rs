//! Journal posting engine: turns business events into balanced entries

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::config::AccountingConfig;
use crate::ledger::resolver::AccountResolver;
use crate::traits::*;
use crate::types::*;

/// Why the engine intentionally created nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The auto-create feature flag is off
    AutoPostingDisabled,
    /// The transaction mirrors a sale that posted its own entry
    CoveredBySaleEntry,
    /// No cash/bank account resolved for the payment method
    UnresolvedCashAccount,
    /// No sales revenue account resolved
    UnresolvedSalesRevenueAccount,
    /// Tax was collected but no tax payable account resolved
    UnresolvedTaxAccount,
    /// No income/expense account resolved for the category
    UnresolvedCategoryAccount,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            SkipReason::AutoPostingDisabled => "automatic journal posting is disabled",
            SkipReason::CoveredBySaleEntry => "transaction mirrors a sale already posted",
            SkipReason::UnresolvedCashAccount => "no cash/bank account resolved",
            SkipReason::UnresolvedSalesRevenueAccount => "no sales revenue account resolved",
            SkipReason::UnresolvedTaxAccount => {
                "tax collected but no tax payable account resolved"
            }
            SkipReason::UnresolvedCategoryAccount => "no category account resolved",
        };
        write!(f, "{}", reason)
    }
}

/// Result of asking the engine to post a business event.
///
/// Callers must distinguish "skipped by design" from "failed
/// unexpectedly": a skip is a configuration gap the operator fixes, a
/// failure is an error worth alerting on. Neither blocks the business
/// operation that triggered the posting.
#[derive(Debug)]
pub enum PostingOutcome {
    /// A balanced entry was created and persisted
    Posted(JournalEntry),
    /// Nothing was created, on purpose
    Skipped(SkipReason),
    /// Nothing was created because posting failed; no partial rows remain
    Failed(LedgerError),
}

impl PostingOutcome {
    /// Whether an entry was created
    pub fn is_posted(&self) -> bool {
        matches!(self, PostingOutcome::Posted(_))
    }

    /// The posted entry, if one was created
    pub fn entry(&self) -> Option<&JournalEntry> {
        match self {
            PostingOutcome::Posted(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Constructs and persists balanced journal entries for sales and manual
/// transactions, and reverses them when the source record is deleted.
///
/// Posting failure is soft: the caller's own save of the sale or
/// transaction must never be rolled back because accounting posting
/// failed. The engine therefore reports a [`PostingOutcome`] instead of
/// returning `Err` from the create operations.
pub struct PostingEngine<S: LedgerStorage> {
    storage: S,
    resolver: AccountResolver<S>,
    validator: Box<dyn EntryValidator>,
}

impl<S: LedgerStorage + Clone> PostingEngine<S> {
    /// Create a posting engine over the given storage and configuration
    pub fn new(storage: S, config: AccountingConfig) -> Self {
        let resolver = AccountResolver::new(storage.clone(), config);
        Self {
            storage,
            resolver,
            validator: Box::new(DefaultEntryValidator),
        }
    }

    /// Create a posting engine with a custom entry validator
    pub fn with_validator(
        storage: S,
        config: AccountingConfig,
        validator: Box<dyn EntryValidator>,
    ) -> Self {
        let resolver = AccountResolver::new(storage.clone(), config);
        Self {
            storage,
            resolver,
            validator,
        }
    }
}

impl<S: LedgerStorage> PostingEngine<S> {
    /// The resolver the engine posts through
    pub fn resolver(&self) -> &AccountResolver<S> {
        &self.resolver
    }

    /// Post the journal entry for a completed sale.
    ///
    /// Debits the payment-method cash/bank account with the amount paid,
    /// credits sales revenue with subtotal less discount, and credits tax
    /// payable with the tax collected when there is any.
    pub async fn create_from_sale(&mut self, sale: &Sale) -> PostingOutcome {
        match self.try_create_from_sale(sale).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    invoice = %sale.invoice_number,
                    error = %err,
                    "failed to post journal entry for sale"
                );
                PostingOutcome::Failed(err)
            }
        }
    }

    async fn try_create_from_sale(&mut self, sale: &Sale) -> LedgerResult<PostingOutcome> {
        if !self.resolver.config().auto_create_journal_entries {
            debug!(invoice = %sale.invoice_number, "auto posting disabled, sale not posted");
            return Ok(PostingOutcome::Skipped(SkipReason::AutoPostingDisabled));
        }

        // The sale must balance before any rows are written: the amount
        // paid has to equal recognized revenue plus tax collected
        let expected = &sale.revenue_amount() + &sale.tax;
        if sale.total_amount != expected {
            return Err(LedgerError::UnbalancedEntry {
                debits: sale.total_amount.clone(),
                credits: expected,
            });
        }

        let Some(cash_account) = self
            .resolver
            .resolve_for_payment_method(Some(&sale.payment_method))
            .await?
        else {
            return Ok(self.skip_sale(sale, SkipReason::UnresolvedCashAccount));
        };

        let Some(revenue_account) = self.resolver.resolve_sales_revenue().await? else {
            return Ok(self.skip_sale(sale, SkipReason::UnresolvedSalesRevenueAccount));
        };

        let tax = &sale.tax;
        let tax_account = if *tax > BigDecimal::from(0) {
            match self.resolver.resolve_tax_payable().await? {
                Some(account) => Some(account),
                None => {
                    return Ok(self.skip_sale(sale, SkipReason::UnresolvedTaxAccount));
                }
            }
        } else {
            None
        };

        let description = match &sale.customer_name {
            Some(customer) => format!("Sale - {} ({})", sale.invoice_number, customer),
            None => format!("Sale - {}", sale.invoice_number),
        };

        let mut entry = JournalEntry::new(
            sale.created_at.date(),
            sale.invoice_number.clone(),
            description,
            JournalEntryType::Sale,
        );
        entry.created_by = sale.user_id.clone();
        entry.add_line(JournalLine::debit(
            cash_account.code,
            sale.total_amount.clone(),
        ));
        entry.add_line(JournalLine::credit(
            revenue_account.code,
            sale.revenue_amount(),
        ));
        if let Some(tax_account) = tax_account {
            entry.add_line(JournalLine::credit(tax_account.code, tax.clone()));
        }

        self.persist(entry).await.map(PostingOutcome::Posted)
    }

    /// Post the journal entry for a manual income/expense transaction.
    ///
    /// Income debits cash and credits the category income account;
    /// expense debits the category expense account and credits cash.
    /// Transactions that mirror a sale are skipped so the event is never
    /// posted twice.
    pub async fn create_from_transaction(
        &mut self,
        transaction: &SourceTransaction,
    ) -> PostingOutcome {
        match self.try_create_from_transaction(transaction).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    reference = %transaction.reference(),
                    error = %err,
                    "failed to post journal entry for transaction"
                );
                PostingOutcome::Failed(err)
            }
        }
    }

    async fn try_create_from_transaction(
        &mut self,
        transaction: &SourceTransaction,
    ) -> LedgerResult<PostingOutcome> {
        if !self.resolver.config().auto_create_journal_entries {
            debug!(
                reference = %transaction.reference(),
                "auto posting disabled, transaction not posted"
            );
            return Ok(PostingOutcome::Skipped(SkipReason::AutoPostingDisabled));
        }

        if transaction.origin == TransactionOrigin::Sale {
            debug!(
                reference = %transaction.reference(),
                "transaction mirrors a sale, not posted"
            );
            return Ok(PostingOutcome::Skipped(SkipReason::CoveredBySaleEntry));
        }

        let method = transaction.payment_method.as_deref().unwrap_or("cash");
        let Some(cash_account) = self
            .resolver
            .resolve_for_payment_method(Some(method))
            .await?
        else {
            return Ok(self.skip_transaction(transaction, SkipReason::UnresolvedCashAccount));
        };

        // Posting only the cash side would break the balance invariant,
        // so a missing category account aborts the whole posting
        let Some(category_account) = self
            .resolver
            .resolve_for_category(transaction.category.as_deref(), transaction.kind)
            .await?
        else {
            return Ok(self.skip_transaction(transaction, SkipReason::UnresolvedCategoryAccount));
        };

        let mut entry = JournalEntry::new(
            transaction.date,
            transaction.reference(),
            transaction.description.clone(),
            transaction.kind.entry_type(),
        );
        entry.category = transaction.category.clone();
        match transaction.kind {
            TransactionKind::Income => {
                entry.add_line(JournalLine::debit(
                    cash_account.code,
                    transaction.amount.clone(),
                ));
                entry.add_line(JournalLine::credit(
                    category_account.code,
                    transaction.amount.clone(),
                ));
            }
            TransactionKind::Expense => {
                entry.add_line(JournalLine::debit(
                    category_account.code,
                    transaction.amount.clone(),
                ));
                entry.add_line(JournalLine::credit(
                    cash_account.code,
                    transaction.amount.clone(),
                ));
            }
        }

        self.persist(entry).await.map(PostingOutcome::Posted)
    }

    /// Delete the journal entry posted for a sale.
    ///
    /// Idempotent: returns `Ok(false)` when no entry exists.
    pub async fn delete_for_sale(&mut self, sale: &Sale) -> LedgerResult<bool> {
        let removed = self
            .storage
            .delete_entry_by_source(&sale.invoice_number, JournalEntryType::Sale)
            .await?;
        if removed {
            info!(invoice = %sale.invoice_number, "journal entry for sale deleted");
        } else {
            debug!(invoice = %sale.invoice_number, "no journal entry to delete for sale");
        }
        Ok(removed)
    }

    /// Delete the journal entry posted for a transaction.
    ///
    /// Idempotent: returns `Ok(false)` when no entry exists.
    pub async fn delete_for_transaction(
        &mut self,
        transaction: &SourceTransaction,
    ) -> LedgerResult<bool> {
        let reference = transaction.reference();
        let removed = self
            .storage
            .delete_entry_by_source(&reference, transaction.kind.entry_type())
            .await?;
        if removed {
            info!(reference = %reference, "journal entry for transaction deleted");
        } else {
            debug!(reference = %reference, "no journal entry to delete for transaction");
        }
        Ok(removed)
    }

    /// Post a bookkeeper-authored entry directly.
    ///
    /// Unlike the sale/transaction paths this is a hard-error API: the
    /// caller is the accounting surface itself, so validation problems
    /// and unknown accounts surface as `Err` instead of a soft outcome.
    pub async fn post_manual_entry(&mut self, entry: JournalEntry) -> LedgerResult<JournalEntry> {
        self.validator.validate_entry(&entry)?;

        for line in &entry.lines {
            if self.storage.get_account(&line.account_code).await?.is_none() {
                return Err(LedgerError::AccountNotFound(line.account_code.clone()));
            }
        }

        self.persist(entry).await
    }

    async fn persist(&mut self, entry: JournalEntry) -> LedgerResult<JournalEntry> {
        entry.validate()?;
        self.storage.save_entry(&entry).await?;
        info!(
            entry_id = %entry.id,
            reference = %entry.reference,
            entry_type = %entry.entry_type,
            "journal entry posted"
        );
        Ok(entry)
    }

    fn skip_sale(&self, sale: &Sale, reason: SkipReason) -> PostingOutcome {
        warn!(
            invoice = %sale.invoice_number,
            reason = %reason,
            "sale not posted"
        );
        PostingOutcome::Skipped(reason)
    }

    fn skip_transaction(
        &self,
        transaction: &SourceTransaction,
        reason: SkipReason,
    ) -> PostingOutcome {
        warn!(
            reference = %transaction.reference(),
            reason = %reason,
            "transaction not posted"
        );
        PostingOutcome::Skipped(reason)
    }
}

/// Builder for bookkeeper-authored journal entries
#[derive(Debug)]
pub struct JournalEntryBuilder {
    entry: JournalEntry,
}

impl JournalEntryBuilder {
    /// Start a manual entry for the given date, reference, and description
    pub fn new(date: NaiveDate, reference: String, description: String) -> Self {
        Self {
            entry: JournalEntry::new(date, reference, description, JournalEntryType::Manual),
        }
    }

    /// Override the entry type (defaults to manual)
    pub fn entry_type(mut self, entry_type: JournalEntryType) -> Self {
        self.entry.entry_type = entry_type;
        self
    }

    /// Record who authored the entry
    pub fn created_by(mut self, user: String) -> Self {
        self.entry.created_by = Some(user);
        self
    }

    /// Tag the entry with a category for cash-flow classification
    pub fn category(mut self, category: String) -> Self {
        self.entry.category = Some(category);
        self
    }

    /// Add a debit line
    pub fn debit(mut self, account_code: String, amount: BigDecimal) -> Self {
        self.entry.add_line(JournalLine::debit(account_code, amount));
        self
    }

    /// Add a credit line
    pub fn credit(mut self, account_code: String, amount: BigDecimal) -> Self {
        self.entry.add_line(JournalLine::credit(account_code, amount));
        self
    }

    /// Add a prepared line
    pub fn line(mut self, line: JournalLine) -> Self {
        self.entry.add_line(line);
        self
    }

    /// Validate and return the entry
    pub fn build(self) -> LedgerResult<JournalEntry> {
        self.entry.validate()?;
        Ok(self.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::account::{utils::seed_retail_chart, AccountManager};
    use crate::utils::MemoryStorage;
    use chrono::NaiveDate;

    fn sale(invoice: &str, total: i64, subtotal: i64, discount: i64, tax: i64) -> Sale {
        Sale {
            invoice_number: invoice.to_string(),
            total_amount: BigDecimal::from(total),
            subtotal: BigDecimal::from(subtotal),
            discount: BigDecimal::from(discount),
            tax: BigDecimal::from(tax),
            payment_method: "cash".to_string(),
            customer_name: None,
            created_at: chrono::Utc::now().naive_utc(),
            user_id: None,
        }
    }

    fn rent_expense(id: i64) -> SourceTransaction {
        SourceTransaction {
            id,
            date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            kind: TransactionKind::Expense,
            amount: BigDecimal::from(50),
            category: Some("Rent".to_string()),
            payment_method: Some("cash".to_string()),
            reference_number: None,
            description: "Office rent".to_string(),
            origin: TransactionOrigin::Manual,
        }
    }

    async fn seeded_engine(config: AccountingConfig) -> PostingEngine<MemoryStorage> {
        let storage = MemoryStorage::new();
        let mut manager = AccountManager::new(storage.clone());
        seed_retail_chart(&mut manager).await.unwrap();
        PostingEngine::new(storage, config)
    }

    #[tokio::test]
    async fn taxed_sale_posts_three_balanced_lines() {
        let mut engine = seeded_engine(AccountingConfig::default()).await;
        let outcome = engine.create_from_sale(&sale("INV-1", 110, 100, 0, 10)).await;

        let entry = outcome.entry().unwrap();
        assert_eq!(entry.entry_type, JournalEntryType::Sale);
        assert_eq!(entry.reference, "INV-1");
        assert_eq!(entry.lines.len(), 3);
        assert_eq!(entry.lines[0].account_code, "1000");
        assert_eq!(entry.lines[0].debit, BigDecimal::from(110));
        assert_eq!(entry.lines[1].account_code, "4000");
        assert_eq!(entry.lines[1].credit, BigDecimal::from(100));
        assert_eq!(entry.lines[2].account_code, "2100");
        assert_eq!(entry.lines[2].credit, BigDecimal::from(10));
        assert!(entry.is_balanced());
    }

    #[tokio::test]
    async fn untaxed_sale_posts_two_lines() {
        let mut engine = seeded_engine(AccountingConfig::default()).await;
        let outcome = engine.create_from_sale(&sale("INV-2", 100, 100, 0, 0)).await;

        let entry = outcome.entry().unwrap();
        assert_eq!(entry.lines.len(), 2);
        assert!(entry.is_balanced());
    }

    #[tokio::test]
    async fn discount_reduces_revenue_not_cash() {
        let mut engine = seeded_engine(AccountingConfig::default()).await;
        let outcome = engine.create_from_sale(&sale("INV-3", 105, 100, 5, 10)).await;

        let entry = outcome.entry().unwrap();
        assert_eq!(entry.lines[0].debit, BigDecimal::from(105));
        assert_eq!(entry.lines[1].credit, BigDecimal::from(95));
        assert_eq!(entry.lines[2].credit, BigDecimal::from(10));
    }

    #[tokio::test]
    async fn customer_name_lands_in_description() {
        let mut engine = seeded_engine(AccountingConfig::default()).await;
        let mut sale = sale("INV-4", 100, 100, 0, 0);
        sale.customer_name = Some("Asha Traders".to_string());
        sale.user_id = Some("cashier-7".to_string());

        let outcome = engine.create_from_sale(&sale).await;
        let entry = outcome.entry().unwrap();
        assert_eq!(entry.description, "Sale - INV-4 (Asha Traders)");
        assert_eq!(entry.created_by.as_deref(), Some("cashier-7"));
    }

    #[tokio::test]
    async fn disabled_flag_skips_everything() {
        let config = AccountingConfig {
            auto_create_journal_entries: false,
            ..AccountingConfig::default()
        };
        let mut engine = seeded_engine(config).await;

        let outcome = engine.create_from_sale(&sale("INV-5", 110, 100, 0, 10)).await;
        assert!(matches!(
            outcome,
            PostingOutcome::Skipped(SkipReason::AutoPostingDisabled)
        ));

        let outcome = engine.create_from_transaction(&rent_expense(1)).await;
        assert!(matches!(
            outcome,
            PostingOutcome::Skipped(SkipReason::AutoPostingDisabled)
        ));
    }

    #[tokio::test]
    async fn unbalanced_sale_is_rejected_before_posting() {
        let storage = MemoryStorage::new();
        let mut manager = AccountManager::new(storage.clone());
        seed_retail_chart(&mut manager).await.unwrap();
        let mut engine = PostingEngine::new(storage.clone(), AccountingConfig::default());

        // total_amount disagrees with subtotal - discount + tax
        let outcome = engine.create_from_sale(&sale("INV-6", 120, 100, 0, 10)).await;

        assert!(matches!(
            outcome,
            PostingOutcome::Failed(LedgerError::UnbalancedEntry { .. })
        ));
        assert!(storage.get_entries(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_cash_account_skips_and_writes_nothing() {
        // Empty chart: nothing resolves
        let storage = MemoryStorage::new();
        let mut engine = PostingEngine::new(storage.clone(), AccountingConfig::default());

        let outcome = engine.create_from_sale(&sale("INV-7", 110, 100, 0, 10)).await;
        assert!(matches!(
            outcome,
            PostingOutcome::Skipped(SkipReason::UnresolvedCashAccount)
        ));
        assert!(storage.get_entries(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn taxed_sale_without_tax_account_is_skipped() {
        let storage = MemoryStorage::new();
        let mut manager = AccountManager::new(storage.clone());
        manager
            .create_account("1000".to_string(), "Cash".to_string(), AccountType::Asset)
            .await
            .unwrap();
        manager
            .create_account(
                "4000".to_string(),
                "Sales Revenue".to_string(),
                AccountType::Revenue,
            )
            .await
            .unwrap();
        let mut engine = PostingEngine::new(storage.clone(), AccountingConfig::default());

        let outcome = engine.create_from_sale(&sale("INV-8", 110, 100, 0, 10)).await;
        assert!(matches!(
            outcome,
            PostingOutcome::Skipped(SkipReason::UnresolvedTaxAccount)
        ));
        assert!(storage.get_entries(None, None).await.unwrap().is_empty());

        // Without tax the same chart is sufficient
        let outcome = engine.create_from_sale(&sale("INV-9", 100, 100, 0, 0)).await;
        assert!(outcome.is_posted());
    }

    #[tokio::test]
    async fn duplicate_invoice_fails_second_posting() {
        let mut engine = seeded_engine(AccountingConfig::default()).await;
        assert!(engine
            .create_from_sale(&sale("INV-10", 110, 100, 0, 10))
            .await
            .is_posted());

        let outcome = engine.create_from_sale(&sale("INV-10", 110, 100, 0, 10)).await;
        assert!(matches!(
            outcome,
            PostingOutcome::Failed(LedgerError::DuplicateReference { .. })
        ));
    }

    #[tokio::test]
    async fn expense_transaction_debits_category_account() {
        let mut config = AccountingConfig::default();
        config
            .category_accounts
            .insert("Rent".to_string(), "5200".to_string());
        let mut engine = seeded_engine(config).await;

        let outcome = engine.create_from_transaction(&rent_expense(11)).await;
        let entry = outcome.entry().unwrap();
        assert_eq!(entry.entry_type, JournalEntryType::Expense);
        assert_eq!(entry.reference, "TXN-11");
        assert_eq!(entry.category.as_deref(), Some("Rent"));
        assert_eq!(entry.lines[0].account_code, "5200");
        assert_eq!(entry.lines[0].debit, BigDecimal::from(50));
        assert_eq!(entry.lines[1].account_code, "1000");
        assert_eq!(entry.lines[1].credit, BigDecimal::from(50));
    }

    #[tokio::test]
    async fn income_transaction_credits_category_account() {
        let mut engine = seeded_engine(AccountingConfig::default()).await;
        let txn = SourceTransaction {
            id: 12,
            date: NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
            kind: TransactionKind::Income,
            amount: BigDecimal::from(200),
            category: None,
            payment_method: None,
            reference_number: Some("DEP-3".to_string()),
            description: "Scrap sale".to_string(),
            origin: TransactionOrigin::Manual,
        };

        let outcome = engine.create_from_transaction(&txn).await;
        let entry = outcome.entry().unwrap();
        assert_eq!(entry.reference, "DEP-3");
        assert_eq!(entry.lines[0].account_code, "1000");
        assert_eq!(entry.lines[0].debit, BigDecimal::from(200));
        // Unmapped income falls back to Other Income
        assert_eq!(entry.lines[1].account_code, "4900");
        assert_eq!(entry.lines[1].credit, BigDecimal::from(200));
    }

    #[tokio::test]
    async fn sale_mirror_transaction_is_never_posted() {
        let mut engine = seeded_engine(AccountingConfig::default()).await;
        let mirror = SourceTransaction {
            origin: TransactionOrigin::Sale,
            ..rent_expense(13)
        };

        let outcome = engine.create_from_transaction(&mirror).await;
        assert!(matches!(
            outcome,
            PostingOutcome::Skipped(SkipReason::CoveredBySaleEntry)
        ));
    }

    #[tokio::test]
    async fn missing_category_account_aborts_whole_posting() {
        // Chart holds only cash, so the expense side cannot resolve
        let storage = MemoryStorage::new();
        let mut manager = AccountManager::new(storage.clone());
        manager
            .create_account("1000".to_string(), "Cash".to_string(), AccountType::Asset)
            .await
            .unwrap();
        let mut engine = PostingEngine::new(storage.clone(), AccountingConfig::default());

        let outcome = engine.create_from_transaction(&rent_expense(14)).await;
        assert!(matches!(
            outcome,
            PostingOutcome::Skipped(SkipReason::UnresolvedCategoryAccount)
        ));
        assert!(storage.get_entries(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deletions_are_idempotent() {
        let mut engine = seeded_engine(AccountingConfig::default()).await;
        let sale = sale("INV-15", 110, 100, 0, 10);
        assert!(engine.create_from_sale(&sale).await.is_posted());

        assert!(engine.delete_for_sale(&sale).await.unwrap());
        assert!(!engine.delete_for_sale(&sale).await.unwrap());

        let txn = rent_expense(15);
        assert!(engine.create_from_transaction(&txn).await.is_posted());
        assert!(engine.delete_for_transaction(&txn).await.unwrap());
        assert!(!engine.delete_for_transaction(&txn).await.unwrap());
    }

    #[tokio::test]
    async fn manual_entries_require_existing_accounts() {
        let mut engine = seeded_engine(AccountingConfig::default()).await;

        let entry = JournalEntryBuilder::new(
            NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            "ADJ-1".to_string(),
            "Opening stock adjustment".to_string(),
        )
        .debit("1300".to_string(), BigDecimal::from(500))
        .credit("3000".to_string(), BigDecimal::from(500))
        .build()
        .unwrap();
        assert!(engine.post_manual_entry(entry).await.is_ok());

        let unknown = JournalEntryBuilder::new(
            NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            "ADJ-2".to_string(),
            "Bad account".to_string(),
        )
        .debit("8888".to_string(), BigDecimal::from(10))
        .credit("1000".to_string(), BigDecimal::from(10))
        .build()
        .unwrap();
        let result = engine.post_manual_entry(unknown).await;
        assert!(matches!(result, Err(LedgerError::AccountNotFound(code)) if code == "8888"));
    }

    #[tokio::test]
    async fn builder_rejects_unbalanced_entries() {
        let result = JournalEntryBuilder::new(
            NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            "ADJ-3".to_string(),
            "Typo in amounts".to_string(),
        )
        .debit("1000".to_string(), BigDecimal::from(100))
        .credit("3000".to_string(), BigDecimal::from(90))
        .build();

        assert!(matches!(result, Err(LedgerError::UnbalancedEntry { .. })));
    }
}
