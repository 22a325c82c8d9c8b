//! Core types and data structures for the journal-posting system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account types following standard accounting principles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Assets - what the business owns (Cash, Bank, Inventory, etc.)
    Asset,
    /// Liabilities - what the business owes (Tax Payable, Accounts Payable, etc.)
    Liability,
    /// Equity - owner's interest in the business (Capital, Retained Earnings, etc.)
    Equity,
    /// Revenue - money earned by the business (Sales Revenue, Other Income, etc.)
    Revenue,
    /// Expenses - costs incurred by the business
    Expense,
}

impl AccountType {
    /// Returns the normal balance side for this account type.
    /// Assets and Expenses normally carry debit balances;
    /// Liabilities, Equity, and Revenue normally carry credit balances.
    pub fn normal_side(&self) -> BalanceSide {
        match self {
            AccountType::Asset | AccountType::Expense => BalanceSide::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                BalanceSide::Credit
            }
        }
    }
}

/// The two sides of a double-entry ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSide {
    /// Debit side - increases Assets and Expenses
    Debit,
    /// Credit side - increases Liabilities, Equity, and Revenue
    Credit,
}

/// A single account in the chart of accounts.
///
/// Accounts are static reference data: created by setup/seed, rarely
/// mutated, and never deleted while journal lines reference them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account code ("1000", "4000", ...)
    pub code: String,
    /// Human-readable account name
    pub name: String,
    /// Type of account (Asset, Liability, etc.)
    pub account_type: AccountType,
    /// Which side the account naturally increases on
    pub normal_balance: BalanceSide,
}

impl Account {
    /// Create a new account; the normal balance side is derived from the type
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type,
            normal_balance: account_type.normal_side(),
        }
    }
}

/// The business event a journal entry was posted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalEntryType {
    /// Posted from a completed sale
    Sale,
    /// Posted from a manual income transaction
    Income,
    /// Posted from a manual expense transaction
    Expense,
    /// Posted directly by a bookkeeper
    Manual,
}

impl std::fmt::Display for JournalEntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JournalEntryType::Sale => "sale",
            JournalEntryType::Income => "income",
            JournalEntryType::Expense => "expense",
            JournalEntryType::Manual => "manual",
        };
        write!(f, "{}", name)
    }
}

/// Lifecycle status of a journal entry.
///
/// The engine only ever writes `Posted`; corrections are delete + recreate,
/// driven by the owning sale/transaction. `Void` exists for schema
/// compatibility and is ignored by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry participates in ledger aggregation
    Posted,
    /// Entry is retained but excluded from aggregation
    Void,
}

/// A single debit or credit line within a journal entry.
///
/// Exactly one of `debit`/`credit` is non-zero. Lines are owned by their
/// entry: they are created only as part of the entry's creation and deleted
/// only by deleting the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Code of the account being posted to
    pub account_code: String,
    /// Debit amount (zero when this is a credit line)
    pub debit: BigDecimal,
    /// Credit amount (zero when this is a debit line)
    pub credit: BigDecimal,
}

impl JournalLine {
    /// Create a debit line
    pub fn debit(account_code: impl Into<String>, amount: BigDecimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: amount,
            credit: BigDecimal::from(0),
        }
    }

    /// Create a credit line
    pub fn credit(account_code: impl Into<String>, amount: BigDecimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: BigDecimal::from(0),
            credit: amount,
        }
    }

    /// The line's movement as seen from the given normal balance side
    pub fn signed_amount(&self, side: BalanceSide) -> BigDecimal {
        match side {
            BalanceSide::Debit => &self.debit - &self.credit,
            BalanceSide::Credit => &self.credit - &self.debit,
        }
    }

    /// Validate the one-sided line invariant
    pub fn validate(&self) -> LedgerResult<()> {
        let zero = BigDecimal::from(0);
        if self.debit < zero || self.credit < zero {
            return Err(LedgerError::InvalidEntry(format!(
                "Line on account '{}' has a negative amount",
                self.account_code
            )));
        }
        let debit_set = self.debit > zero;
        let credit_set = self.credit > zero;
        if debit_set == credit_set {
            return Err(LedgerError::InvalidEntry(format!(
                "Line on account '{}' must have exactly one of debit/credit non-zero",
                self.account_code
            )));
        }
        Ok(())
    }
}

/// A balanced journal entry: one atomic business event.
///
/// The header and all of its lines are persisted together in a single
/// storage call; no partial entry is ever visible to readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier for the entry
    pub id: Uuid,
    /// Date the business event occurred
    pub date: NaiveDate,
    /// Human-readable key linking back to the source record
    /// (invoice number or transaction code); unique per entry type
    pub reference: String,
    /// Description of the business event
    pub description: String,
    /// Which kind of business event produced this entry
    pub entry_type: JournalEntryType,
    /// Lifecycle status; the engine only writes `Posted`
    pub status: EntryStatus,
    /// User who triggered the posting, when known
    pub created_by: Option<String>,
    /// Source transaction category tag, used for cash-flow classification
    pub category: Option<String>,
    /// When the entry was posted; stable tie-break for same-date ordering
    pub created_at: NaiveDateTime,
    /// The debit/credit lines making up the entry
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Create a new posted entry header with no lines yet
    pub fn new(
        date: NaiveDate,
        reference: impl Into<String>,
        description: impl Into<String>,
        entry_type: JournalEntryType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            reference: reference.into(),
            description: description.into(),
            entry_type,
            status: EntryStatus::Posted,
            created_by: None,
            category: None,
            created_at: chrono::Utc::now().naive_utc(),
            lines: Vec::new(),
        }
    }

    /// Add a line to the entry
    pub fn add_line(&mut self, line: JournalLine) {
        self.lines.push(line);
    }

    /// Calculate total debits
    pub fn total_debits(&self) -> BigDecimal {
        self.lines.iter().map(|l| &l.debit).sum()
    }

    /// Calculate total credits
    pub fn total_credits(&self) -> BigDecimal {
        self.lines.iter().map(|l| &l.credit).sum()
    }

    /// Check whether the entry is balanced (debits = credits)
    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }

    /// Validate the entry's double-entry invariants
    pub fn validate(&self) -> LedgerResult<()> {
        if self.lines.len() < 2 {
            return Err(LedgerError::InvalidEntry(
                "Journal entry must have at least two lines".to_string(),
            ));
        }

        for line in &self.lines {
            line.validate()?;
        }

        if !self.is_balanced() {
            return Err(LedgerError::UnbalancedEntry {
                debits: self.total_debits(),
                credits: self.total_credits(),
            });
        }

        Ok(())
    }
}

/// A completed sale as handed over by the POS collaborator.
///
/// The engine never mutates the sale; it only reads it to construct the
/// matching journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique invoice number; becomes the journal reference
    pub invoice_number: String,
    /// Amount the customer actually paid
    pub total_amount: BigDecimal,
    /// Sum of line totals before discount and tax
    pub subtotal: BigDecimal,
    /// Discount applied to the subtotal
    pub discount: BigDecimal,
    /// Tax collected on the sale
    pub tax: BigDecimal,
    /// Payment method string as captured at the terminal ("cash", "card", ...)
    pub payment_method: String,
    /// Customer name, when the sale was attached to a customer
    pub customer_name: Option<String>,
    /// When the sale was completed
    pub created_at: NaiveDateTime,
    /// Cashier/user who completed the sale
    pub user_id: Option<String>,
}

impl Sale {
    /// The revenue recognized for this sale (subtotal less discount)
    pub fn revenue_amount(&self) -> BigDecimal {
        &self.subtotal - &self.discount
    }
}

/// Direction of a manual transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming into the business
    Income,
    /// Money going out of the business
    Expense,
}

impl TransactionKind {
    /// The journal entry type a transaction of this kind posts as
    pub fn entry_type(&self) -> JournalEntryType {
        match self {
            TransactionKind::Income => JournalEntryType::Income,
            TransactionKind::Expense => JournalEntryType::Expense,
        }
    }
}

/// Where a source transaction record originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionOrigin {
    /// Entered through the income/expense screens
    Manual,
    /// Written automatically alongside a sale; already covered by the
    /// sale's own journal entry and never posted again
    Sale,
}

impl Default for TransactionOrigin {
    fn default() -> Self {
        TransactionOrigin::Manual
    }
}

/// A manual income/expense transaction as handed over by the
/// transaction CRUD collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTransaction {
    /// Identifier assigned by the collaborator's storage
    pub id: i64,
    /// Date the transaction occurred
    pub date: NaiveDate,
    /// Income or expense
    pub kind: TransactionKind,
    /// Full transaction amount
    pub amount: BigDecimal,
    /// Category tag ("Rent", "Utilities", ...), drives account resolution
    /// and cash-flow classification
    pub category: Option<String>,
    /// Payment method; the engine falls back to "cash" when absent
    pub payment_method: Option<String>,
    /// External reference number, when one was captured
    pub reference_number: Option<String>,
    /// Description of the transaction
    pub description: String,
    /// Origin marker; `Sale` means the record mirrors a sale and must
    /// not be posted again
    #[serde(default)]
    pub origin: TransactionOrigin,
}

impl SourceTransaction {
    /// The journal reference for this transaction: the captured reference
    /// number, or a synthesized `TXN-{id}` when none exists
    pub fn reference(&self) -> String {
        match &self.reference_number {
            Some(reference) => reference.clone(),
            None => format!("TXN-{}", self.id),
        }
    }
}

/// Errors that can occur in the journal-posting system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid journal entry: {0}")]
    InvalidEntry(String),
    #[error("Unbalanced journal entry: debits = {debits}, credits = {credits}")]
    UnbalancedEntry {
        debits: BigDecimal,
        credits: BigDecimal,
    },
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Journal reference '{reference}' already posted for type {entry_type}")]
    DuplicateReference {
        reference: String,
        entry_type: JournalEntryType,
    },
    #[error("Account '{0}' is referenced by journal entries")]
    AccountInUse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_lines(lines: Vec<JournalLine>) -> JournalEntry {
        let mut entry = JournalEntry::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "INV-100",
            "Sale - INV-100",
            JournalEntryType::Sale,
        );
        for line in lines {
            entry.add_line(line);
        }
        entry
    }

    #[test]
    fn normal_sides_follow_account_type() {
        assert_eq!(AccountType::Asset.normal_side(), BalanceSide::Debit);
        assert_eq!(AccountType::Expense.normal_side(), BalanceSide::Debit);
        assert_eq!(AccountType::Liability.normal_side(), BalanceSide::Credit);
        assert_eq!(AccountType::Equity.normal_side(), BalanceSide::Credit);
        assert_eq!(AccountType::Revenue.normal_side(), BalanceSide::Credit);
    }

    #[test]
    fn line_must_be_one_sided() {
        let both = JournalLine {
            account_code: "1000".to_string(),
            debit: BigDecimal::from(10),
            credit: BigDecimal::from(10),
        };
        assert!(both.validate().is_err());

        let neither = JournalLine {
            account_code: "1000".to_string(),
            debit: BigDecimal::from(0),
            credit: BigDecimal::from(0),
        };
        assert!(neither.validate().is_err());

        let debit = JournalLine::debit("1000", BigDecimal::from(10));
        assert!(debit.validate().is_ok());
    }

    #[test]
    fn line_rejects_negative_amounts() {
        let line = JournalLine {
            account_code: "1000".to_string(),
            debit: BigDecimal::from(-5),
            credit: BigDecimal::from(0),
        };
        assert!(line.validate().is_err());
    }

    #[test]
    fn signed_amount_respects_normal_side() {
        let line = JournalLine::debit("1000", BigDecimal::from(25));
        assert_eq!(line.signed_amount(BalanceSide::Debit), BigDecimal::from(25));
        assert_eq!(
            line.signed_amount(BalanceSide::Credit),
            BigDecimal::from(-25)
        );
    }

    #[test]
    fn balanced_entry_validates() {
        let entry = entry_with_lines(vec![
            JournalLine::debit("1000", BigDecimal::from(110)),
            JournalLine::credit("4000", BigDecimal::from(100)),
            JournalLine::credit("2100", BigDecimal::from(10)),
        ]);
        assert!(entry.is_balanced());
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn unbalanced_entry_fails_validation() {
        let entry = entry_with_lines(vec![
            JournalLine::debit("1000", BigDecimal::from(110)),
            JournalLine::credit("4000", BigDecimal::from(100)),
        ]);
        assert!(matches!(
            entry.validate(),
            Err(LedgerError::UnbalancedEntry { .. })
        ));
    }

    #[test]
    fn entry_requires_two_lines() {
        let entry = entry_with_lines(vec![JournalLine::debit("1000", BigDecimal::from(10))]);
        assert!(matches!(entry.validate(), Err(LedgerError::InvalidEntry(_))));
    }

    #[test]
    fn sale_revenue_amount_nets_discount() {
        let sale = Sale {
            invoice_number: "INV-1".to_string(),
            total_amount: BigDecimal::from(105),
            subtotal: BigDecimal::from(100),
            discount: BigDecimal::from(5),
            tax: BigDecimal::from(10),
            payment_method: "cash".to_string(),
            customer_name: None,
            created_at: chrono::Utc::now().naive_utc(),
            user_id: None,
        };
        assert_eq!(sale.revenue_amount(), BigDecimal::from(95));
    }

    #[test]
    fn transaction_reference_is_synthesized_when_absent() {
        let txn = SourceTransaction {
            id: 42,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            kind: TransactionKind::Expense,
            amount: BigDecimal::from(50),
            category: Some("Rent".to_string()),
            payment_method: None,
            reference_number: None,
            description: "Office rent".to_string(),
            origin: TransactionOrigin::Manual,
        };
        assert_eq!(txn.reference(), "TXN-42");

        let with_reference = SourceTransaction {
            reference_number: Some("CHK-9".to_string()),
            ..txn
        };
        assert_eq!(with_reference.reference(), "CHK-9");
    }

    #[test]
    fn entry_type_serializes_lowercase() {
        let json = serde_json::to_string(&JournalEntryType::Sale).unwrap();
        assert_eq!(json, "\"sale\"");
        let status: EntryStatus = serde_json::from_str("\"posted\"").unwrap();
        assert_eq!(status, EntryStatus::Posted);
    }
}
