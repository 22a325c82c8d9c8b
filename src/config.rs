//! Accounting configuration consumed by the account resolver, the posting
//! engine, and the cash-flow classifier.
//!
//! The source system read these settings through ambient global lookup;
//! here they are an explicit struct handed to the components at
//! construction. Every field carries a serde default so partial
//! configurations (e.g. a settings table with only a few keys) still load.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Hard-coded fallback for the "Other Expense" account code, used when the
/// configuration does not carry one of its own.
pub const OTHER_EXPENSE_FALLBACK_CODE: &str = "5999";

/// Cash-flow statement bucket a transaction category maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowBucket {
    /// Day-to-day trading activity (the default for unclassified categories)
    Operating,
    /// Purchase and disposal of long-lived assets
    Investing,
    /// Loans, repayments, and owner contributions/drawings
    Financing,
}

/// Fixed account codes the posting engine resolves against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultAccountCodes {
    /// Fallback cash/bank account when a payment method has no mapping
    #[serde(default = "defaults::cash")]
    pub cash: String,
    /// Account credited with sale revenue
    #[serde(default = "defaults::sales_revenue")]
    pub sales_revenue: String,
    /// Account credited with tax collected on sales
    #[serde(default = "defaults::tax_payable")]
    pub tax_payable: String,
    /// Fallback account for income transactions with no category mapping
    #[serde(default = "defaults::other_income")]
    pub other_income: String,
}

impl Default for DefaultAccountCodes {
    fn default() -> Self {
        Self {
            cash: defaults::cash(),
            sales_revenue: defaults::sales_revenue(),
            tax_payable: defaults::tax_payable(),
            other_income: defaults::other_income(),
        }
    }
}

/// Configuration surface for the journal-posting core.
///
/// Read-only to the core: the resolver and engine take a reference at
/// construction and never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountingConfig {
    /// Feature flag: when false, no journal entries are ever created
    #[serde(default = "defaults::auto_create")]
    pub auto_create_journal_entries: bool,
    /// Payment-method string -> account code ("cash" -> "1000", ...)
    #[serde(default)]
    pub payment_method_accounts: HashMap<String, String>,
    /// Transaction category -> account code ("Rent" -> "5200", ...)
    #[serde(default)]
    pub category_accounts: HashMap<String, String>,
    /// Fixed account codes for cash, sales revenue, tax payable, other income
    #[serde(default)]
    pub default_account_codes: DefaultAccountCodes,
    /// Fallback account code for expense transactions with no category
    /// mapping; defaults to [`OTHER_EXPENSE_FALLBACK_CODE`]
    #[serde(default = "defaults::other_expense")]
    pub other_expense_account_code: String,
    /// Transaction category -> cash-flow bucket; unmapped categories are
    /// treated as operating activity
    #[serde(default)]
    pub cash_flow_buckets: HashMap<String, CashFlowBucket>,
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            auto_create_journal_entries: defaults::auto_create(),
            payment_method_accounts: HashMap::new(),
            category_accounts: HashMap::new(),
            default_account_codes: DefaultAccountCodes::default(),
            other_expense_account_code: defaults::other_expense(),
            cash_flow_buckets: HashMap::new(),
        }
    }
}

impl AccountingConfig {
    /// The set of account codes that represent cash or bank balances:
    /// every payment-method account plus the default cash account.
    /// Cash-flow reporting measures movement on exactly these accounts.
    pub fn cash_account_codes(&self) -> BTreeSet<String> {
        let mut codes: BTreeSet<String> =
            self.payment_method_accounts.values().cloned().collect();
        codes.insert(self.default_account_codes.cash.clone());
        codes
    }

    /// The cash-flow bucket for a category tag; unmapped and absent
    /// categories fall into operating activity
    pub fn bucket_for_category(&self, category: Option<&str>) -> CashFlowBucket {
        category
            .and_then(|c| self.cash_flow_buckets.get(c).copied())
            .unwrap_or(CashFlowBucket::Operating)
    }
}

mod defaults {
    pub(super) fn auto_create() -> bool {
        true
    }
    pub(super) fn cash() -> String {
        "1000".to_string()
    }
    pub(super) fn sales_revenue() -> String {
        "4000".to_string()
    }
    pub(super) fn tax_payable() -> String {
        "2100".to_string()
    }
    pub(super) fn other_income() -> String {
        "4900".to_string()
    }
    pub(super) fn other_expense() -> String {
        super::OTHER_EXPENSE_FALLBACK_CODE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_posts_against_standard_codes() {
        let config = AccountingConfig::default();
        assert!(config.auto_create_journal_entries);
        assert_eq!(config.default_account_codes.cash, "1000");
        assert_eq!(config.default_account_codes.sales_revenue, "4000");
        assert_eq!(config.default_account_codes.tax_payable, "2100");
        assert_eq!(config.default_account_codes.other_income, "4900");
        assert_eq!(
            config.other_expense_account_code,
            OTHER_EXPENSE_FALLBACK_CODE
        );
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: AccountingConfig = serde_json::from_str(
            r#"{
                "auto_create_journal_entries": false,
                "payment_method_accounts": { "card": "1100" }
            }"#,
        )
        .unwrap();

        assert!(!config.auto_create_journal_entries);
        assert_eq!(
            config.payment_method_accounts.get("card"),
            Some(&"1100".to_string())
        );
        assert_eq!(config.default_account_codes.sales_revenue, "4000");
        assert_eq!(
            config.other_expense_account_code,
            OTHER_EXPENSE_FALLBACK_CODE
        );
    }

    #[test]
    fn cash_account_codes_cover_payment_methods_and_default() {
        let mut config = AccountingConfig::default();
        config
            .payment_method_accounts
            .insert("card".to_string(), "1100".to_string());
        config
            .payment_method_accounts
            .insert("bank_transfer".to_string(), "1100".to_string());

        let codes = config.cash_account_codes();
        assert!(codes.contains("1000"));
        assert!(codes.contains("1100"));
        assert_eq!(codes.len(), 2);
    }

    #[test]
    fn unmapped_categories_default_to_operating() {
        let mut config = AccountingConfig::default();
        config
            .cash_flow_buckets
            .insert("Equipment".to_string(), CashFlowBucket::Investing);

        assert_eq!(
            config.bucket_for_category(Some("Equipment")),
            CashFlowBucket::Investing
        );
        assert_eq!(
            config.bucket_for_category(Some("Rent")),
            CashFlowBucket::Operating
        );
        assert_eq!(config.bucket_for_category(None), CashFlowBucket::Operating);
    }
}
