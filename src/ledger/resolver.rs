//! Account resolution from business concepts to concrete accounts

use tracing::debug;

use crate::config::AccountingConfig;
use crate::traits::LedgerStorage;
use crate::types::*;

/// Maps semantic needs (payment method, transaction category, "sales
/// revenue", "tax payable") to concrete accounts via configuration.
///
/// Resolution is a pure read against configuration plus the account table.
/// A missing account is a normal "not configured" signal reported as
/// `Ok(None)`, never an error; only storage failures surface as `Err`.
pub struct AccountResolver<S: LedgerStorage> {
    storage: S,
    config: AccountingConfig,
}

impl<S: LedgerStorage> AccountResolver<S> {
    /// Create a resolver over the given storage and configuration
    pub fn new(storage: S, config: AccountingConfig) -> Self {
        Self { storage, config }
    }

    /// The configuration the resolver reads from
    pub fn config(&self) -> &AccountingConfig {
        &self.config
    }

    /// Direct lookup by account code
    pub async fn resolve_by_code(&self, code: &str) -> LedgerResult<Option<Account>> {
        self.storage.get_account(code).await
    }

    /// Resolve the cash/bank account for a payment method.
    ///
    /// Tries the payment-method map first, then the default cash code.
    /// Returns `Ok(None)` when neither code names an existing account.
    pub async fn resolve_for_payment_method(
        &self,
        method: Option<&str>,
    ) -> LedgerResult<Option<Account>> {
        let mapped_code = method.and_then(|m| self.config.payment_method_accounts.get(m));

        if let Some(code) = mapped_code {
            if let Some(account) = self.resolve_by_code(code).await? {
                return Ok(Some(account));
            }
            debug!(
                method = method.unwrap_or(""),
                code = %code,
                "mapped payment-method account missing, trying default cash"
            );
        }

        self.resolve_by_code(&self.config.default_account_codes.cash)
            .await
    }

    /// Resolve the income or expense account for a transaction category.
    ///
    /// Tries the category map first, then the kind-specific default:
    /// other income for income transactions, the other-expense code for
    /// expense transactions.
    pub async fn resolve_for_category(
        &self,
        category: Option<&str>,
        kind: TransactionKind,
    ) -> LedgerResult<Option<Account>> {
        let mapped_code = category.and_then(|c| self.config.category_accounts.get(c));

        if let Some(code) = mapped_code {
            if let Some(account) = self.resolve_by_code(code).await? {
                return Ok(Some(account));
            }
            debug!(
                category = category.unwrap_or(""),
                code = %code,
                "mapped category account missing, trying kind default"
            );
        }

        let default_code = match kind {
            TransactionKind::Income => &self.config.default_account_codes.other_income,
            TransactionKind::Expense => &self.config.other_expense_account_code,
        };
        self.resolve_by_code(default_code).await
    }

    /// Resolve the sales revenue account from its fixed config key
    pub async fn resolve_sales_revenue(&self) -> LedgerResult<Option<Account>> {
        self.resolve_by_code(&self.config.default_account_codes.sales_revenue)
            .await
    }

    /// Resolve the tax payable account from its fixed config key
    pub async fn resolve_tax_payable(&self) -> LedgerResult<Option<Account>> {
        self.resolve_by_code(&self.config.default_account_codes.tax_payable)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::account::{utils::seed_retail_chart, AccountManager};
    use crate::utils::MemoryStorage;

    async fn seeded_resolver(config: AccountingConfig) -> AccountResolver<MemoryStorage> {
        let storage = MemoryStorage::new();
        let mut manager = AccountManager::new(storage.clone());
        seed_retail_chart(&mut manager).await.unwrap();
        AccountResolver::new(storage, config)
    }

    #[tokio::test]
    async fn payment_method_map_wins_over_default_cash() {
        let mut config = AccountingConfig::default();
        config
            .payment_method_accounts
            .insert("card".to_string(), "1100".to_string());
        let resolver = seeded_resolver(config).await;

        let account = resolver
            .resolve_for_payment_method(Some("card"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.code, "1100");
    }

    #[tokio::test]
    async fn unmapped_method_falls_back_to_default_cash() {
        let resolver = seeded_resolver(AccountingConfig::default()).await;

        let account = resolver
            .resolve_for_payment_method(Some("qr"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.code, "1000");

        let account = resolver
            .resolve_for_payment_method(None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.code, "1000");
    }

    #[tokio::test]
    async fn mapped_code_without_account_falls_back_to_default_cash() {
        let mut config = AccountingConfig::default();
        config
            .payment_method_accounts
            .insert("card".to_string(), "9999".to_string());
        let resolver = seeded_resolver(config).await;

        let account = resolver
            .resolve_for_payment_method(Some("card"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.code, "1000");
    }

    #[tokio::test]
    async fn missing_accounts_resolve_to_none_not_error() {
        // Empty chart: nothing resolves, but storage itself is healthy
        let storage = MemoryStorage::new();
        let resolver = AccountResolver::new(storage, AccountingConfig::default());

        assert!(resolver
            .resolve_for_payment_method(Some("cash"))
            .await
            .unwrap()
            .is_none());
        assert!(resolver.resolve_sales_revenue().await.unwrap().is_none());
        assert!(resolver.resolve_tax_payable().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn category_map_wins_over_kind_default() {
        let mut config = AccountingConfig::default();
        config
            .category_accounts
            .insert("Rent".to_string(), "5200".to_string());
        let resolver = seeded_resolver(config).await;

        let account = resolver
            .resolve_for_category(Some("Rent"), TransactionKind::Expense)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.code, "5200");
    }

    #[tokio::test]
    async fn unmapped_category_uses_kind_default() {
        let resolver = seeded_resolver(AccountingConfig::default()).await;

        let expense = resolver
            .resolve_for_category(Some("Stationery"), TransactionKind::Expense)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(expense.code, "5999");

        let income = resolver
            .resolve_for_category(None, TransactionKind::Income)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(income.code, "4900");
    }
}
