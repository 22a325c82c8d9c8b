//! Account management functionality

use std::collections::HashMap;

use crate::traits::*;
use crate::types::*;

/// Account manager for handling chart of accounts operations
pub struct AccountManager<S: LedgerStorage> {
    pub(crate) storage: S,
    validator: Box<dyn AccountValidator>,
}

impl<S: LedgerStorage> AccountManager<S> {
    /// Create a new account manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultAccountValidator),
        }
    }

    /// Create a new account manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn AccountValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a new account
    pub async fn create_account(
        &mut self,
        code: String,
        name: String,
        account_type: AccountType,
    ) -> LedgerResult<Account> {
        let account = Account::new(code, name, account_type);

        // Validate the account
        self.validator.validate_account(&account)?;

        // Check if account already exists
        if let Some(_existing) = self.storage.get_account(&account.code).await? {
            return Err(LedgerError::Validation(format!(
                "Account with code '{}' already exists",
                account.code
            )));
        }

        // Save the account
        self.storage.save_account(&account).await?;

        Ok(account)
    }

    /// Get an account by code
    pub async fn get_account(&self, code: &str) -> LedgerResult<Option<Account>> {
        self.storage.get_account(code).await
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.storage.list_accounts(None).await
    }

    /// List accounts by type
    pub async fn list_accounts_by_type(
        &self,
        account_type: AccountType,
    ) -> LedgerResult<Vec<Account>> {
        self.storage.list_accounts(Some(account_type)).await
    }

    /// Update an account
    pub async fn update_account(&mut self, account: &Account) -> LedgerResult<()> {
        // Validate the account
        self.validator.validate_account(account)?;

        // Ensure the account exists
        if self.storage.get_account(&account.code).await?.is_none() {
            return Err(LedgerError::AccountNotFound(account.code.clone()));
        }

        self.storage.update_account(account).await
    }

    /// Delete an account
    pub async fn delete_account(&mut self, code: &str) -> LedgerResult<()> {
        // Validate deletion
        self.validator.validate_account_deletion(code)?;

        // Ensure the account exists
        if self.storage.get_account(code).await?.is_none() {
            return Err(LedgerError::AccountNotFound(code.to_string()));
        }

        self.storage.delete_account(code).await
    }
}

/// Utility functions for working with accounts
pub mod utils {
    use super::*;

    /// Seed the chart of accounts a small retail business starts from.
    ///
    /// The codes line up with the posting defaults in
    /// [`AccountingConfig`](crate::config::AccountingConfig): 1000 is the
    /// default cash account, 4000 sales revenue, 2100 tax payable, 4900
    /// other income, and 5999 the other-expense fallback.
    pub async fn seed_retail_chart<S: LedgerStorage>(
        account_manager: &mut AccountManager<S>,
    ) -> LedgerResult<HashMap<String, Account>> {
        let chart = [
            ("cash", "1000", "Cash", AccountType::Asset),
            ("bank", "1100", "Bank", AccountType::Asset),
            (
                "accounts_receivable",
                "1200",
                "Accounts Receivable",
                AccountType::Asset,
            ),
            ("inventory", "1300", "Inventory", AccountType::Asset),
            (
                "accounts_payable",
                "2000",
                "Accounts Payable",
                AccountType::Liability,
            ),
            ("tax_payable", "2100", "Tax Payable", AccountType::Liability),
            ("owners_equity", "3000", "Owner's Equity", AccountType::Equity),
            (
                "retained_earnings",
                "3200",
                "Retained Earnings",
                AccountType::Equity,
            ),
            ("sales_revenue", "4000", "Sales Revenue", AccountType::Revenue),
            ("other_income", "4900", "Other Income", AccountType::Revenue),
            (
                "cost_of_goods_sold",
                "5000",
                "Cost of Goods Sold",
                AccountType::Expense,
            ),
            ("rent_expense", "5200", "Rent Expense", AccountType::Expense),
            (
                "utilities_expense",
                "5300",
                "Utilities Expense",
                AccountType::Expense,
            ),
            ("other_expense", "5999", "Other Expense", AccountType::Expense),
        ];

        let mut accounts = HashMap::new();
        for (key, code, name, account_type) in chart {
            let account = account_manager
                .create_account(code.to_string(), name.to_string(), account_type)
                .await?;
            accounts.insert(key.to_string(), account);
        }

        Ok(accounts)
    }
}
