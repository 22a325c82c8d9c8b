//! Read-side ledger aggregation: general ledger, trial balance, and
//! financial statements replayed from posted journal entries.
//!
//! The aggregator never mutates state and keeps no materialized balances;
//! every figure is recomputed from the journal lines. An unbalanced entry
//! found during replay is a data-integrity defect: it is included in the
//! totals (hiding it would make the books look healthier than they are),
//! flagged in the integrity report, and logged as a warning.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::config::{AccountingConfig, CashFlowBucket};
use crate::traits::LedgerStorage;
use crate::types::*;

/// An account's signed balance, measured from its normal side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account: Account,
    pub balance: BigDecimal,
}

/// One account's gross activity in a trial balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account: Account,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
}

/// Trial balance as of a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub as_of_date: NaiveDate,
    pub rows: Vec<TrialBalanceRow>,
    pub total_debits: BigDecimal,
    pub total_credits: BigDecimal,
    pub is_balanced: bool,
    /// References of entries whose own lines do not balance; their
    /// amounts are still included in the totals above
    pub unbalanced_references: Vec<String>,
}

/// One journal line rendered into an account's ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub reference: String,
    pub description: String,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    pub running_balance: BigDecimal,
}

/// General ledger for one account over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralLedger {
    pub account: Account,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub opening_balance: BigDecimal,
    pub rows: Vec<LedgerRow>,
    pub total_debits: BigDecimal,
    pub total_credits: BigDecimal,
    pub closing_balance: BigDecimal,
}

/// Profit and loss statement for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub revenue: Vec<AccountBalance>,
    pub expenses: Vec<AccountBalance>,
    pub total_revenue: BigDecimal,
    pub total_expenses: BigDecimal,
    pub net_income: BigDecimal,
}

/// Balance sheet as of a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub as_of_date: NaiveDate,
    pub assets: Vec<AccountBalance>,
    pub liabilities: Vec<AccountBalance>,
    pub equity: Vec<AccountBalance>,
    pub total_assets: BigDecimal,
    pub total_liabilities: BigDecimal,
    pub total_equity: BigDecimal,
    pub is_balanced: bool,
}

/// One entry's net cash movement in a cash flow statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowItem {
    pub description: String,
    pub amount: BigDecimal,
}

/// Cash flow statement for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub operating_activities: Vec<CashFlowItem>,
    pub investing_activities: Vec<CashFlowItem>,
    pub financing_activities: Vec<CashFlowItem>,
    pub net_operating_cash_flow: BigDecimal,
    pub net_investing_cash_flow: BigDecimal,
    pub net_financing_cash_flow: BigDecimal,
    pub net_cash_flow: BigDecimal,
}

/// Report on ledger data integrity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub as_of_date: NaiveDate,
    pub is_valid: bool,
    pub issues: Vec<String>,
    /// References of entries whose own lines do not balance
    pub unbalanced_references: Vec<String>,
    pub total_debits: BigDecimal,
    pub total_credits: BigDecimal,
}

/// Computes read-only financial views from posted journal entries
pub struct LedgerAggregator<S: LedgerStorage> {
    storage: S,
    config: AccountingConfig,
}

impl<S: LedgerStorage> LedgerAggregator<S> {
    /// Create an aggregator over the given storage and configuration
    pub fn new(storage: S, config: AccountingConfig) -> Self {
        Self { storage, config }
    }

    /// An account's balance as of the start of a date: the signed sum of
    /// every posted line strictly before it
    pub async fn opening_balance(
        &self,
        code: &str,
        as_of_date: NaiveDate,
    ) -> LedgerResult<BigDecimal> {
        let account = self.account_required(code).await?;

        let mut balance = BigDecimal::from(0);
        if let Some(before) = as_of_date.pred_opt() {
            let entries = self
                .storage
                .get_entries_for_account(code, None, Some(before))
                .await?;
            for entry in entries.iter().filter(|e| e.status == EntryStatus::Posted) {
                for line in entry.lines.iter().filter(|l| l.account_code == code) {
                    balance += line.signed_amount(account.normal_balance);
                }
            }
        }
        Ok(balance)
    }

    /// General ledger for one account over a period: opening balance, one
    /// row per journal line with a running balance, and period totals
    pub async fn general_ledger(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LedgerResult<GeneralLedger> {
        let account = self.account_required(code).await?;
        let opening_balance = self.opening_balance(code, start_date).await?;

        let entries = self
            .storage
            .get_entries_for_account(code, Some(start_date), Some(end_date))
            .await?;

        let mut rows = Vec::new();
        let mut running = opening_balance.clone();
        let mut total_debits = BigDecimal::from(0);
        let mut total_credits = BigDecimal::from(0);

        for entry in entries.iter().filter(|e| e.status == EntryStatus::Posted) {
            for line in entry.lines.iter().filter(|l| l.account_code == code) {
                running += line.signed_amount(account.normal_balance);
                total_debits += &line.debit;
                total_credits += &line.credit;
                rows.push(LedgerRow {
                    date: entry.date,
                    reference: entry.reference.clone(),
                    description: entry.description.clone(),
                    debit: line.debit.clone(),
                    credit: line.credit.clone(),
                    running_balance: running.clone(),
                });
            }
        }

        Ok(GeneralLedger {
            account,
            start_date,
            end_date,
            opening_balance,
            closing_balance: running,
            rows,
            total_debits,
            total_credits,
        })
    }

    /// Trial balance as of a date: every account's gross debits and
    /// credits, plus the ledger-wide identity check
    pub async fn trial_balance(&self, as_of_date: NaiveDate) -> LedgerResult<TrialBalance> {
        let accounts = self.storage.list_accounts(None).await?;
        let (movement, unbalanced_references) =
            self.movement_by_account(None, Some(as_of_date)).await?;

        let mut rows = Vec::new();
        let mut total_debits = BigDecimal::from(0);
        let mut total_credits = BigDecimal::from(0);

        for account in accounts {
            let (debit, credit) = movement
                .get(&account.code)
                .cloned()
                .unwrap_or((BigDecimal::from(0), BigDecimal::from(0)));
            total_debits += &debit;
            total_credits += &credit;
            rows.push(TrialBalanceRow {
                account,
                total_debit: debit,
                total_credit: credit,
            });
        }

        let is_balanced = total_debits == total_credits;
        if !is_balanced {
            warn!(
                total_debits = %total_debits,
                total_credits = %total_credits,
                "trial balance does not balance"
            );
        }

        Ok(TrialBalance {
            as_of_date,
            rows,
            total_debits,
            total_credits,
            is_balanced,
            unbalanced_references,
        })
    }

    /// Profit and loss for a period: revenue account activity less
    /// expense account activity, each measured from its normal side
    pub async fn profit_and_loss(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LedgerResult<ProfitAndLoss> {
        let (movement, _) = self
            .movement_by_account(Some(start_date), Some(end_date))
            .await?;

        let revenue = self
            .type_balances(AccountType::Revenue, &movement)
            .await?;
        let expenses = self
            .type_balances(AccountType::Expense, &movement)
            .await?;

        let total_revenue: BigDecimal = revenue.iter().map(|ab| &ab.balance).sum();
        let total_expenses: BigDecimal = expenses.iter().map(|ab| &ab.balance).sum();
        let net_income = &total_revenue - &total_expenses;

        Ok(ProfitAndLoss {
            start_date,
            end_date,
            revenue,
            expenses,
            total_revenue,
            total_expenses,
            net_income,
        })
    }

    /// Balance sheet as of a date.
    ///
    /// Net income since inception is folded into equity as a synthetic
    /// "Net Income" row so the sheet satisfies assets = liabilities +
    /// equity whenever the underlying entries balance.
    pub async fn balance_sheet(&self, as_of_date: NaiveDate) -> LedgerResult<BalanceSheet> {
        let (movement, _) = self.movement_by_account(None, Some(as_of_date)).await?;

        let assets = self.type_balances(AccountType::Asset, &movement).await?;
        let liabilities = self
            .type_balances(AccountType::Liability, &movement)
            .await?;
        let mut equity = self.type_balances(AccountType::Equity, &movement).await?;

        let revenue = self
            .type_balances(AccountType::Revenue, &movement)
            .await?;
        let expenses = self
            .type_balances(AccountType::Expense, &movement)
            .await?;
        let total_revenue: BigDecimal = revenue.iter().map(|ab| &ab.balance).sum();
        let total_expenses: BigDecimal = expenses.iter().map(|ab| &ab.balance).sum();
        let net_income = &total_revenue - &total_expenses;

        if net_income != BigDecimal::from(0) {
            equity.push(AccountBalance {
                account: Account::new("net_income", "Net Income", AccountType::Equity),
                balance: net_income,
            });
        }

        let total_assets: BigDecimal = assets.iter().map(|ab| &ab.balance).sum();
        let total_liabilities: BigDecimal = liabilities.iter().map(|ab| &ab.balance).sum();
        let total_equity: BigDecimal = equity.iter().map(|ab| &ab.balance).sum();
        let is_balanced = total_assets == &total_liabilities + &total_equity;

        Ok(BalanceSheet {
            as_of_date,
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            is_balanced,
        })
    }

    /// Cash flow statement for a period.
    ///
    /// Measures each posted entry's net movement across the configured
    /// cash/bank accounts (inflow positive) and buckets it by the entry's
    /// category tag; unclassified categories count as operating activity.
    pub async fn cash_flow(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LedgerResult<CashFlowStatement> {
        let cash_codes = self.config.cash_account_codes();
        let entries = self
            .storage
            .get_entries(Some(start_date), Some(end_date))
            .await?;

        let mut operating_activities = Vec::new();
        let mut investing_activities = Vec::new();
        let mut financing_activities = Vec::new();

        for entry in entries.iter().filter(|e| e.status == EntryStatus::Posted) {
            let mut cash_delta = BigDecimal::from(0);
            for line in entry
                .lines
                .iter()
                .filter(|l| cash_codes.contains(&l.account_code))
            {
                // Cash accounts are debit-normal: debits are inflows
                cash_delta += line.signed_amount(BalanceSide::Debit);
            }
            if cash_delta == BigDecimal::from(0) {
                continue;
            }

            let item = CashFlowItem {
                description: entry.description.clone(),
                amount: cash_delta,
            };
            match self.config.bucket_for_category(entry.category.as_deref()) {
                CashFlowBucket::Operating => operating_activities.push(item),
                CashFlowBucket::Investing => investing_activities.push(item),
                CashFlowBucket::Financing => financing_activities.push(item),
            }
        }

        let net_operating_cash_flow: BigDecimal =
            operating_activities.iter().map(|i| &i.amount).sum();
        let net_investing_cash_flow: BigDecimal =
            investing_activities.iter().map(|i| &i.amount).sum();
        let net_financing_cash_flow: BigDecimal =
            financing_activities.iter().map(|i| &i.amount).sum();
        let net_cash_flow =
            &net_operating_cash_flow + &net_investing_cash_flow + &net_financing_cash_flow;

        Ok(CashFlowStatement {
            start_date,
            end_date,
            operating_activities,
            investing_activities,
            financing_activities,
            net_operating_cash_flow,
            net_investing_cash_flow,
            net_financing_cash_flow,
            net_cash_flow,
        })
    }

    /// Check the ledger's integrity as of a date: every entry balanced,
    /// trial balance identity, and balance sheet equation
    pub async fn check_integrity(&self, as_of_date: NaiveDate) -> LedgerResult<IntegrityReport> {
        let trial_balance = self.trial_balance(as_of_date).await?;
        let balance_sheet = self.balance_sheet(as_of_date).await?;
        let unbalanced_references = trial_balance.unbalanced_references.clone();

        let mut issues = Vec::new();
        for reference in &unbalanced_references {
            issues.push(format!("Journal entry '{}' does not balance", reference));
        }
        if !trial_balance.is_balanced {
            issues.push(format!(
                "Trial balance is not balanced: debits = {}, credits = {}",
                trial_balance.total_debits, trial_balance.total_credits
            ));
        }
        if !balance_sheet.is_balanced {
            issues.push(format!(
                "Balance sheet is not balanced: assets = {}, liabilities + equity = {}",
                balance_sheet.total_assets,
                &balance_sheet.total_liabilities + &balance_sheet.total_equity
            ));
        }

        for issue in &issues {
            warn!(issue = %issue, "ledger integrity issue");
        }

        Ok(IntegrityReport {
            as_of_date,
            is_valid: issues.is_empty(),
            issues,
            unbalanced_references,
            total_debits: trial_balance.total_debits,
            total_credits: trial_balance.total_credits,
        })
    }

    async fn account_required(&self, code: &str) -> LedgerResult<Account> {
        self.storage
            .get_account(code)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(code.to_string()))
    }

    /// Gross (debit, credit) totals per account code over posted entries
    /// in the range, in one pass over the journal, plus the references of
    /// any entries whose own lines do not balance
    async fn movement_by_account(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<(HashMap<String, (BigDecimal, BigDecimal)>, Vec<String>)> {
        let entries = self.storage.get_entries(start_date, end_date).await?;

        let mut movement: HashMap<String, (BigDecimal, BigDecimal)> = HashMap::new();
        let mut unbalanced_references = Vec::new();
        for entry in entries.iter().filter(|e| e.status == EntryStatus::Posted) {
            if !entry.is_balanced() {
                warn!(
                    reference = %entry.reference,
                    "unbalanced journal entry included in aggregation"
                );
                unbalanced_references.push(entry.reference.clone());
            }
            for line in &entry.lines {
                let slot = movement
                    .entry(line.account_code.clone())
                    .or_insert_with(|| (BigDecimal::from(0), BigDecimal::from(0)));
                slot.0 += &line.debit;
                slot.1 += &line.credit;
            }
        }
        Ok((movement, unbalanced_references))
    }

    /// Signed balances for every account of a type, from the precomputed
    /// movement map
    async fn type_balances(
        &self,
        account_type: AccountType,
        movement: &HashMap<String, (BigDecimal, BigDecimal)>,
    ) -> LedgerResult<Vec<AccountBalance>> {
        let accounts = self.storage.list_accounts(Some(account_type)).await?;
        Ok(accounts
            .into_iter()
            .map(|account| {
                let balance = match movement.get(&account.code) {
                    Some((debit, credit)) => match account.normal_balance {
                        BalanceSide::Debit => debit - credit,
                        BalanceSide::Credit => credit - debit,
                    },
                    None => BigDecimal::from(0),
                };
                AccountBalance { account, balance }
            })
            .collect())
    }
}
