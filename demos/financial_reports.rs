//! Financial reporting example: a month of retail activity rolled up
//! into general ledger, trial balance, P&L, balance sheet, and cash flow

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use retail_ledger::utils::MemoryStorage;
use retail_ledger::{
    AccountingConfig, CashFlowBucket, JournalEntryBuilder, Ledger, Sale, SourceTransaction,
    TransactionKind, TransactionOrigin,
};

fn sale(invoice: &str, method: &str, day: u32, total: i64, subtotal: i64, tax: i64) -> Sale {
    Sale {
        invoice_number: invoice.to_string(),
        total_amount: BigDecimal::from(total),
        subtotal: BigDecimal::from(subtotal),
        discount: BigDecimal::from(0),
        tax: BigDecimal::from(tax),
        payment_method: method.to_string(),
        customer_name: None,
        created_at: NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap(),
        user_id: None,
    }
}

fn expense(id: i64, day: u32, amount: i64, category: &str, description: &str) -> SourceTransaction {
    SourceTransaction {
        id,
        date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        kind: TransactionKind::Expense,
        amount: BigDecimal::from(amount),
        category: Some(category.to_string()),
        payment_method: Some("cash".to_string()),
        reference_number: None,
        description: description.to_string(),
        origin: TransactionOrigin::Manual,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("📈 Retail Ledger - Financial Reports Example\n");

    let mut config = AccountingConfig::default();
    config
        .payment_method_accounts
        .insert("card".to_string(), "1100".to_string());
    config
        .category_accounts
        .insert("Rent".to_string(), "5200".to_string());
    config
        .category_accounts
        .insert("Utilities".to_string(), "5300".to_string());
    config
        .cash_flow_buckets
        .insert("Equipment".to_string(), CashFlowBucket::Investing);
    config
        .cash_flow_buckets
        .insert("Owner Capital".to_string(), CashFlowBucket::Financing);

    let mut ledger = Ledger::new(MemoryStorage::new(), config);
    ledger.seed_retail_chart().await?;

    // Opening capital, entered by the bookkeeper
    let capital = JournalEntryBuilder::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        "OPEN-1".to_string(),
        "Opening capital".to_string(),
    )
    .created_by("owner".to_string())
    .category("Owner Capital".to_string())
    .debit("1000".to_string(), BigDecimal::from(10000))
    .credit("3000".to_string(), BigDecimal::from(10000))
    .build()?;
    ledger.post_manual_entry(capital).await?;
    println!("  ✓ Posted opening capital of $10,000\n");

    // A month of trading
    println!("💰 Posting January activity...");
    let sales = [
        sale("INV-1001", "cash", 3, 550, 500, 50),
        sale("INV-1002", "card", 7, 1210, 1100, 110),
        sale("INV-1003", "cash", 12, 330, 300, 30),
        sale("INV-1004", "card", 21, 880, 800, 80),
    ];
    for sale in &sales {
        assert!(ledger.create_from_sale(sale).await.is_posted());
    }

    let expenses = [
        expense(1, 5, 800, "Rent", "January shop rent"),
        expense(2, 15, 120, "Utilities", "Electricity bill"),
        expense(3, 18, 450, "Equipment", "Barcode scanner"),
    ];
    for expense in &expenses {
        assert!(ledger.create_from_transaction(expense).await.is_posted());
    }
    println!(
        "  ✓ Posted {} sales and {} expenses\n",
        sales.len(),
        expenses.len()
    );

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

    // General ledger for the cash account
    let cash_ledger = ledger.general_ledger("1000", start, end).await?;
    println!(
        "📒 General Ledger - {} ({}):",
        cash_ledger.account.name, cash_ledger.account.code
    );
    println!("  Opening balance: ${}", cash_ledger.opening_balance);
    for row in &cash_ledger.rows {
        println!(
            "    {}  {:<10} debit ${:<6} credit ${:<6} balance ${}",
            row.date, row.reference, row.debit, row.credit, row.running_balance
        );
    }
    println!("  Closing balance: ${}\n", cash_ledger.closing_balance);

    // Trial balance
    let trial = ledger.trial_balance(end).await?;
    println!("🔍 Trial Balance as of January 31, 2024:");
    for row in trial.rows.iter().filter(|r| {
        r.total_debit != BigDecimal::from(0) || r.total_credit != BigDecimal::from(0)
    }) {
        println!(
            "    {} {:<20} ${:<8} ${}",
            row.account.code, row.account.name, row.total_debit, row.total_credit
        );
    }
    println!(
        "  Totals: ${} / ${} (balanced: {})\n",
        trial.total_debits, trial.total_credits, trial.is_balanced
    );

    // Profit and loss
    let pnl = ledger.profit_and_loss(start, end).await?;
    println!("💹 Profit & Loss for January 2024:");
    println!("  Total Revenue:  ${}", pnl.total_revenue);
    println!("  Total Expenses: ${}", pnl.total_expenses);
    println!("  Net Income:     ${}\n", pnl.net_income);

    // Balance sheet
    let sheet = ledger.balance_sheet(end).await?;
    println!("📊 Balance Sheet as of January 31, 2024:");
    println!("  Total Assets:      ${}", sheet.total_assets);
    println!("  Total Liabilities: ${}", sheet.total_liabilities);
    println!("  Total Equity:      ${}", sheet.total_equity);
    println!(
        "  Balanced: {}\n",
        if sheet.is_balanced { "✅ Yes" } else { "❌ No" }
    );

    // Cash flow
    let cash_flow = ledger.cash_flow(start, end).await?;
    println!("💧 Cash Flow for January 2024:");
    println!("  Operating: ${}", cash_flow.net_operating_cash_flow);
    println!("  Investing: ${}", cash_flow.net_investing_cash_flow);
    println!("  Financing: ${}", cash_flow.net_financing_cash_flow);
    println!("  Net:       ${}\n", cash_flow.net_cash_flow);

    // Integrity check
    let report = ledger.check_integrity(end).await?;
    if report.is_valid {
        println!("✅ Ledger integrity check passed!");
    } else {
        println!("❌ Ledger integrity check failed:");
        for issue in &report.issues {
            println!("    - {}", issue);
        }
    }

    Ok(())
}
