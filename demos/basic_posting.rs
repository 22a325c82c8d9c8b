//! Basic journal posting example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use retail_ledger::utils::MemoryStorage;
use retail_ledger::{
    AccountingConfig, Ledger, PostingOutcome, Sale, SourceTransaction, TransactionKind,
    TransactionOrigin,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("🧾 Retail Ledger - Basic Posting Example\n");

    // 1. Configure account resolution
    let mut config = AccountingConfig::default();
    config
        .payment_method_accounts
        .insert("card".to_string(), "1100".to_string());
    config
        .category_accounts
        .insert("Rent".to_string(), "5200".to_string());

    let storage = MemoryStorage::new();
    let mut ledger = Ledger::new(storage, config);

    // 2. Seed the chart of accounts
    println!("📊 Seeding Chart of Accounts...");
    let accounts = ledger.seed_retail_chart().await?;
    let mut codes: Vec<_> = accounts.values().collect();
    codes.sort_by(|a, b| a.code.cmp(&b.code));
    for account in codes {
        println!(
            "  ✓ {} - {} ({:?})",
            account.code, account.name, account.account_type
        );
    }
    println!();

    // 3. Where will payments land?
    println!("🔗 Payment method resolution:");
    for method in ["cash", "card", "qr"] {
        match ledger.resolver().resolve_for_payment_method(Some(method)).await? {
            Some(account) => println!("  {} -> {} ({})", method, account.code, account.name),
            None => println!("  {} -> no account resolves", method),
        }
    }
    println!();

    // 4. Post a taxed cash sale
    println!("💰 Posting Business Events...\n");
    let sale = Sale {
        invoice_number: "INV-1001".to_string(),
        total_amount: BigDecimal::from(110),
        subtotal: BigDecimal::from(100),
        discount: BigDecimal::from(0),
        tax: BigDecimal::from(10),
        payment_method: "cash".to_string(),
        customer_name: Some("Walk-in".to_string()),
        created_at: NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap(),
        user_id: Some("cashier-1".to_string()),
    };

    match ledger.create_from_sale(&sale).await {
        PostingOutcome::Posted(entry) => {
            println!("  ✓ Posted sale {}:", entry.reference);
            for line in &entry.lines {
                println!(
                    "      {}  debit ${}  credit ${}",
                    line.account_code, line.debit, line.credit
                );
            }
        }
        PostingOutcome::Skipped(reason) => println!("  ⚠ Sale skipped: {}", reason),
        PostingOutcome::Failed(err) => println!("  ❌ Sale failed: {}", err),
    }

    // 5. Post a manual rent payment
    let rent = SourceTransaction {
        id: 1,
        date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        kind: TransactionKind::Expense,
        amount: BigDecimal::from(800),
        category: Some("Rent".to_string()),
        payment_method: Some("cash".to_string()),
        reference_number: None,
        description: "January shop rent".to_string(),
        origin: TransactionOrigin::Manual,
    };

    match ledger.create_from_transaction(&rent).await {
        PostingOutcome::Posted(entry) => {
            println!("  ✓ Posted expense {} ({})", entry.reference, entry.description);
        }
        PostingOutcome::Skipped(reason) => println!("  ⚠ Expense skipped: {}", reason),
        PostingOutcome::Failed(err) => println!("  ❌ Expense failed: {}", err),
    }

    // 6. Transactions mirroring a sale are never double-posted
    let mirror = SourceTransaction {
        id: 2,
        date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        kind: TransactionKind::Income,
        amount: BigDecimal::from(110),
        category: None,
        payment_method: Some("cash".to_string()),
        reference_number: Some("INV-1001".to_string()),
        description: "Mirror of sale INV-1001".to_string(),
        origin: TransactionOrigin::Sale,
    };

    match ledger.create_from_transaction(&mirror).await {
        PostingOutcome::Skipped(reason) => {
            println!("  ⚠ Mirror transaction skipped as expected: {}", reason)
        }
        outcome => println!("  ❌ Unexpected outcome: {:?}", outcome),
    }
    println!();

    // 7. Trial balance stays balanced through deletions
    let as_of = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let trial = ledger.trial_balance(as_of).await?;
    println!("🔍 Trial Balance as of January 31, 2024:");
    println!("  Total Debits:  ${}", trial.total_debits);
    println!("  Total Credits: ${}", trial.total_credits);
    println!(
        "  Balanced: {}",
        if trial.is_balanced { "✅ Yes" } else { "❌ No" }
    );
    println!();

    println!("🗑 Deleting the sale's journal entry...");
    let removed = ledger.delete_for_sale(&sale).await?;
    println!("  First delete removed an entry: {}", removed);
    let removed = ledger.delete_for_sale(&sale).await?;
    println!("  Second delete was a no-op:     {}", !removed);

    let trial = ledger.trial_balance(as_of).await?;
    println!(
        "  Trial balance after deletion: ${} / ${} (balanced: {})",
        trial.total_debits, trial.total_credits, trial.is_balanced
    );

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
