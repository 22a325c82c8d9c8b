//! # Retail Ledger
//!
//! A double-entry bookkeeping core for point-of-sale systems: turns
//! completed sales and manual income/expense transactions into balanced
//! journal entries and aggregates them into financial reports.
//!
//! ## Features
//!
//! - **Journal posting engine**: Posts balanced entries for sales and
//!   manual transactions, with soft-failure semantics so accounting
//!   misconfiguration never blocks the business operation
//! - **Account resolution**: Maps payment methods and transaction
//!   categories to accounts through explicit configuration with defined
//!   fallbacks
//! - **Double-entry validation**: Every entry's debits equal its credits,
//!   enforced before anything is persisted
//! - **Financial reporting**: General ledger, trial balance, profit and
//!   loss, balance sheet, and cash flow, replayed from journal lines
//! - **Storage abstraction**: Database-agnostic design with trait-based
//!   storage
//!
//! ## Quick Start
//!
//! ```rust
//! use retail_ledger::{AccountingConfig, Ledger, MemoryStorage, Sale};
//! use bigdecimal::BigDecimal;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), retail_ledger::LedgerError> {
//! let mut ledger = Ledger::new(MemoryStorage::new(), AccountingConfig::default());
//! ledger.seed_retail_chart().await?;
//!
//! let sale = Sale {
//!     invoice_number: "INV-1001".to_string(),
//!     total_amount: BigDecimal::from(110),
//!     subtotal: BigDecimal::from(100),
//!     discount: BigDecimal::from(0),
//!     tax: BigDecimal::from(10),
//!     payment_method: "cash".to_string(),
//!     customer_name: None,
//!     created_at: chrono::Utc::now().naive_utc(),
//!     user_id: None,
//! };
//!
//! let outcome = ledger.create_from_sale(&sale).await;
//! assert!(outcome.is_posted());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ledger::*;
pub use traits::*;
pub use types::*;
pub use utils::memory_storage::MemoryStorage;
