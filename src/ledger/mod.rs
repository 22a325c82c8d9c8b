//! Ledger module containing account management, journal posting, and
//! report aggregation

pub mod account;
pub mod core;
pub mod posting;
pub mod reports;
pub mod resolver;

pub use account::*;
pub use core::*;
pub use posting::*;
pub use reports::*;
pub use resolver::*;
