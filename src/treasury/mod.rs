//! Funds movement.
//!
//! The registry never holds real money itself. Forwarding contributions and
//! premiums to the owner and paying insurees are delegated to a `Treasury`
//! supplied by the host, and every such transfer may fail.

pub mod ledger;
pub mod mock;
pub mod traits;

pub use ledger::LedgerTreasury;
pub use mock::MockTreasury;
pub use traits::{PayoutSource, Transfer, TransferError, TransferResult, Treasury};
