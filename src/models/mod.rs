pub mod breakdown;
pub mod receipt;

pub use breakdown::{BreakdownError, ExpenseBreakdown};
pub use receipt::{StagedReceipt, RECEIPT_FIELD};
