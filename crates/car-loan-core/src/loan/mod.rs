//! Car loan planning: amortization schedule plus the ancillary vehicle costs
//! (annual auto tax, diesel environmental charge) folded into each month.

pub mod amortization;
pub mod env_charge;
pub mod tax;

#[cfg(feature = "quote")]
pub mod quote;
