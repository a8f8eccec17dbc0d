// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod amount;
pub mod id;
pub mod tx;

pub use amount::Amount;
pub use id::{AuthKey, OutputRef, TxHash};
pub use tx::{Input, Output, Transaction};
