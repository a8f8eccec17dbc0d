// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod encode;
pub mod decode;

pub use decode::decode_ledger;
pub use encode::encode_ledger;
