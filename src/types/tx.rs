// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transaction, input and output definitions.

use serde::{Deserialize, Serialize};

use crate::hash::{signing_payload, tx_hash};
use crate::types::amount::Amount;
use crate::types::id::{AuthKey, OutputRef, TxHash};

/// A spendable unit: value plus the key allowed to spend it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Output {
    pub value: Amount,
    pub key: AuthKey,
}

impl Output {
    pub fn new(value: Amount, key: AuthKey) -> Self {
        Self { value, key }
    }
}

/// Claim on an existing output, with the signature authorizing it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Input {
    pub prev: OutputRef,
    #[serde(with = "hex")]
    pub signature: Vec<u8>,
}

impl Input {
    pub fn new(prev: OutputRef, signature: Vec<u8>) -> Self {
        Self { prev, signature }
    }
}

/// A fully constructed transaction.
///
/// Fields are private so the cached hash always matches the content. The
/// serialized form carries inputs and outputs only; the hash is recomputed on
/// the way back in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTransaction", into = "RawTransaction")]
pub struct Transaction {
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    hash: TxHash,
}

#[derive(Clone, Serialize, Deserialize)]
struct RawTransaction {
    inputs: Vec<Input>,
    outputs: Vec<Output>,
}

impl From<RawTransaction> for Transaction {
    fn from(raw: RawTransaction) -> Self {
        Transaction::new(raw.inputs, raw.outputs)
    }
}

impl From<Transaction> for RawTransaction {
    fn from(tx: Transaction) -> Self {
        RawTransaction {
            inputs: tx.inputs,
            outputs: tx.outputs,
        }
    }
}

impl Transaction {
    pub fn new(inputs: Vec<Input>, outputs: Vec<Output>) -> Self {
        let hash = tx_hash(&inputs, &outputs);
        Self { inputs, outputs, hash }
    }

    pub fn hash(&self) -> TxHash {
        self.hash
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Bytes the owner of input `index` must have signed.
    pub fn signing_payload(&self, index: usize) -> Vec<u8> {
        signing_payload(self.inputs.iter().map(|i| &i.prev), &self.outputs, index)
    }

    /// References this transaction's outputs will occupy once committed.
    pub fn output_refs(&self) -> impl Iterator<Item = OutputRef> + '_ {
        (0..self.outputs.len()).map(move |i| OutputRef::new(self.hash, i as u32))
    }

    /// Consumes the transaction, returning its parts.
    pub fn into_parts(self) -> (Vec<Input>, Vec<Output>) {
        (self.inputs, self.outputs)
    }
}
