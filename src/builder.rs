// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transaction construction.
//!
//! Collects input references and outputs, signs each input over its
//! payload, then freezes everything into a [`Transaction`]. The signing keys
//! are borrowed for the call and never retained.

use ed25519_dalek::SigningKey;

use crate::hash::signing_payload;
use crate::signature::sign;
use crate::types::amount::Amount;
use crate::types::id::{AuthKey, OutputRef};
use crate::types::tx::{Input, Output, Transaction};

#[derive(Clone, Debug, Default)]
pub struct TransactionBuilder {
    prevs: Vec<OutputRef>,
    signatures: Vec<Vec<u8>>,
    outputs: Vec<Output>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, prev: OutputRef) -> Self {
        self.prevs.push(prev);
        self.signatures.push(Vec::new());
        self
    }

    pub fn output(mut self, value: Amount, key: AuthKey) -> Self {
        self.outputs.push(Output::new(value, key));
        self
    }

    /// Payload for input `index` given the inputs and outputs added so far.
    pub fn payload(&self, index: usize) -> Vec<u8> {
        signing_payload(&self.prevs, &self.outputs, index)
    }

    /// Signs input `index`. Returns `false` if there is no such input.
    pub fn sign_input(&mut self, index: usize, key: &SigningKey) -> bool {
        if index >= self.prevs.len() {
            return false;
        }
        self.signatures[index] = sign(key, &self.payload(index));
        true
    }

    /// Signs every input with the same key.
    pub fn sign_all(mut self, key: &SigningKey) -> Self {
        for index in 0..self.prevs.len() {
            self.sign_input(index, key);
        }
        self
    }

    pub fn build(self) -> Transaction {
        let inputs = self
            .prevs
            .into_iter()
            .zip(self.signatures)
            .map(|(prev, signature)| Input::new(prev, signature))
            .collect();
        Transaction::new(inputs, self.outputs)
    }
}
