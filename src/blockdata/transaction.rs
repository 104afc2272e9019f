// Rust PRCY Library
// Written in 2019-2022 by
//   Monero Rust Contributors
// Adapted to PRCY RingCT in 2026 by
//   PRCY Rust Contributors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//

//! Transaction, transaction's inputs and outputs.
//!
//! This module support (de)serializing PRCY RingCT transactions, computing the MLSAG signing
//! hash, and output/amount discovery with a private view key and public spend key (view
//! key-pair: [`ViewPair`]).
//!
//! Amounts are never in clear: every output carries a value of zero, a Pedersen commitment in
//! tagged form, and the amount and blinding factor masked for the recipient. Inputs reference
//! their whole ring: `prevout` is the member at ring position 0 and `decoys` lists the others.
//!

use crate::consensus::encode::{self, serialize, Decodable, Encodable, VarInt};
use crate::cryptonote::hash::{self, Hashable};
use crate::cryptonote::onetime_key::{KeyChecker, KeyRecoverer};
use crate::util::address::PaymentId;
use crate::util::key::{self, KeyPair, PrivateKey, PublicKey, ViewPair};
use crate::util::ringct::{Commitment, EcdhInfo, Opening};

use k256::Scalar;
use sealed::sealed;
use thiserror::Error;

use std::{fmt, io};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Size of a pay-to-pubkey output script: `OP_PUSH33 <key> OP_CHECKSIG`.
pub const P2PK_SCRIPT_LEN: usize = 35;
const OP_PUSH33: u8 = 0x21;
const OP_CHECKSIG: u8 = 0xac;

/// Errors possible when manipulating transactions.
#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// Invalid commitment, or the masked values do not open it.
    #[error("Invalid commitment")]
    InvalidCommitment,
    /// Missing commitment.
    #[error("Missing commitment")]
    MissingCommitment,
}

/// A reference to a transaction output.
///
/// The null outpoint (all-zero hash, index `-1`) is used by coinbase-like inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct OutPoint {
    /// Hash of the transaction holding the output.
    pub hash: hash::Hash,
    /// Index of the output in that transaction.
    pub n: i32,
}

impl_consensus_encoding!(OutPoint, hash, n);

impl OutPoint {
    /// Create a reference to output `n` of transaction `hash`.
    pub fn new(hash: hash::Hash, n: i32) -> OutPoint {
        OutPoint { hash, n }
    }

    /// The null reference.
    pub fn null() -> OutPoint {
        OutPoint {
            hash: hash::Hash::null(),
            n: -1,
        }
    }

    /// Whether this is the null reference.
    pub fn is_null(&self) -> bool {
        self.n == -1 && self.hash.is_zero()
    }
}

impl Default for OutPoint {
    fn default() -> OutPoint {
        OutPoint::null()
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}:{}", self.hash.to_reversed_hex(), self.n)
    }
}

/// A transaction input spending one member of its ring.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct TxIn {
    /// Ring member at position 0.
    pub prevout: OutPoint,
    /// Unlocking script, empty for RingCT inputs.
    pub script: Vec<u8>,
    /// Sequence number.
    pub sequence: u32,
    /// Unused by RingCT inputs.
    pub encryption_key: Vec<u8>,
    /// Compressed key image of the real spend.
    pub key_image: Vec<u8>,
    /// Ring members at positions 1 and above.
    pub decoys: Vec<OutPoint>,
    /// Unused by RingCT inputs.
    pub masternode_stealth_address: Vec<u8>,
    /// Unused by RingCT inputs.
    pub s: Vec<u8>,
    /// Unused by RingCT inputs.
    pub r: Vec<u8>,
}

impl_consensus_encoding!(
    TxIn,
    prevout,
    script,
    sequence,
    encryption_key,
    key_image,
    decoys,
    masternode_stealth_address,
    s,
    r
);

impl Default for TxIn {
    fn default() -> TxIn {
        TxIn {
            prevout: OutPoint::null(),
            script: vec![],
            sequence: u32::MAX,
            encryption_key: vec![],
            key_image: vec![],
            decoys: vec![],
            masternode_stealth_address: vec![],
            s: vec![],
            r: vec![],
        }
    }
}

impl TxIn {
    /// Every ring member referenced by this input, in ring order.
    pub fn ring(&self) -> Vec<OutPoint> {
        let mut ring = Vec::with_capacity(self.decoys.len() + 1);
        ring.push(self.prevout);
        ring.extend_from_slice(&self.decoys);
        ring
    }
}

/// A transaction output paying a one-time key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct TxOut {
    /// Clear value, zero for masked outputs.
    pub value: u64,
    /// Locking script.
    pub script: Vec<u8>,
    /// Transaction private key, never published by wallets.
    pub tx_priv: Vec<u8>,
    /// Transaction public key.
    pub tx_pub: Vec<u8>,
    /// Masked amount.
    pub encoded_amount: [u8; 32],
    /// Masked blinding factor.
    pub encoded_blind: [u8; 32],
    /// Unused by wallet outputs.
    pub hash_of_key: [u8; 32],
    /// Unused by wallet outputs.
    pub masternode_stealth_address: Vec<u8>,
    /// Pedersen commitment in tagged form.
    pub commitment: Vec<u8>,
}

impl_consensus_encoding!(
    TxOut,
    value,
    script,
    tx_priv,
    tx_pub,
    encoded_amount,
    encoded_blind,
    hash_of_key,
    masternode_stealth_address,
    commitment
);

impl TxOut {
    /// Build the pay-to-pubkey script locking an output to `key`.
    pub fn p2pk_script(key: &PublicKey) -> Vec<u8> {
        let mut script = Vec::with_capacity(P2PK_SCRIPT_LEN);
        script.push(OP_PUSH33);
        script.extend_from_slice(&key.to_bytes());
        script.push(OP_CHECKSIG);
        script
    }

    /// Return the one-time public key the output is locked to, if the script is a
    /// pay-to-pubkey script.
    pub fn one_time_key(&self) -> Option<PublicKey> {
        match self.script.as_slice() {
            [OP_PUSH33, key @ .., OP_CHECKSIG] if key.len() == 33 => {
                PublicKey::from_slice(key).ok()
            }
            _ => None,
        }
    }

    /// Return the transaction public key, if well formed.
    pub fn tx_pubkey(&self) -> Option<PublicKey> {
        PublicKey::from_slice(&self.tx_pub).ok()
    }

    /// Parse the output commitment.
    pub fn parsed_commitment(&self) -> Result<Commitment, Error> {
        if self.commitment.is_empty() {
            return Err(Error::MissingCommitment);
        }
        Commitment::from_slice(&self.commitment).map_err(|_| Error::InvalidCommitment)
    }

    /// Return the masked amount and blinding factor.
    pub fn ecdh_info(&self) -> EcdhInfo {
        EcdhInfo {
            encoded_amount: self.encoded_amount,
            encoded_blind: self.encoded_blind,
        }
    }
}

/// Transaction ouput that can be redeemed by a private key pair at a given index.
///
/// Returned by [`Transaction::check_outputs`] with the amount and blinding factor already
/// unmasked and checked against the commitment.
///
/// ```rust,ignore
/// let owned_outputs = tx.check_outputs(&view_pair)?;
///
/// for out in owned_outputs {
///     // Recover the one-time private key
///     let private_key = out.recover_key(&keypair)?;
/// }
/// ```
///
#[derive(Debug)]
pub struct OwnedTxOut<'a> {
    index: usize,
    out: &'a TxOut,
    tx_pubkey: PublicKey,
    opening: Opening,
}

impl<'a> OwnedTxOut<'a> {
    /// Returns the index of this output in the transaction
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns a reference to the actual redeemable output.
    pub fn out(&self) -> &'a TxOut {
        self.out
    }

    /// Returns the associated transaction public key.
    pub fn tx_pubkey(&self) -> PublicKey {
        self.tx_pubkey
    }

    /// Returns the unblinded amount of this output.
    pub fn amount(&self) -> u64 {
        self.opening.amount
    }

    /// Returns the original blinding factor of this output.
    pub fn blinding_factor(&self) -> Scalar {
        self.opening.blinding_factor
    }

    /// Returns the commitment of this output.
    pub fn commitment(&self) -> Commitment {
        self.opening.commitment
    }

    /// Recover the one-time private key for spending the output, this requires access to the
    /// private spend key.
    pub fn recover_key(&self, keys: &KeyPair) -> Result<PrivateKey, key::Error> {
        KeyRecoverer::new(keys, self.tx_pubkey).recover()
    }
}

/// A PRCY RingCT transaction.
///
/// As transaction implements [`hash::Hashable`] it is possible to generate the transaction hash
/// with `tx.hash()`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct Transaction {
    /// Transaction version.
    pub version: u32,
    /// Inputs.
    pub inputs: Vec<TxIn>,
    /// Outputs.
    pub outputs: Vec<TxOut>,
    /// Lock time.
    pub lock_time: u32,
    /// Payment id, when paying an integrated address.
    pub payment_id: Option<PaymentId>,
    /// Transaction type.
    pub tx_type: u32,
    /// Aggregated range proof over the output commitments.
    pub bulletproofs: Vec<u8>,
    /// Public fee.
    pub tx_fee: u64,
    /// MLSAG challenge at ring position 0.
    pub c: [u8; 32],
    /// MLSAG responses, indexed `[ring_position][row]`.
    pub s: Vec<Vec<[u8; 32]>>,
    /// Key image of the balance row.
    pub tx_fee_key_image: Vec<u8>,
}

impl Default for Transaction {
    fn default() -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![],
            outputs: vec![],
            lock_time: 0,
            payment_id: None,
            tx_type: 0,
            bulletproofs: vec![],
            tx_fee: 0,
            c: [0u8; 32],
            s: vec![],
            tx_fee_key_image: vec![],
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        writeln!(fmt, "Version: {}", self.version)?;
        for input in &self.inputs {
            writeln!(
                fmt,
                "Input: {} (+{} decoys), key image {}",
                input.prevout,
                input.decoys.len(),
                hex::encode(&input.key_image)
            )?;
        }
        for output in &self.outputs {
            writeln!(fmt, "Output: commitment {}", hex::encode(&output.commitment))?;
        }
        if let Some(payment_id) = &self.payment_id {
            writeln!(fmt, "Payment id: {:x}", payment_id)?;
        }
        writeln!(fmt, "Fee: {}", self.tx_fee)
    }
}

impl Transaction {
    /// Return the number of transaction's inputs.
    pub fn nb_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Return the number of transaction's outputs.
    pub fn nb_outputs(&self) -> usize {
        self.outputs.len()
    }

    fn encode_prefix<S: io::Write>(&self, s: &mut S, zero_values: bool) -> io::Result<usize> {
        let mut len = self.version.consensus_encode(s)?;
        len += self.inputs.consensus_encode(s)?;
        if zero_values {
            len += VarInt(self.outputs.len() as u64).consensus_encode(s)?;
            for output in &self.outputs {
                let output = TxOut {
                    value: 0,
                    ..output.clone()
                };
                len += output.consensus_encode(s)?;
            }
        } else {
            len += self.outputs.consensus_encode(s)?;
        }
        len += self.lock_time.consensus_encode(s)?;
        match &self.payment_id {
            Some(payment_id) => {
                len += 1u8.consensus_encode(s)?;
                len += payment_id.0.consensus_encode(s)?;
            }
            None => len += 0u8.consensus_encode(s)?,
        }
        len += self.tx_type.consensus_encode(s)?;
        Ok(len)
    }

    /// Bytes hashed to produce the MLSAG message: the transaction up to the fee with every
    /// output value zeroed, without range proof nor signature.
    pub fn signing_preimage(&self) -> Vec<u8> {
        let mut encoder = Vec::new();
        self.encode_prefix(&mut encoder, true)
            .and_then(|_| self.tx_fee.consensus_encode(&mut encoder))
            .expect("vec writes don't error");
        encoder
    }

    /// The MLSAG message, `hash256` of [`Transaction::signing_preimage`].
    pub fn signature_hash(&self) -> hash::Hash {
        hash::Hash::new(self.signing_preimage())
    }

    /// Transaction id as displayed by explorers and the daemon, byte-reversed hex.
    pub fn txid_hex(&self) -> String {
        self.hash().to_reversed_hex()
    }

    /// Iterate over transaction outputs and find outputs related to view pair.
    ///
    /// An output is ours when its one-time key derives from our keys and its transaction public
    /// key. Its masked amount and blinding factor must then open its commitment.
    pub fn check_outputs(&self, pair: &ViewPair) -> Result<Vec<OwnedTxOut>, Error> {
        let checker = KeyChecker::new(pair);
        self.check_outputs_with(&checker)
    }

    /// Iterate over transaction outputs using the provided [`KeyChecker`] to find outputs
    /// related to the `KeyChecker`'s view pair.
    pub fn check_outputs_with(&self, checker: &KeyChecker) -> Result<Vec<OwnedTxOut>, Error> {
        self.outputs
            .iter()
            .enumerate()
            .filter_map(|(i, out)| {
                let key = out.one_time_key()?;
                let tx_pubkey = out.tx_pubkey()?;
                let shared = checker.check(&key, &tx_pubkey)?;
                Some((i, out, tx_pubkey, shared))
            })
            .map(|(i, out, tx_pubkey, shared)| {
                let commitment = out.parsed_commitment()?;
                let opening = out
                    .ecdh_info()
                    .open_commitment(&shared, &commitment)
                    .ok_or(Error::InvalidCommitment)?;

                Ok(OwnedTxOut {
                    index: i,
                    out,
                    tx_pubkey,
                    opening,
                })
            })
            .collect()
    }
}

impl hash::Hashable for Transaction {
    fn hash(&self) -> hash::Hash {
        hash::Hash::new(serialize(self))
    }
}

impl Decodable for Transaction {
    fn consensus_decode<D: io::Read>(d: &mut D) -> Result<Transaction, encode::Error> {
        let version = Decodable::consensus_decode(d)?;
        let inputs = Decodable::consensus_decode(d)?;
        let outputs = Decodable::consensus_decode(d)?;
        let lock_time = Decodable::consensus_decode(d)?;
        let has_payment_id: u8 = Decodable::consensus_decode(d)?;
        let payment_id = if has_payment_id != 0 {
            let bytes: [u8; 8] = Decodable::consensus_decode(d)?;
            Some(PaymentId(bytes))
        } else {
            None
        };

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
            payment_id,
            tx_type: Decodable::consensus_decode(d)?,
            bulletproofs: Decodable::consensus_decode(d)?,
            tx_fee: Decodable::consensus_decode(d)?,
            c: Decodable::consensus_decode(d)?,
            s: Decodable::consensus_decode(d)?,
            tx_fee_key_image: Decodable::consensus_decode(d)?,
        })
    }
}

#[sealed]
impl crate::consensus::encode::Encodable for Transaction {
    fn consensus_encode<S: io::Write>(&self, s: &mut S) -> Result<usize, io::Error> {
        let mut len = self.encode_prefix(s, false)?;
        len += self.bulletproofs.consensus_encode(s)?;
        len += self.tx_fee.consensus_encode(s)?;
        len += self.c.consensus_encode(s)?;
        len += self.s.consensus_encode(s)?;
        Ok(len + self.tx_fee_key_image.consensus_encode(s)?)
    }
}
