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

//! External collaborators and the complete send flow.
//!
//! Decoys, range proofs and broadcast are provided by services outside this crate, modelled as
//! asynchronous traits. [`WalletContext`] owns one of each and runs the full flow: select coins,
//! fetch decoys, build and sign, attach the range proof, broadcast.
//!

use std::collections::BTreeMap;
use std::io;

use async_trait::async_trait;
use k256::Scalar;
use log::{debug, info, warn};
use rand::Rng;
use rand_core::{CryptoRng, RngCore};
use sealed::sealed;

use crate::blockdata::transaction::Transaction;
use crate::consensus::encode::{self, decode_length, serialize_hex, Decodable, Encodable, VarInt};
use crate::network::Params;
use crate::util::address::Address;
use crate::util::key::PrivateKey;
use crate::wallet::builder::{build_transaction, BuiltTransaction, Destination};
use crate::wallet::coin_selection::select_coins;
use crate::wallet::ring::{Decoy, SpendableInput};
use crate::wallet::{Error, Service};

/// Failure reported by an external collaborator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The call did not complete in time.
    #[error("Request timed out")]
    Timeout,
    /// The service could not be reached.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    /// The service refused the request.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Source of decoy candidates.
#[async_trait]
pub trait DecoySource: Send + Sync {
    /// Return up to `count` candidate outputs.
    async fn fetch_decoys(&self, count: usize) -> Result<Vec<Decoy>, ServiceError>;
}

/// Producer of aggregated range proofs over output commitments.
#[async_trait]
pub trait RangeProofService: Send + Sync {
    /// Return the proof bytes for the outputs described by `request`.
    async fn create_range_proof(&self, request: &RangeProofRequest)
        -> Result<Vec<u8>, ServiceError>;
}

/// Network endpoint accepting raw transactions.
#[async_trait]
pub trait BroadcastSink: Send + Sync {
    /// Submit the hex encoded transaction.
    async fn submit(&self, raw_tx: &str) -> Result<BroadcastResult, ServiceError>;
}

/// Outcome of a broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastResult {
    /// Whether the transaction was accepted.
    pub result: bool,
    /// Rejection reason, if any.
    pub reason: Option<String>,
}

/// Blinds and amounts of the outputs a range proof is requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeProofRequest {
    blinds: Vec<Scalar>,
    amounts: Vec<u64>,
}

impl RangeProofRequest {
    /// Pair every output blind with its amount; both must be non-empty and of equal length.
    pub fn new(blinds: Vec<Scalar>, amounts: Vec<u64>) -> Option<RangeProofRequest> {
        if blinds.is_empty() || blinds.len() != amounts.len() {
            return None;
        }
        Some(RangeProofRequest { blinds, amounts })
    }

    /// Output blinding factors.
    pub fn blinds(&self) -> &[Scalar] {
        &self.blinds
    }

    /// Output amounts.
    pub fn amounts(&self) -> &[u64] {
        &self.amounts
    }
}

#[sealed]
impl crate::consensus::encode::Encodable for RangeProofRequest {
    fn consensus_encode<S: io::Write>(&self, s: &mut S) -> Result<usize, io::Error> {
        let mut len = VarInt(32 * self.blinds.len() as u64).consensus_encode(s)?;
        for blind in &self.blinds {
            len += PrivateKey::from_scalar(*blind).to_bytes().consensus_encode(s)?;
        }
        len += VarInt(self.amounts.len() as u64).consensus_encode(s)?;
        for amount in &self.amounts {
            len += amount.consensus_encode(s)?;
        }
        Ok(len)
    }
}

impl Decodable for RangeProofRequest {
    fn consensus_decode<D: io::Read>(d: &mut D) -> Result<RangeProofRequest, encode::Error> {
        let blinds_len = decode_length(d)?;
        if blinds_len % 32 != 0 {
            return Err(encode::Error::ParseFailed("blinds length is not a multiple of 32"));
        }
        let mut blinds = vec![];
        for _ in 0..blinds_len / 32 {
            let bytes: [u8; 32] = Decodable::consensus_decode(d)?;
            let blind = PrivateKey::from_slice(&bytes)
                .map_err(|_| encode::Error::ParseFailed("blind is not a canonical scalar"))?;
            blinds.push(blind.scalar);
        }
        let count = decode_length(d)?;
        let mut amounts = vec![];
        for _ in 0..count {
            amounts.push(Decodable::consensus_decode(d)?);
        }
        RangeProofRequest::new(blinds, amounts)
            .ok_or(encode::Error::ParseFailed("blinds and amounts do not match"))
    }
}

/// A transaction ready to broadcast, with the wallet bookkeeping of the send.
#[derive(Debug, Clone)]
pub struct FullTransaction<K> {
    /// The signed transaction, range proof attached.
    pub transaction: BuiltTransaction,
    /// Amount coming back to the wallet once confirmed.
    pub pending_change: u64,
    /// Identifiers of the spent coins.
    pub spent: Vec<K>,
}

fn external(service: Service, e: ServiceError) -> Error {
    warn!("{} failed: {}", service, e);
    Error::ExternalService {
        service,
        reason: e.to_string(),
    }
}

/// Wallet-side context owning the external collaborators and the protocol parameters.
#[derive(Debug, Clone)]
pub struct WalletContext<D, P, B> {
    /// Decoy source.
    pub decoys: D,
    /// Range proof service.
    pub prover: P,
    /// Broadcast sink.
    pub sink: B,
    /// Protocol parameters.
    pub params: Params,
}

impl<D, P, B> WalletContext<D, P, B>
where
    D: DecoySource,
    P: RangeProofService,
    B: BroadcastSink,
{
    /// Create a context from its collaborators.
    pub fn new(decoys: D, prover: P, sink: B, params: Params) -> Self {
        WalletContext {
            decoys,
            prover,
            sink,
            params,
        }
    }

    /// Fetch decoys, build and sign the transaction, then attach its range proof.
    pub async fn create_privacy_transaction<R>(
        &self,
        inputs: &[SpendableInput],
        destinations: &[Destination],
        ring_size: usize,
        rng: &mut R,
    ) -> Result<BuiltTransaction, Error>
    where
        R: RngCore + CryptoRng,
    {
        let needed = ring_size.saturating_sub(1) * inputs.len();
        let count = self.params.decoy_request_size.max(needed);
        let pool = self
            .decoys
            .fetch_decoys(count)
            .await
            .map_err(|e| external(Service::Decoys, e))?;
        debug!("Fetched {} decoy candidates", pool.len());

        let mut built =
            build_transaction(inputs, destinations, &pool, ring_size, &self.params, rng)?;

        let request =
            RangeProofRequest::new(built.output_blinds.clone(), built.output_amounts.clone())
                .ok_or(Error::EmptyTransaction)?;
        built.transaction.bulletproofs = self
            .prover
            .create_range_proof(&request)
            .await
            .map_err(|e| external(Service::RangeProof, e))?;

        Ok(built)
    }

    /// Pay `amount` to `recipient` from `unspent`, sending the change to `change_address`.
    ///
    /// The ring size is drawn uniformly between the protocol bounds. Both addresses are parsed
    /// first; an unparsable recipient is reported as output `0`, the change address as output
    /// `1`.
    pub async fn create_full_transaction<K, R>(
        &self,
        unspent: &BTreeMap<K, SpendableInput>,
        recipient: &str,
        amount: u64,
        change_address: &str,
        rng: &mut R,
    ) -> Result<FullTransaction<K>, Error>
    where
        K: Ord + Clone,
        R: RngCore + CryptoRng,
    {
        let network = self.params.network;
        let recipient_address = Address::decode_for_network(recipient, network)
            .map_err(|source| Error::InvalidAddress { index: 0, source })?;
        let change = Address::decode_for_network(change_address, network)
            .map_err(|source| Error::InvalidAddress { index: 1, source })?;

        let ring_size = rng.gen_range(self.params.min_ring_size + 1..=self.params.max_ring_size);
        let values: BTreeMap<K, u64> = unspent
            .iter()
            .map(|(key, coin)| (key.clone(), coin.amount))
            .collect();
        let selection = select_coins(&values, amount, ring_size, 2, &self.params)?;

        let inputs: Vec<SpendableInput> = selection
            .selected
            .iter()
            .filter_map(|key| unspent.get(key).copied())
            .collect();
        let change_amount = selection.change(amount);

        let mut destinations = vec![Destination::new(recipient_address, amount, rng)];
        if change_amount > 0 {
            destinations.push(Destination::new(change, change_amount, rng));
        }

        let transaction = self
            .create_privacy_transaction(&inputs, &destinations, ring_size, rng)
            .await?;

        let mut pending_change = change_amount;
        if recipient_address == change {
            pending_change += amount;
        }

        Ok(FullTransaction {
            transaction,
            pending_change,
            spent: selection.selected,
        })
    }

    /// Submit `transaction` to the broadcast sink.
    pub async fn broadcast(&self, transaction: &Transaction) -> Result<BroadcastResult, Error> {
        let result = self
            .sink
            .submit(&serialize_hex(transaction))
            .await
            .map_err(|e| external(Service::Broadcast, e))?;

        if result.result {
            info!("Broadcast transaction {}", transaction.txid_hex());
        } else {
            info!(
                "Transaction {} rejected: {}",
                transaction.txid_hex(),
                result.reason.as_deref().unwrap_or("no reason given")
            );
        }
        Ok(result)
    }
}
