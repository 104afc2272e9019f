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

//! Network and protocol parameters.
//!
//! This module defines the PRCY network, its address magic byte, and the protocol constants
//! transaction construction depends on: ring bounds, input limits, the coin unit and the
//! masternode collateral.
//!

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use thiserror::Error;

/// Number of atomic units in one coin.
pub const COIN: u64 = 100_000_000;

/// Potential errors encountered while manipulating PRCY networks.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Invalid magic network byte.
    #[error("Invalid magic network byte")]
    InvalidMagicByte,
}

/// The list of the existing PRCY networks.
///
/// Network implements [`Default`] and returns [`Network::Mainnet`].
///
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub enum Network {
    /// Mainnet is the "production" network and blockchain.
    Mainnet,
}

impl Network {
    /// Get the associated privacy address magic byte.
    pub fn as_u8(self) -> u8 {
        match self {
            Network::Mainnet => 18,
        }
    }

    /// Recover the network type given an address magic byte.
    pub fn from_u8(byte: u8) -> Result<Network, Error> {
        match byte {
            18 => Ok(Network::Mainnet),
            _ => Err(Error::InvalidMagicByte),
        }
    }
}

impl Default for Network {
    fn default() -> Network {
        Network::Mainnet
    }
}

/// Protocol constants used while selecting coins and building rings.
///
/// [`Params::default`] returns the mainnet values.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct Params {
    /// Network the addresses are encoded for.
    pub network: Network,
    /// Minimum number of decoys per ring; a ring holds at least `min_ring_size + 1` members.
    pub min_ring_size: usize,
    /// Maximum number of decoys per ring; a ring holds at most `max_ring_size + 1` members.
    pub max_ring_size: usize,
    /// Upper bound (exclusive) on the number of MLSAG rows, balance row included.
    pub max_rings: usize,
    /// Maximum number of inputs a selection may spend.
    pub max_tx_inputs: usize,
    /// Atomic units per coin, also the fee cap.
    pub coin: u64,
    /// Masternode collateral amount.
    pub collateral: u64,
    /// Whether coins of exactly the collateral amount are excluded from selection.
    pub lock_collateral: bool,
    /// Number of decoy candidates requested from the decoy source.
    pub decoy_request_size: usize,
}

impl Default for Params {
    fn default() -> Params {
        Params {
            network: Network::Mainnet,
            min_ring_size: 27,
            max_ring_size: 32,
            max_rings: 50,
            max_tx_inputs: 50,
            coin: COIN,
            collateral: 5_000 * COIN,
            lock_collateral: true,
            decoy_request_size: 200,
        }
    }
}

impl Params {
    /// Largest number of inputs a transaction can spend: bounded by `max_tx_inputs`, and by
    /// `max_rings` once the balance row is added to the signature.
    pub fn max_inputs(&self) -> usize {
        self.max_tx_inputs.min(self.max_rings.saturating_sub(2))
    }
}
