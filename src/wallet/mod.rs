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

//! Construction of RingCT privacy transactions.
//!
//! The pipeline runs in one direction: [`select_coins`] picks the coins to spend, then
//! [`build_transaction`] builds the outputs, assembles the decoy rings and the balance ring and
//! signs them. [`WalletContext`] adds the asynchronous collaborators: a decoy source, a range
//! proof service and a broadcast sink.
//!
//! Every failure aborts the whole operation; no partially signed transaction is returned.
//!

pub mod builder;
pub mod coin_selection;
pub mod ring;
pub mod service;

pub use builder::{build_transaction, BuiltTransaction, Destination};
pub use coin_selection::{select_coins, CoinSelection};
pub use ring::{Decoy, InputRing, SpendableInput};
pub use service::{
    BroadcastResult, BroadcastSink, DecoySource, FullTransaction, RangeProofRequest,
    RangeProofService, ServiceError, WalletContext,
};

use std::fmt;

use thiserror::Error;

use crate::consensus::encode;
use crate::util::{address, key, mlsag, ringct};

/// Stage of transaction construction an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Coin selection.
    Selection,
    /// Output construction and fee computation.
    OutputConstruction,
    /// Decoy and balance ring assembly.
    RingAssembly,
    /// MLSAG signing.
    Signing,
    /// Encoding or decoding.
    Serialization,
    /// A call to an external collaborator.
    ExternalService,
}

/// External collaborator a request was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Decoy source.
    Decoys,
    /// Range proof service.
    RangeProof,
    /// Broadcast sink.
    Broadcast,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Service::Decoys => write!(f, "decoy source"),
            Service::RangeProof => write!(f, "range proof service"),
            Service::Broadcast => write!(f, "broadcast sink"),
        }
    }
}

/// Errors raised while building a privacy transaction.
#[derive(Error, Debug)]
pub enum Error {
    /// The candidate coins cannot cover the amount and its fee.
    #[error("Insufficient funds")]
    InsufficientFunds,
    /// A destination address does not decode.
    #[error("Invalid address for output {index}: {source}")]
    InvalidAddress {
        /// Index of the destination.
        index: usize,
        /// Decoding error.
        source: address::Error,
    },
    /// Ring size or row count outside the protocol bounds.
    #[error("Malformed ring: {0}")]
    MalformedRing(&'static str),
    /// A signing key does not match the ring member at the secret index.
    #[error("Signing key of row {0} does not match its ring")]
    SignerMismatch(usize),
    /// Not enough distinct decoys once the real inputs are excluded.
    #[error("Insufficient decoys: {needed} needed, {available} available")]
    InsufficientDecoys {
        /// Decoys needed for every ring.
        needed: usize,
        /// Usable decoys returned by the source.
        available: usize,
    },
    /// Outputs exceed inputs, or commitments do not balance.
    #[error("Inputs and outputs do not balance")]
    Unbalanced,
    /// No input or no output.
    #[error("Transaction needs at least one input and one output")]
    EmptyTransaction,
    /// Encoding or decoding error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] encode::Error),
    /// An external collaborator failed or timed out.
    #[error("External service failure ({service}): {reason}")]
    ExternalService {
        /// The failing collaborator.
        service: Service,
        /// What went wrong.
        reason: String,
    },
    /// Key error.
    #[error("Key error: {0}")]
    Key(#[from] key::Error),
    /// RingCT error.
    #[error("RingCT error: {0}")]
    RingCt(#[from] ringct::Error),
}

impl From<mlsag::Error> for Error {
    fn from(e: mlsag::Error) -> Error {
        match e {
            mlsag::Error::MalformedRing(reason) => Error::MalformedRing(reason),
            mlsag::Error::SignerMismatch(row) => Error::SignerMismatch(row),
            mlsag::Error::Key(e) => Error::Key(e),
            mlsag::Error::RingCt(e) => Error::RingCt(e),
        }
    }
}

impl Error {
    /// Whether retrying the same call may succeed. Only external service failures are.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ExternalService { .. })
    }

    /// Stage the error was raised in.
    pub fn stage(&self) -> Stage {
        match self {
            Error::InsufficientFunds => Stage::Selection,
            Error::InvalidAddress { .. } | Error::Unbalanced | Error::EmptyTransaction => {
                Stage::OutputConstruction
            }
            Error::MalformedRing(_) | Error::InsufficientDecoys { .. } => Stage::RingAssembly,
            Error::SignerMismatch(_) | Error::Key(_) | Error::RingCt(_) => Stage::Signing,
            Error::Serialization(_) => Stage::Serialization,
            Error::ExternalService { .. } => Stage::ExternalService,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Service, Stage};
    use crate::util::mlsag;

    #[test]
    fn only_external_failures_are_retryable() {
        let external = Error::ExternalService {
            service: Service::Decoys,
            reason: "timeout".into(),
        };
        assert!(external.is_retryable());
        assert_eq!(external.stage(), Stage::ExternalService);
        assert_eq!(
            external.to_string(),
            "External service failure (decoy source): timeout"
        );

        assert!(!Error::InsufficientFunds.is_retryable());
        assert!(!Error::Unbalanced.is_retryable());
    }

    #[test]
    fn mlsag_errors_keep_their_kind() {
        let e: Error = mlsag::Error::SignerMismatch(2).into();
        assert!(matches!(e, Error::SignerMismatch(2)));
        assert_eq!(e.stage(), Stage::Signing);

        let e: Error = mlsag::Error::MalformedRing("too many rings").into();
        assert_eq!(e.stage(), Stage::RingAssembly);
    }
}
