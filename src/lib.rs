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

//! # Rust PRCY Library
//!
//! Construction of PRCY RingCT privacy transactions: stealth addresses, Pedersen commitments
//! with masked amounts, decoy rings, MLSAG signatures carrying the value-balance proof, and the
//! exact binary transaction encoding used for signing and broadcast.
//!
//! The [`wallet`] module ties the pieces together; the lower modules can be used on their own to
//! parse, inspect or scan transactions.
//!
//! ## Building a transaction
//!
//! ```rust,ignore
//! use prcy::wallet::{build_transaction, Destination};
//!
//! let built = build_transaction(&inputs, &destinations, &decoys, 28, &params, &mut rng)?;
//! let raw = prcy::consensus::encode::serialize_hex(&built.transaction);
//! ```
//!

#![cfg_attr(docsrs, feature(doc_cfg))]
// Coding conventions
#![forbid(unsafe_code)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

#[macro_use]
mod internal_macros;
#[macro_use]
pub mod consensus;
pub mod blockdata;
pub mod cryptonote;
pub mod network;
pub mod util;
pub mod wallet;

pub use blockdata::transaction::{OutPoint, Transaction, TxIn, TxOut};
pub use consensus::encode::{Error, VarInt};
pub use cryptonote::hash::Hash;
pub use network::{Network, Params};
pub use util::address::{Address, AddressType, PaymentId};
pub use util::key::{KeyPair, PrivateKey, PublicKey, ViewPair};
pub use util::ringct::{Commitment, KeyImage};
