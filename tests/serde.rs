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

#![cfg(feature = "serde")]

use std::str::FromStr;

use serde_test::{assert_tokens, Token};

use prcy::consensus::encode::deserialize;
use prcy::util::address::PaymentId;
use prcy::{Address, Hash, Network, Params, PrivateKey, PublicKey, Transaction};

const ADDRESS: &str = "41jCpUY8iJgMyo59w9d8kfMt9xZkUwziaB9Rta4ieZ9hTaUdijCbN5wFr6w38R6kDDTKDCMihNgU2KffTyAmtU3d19Vp1ncnGFM";

#[test]
fn serde_keys_and_hashes() {
    let generator = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    assert_tokens(&PublicKey::from_str(generator).unwrap(), &[Token::Str(generator)]);

    let one = "0000000000000000000000000000000000000000000000000000000000000001";
    assert_tokens(&PrivateKey::from_str(one).unwrap(), &[Token::Str(one)]);

    assert_tokens(&Hash::null(), &[Token::Str(
        "0000000000000000000000000000000000000000000000000000000000000000",
    )]);
    assert_tokens(&PaymentId([0xab; 8]), &[Token::Str("abababababababab")]);
}

#[test]
fn serde_address() {
    let address = Address::from_str(ADDRESS).unwrap();
    assert_tokens(&address, &[Token::Str(ADDRESS)]);

    let json = serde_json::to_string(&address).unwrap();
    assert_eq!(json, format!("\"{}\"", ADDRESS));
}

#[test]
fn serde_params_from_json() {
    let json = serde_json::to_string(&Params::default()).unwrap();
    let params: Params = serde_json::from_str(&json).unwrap();
    assert_eq!(params, Params::default());

    let custom = r#"{
        "network": "Mainnet",
        "min_ring_size": 10,
        "max_ring_size": 15,
        "max_rings": 20,
        "max_tx_inputs": 10,
        "coin": 100000000,
        "collateral": 500000000000,
        "lock_collateral": false,
        "decoy_request_size": 64
    }"#;
    let params: Params = serde_json::from_str(custom).unwrap();
    assert_eq!(params.network, Network::Mainnet);
    assert_eq!(params.min_ring_size, 10);
    assert!(!params.lock_collateral);
}

#[test]
fn serde_transaction_json_round_trip() {
    let mut raw = vec![
        0x01, 0x00, 0x00, 0x00, // version
        0x00, // inputs
        0x00, // outputs
        0x00, 0x00, 0x00, 0x00, // lock time
        0x01, // payment id flag
    ];
    raw.extend_from_slice(&[0x11; 8]);
    raw.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // tx type
    raw.push(0x00); // bulletproofs
    raw.extend_from_slice(&40_790u64.to_le_bytes());
    raw.extend_from_slice(&[0x22; 32]); // c
    raw.push(0x00); // s
    raw.push(0x00); // fee key image

    let tx: Transaction = deserialize(&raw).unwrap();
    assert_eq!(tx.payment_id, Some(PaymentId([0x11; 8])));

    let json = serde_json::to_string(&tx).unwrap();
    let decoded: Transaction = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, tx);
}
