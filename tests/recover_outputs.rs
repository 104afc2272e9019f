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

use rand::rngs::StdRng;
use rand::SeedableRng;

use prcy::blockdata::transaction::OutPoint;
use prcy::consensus::encode::{deserialize, serialize};
use prcy::cryptonote::hash::{Hash, Hashable};
use prcy::util::key::{KeyPair, PrivateKey, PublicKey};
use prcy::util::ringct::{compute_key_image, Commitment};
use prcy::wallet::{build_transaction, Decoy, Destination, SpendableInput};
use prcy::{Address, Network, Params, Transaction};

fn decoy_pool(rng: &mut StdRng) -> Vec<Decoy> {
    (0..120u32)
        .map(|i| Decoy {
            outpoint: OutPoint::new(Hash::new(i.to_be_bytes()), 1),
            public_key: PublicKey::from_private_key(&PrivateKey::random(rng)).unwrap(),
            commitment: Commitment::commit(1_000, &PrivateKey::random(rng).scalar).unwrap(),
        })
        .collect()
}

fn wallet(rng: &mut StdRng) -> (KeyPair, Address) {
    let keys = KeyPair {
        view: PrivateKey::random(rng),
        spend: PrivateKey::random(rng),
    };
    let address = Address::from_keypair(Network::Mainnet, &keys).unwrap();
    (keys, address)
}

#[test]
fn recover_output_and_spend_it() {
    let mut rng = StdRng::seed_from_u64(2026);
    let params = Params::default();
    let pool = decoy_pool(&mut rng);

    let (keys, address) = wallet(&mut rng);
    let (_, other) = wallet(&mut rng);

    let funding = SpendableInput {
        outpoint: OutPoint::new(Hash::new(b"coinbase"), 0),
        amount: 2_000_000,
        blind: PrivateKey::random(&mut rng).scalar,
        private_key: PrivateKey::random(&mut rng),
    };
    let ours = Destination::new(address, 700_000, &mut rng);
    let theirs = Destination::new(other, 1_200_000, &mut rng);

    let built = build_transaction(&[funding], &[theirs, ours], &pool, 28, &params, &mut rng)
        .unwrap();

    // Scan the transaction as it travels on the wire.
    let raw = serialize(&built.transaction);
    let tx: Transaction = deserialize(&raw).unwrap();

    let view_pair = keys.view_pair().unwrap();
    let owned = tx.check_outputs(&view_pair).unwrap();
    assert_eq!(owned.len(), 1);

    let out = &owned[0];
    assert_eq!(out.index(), 1);
    assert_eq!(out.amount(), 700_000);
    assert_eq!(out.blinding_factor(), ours.blind);
    assert_eq!(
        out.commitment(),
        Commitment::commit(700_000, &ours.blind).unwrap()
    );

    let one_time_private = out.recover_key(&keys).unwrap();
    assert_eq!(
        PublicKey::from_private_key(&one_time_private).unwrap(),
        out.out().one_time_key().unwrap()
    );

    // The recovered output funds a new transaction.
    let coin = SpendableInput {
        outpoint: OutPoint::new(tx.hash(), out.index() as i32),
        amount: out.amount(),
        blind: out.blinding_factor(),
        private_key: one_time_private,
    };
    let back = Destination::new(other, 600_000, &mut rng);
    let spend = build_transaction(&[coin], &[back], &pool, 31, &params, &mut rng).unwrap();

    assert_eq!(spend.fee, 100_000);
    assert!(spend.verify(&params).unwrap());
    assert_eq!(
        spend.transaction.inputs[0].key_image,
        compute_key_image(&one_time_private)
            .unwrap()
            .to_bytes()
            .to_vec()
    );
}

#[test]
fn foreign_outputs_are_ignored() {
    let mut rng = StdRng::seed_from_u64(7);
    let params = Params::default();
    let pool = decoy_pool(&mut rng);

    let (keys, _) = wallet(&mut rng);
    let (_, other) = wallet(&mut rng);

    let funding = SpendableInput {
        outpoint: OutPoint::new(Hash::new(b"coinbase"), 3),
        amount: 50_000,
        blind: PrivateKey::random(&mut rng).scalar,
        private_key: PrivateKey::random(&mut rng),
    };
    let destination = Destination::new(other, 10_000, &mut rng);
    let built = build_transaction(&[funding], &[destination], &pool, 28, &params, &mut rng)
        .unwrap();

    let owned = built
        .transaction
        .check_outputs(&keys.view_pair().unwrap())
        .unwrap();
    assert!(owned.is_empty());
}
