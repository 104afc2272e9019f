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

//! Assembly and signing of a RingCT transaction.
//!
//! [`build_transaction`] turns spendable coins and destinations into a signed [`Transaction`]:
//!
//! 1. every destination gets a one-time key, a masked amount and blind, and a commitment;
//! 2. the public fee is the difference between input and output amounts;
//! 3. every coin is hidden in a ring of decoys at one shared secret index;
//! 4. a balance ring is derived from the input rings, the output commitments and the fee;
//! 5. an MLSAG over all the rings signs the transaction pre-image.
//!
//! The range proof is not part of the signed bytes and is attached afterwards.
//!

use k256::Scalar;
use log::debug;
use rand::Rng;
use rand_core::{CryptoRng, RngCore};

use crate::blockdata::transaction::{Transaction, TxIn, TxOut};
use crate::cryptonote::onetime_key::KeyGenerator;
use crate::network::Params;
use crate::util::address::Address;
use crate::util::key::{PrivateKey, PublicKey};
use crate::util::mlsag::{self, Signature};
use crate::util::ringct::{compute_key_image, encode_values, Commitment, KeyImage};
use crate::wallet::ring::{
    assemble_rings, balance_private_key, balance_ring, choose_decoys, Decoy, InputRing,
    SpendableInput,
};
use crate::wallet::Error;

/// An amount paid to an address, with the blinding factor of its commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    /// Receiving address.
    pub address: Address,
    /// Amount in atomic units.
    pub amount: u64,
    /// Blinding factor of the output commitment.
    pub blind: Scalar,
}

impl Destination {
    /// Pay `amount` to `address` with a fresh random blind.
    pub fn new<R>(address: Address, amount: u64, rng: &mut R) -> Destination
    where
        R: RngCore + CryptoRng,
    {
        Destination {
            address,
            amount,
            blind: PrivateKey::random(rng).scalar,
        }
    }
}

/// A signed transaction together with the secrets needed to prove its outputs.
#[derive(Debug, Clone)]
pub struct BuiltTransaction {
    /// The signed transaction, without range proof.
    pub transaction: Transaction,
    /// Rings of the inputs, in input order.
    pub rings: Vec<InputRing>,
    /// Blinding factor of every output, in output order.
    pub output_blinds: Vec<Scalar>,
    /// Amount of every output, in output order.
    pub output_amounts: Vec<u64>,
    /// Key images of the inputs followed by the key image of the balance row.
    pub key_images: Vec<KeyImage>,
    /// Public fee.
    pub fee: u64,
}

impl BuiltTransaction {
    /// Check the transaction signature against its rings.
    pub fn verify(&self, params: &Params) -> Result<bool, Error> {
        verify_transaction(&self.transaction, &self.rings, params)
    }
}

fn check_shape(inputs: usize, ring_size: usize, params: &Params) -> Result<(), Error> {
    if ring_size < params.min_ring_size + 1 || ring_size > params.max_ring_size + 1 {
        return Err(Error::MalformedRing("ring size out of bounds"));
    }
    // One row per input plus the balance row.
    if inputs > params.max_inputs() {
        return Err(Error::MalformedRing("too many inputs"));
    }
    Ok(())
}

fn build_output<R>(destination: &Destination, rng: &mut R) -> Result<TxOut, Error>
where
    R: RngCore + CryptoRng,
{
    let address = &destination.address;
    let generator = KeyGenerator::from_random(
        address.public_view,
        address.public_spend,
        PrivateKey::random(rng),
    );
    let shared = generator.shared_point()?;
    let info = encode_values(&shared, destination.amount, &destination.blind);
    let commitment = Commitment::commit(destination.amount, &destination.blind)?;

    Ok(TxOut {
        value: 0,
        script: TxOut::p2pk_script(&generator.one_time_key()?),
        tx_priv: vec![],
        tx_pub: generator.tx_pubkey()?.to_bytes().to_vec(),
        encoded_amount: info.encoded_amount,
        encoded_blind: info.encoded_blind,
        hash_of_key: [0u8; 32],
        masternode_stealth_address: vec![],
        commitment: commitment.to_tagged_bytes()?.to_vec(),
    })
}

fn public_fee(inputs: &[SpendableInput], destinations: &[Destination]) -> Result<u64, Error> {
    let spent = inputs
        .iter()
        .try_fold(0u64, |acc, input| acc.checked_add(input.amount))
        .ok_or(Error::Unbalanced)?;
    let paid = destinations
        .iter()
        .try_fold(0u64, |acc, dest| acc.checked_add(dest.amount))
        .ok_or(Error::Unbalanced)?;
    spent.checked_sub(paid).ok_or(Error::Unbalanced)
}

/// Build and sign a transaction spending `inputs` to `destinations`.
///
/// Decoys are drawn from `decoy_pool`, `ring_size` is the number of members of every ring. The
/// fee is whatever the inputs hold beyond the destinations. When several destinations carry a
/// payment id, the last one is used.
pub fn build_transaction<R>(
    inputs: &[SpendableInput],
    destinations: &[Destination],
    decoy_pool: &[Decoy],
    ring_size: usize,
    params: &Params,
    rng: &mut R,
) -> Result<BuiltTransaction, Error>
where
    R: RngCore + CryptoRng,
{
    if inputs.is_empty() || destinations.is_empty() {
        return Err(Error::EmptyTransaction);
    }
    check_shape(inputs.len(), ring_size, params)?;

    let outputs = destinations
        .iter()
        .map(|destination| build_output(destination, rng))
        .collect::<Result<Vec<_>, _>>()?;
    let output_blinds: Vec<Scalar> = destinations.iter().map(|d| d.blind).collect();
    let output_amounts: Vec<u64> = destinations.iter().map(|d| d.amount).collect();
    let output_commitments = destinations
        .iter()
        .map(|d| Commitment::commit(d.amount, &d.blind))
        .collect::<Result<Vec<_>, _>>()?;
    let fee = public_fee(inputs, destinations)?;

    let secret_index = rng.gen_range(0..ring_size);
    debug!(
        "Building transaction: {} inputs, {} outputs, ring size {}, fee {}",
        inputs.len(),
        outputs.len(),
        ring_size,
        fee
    );

    let decoys = choose_decoys(inputs, decoy_pool, ring_size, rng)?;
    let rings = assemble_rings(inputs, decoys, secret_index)?;

    let balance_key = balance_private_key(inputs, &output_blinds);
    let balance_row = balance_ring(&rings, &output_commitments, fee)?;
    // Commitments balance exactly when the balance ring closes on the derived key.
    match PublicKey::from_private_key(&balance_key) {
        Ok(public) if balance_row[secret_index] == public => {}
        _ => return Err(Error::Unbalanced),
    }

    let mut transaction = Transaction {
        outputs,
        payment_id: destinations
            .iter()
            .rev()
            .find_map(|d| d.address.addr_type.payment_id()),
        tx_fee: fee,
        ..Default::default()
    };
    for (input, ring) in inputs.iter().zip(&rings) {
        let key_image = compute_key_image(&input.private_key)?;
        transaction.inputs.push(TxIn {
            prevout: ring.members[0].outpoint,
            key_image: key_image.to_bytes().to_vec(),
            decoys: ring.members[1..].iter().map(|m| m.outpoint).collect(),
            ..Default::default()
        });
    }

    let mut rows: Vec<Vec<PublicKey>> = rings.iter().map(InputRing::public_keys).collect();
    rows.push(balance_row);
    let mut keys: Vec<PrivateKey> = inputs.iter().map(|input| input.private_key).collect();
    keys.push(balance_key);

    let message = transaction.signature_hash().to_bytes();
    let signature = mlsag::sign(&message, &rows, &keys, secret_index, params, rng)?;

    transaction.c = signature.c_bytes();
    transaction.s = signature.s_bytes();
    if let Some(image) = signature.key_images.last() {
        transaction.tx_fee_key_image = image.to_bytes().to_vec();
    }

    Ok(BuiltTransaction {
        transaction,
        rings,
        output_blinds,
        output_amounts,
        key_images: signature.key_images,
        fee,
    })
}

/// Verify the MLSAG of `transaction` given the rings its inputs reference.
///
/// The balance ring is recomputed from the rings, the output commitments and the public fee, so
/// an unbalanced transaction cannot verify.
pub fn verify_transaction(
    transaction: &Transaction,
    rings: &[InputRing],
    params: &Params,
) -> Result<bool, Error> {
    if rings.len() != transaction.inputs.len() {
        return Err(Error::MalformedRing("one ring per input is required"));
    }
    for (input, ring) in transaction.inputs.iter().zip(rings) {
        let outpoints: Vec<_> = ring.members.iter().map(|m| m.outpoint).collect();
        if input.ring() != outpoints {
            return Err(Error::MalformedRing("ring does not match the input"));
        }
    }

    let output_commitments = transaction
        .outputs
        .iter()
        .map(|out| out.parsed_commitment().map_err(|_| Error::Unbalanced))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows: Vec<Vec<PublicKey>> = rings.iter().map(InputRing::public_keys).collect();
    rows.push(balance_ring(rings, &output_commitments, transaction.tx_fee)?);

    let mut key_images = transaction
        .inputs
        .iter()
        .map(|input| KeyImage::from_slice(&input.key_image))
        .collect::<Result<Vec<_>, _>>()?;
    key_images.push(KeyImage::from_slice(&transaction.tx_fee_key_image)?);

    let signature = Signature {
        key_images,
        c: PrivateKey::from_slice(&transaction.c)?.scalar,
        s: transaction
            .s
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|s| PrivateKey::from_slice(s).map(|key| key.scalar))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?,
    };

    let message = transaction.signature_hash().to_bytes();
    Ok(mlsag::verify(&message, &rows, &signature, params)?)
}

#[cfg(test)]
mod tests {
    use k256::Scalar;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{build_transaction, verify_transaction, Destination};
    use crate::blockdata::transaction::OutPoint;
    use crate::consensus::encode::{deserialize, serialize};
    use crate::cryptonote::hash::Hash;
    use crate::network::{Network, Params};
    use crate::util::address::{Address, PaymentId};
    use crate::util::key::{KeyPair, PrivateKey, PublicKey};
    use crate::util::ringct::Commitment;
    use crate::wallet::ring::{Decoy, SpendableInput};
    use crate::wallet::Error;

    fn decoy_pool(rng: &mut StdRng, count: u32) -> Vec<Decoy> {
        (0..count)
            .map(|i| Decoy {
                outpoint: OutPoint::new(Hash::new(i.to_le_bytes()), 0),
                public_key: PublicKey::from_private_key(&PrivateKey::random(rng)).unwrap(),
                commitment: Commitment::commit(50_000, &PrivateKey::random(rng).scalar).unwrap(),
            })
            .collect()
    }

    fn coin(rng: &mut StdRng, n: i32, amount: u64) -> SpendableInput {
        SpendableInput {
            outpoint: OutPoint::new(Hash::new(b"funding"), n),
            amount,
            blind: PrivateKey::random(rng).scalar,
            private_key: PrivateKey::random(rng),
        }
    }

    fn address(rng: &mut StdRng) -> Address {
        let keys = KeyPair {
            view: PrivateKey::random(rng),
            spend: PrivateKey::random(rng),
        };
        Address::from_keypair(Network::Mainnet, &keys).unwrap()
    }

    #[test]
    fn builds_a_verifiable_transaction() {
        let mut rng = StdRng::seed_from_u64(42);
        let params = Params::default();
        let pool = decoy_pool(&mut rng, 200);
        let inputs = vec![coin(&mut rng, 0, 600_000), coin(&mut rng, 1, 500_000)];
        let destinations = vec![
            Destination::new(address(&mut rng), 1_000_000, &mut rng),
            Destination::new(address(&mut rng), 40_000, &mut rng),
        ];

        let built = build_transaction(&inputs, &destinations, &pool, 28, &params, &mut rng)
            .unwrap();
        let tx = &built.transaction;

        assert_eq!(built.fee, 60_000);
        assert_eq!(tx.tx_fee, 60_000);
        assert_eq!(tx.inputs.len(), 2);
        assert_eq!(tx.outputs.len(), 2);
        assert!(tx.inputs.iter().all(|input| input.decoys.len() == 27));
        assert!(tx.outputs.iter().all(|out| out.value == 0));
        assert_eq!(tx.s.len(), 28);
        assert!(tx.s.iter().all(|column| column.len() == 3));
        assert_eq!(built.key_images.len(), 3);
        assert_eq!(tx.tx_fee_key_image, built.key_images[2].to_bytes().to_vec());
        assert_eq!(tx.payment_id, None);

        assert!(built.verify(&params).unwrap());

        // Input commitments equal output commitments plus the fee commitment.
        let spent = inputs
            .iter()
            .map(|input| Commitment::commit(input.amount, &input.blind).unwrap())
            .fold(Commitment::commit(0, &Scalar::ZERO).unwrap(), |acc, c| acc + c);
        let paid = tx
            .outputs
            .iter()
            .map(|out| out.parsed_commitment().unwrap())
            .fold(Commitment::commit(built.fee, &Scalar::ZERO).unwrap(), |acc, c| acc + c);
        assert_eq!(spent, paid);

        // The wire form verifies as well.
        let decoded = deserialize(&serialize(tx)).unwrap();
        assert!(verify_transaction(&decoded, &built.rings, &params).unwrap());
    }

    #[test]
    fn tampered_fee_fails_verification() {
        let mut rng = StdRng::seed_from_u64(43);
        let params = Params::default();
        let pool = decoy_pool(&mut rng, 60);
        let inputs = vec![coin(&mut rng, 0, 100_000)];
        let destinations = vec![Destination::new(address(&mut rng), 59_210, &mut rng)];

        let mut built = build_transaction(&inputs, &destinations, &pool, 30, &params, &mut rng)
            .unwrap();
        assert!(built.verify(&params).unwrap());

        built.transaction.tx_fee += 1;
        assert!(!built.verify(&params).unwrap());
    }

    #[test]
    fn last_payment_id_wins() {
        let mut rng = StdRng::seed_from_u64(44);
        let params = Params::default();
        let pool = decoy_pool(&mut rng, 60);
        let inputs = vec![coin(&mut rng, 0, 100_000)];

        let plain = address(&mut rng);
        let mut first = address(&mut rng);
        first.addr_type = crate::util::address::AddressType::Integrated(PaymentId([1; 8]));
        let mut second = address(&mut rng);
        second.addr_type = crate::util::address::AddressType::Integrated(PaymentId([2; 8]));

        let destinations = vec![
            Destination::new(first, 10_000, &mut rng),
            Destination::new(second, 10_000, &mut rng),
            Destination::new(plain, 10_000, &mut rng),
        ];
        let built = build_transaction(&inputs, &destinations, &pool, 28, &params, &mut rng)
            .unwrap();
        assert_eq!(built.transaction.payment_id, Some(PaymentId([2; 8])));
    }

    #[test]
    fn rejects_invalid_requests() {
        let mut rng = StdRng::seed_from_u64(45);
        let params = Params::default();
        let pool = decoy_pool(&mut rng, 100);
        let inputs = vec![coin(&mut rng, 0, 100_000)];
        let destinations = vec![Destination::new(address(&mut rng), 10_000, &mut rng)];

        assert!(matches!(
            build_transaction(&[], &destinations, &pool, 28, &params, &mut rng),
            Err(Error::EmptyTransaction)
        ));
        assert!(matches!(
            build_transaction(&inputs, &[], &pool, 28, &params, &mut rng),
            Err(Error::EmptyTransaction)
        ));
        assert!(matches!(
            build_transaction(&inputs, &destinations, &pool, 27, &params, &mut rng),
            Err(Error::MalformedRing(_))
        ));
        assert!(matches!(
            build_transaction(&inputs, &destinations, &pool, 34, &params, &mut rng),
            Err(Error::MalformedRing(_))
        ));

        let overspend = vec![Destination::new(address(&mut rng), 100_001, &mut rng)];
        assert!(matches!(
            build_transaction(&inputs, &overspend, &pool, 28, &params, &mut rng),
            Err(Error::Unbalanced)
        ));

        let small_pool = decoy_pool(&mut rng, 20);
        assert!(matches!(
            build_transaction(&inputs, &destinations, &small_pool, 28, &params, &mut rng),
            Err(Error::InsufficientDecoys { needed: 27, available: 20 })
        ));
    }

    #[test]
    fn too_many_inputs_is_malformed() {
        let mut rng = StdRng::seed_from_u64(46);
        let params = Params::default();
        let inputs: Vec<_> = (0..49).map(|n| coin(&mut rng, n, 1_000)).collect();
        let destinations = vec![Destination {
            address: address(&mut rng),
            amount: 1_000,
            blind: Scalar::ONE,
        }];
        assert!(matches!(
            build_transaction(&inputs, &destinations, &[], 28, &params, &mut rng),
            Err(Error::MalformedRing("too many inputs"))
        ));
    }
}
