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

//! PRCY privacy (stealth) addresses.
//!
//! An address carries the public spend and view keys of a wallet, optionally an 8 bytes payment
//! id, and a 4 bytes checksum (the first bytes of `hash256` over everything before it). The raw
//! payload is base58 encoded in blocks of 8 bytes, each block rendered on 11 characters. The last
//! block only holds 7 bytes but is also padded to 11 characters, which gives 99 characters for a
//! standard address and 110 for an integrated one.
//!
//! ## Parsing an address
//!
//! ```rust
//! use std::str::FromStr;
//! use prcy::{Address, Network};
//! use prcy::util::address::{AddressType, Error};
//!
//! let addr = "41jCpUY8iJgMyo59w9d8kfMt9xZkUwziaB9Rta4ieZ9hTaUdijCbN5wFr6w38R6kDDTKDCMihNgU2KffTyAmtU3d19Vp1ncnGFM";
//! let address = Address::from_str(addr)?;
//!
//! assert_eq!(address.network, Network::Mainnet);
//! assert_eq!(address.addr_type, AddressType::Standard);
//! assert_eq!(address.to_string(), addr);
//! # Ok::<(), Error>(())
//! ```
//!

use std::fmt;
use std::str::FromStr;

use base58_monero::base58;
use thiserror::Error;

use crate::cryptonote::hash::hash256;
use crate::network::{self, Network};
use crate::util::key::{self, KeyPair, PublicKey, ViewPair};

/// Length of an encoded standard address.
pub const STANDARD_ADDRESS_LENGTH: usize = 99;
/// Length of an encoded integrated address.
pub const INTEGRATED_ADDRESS_LENGTH: usize = 110;

const STANDARD_PAYLOAD_LENGTH: usize = 71;
const INTEGRATED_PAYLOAD_LENGTH: usize = 79;

/// Potential errors encountered when manipulating addresses.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Invalid address magic byte.
    #[error("Invalid magic byte")]
    InvalidMagicByte,
    /// Missmatch address checksums.
    #[error("Invalid checksum")]
    InvalidChecksum,
    /// Encoded address is neither 99 nor 110 characters long.
    #[error("Invalid address length: {0}")]
    InvalidLength(usize),
    /// Generic invalid format.
    #[error("Invalid format")]
    InvalidFormat,
    /// Invalid public key.
    #[error("Key error: {0}")]
    Key(#[from] key::Error),
    /// Base58 error.
    #[error("Base58 error: {0}")]
    Base58(#[from] base58::Error),
    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] network::Error),
}

fixed_hash::construct_fixed_hash! {
    /// Short Payment Id for integrated address, a fixed 8-bytes array.
    pub struct PaymentId(8);
}

impl_hex_serde!(PaymentId, 8);

/// Address type: standard or integrated.
///
/// AddressType implements [`Default`] and returns [`AddressType::Standard`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum AddressType {
    /// Standard address.
    Standard,
    /// Address with a short 8 bytes payment id.
    Integrated(PaymentId),
}

impl AddressType {
    /// Return the embedded payment id, if any.
    pub fn payment_id(&self) -> Option<PaymentId> {
        match self {
            AddressType::Standard => None,
            AddressType::Integrated(payment_id) => Some(*payment_id),
        }
    }
}

impl Default for AddressType {
    fn default() -> AddressType {
        AddressType::Standard
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AddressType::Standard => write!(f, "Standard address"),
            AddressType::Integrated(_) => write!(f, "Integrated address"),
        }
    }
}

/// A complete PRCY privacy address valid for a specific network.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Address {
    /// The network on which the address is valid and should be used.
    pub network: Network,
    /// The address type.
    pub addr_type: AddressType,
    /// The address spend public key.
    pub public_spend: PublicKey,
    /// The address view public key.
    pub public_view: PublicKey,
}

impl Address {
    /// Create a standard address which is valid on the given network.
    pub fn standard(network: Network, public_spend: PublicKey, public_view: PublicKey) -> Address {
        Address {
            network,
            addr_type: AddressType::Standard,
            public_spend,
            public_view,
        }
    }

    /// Create an address with an integrated payment id which is valid on the given network.
    pub fn integrated(
        network: Network,
        public_spend: PublicKey,
        public_view: PublicKey,
        payment_id: PaymentId,
    ) -> Address {
        Address {
            network,
            addr_type: AddressType::Integrated(payment_id),
            public_spend,
            public_view,
        }
    }

    /// Create a standard address from a view pair which is valid on the given network.
    pub fn from_viewpair(network: Network, keys: &ViewPair) -> Result<Address, Error> {
        let public_view = PublicKey::from_private_key(&keys.view)?;
        Ok(Address::standard(network, keys.spend, public_view))
    }

    /// Create a standard address from a key pair which is valid on the given network.
    pub fn from_keypair(network: Network, keys: &KeyPair) -> Result<Address, Error> {
        let public_spend = PublicKey::from_private_key(&keys.spend)?;
        let public_view = PublicKey::from_private_key(&keys.view)?;
        Ok(Address::standard(network, public_spend, public_view))
    }

    /// Parse an address from its raw payload, fail if the magic byte is incorrect, if public
    /// keys are not valid points, and if checksums missmatch.
    pub fn from_bytes(bytes: &[u8]) -> Result<Address, Error> {
        if bytes.len() != STANDARD_PAYLOAD_LENGTH && bytes.len() != INTEGRATED_PAYLOAD_LENGTH {
            return Err(Error::InvalidFormat);
        }

        let (data, checksum) = bytes.split_at(bytes.len() - 4);
        if &hash256(data)[0..4] != checksum {
            return Err(Error::InvalidChecksum);
        }

        let network = Network::from_u8(bytes[0]).map_err(|_| Error::InvalidMagicByte)?;
        let public_spend = PublicKey::from_slice(&bytes[1..34])?;
        let public_view = PublicKey::from_slice(&bytes[34..67])?;
        let addr_type = if bytes.len() == INTEGRATED_PAYLOAD_LENGTH {
            AddressType::Integrated(PaymentId::from_slice(&bytes[67..75]))
        } else {
            AddressType::Standard
        };

        Ok(Address {
            network,
            addr_type,
            public_spend,
            public_view,
        })
    }

    /// Serialize the address as its raw payload: magic byte, spend key, view key, optional
    /// payment id and checksum.
    pub fn as_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![self.network.as_u8()];
        bytes.extend_from_slice(&self.public_spend.to_bytes());
        bytes.extend_from_slice(&self.public_view.to_bytes());
        if let AddressType::Integrated(payment_id) = &self.addr_type {
            bytes.extend_from_slice(&payment_id.0);
        }

        let checksum = hash256(&bytes);
        bytes.extend_from_slice(&checksum[0..4]);
        bytes
    }

    /// Serialize the address as an hexadecimal string.
    pub fn as_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Encode the address in its textual form.
    pub fn encode(&self) -> Result<String, Error> {
        let mut encoded = base58::encode(&self.as_bytes())?;
        // Pad the trailing 7 bytes block to a full 11 characters block.
        encoded.insert(encoded.len() - 10, '1');
        Ok(encoded)
    }

    /// Decode an address from its textual form.
    pub fn decode(s: &str) -> Result<Address, Error> {
        if !s.is_ascii() {
            return Err(Error::InvalidFormat);
        }
        if s.len() != STANDARD_ADDRESS_LENGTH && s.len() != INTEGRATED_ADDRESS_LENGTH {
            return Err(Error::InvalidLength(s.len()));
        }

        let padding = s.len() - 11;
        if &s[padding..padding + 1] != "1" {
            return Err(Error::InvalidFormat);
        }
        let unpadded = format!("{}{}", &s[..padding], &s[padding + 1..]);

        Self::from_bytes(&base58::decode(&unpadded)?)
    }

    /// Decode an address and check that it is valid on `network`.
    pub fn decode_for_network(s: &str, network: Network) -> Result<Address, Error> {
        let address = Self::decode(s)?;
        if address.network != network {
            return Err(Error::InvalidMagicByte);
        }
        Ok(address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let encoded = self.encode().map_err(|_| fmt::Error)?;
        write!(f, "{}", encoded)
    }
}

impl FromStr for Address {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;

    use serde_crate::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Address {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Address::from_str(&s).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use base58_monero::base58;

    use super::{Address, AddressType, Error, Network, PaymentId, PublicKey};
    use crate::cryptonote::hash::hash256;
    use crate::util::key::{KeyPair, PrivateKey};

    const STANDARD: &str = "41jCpUY8iJgMyo59w9d8kfMt9xZkUwziaB9Rta4ieZ9hTaUdijCbN5wFr6w38R6kDDTKDCMihNgU2KffTyAmtU3d19Vp1ncnGFM";
    const INTEGRATED: &str = "41jCpUY8iJgMyo59w9d8kfMt9xZkUwziaB9Rta4ieZ9hTaUdijCbN5wFr6w38R6kDDTKDCMihNgU2KffTyAmtU3deWAWPmkmbUL14obkBYXj4Q";

    fn keys() -> (PublicKey, PublicKey) {
        let two = PrivateKey::from_str(
            "0000000000000000000000000000000000000000000000000000000000000002",
        )
        .unwrap();
        let three = PrivateKey::from_str(
            "0000000000000000000000000000000000000000000000000000000000000003",
        )
        .unwrap();
        (
            PublicKey::from_private_key(&two).unwrap(),
            PublicKey::from_private_key(&three).unwrap(),
        )
    }

    #[test]
    fn deserialize_address() {
        let (spend, view) = keys();
        let address = Address::from_str(STANDARD);
        assert_eq!(Ok(Address::standard(Network::Mainnet, spend, view)), address);
        assert_eq!(address.unwrap().as_bytes().len(), 71);
    }

    #[test]
    fn serialize_address() {
        let (spend, view) = keys();
        let address = Address::standard(Network::Mainnet, spend, view);
        assert_eq!(address.to_string(), STANDARD);
        assert_eq!(address.as_bytes()[0], 18);
    }

    #[test]
    fn integrated_address() {
        let (spend, view) = keys();
        let payment_id = PaymentId([170, 185, 129, 214, 9, 100, 93, 195]);
        let address = Address::integrated(Network::Mainnet, spend, view, payment_id);
        assert_eq!(address.to_string(), INTEGRATED);
        assert_eq!(address.to_string().len(), 110);

        let decoded = Address::from_str(INTEGRATED).unwrap();
        assert_eq!(decoded.addr_type, AddressType::Integrated(payment_id));
        assert_eq!(decoded.addr_type.payment_id(), Some(payment_id));
        assert_eq!(decoded, address);
    }

    #[test]
    fn address_round_trip() {
        let mut rng = rand::thread_rng();
        for _ in 0..8 {
            let keys = KeyPair {
                view: PrivateKey::random(&mut rng),
                spend: PrivateKey::random(&mut rng),
            };
            let address = Address::from_keypair(Network::Mainnet, &keys).unwrap();
            let encoded = address.to_string();
            assert_eq!(encoded.len(), 99);
            assert_eq!(Address::from_str(&encoded), Ok(address));
        }
    }

    #[test]
    fn corrupted_character_is_rejected() {
        for position in [0usize, 5, 40, 87, 97].iter() {
            let mut corrupted: Vec<char> = STANDARD.chars().collect();
            corrupted[*position] = if corrupted[*position] == 'z' { 'y' } else { 'z' };
            let corrupted: String = corrupted.into_iter().collect();
            assert!(Address::from_str(&corrupted).is_err());
        }
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            Address::from_str(&STANDARD[..98]),
            Err(Error::InvalidLength(98))
        );
        assert_eq!(Address::from_str(""), Err(Error::InvalidLength(0)));
    }

    #[test]
    fn missing_padding_is_rejected() {
        let mut unpadded = STANDARD.to_string();
        unpadded.replace_range(88..89, "2");
        assert_eq!(Address::from_str(&unpadded), Err(Error::InvalidFormat));
    }

    #[test]
    fn decode_checks_the_network() {
        let (spend, view) = keys();
        assert_eq!(
            Address::decode_for_network(STANDARD, Network::Mainnet),
            Ok(Address::standard(Network::Mainnet, spend, view))
        );

        let mut payload = Address::from_str(STANDARD).unwrap().as_bytes();
        payload.truncate(payload.len() - 4);
        payload[0] = Network::Mainnet.as_u8() + 1;
        let checksum = hash256(&payload);
        payload.extend_from_slice(&checksum[0..4]);
        let mut foreign = base58::encode(&payload).unwrap();
        foreign.insert(foreign.len() - 10, '1');
        assert_eq!(
            Address::decode_for_network(&foreign, Network::Mainnet),
            Err(Error::InvalidMagicByte)
        );
    }
}
