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

//! Consensus-encodable types.
//!
//! This is basically a replacement of the `Encodable` trait which does normalization for
//! endianness, etc., to ensure that the same data is always serialized and deserialized the same
//! way on any platform.
//!
//! Integers are little-endian. Counts and byte-array lengths are prefixed with a [`VarInt`],
//! whose encoding follows the PRCY network exactly, including its reuse of the `0xfd` tag for
//! 8-byte values.
//!

use std::io::{self, Cursor, Read};

use sealed::sealed;
use thiserror::Error;

use crate::blockdata::transaction::{OutPoint, TxIn, TxOut};

/// Maximum size, in bytes or elements, of a vector we are allowed to decode.
pub const MAX_VEC_SIZE: u64 = 32 * 1024 * 1024;

/// Errors encountered when encoding or decoding data.
#[derive(Error, Debug)]
pub enum Error {
    /// An I/O error.
    #[error("IO error: {0}")]
    Io(io::Error),
    /// The input ended before the structure was fully decoded.
    #[error("Serialization truncated")]
    Truncated,
    /// Parsing error.
    #[error("Parsing error: {0}")]
    ParseFailed(&'static str),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::Truncated,
            _ => Error::Io(e),
        }
    }
}

/// Encode an object into a vector.
pub fn serialize<T: ?Sized>(data: &T) -> Vec<u8>
where
    T: Encodable,
{
    let mut encoder = Vec::new();
    data.consensus_encode(&mut encoder)
        .expect("vec writes don't error");
    encoder
}

/// Encode an object into a hex-encoded string.
pub fn serialize_hex<T: ?Sized>(data: &T) -> String
where
    T: Encodable,
{
    hex::encode(serialize(data))
}

/// Deserialize an object from a vector, will error if said deserialization doesn't consume the
/// entire vector.
pub fn deserialize<T: Decodable>(data: &[u8]) -> Result<T, Error> {
    let (rv, consumed) = deserialize_partial(data)?;

    // Fail if data are not consumed entirely.
    if consumed == data.len() {
        Ok(rv)
    } else {
        Err(Error::ParseFailed(
            "data not consumed entirely when explicitly deserializing",
        ))
    }
}

/// Deserialize an object from a vector, but will not report an error if said deserialization
/// doesn't consume the entire vector.
pub fn deserialize_partial<T: Decodable>(data: &[u8]) -> Result<(T, usize), Error> {
    let mut decoder = Cursor::new(data);
    let rv = Decodable::consensus_decode(&mut decoder)?;
    let consumed = decoder.position() as usize;

    Ok((rv, consumed))
}

/// Data which can be encoded in a consensus-consistent way.
#[sealed(pub(crate))]
pub trait Encodable {
    /// Encode an object with a well-defined format, should only ever error if the underlying
    /// encoder errors.
    ///
    /// The only errors returned are errors propagated from the writer.
    fn consensus_encode<S: io::Write>(&self, s: &mut S) -> Result<usize, io::Error>;
}

/// Data which can be decoded in a consensus-consistent way.
pub trait Decodable: Sized {
    /// Decode an object with a well-defined format.
    fn consensus_decode<D: io::Read>(d: &mut D) -> Result<Self, Error>;
}

/// A length or count prefix.
///
/// Values below `0xfd` take one byte. Larger values take a tag byte and a little-endian field:
/// `0xfd` and 2 bytes below `2^16`, `0xfe` and 4 bytes below `2^32`, and `0xfd` again with 8 bytes
/// above. Decoding reads `0xff` as the 8-byte form, so values of `2^32` and above do not survive a
/// round-trip; no PRCY structure ever holds that many elements.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash, Default)]
pub struct VarInt(pub u64);

impl std::fmt::Display for VarInt {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Decodable for VarInt {
    fn consensus_decode<D: io::Read>(d: &mut D) -> Result<VarInt, Error> {
        let tag: u8 = Decodable::consensus_decode(d)?;
        match tag {
            0xfd => {
                let n: u16 = Decodable::consensus_decode(d)?;
                Ok(VarInt(u64::from(n)))
            }
            0xfe => {
                let n: u32 = Decodable::consensus_decode(d)?;
                Ok(VarInt(u64::from(n)))
            }
            0xff => Ok(VarInt(Decodable::consensus_decode(d)?)),
            n => Ok(VarInt(u64::from(n))),
        }
    }
}

#[sealed]
impl Encodable for VarInt {
    fn consensus_encode<S: io::Write>(&self, s: &mut S) -> Result<usize, io::Error> {
        match self.0 {
            0..=0xfc => (self.0 as u8).consensus_encode(s),
            0xfd..=0xffff => {
                let len = 0xfdu8.consensus_encode(s)?;
                Ok(len + (self.0 as u16).consensus_encode(s)?)
            }
            0x1_0000..=0xffff_ffff => {
                let len = 0xfeu8.consensus_encode(s)?;
                Ok(len + (self.0 as u32).consensus_encode(s)?)
            }
            _ => {
                let len = 0xfdu8.consensus_encode(s)?;
                Ok(len + self.0.consensus_encode(s)?)
            }
        }
    }
}

pub(crate) fn decode_length<D: io::Read>(d: &mut D) -> Result<u64, Error> {
    let len = VarInt::consensus_decode(d)?.0;
    if len > MAX_VEC_SIZE {
        return Err(Error::ParseFailed("length prefix exceeds maximum vector size"));
    }
    Ok(len)
}

macro_rules! impl_int {
    ($ty:ident) => {
        impl Decodable for $ty {
            #[inline]
            fn consensus_decode<D: io::Read>(d: &mut D) -> Result<$ty, Error> {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                d.read_exact(&mut buf)?;
                Ok($ty::from_le_bytes(buf))
            }
        }

        #[sealed]
        impl Encodable for $ty {
            #[inline]
            fn consensus_encode<S: io::Write>(&self, s: &mut S) -> Result<usize, io::Error> {
                let bytes = self.to_le_bytes();
                s.write_all(&bytes)?;
                Ok(bytes.len())
            }
        }
    };
}

impl_int!(u8);
impl_int!(u16);
impl_int!(u32);
impl_int!(u64);
impl_int!(i32);

macro_rules! impl_array {
    ($size:literal) => {
        impl Decodable for [u8; $size] {
            #[inline]
            fn consensus_decode<D: io::Read>(d: &mut D) -> Result<[u8; $size], Error> {
                let mut buf = [0u8; $size];
                d.read_exact(&mut buf)?;
                Ok(buf)
            }
        }

        #[sealed]
        impl Encodable for [u8; $size] {
            #[inline]
            fn consensus_encode<S: io::Write>(&self, s: &mut S) -> Result<usize, io::Error> {
                s.write_all(&self[..])?;
                Ok($size)
            }
        }
    };
}

impl_array!(8);
impl_array!(32);

impl Decodable for Vec<u8> {
    #[inline]
    fn consensus_decode<D: io::Read>(d: &mut D) -> Result<Vec<u8>, Error> {
        let len = decode_length(d)?;
        let mut ret = Vec::new();
        d.by_ref().take(len).read_to_end(&mut ret)?;
        if ret.len() as u64 != len {
            return Err(Error::Truncated);
        }
        Ok(ret)
    }
}

#[sealed]
impl Encodable for Vec<u8> {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, s: &mut S) -> Result<usize, io::Error> {
        let len = VarInt(self.len() as u64).consensus_encode(s)?;
        s.write_all(self)?;
        Ok(len + self.len())
    }
}

macro_rules! impl_vec {
    ($type:ty) => {
        #[sealed]
        impl Encodable for Vec<$type> {
            #[inline]
            fn consensus_encode<S: io::Write>(&self, s: &mut S) -> Result<usize, io::Error> {
                Ok(encode_sized_vec!(self, s))
            }
        }

        impl Decodable for Vec<$type> {
            #[inline]
            fn consensus_decode<D: io::Read>(d: &mut D) -> Result<Vec<$type>, Error> {
                let len = decode_length(d)?;
                // Do not trust the prefix for the allocation.
                let mut ret = Vec::with_capacity(std::cmp::min(len, 1024) as usize);
                for _ in 0..len {
                    ret.push(Decodable::consensus_decode(d)?);
                }
                Ok(ret)
            }
        }
    };
}

impl_vec!(OutPoint);
impl_vec!(TxIn);
impl_vec!(TxOut);
impl_vec!([u8; 32]);
impl_vec!(Vec<[u8; 32]>);

#[cfg(test)]
mod tests {
    use super::{deserialize, deserialize_partial, serialize, Error, VarInt};

    #[test]
    fn varint_single_byte() {
        assert_eq!(serialize(&VarInt(0)), vec![0x00]);
        assert_eq!(serialize(&VarInt(252)), vec![0xfc]);
        assert_eq!(deserialize::<VarInt>(&[0xfc]).unwrap(), VarInt(252));
    }

    #[test]
    fn varint_tagged_widths() {
        assert_eq!(serialize(&VarInt(253)), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(serialize(&VarInt(0xffff)), vec![0xfd, 0xff, 0xff]);
        assert_eq!(
            serialize(&VarInt(0x1_0000)),
            vec![0xfe, 0x00, 0x00, 0x01, 0x00]
        );
        assert_eq!(
            serialize(&VarInt(0xffff_ffff)),
            vec![0xfe, 0xff, 0xff, 0xff, 0xff]
        );

        for n in [253u64, 1000, 0xffff, 0x1_0000, 0xdead_beef, 0xffff_ffff].iter() {
            assert_eq!(deserialize::<VarInt>(&serialize(&VarInt(*n))).unwrap(), VarInt(*n));
        }
    }

    #[test]
    fn varint_eight_byte_form_reuses_fd_tag() {
        let encoded = serialize(&VarInt(0x1_0000_0000));
        assert_eq!(
            encoded,
            vec![0xfd, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]
        );

        // The network reads the 0xfd tag as a 2-byte value.
        let (decoded, consumed) = deserialize_partial::<VarInt>(&encoded).unwrap();
        assert_eq!(decoded, VarInt(0));
        assert_eq!(consumed, 3);

        let tagged_ff = [0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
        assert_eq!(
            deserialize::<VarInt>(&tagged_ff).unwrap(),
            VarInt(0x1_0000_0000)
        );
    }

    #[test]
    fn signed_index_is_little_endian() {
        assert_eq!(serialize(&-1i32), vec![0xff; 4]);
        assert_eq!(deserialize::<i32>(&[0xff; 4]).unwrap(), -1);
        assert_eq!(serialize(&1u32), vec![0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn byte_vectors() {
        let data = vec![0xaa, 0xbb, 0xcc];
        assert_eq!(serialize(&data), vec![0x03, 0xaa, 0xbb, 0xcc]);
        assert_eq!(deserialize::<Vec<u8>>(&[0x03, 0xaa, 0xbb, 0xcc]).unwrap(), data);
        assert_eq!(serialize(&Vec::<u8>::new()), vec![0x00]);
    }

    #[test]
    fn truncated_input() {
        assert!(matches!(
            deserialize::<Vec<u8>>(&[0x05, 0x01, 0x02]),
            Err(Error::Truncated)
        ));
        assert!(matches!(deserialize::<u64>(&[0x01; 7]), Err(Error::Truncated)));
        assert!(matches!(
            deserialize::<Vec<[u8; 32]>>(&[0x02; 40]),
            Err(Error::Truncated)
        ));
    }

    #[test]
    fn trailing_data_is_rejected() {
        assert!(matches!(
            deserialize::<u32>(&[0x01, 0x00, 0x00, 0x00, 0x00]),
            Err(Error::ParseFailed(_))
        ));
    }
}
