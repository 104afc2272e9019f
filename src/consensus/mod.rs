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

//! Consensus-related encoding and decoding of PRCY data structures.
//!
//! Everything that travels over the wire or is hashed for signing goes through the
//! [`Encodable`](encode::Encodable) and [`Decodable`](encode::Decodable) traits.
//!

pub mod encode;

pub use self::encode::{
    deserialize, deserialize_partial, serialize, serialize_hex, Decodable, Encodable, VarInt,
};
