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

//! Internal macros used for consensus (de)serialization and hexadecimal serde support.

/// Implements `Encodable` and `Decodable` for a struct by (de)serializing each field in
/// declaration order.
macro_rules! impl_consensus_encoding {
    ($thing:ident, $($field:ident),+) => (
        impl crate::consensus::encode::Decodable for $thing {
            #[inline]
            fn consensus_decode<D: std::io::Read>(
                d: &mut D,
            ) -> Result<$thing, crate::consensus::encode::Error> {
                Ok($thing {
                    $($field: crate::consensus::encode::Decodable::consensus_decode(d)?),+
                })
            }
        }

        #[sealed::sealed]
        impl crate::consensus::encode::Encodable for $thing {
            #[inline]
            fn consensus_encode<S: std::io::Write>(
                &self,
                s: &mut S,
            ) -> Result<usize, std::io::Error> {
                let mut len = 0;
                $(len += self.$field.consensus_encode(s)?;)+
                Ok(len)
            }
        }
    );
}

/// Encodes a slice as a count prefix followed by each element.
macro_rules! encode_sized_vec {
    ($vec:expr, $s:expr) => {{
        let mut len = 0;
        len += crate::consensus::encode::VarInt($vec.len() as u64).consensus_encode($s)?;
        for item in $vec.iter() {
            len += item.consensus_encode($s)?;
        }
        len
    }};
}

/// Implements serde `Serialize`/`Deserialize` as a lowercase hexadecimal string for a type
/// providing `as_bytes()` and `from_slice()`.
macro_rules! impl_hex_serde {
    ($thing:ident, $len:expr) => {
        #[cfg(feature = "serde")]
        impl serde_crate::Serialize for $thing {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde_crate::Serializer,
            {
                serializer.serialize_str(&hex::encode(self.as_bytes()))
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde_crate::Deserialize<'de> for $thing {
            fn deserialize<D>(deserializer: D) -> Result<$thing, D::Error>
            where
                D: serde_crate::Deserializer<'de>,
            {
                use serde_crate::de::Error;

                let s = <String as serde_crate::Deserialize>::deserialize(deserializer)?;
                let bytes = hex::decode(&s).map_err(D::Error::custom)?;
                if bytes.len() != $len {
                    return Err(D::Error::invalid_length(bytes.len(), &stringify!($len)));
                }
                Ok($thing::from_slice(&bytes))
            }
        }
    };
}
