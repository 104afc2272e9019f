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

//! Transaction size estimate and fee.
//!
//! The fee depends on the ring size because every ring member adds a decoy reference to its
//! input and a response scalar per MLSAG row. The formula must be reproduced exactly: the network
//! rejects transactions whose fee is below the one it computes.
//!

use crate::network::Params;

/// Bytes of fixed transaction overhead.
pub const FIXED_OVERHEAD: u64 = 94;
/// Bytes per output.
pub const OUTPUT_SIZE: u64 = 205;
/// Range proof bytes for a single output.
pub const RANGE_PROOF_SIZE_SINGLE: u64 = 675;
/// Range proof bytes for more than one output.
pub const RANGE_PROOF_SIZE_MULTI: u64 = 738;
/// Fee per 1 000 000 bytes.
pub const FEE_PER_MB: u64 = 10_000_000;

/// Serialized size of one input: prevout, sequence, key image and one 36-byte reference per
/// decoy.
pub fn input_size(ring_size: usize) -> u64 {
    36 + 4 + 33 + 36 * ring_size as u64
}

/// Range proof size for `num_outputs` outputs.
pub fn range_proof_size(num_outputs: usize) -> u64 {
    if num_outputs == 1 {
        RANGE_PROOF_SIZE_SINGLE
    } else {
        RANGE_PROOF_SIZE_MULTI
    }
}

/// Estimated serialized size of a transaction.
pub fn tx_size(num_inputs: usize, num_outputs: usize, ring_size: usize) -> u64 {
    let num_inputs = num_inputs as u64;
    let num_outputs = num_outputs as u64;
    let ring = ring_size as u64;

    FIXED_OVERHEAD
        + num_inputs * input_size(ring_size)
        + num_outputs * OUTPUT_SIZE
        + range_proof_size(num_outputs as usize)
        + (num_inputs + 1) * (ring + 1) * 32
}

/// Fee for a transaction of the given shape, capped at one coin of `params`.
pub fn compute_fee(
    num_inputs: usize,
    num_outputs: usize,
    ring_size: usize,
    params: &Params,
) -> u64 {
    let size = tx_size(num_inputs, num_outputs, ring_size);
    (size.saturating_mul(FEE_PER_MB) / 1_000_000).min(params.coin)
}

#[cfg(test)]
mod tests {
    use super::{compute_fee, input_size, tx_size};
    use crate::network::{Params, COIN};

    #[test]
    fn sizes() {
        assert_eq!(input_size(27), 1045);
        assert_eq!(tx_size(1, 2, 27), 4079);
        assert_eq!(tx_size(1, 1, 27), 4079 - 205 - 738 + 675);
    }

    #[test]
    fn fee_grows_with_inputs() {
        let params = Params::default();
        assert_eq!(compute_fee(1, 2, 27, &params), 40790);
        assert_eq!(compute_fee(2, 2, 27, &params), 60200);
        assert_eq!(compute_fee(3, 2, 27, &params), 79610);
        assert!(compute_fee(1, 2, 32, &params) > compute_fee(1, 2, 27, &params));
    }

    #[test]
    fn fee_is_capped() {
        assert_eq!(compute_fee(100_000, 2, 32, &Params::default()), COIN);
    }

    #[test]
    fn cap_follows_the_configured_coin() {
        let params = Params {
            coin: 50_000,
            ..Params::default()
        };
        assert_eq!(compute_fee(1, 2, 27, &params), 40790);
        assert_eq!(compute_fee(2, 2, 27, &params), 50_000);
        assert_eq!(compute_fee(100_000, 2, 32, &params), 50_000);
    }
}
