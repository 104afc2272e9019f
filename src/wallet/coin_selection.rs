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

//! Coin selection.
//!
//! Picks the coins covering an amount plus a fee that grows with the number of inputs. An exact
//! single coin match wins immediately. Otherwise coins smaller than the amount plus the fee are
//! pooled, and the smallest coin covering the amount alone is remembered as a fallback. When the
//! pool is more than enough, its largest coins are taken until the amount and their fee are
//! covered.
//!

use std::collections::BTreeMap;

use log::debug;

use crate::network::Params;
use crate::util::fee::compute_fee;
use crate::wallet::Error;

/// Coins chosen to fund a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinSelection<K> {
    /// Identifiers of the selected coins.
    pub selected: Vec<K>,
    /// Sum of the selected values.
    pub sum: u64,
    /// Fee for spending the selected coins.
    pub fee: u64,
}

impl<K> CoinSelection<K> {
    /// Value left once the amount and the fee are paid.
    pub fn change(&self, target: u64) -> u64 {
        self.sum.saturating_sub(target).saturating_sub(self.fee)
    }
}

/// Select coins from `coins` (identifier to value) to pay `target` with `num_outputs` outputs
/// and rings of `ring_size` members.
///
/// Candidates are visited in key order, so the result is deterministic.
pub fn select_coins<K>(
    coins: &BTreeMap<K, u64>,
    target: u64,
    ring_size: usize,
    num_outputs: usize,
    params: &Params,
) -> Result<CoinSelection<K>, Error>
where
    K: Ord + Clone,
{
    let fee_for = |inputs: usize| compute_fee(inputs, num_outputs, ring_size, params);
    let fee_one = fee_for(1);
    let max_inputs = params.max_inputs();

    let mut lower: Vec<(&K, u64)> = vec![];
    let mut total_lower: u64 = 0;
    let mut lowest_larger: Option<(&K, u64)> = None;

    for (key, &value) in coins {
        if value == 0 || (params.lock_collateral && value == params.collateral) {
            continue;
        }

        let fee_needed = fee_for(lower.len() + 1);
        if value == target.saturating_add(fee_one) {
            debug!("Exact single coin match of {}", value);
            return Ok(CoinSelection {
                selected: vec![key.clone()],
                sum: value,
                fee: fee_one,
            });
        } else if value < target.saturating_add(fee_needed) {
            lower.push((key, value));
            total_lower = total_lower.saturating_add(value);
        } else if value >= target.saturating_add(fee_one)
            && lowest_larger.map_or(true, |(_, larger)| value < larger)
        {
            lowest_larger = Some((key, value));
        }
    }

    let fallback = |lowest_larger: Option<(&K, u64)>| match lowest_larger {
        Some((key, value)) => {
            debug!("Falling back to the lowest larger coin of {}", value);
            Ok(CoinSelection {
                selected: vec![key.clone()],
                sum: value,
                fee: fee_one,
            })
        }
        None => Err(Error::InsufficientFunds),
    };

    let lower_fee = fee_for(lower.len().max(1));
    if !lower.is_empty()
        && lower.len() <= max_inputs
        && total_lower == target.saturating_add(lower_fee)
    {
        debug!("Spending all {} smaller coins", lower.len());
        return Ok(CoinSelection {
            selected: lower.into_iter().map(|(key, _)| key.clone()).collect(),
            sum: total_lower,
            fee: lower_fee,
        });
    }

    if total_lower < target.saturating_add(lower_fee) {
        return fallback(lowest_larger);
    }

    // Largest smaller coins first. Each new input raises the fee.
    lower.sort_by_key(|(_, value)| *value);
    let mut selected = vec![];
    let mut sum: u64 = 0;
    for (key, value) in lower.iter().rev().take(max_inputs) {
        selected.push((*key).clone());
        sum = sum.saturating_add(*value);
        let fee = fee_for(selected.len());
        if sum >= target.saturating_add(fee) {
            debug!("Selected {} coins summing to {}, fee {}", selected.len(), sum, fee);
            return Ok(CoinSelection { selected, sum, fee });
        }
    }

    fallback(lowest_larger)
}
