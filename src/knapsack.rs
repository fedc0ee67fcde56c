// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded 0/1 knapsack solved by dynamic programming.
//!
//! Unlike the superincreasing knapsack behind the cipher, the weights here
//! are arbitrary, so the solver fills an `(items + 1) × (capacity + 1)` table
//! and walks it backwards to recover the chosen items.

use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};

/// Upper bound on DP table cells (16 GiB of `i64`).
const MAX_TABLE_CELLS: usize = 1 << 31;

/// A candidate item with a non-negative weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    pub weight: i64,
    pub value: i64,
}

impl Item {
    pub const fn new(weight: i64, value: i64) -> Self {
        Self { weight, value }
    }
}

/// Parses the `weight:value` pair format, e.g. `"4:8"`.
impl FromStr for Item {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (weight, value) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidInput(format!("'{}' is not a weight:value pair", s)))?;

        let parse = |field: &str| {
            field
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::InvalidInput(format!("'{}' is not an integer", field.trim())))
        };

        Ok(Self::new(parse(weight)?, parse(value)?))
    }
}

/// The optimal subset found by [`solve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Indices into the input slice, ascending.
    pub indices: Vec<usize>,
    pub total_weight: i64,
    pub total_value: i64,
}

/// Select the subset of `items` with the largest total value whose total
/// weight does not exceed `capacity`.
///
/// Capacities beyond the total item weight are treated as that total, so a
/// huge capacity costs nothing. A table that would still exceed the cell
/// limit, or cannot be allocated, is rejected with
/// [`Error::InvalidParameter`].
///
/// When several subsets reach the maximum, any one of them may be returned;
/// `total_value` is always the true maximum. Runs in
/// O(items × capacity) time and space.
pub fn solve(items: &[Item], capacity: i64) -> Result<Selection> {
    if capacity < 0 {
        return Err(Error::InvalidParameter(format!("capacity {} is negative", capacity)));
    }
    if let Some(index) = items.iter().position(|item| item.weight < 0) {
        return Err(Error::InvalidParameter(format!(
            "item {} has negative weight {}",
            index, items[index].weight
        )));
    }
    if items.is_empty() {
        return Ok(Selection::default());
    }

    // no subset weighs more than all items together
    let total = items.iter().fold(0i64, |sum, item| sum.saturating_add(item.weight));
    let cap = usize::try_from(capacity.min(total))
        .map_err(|_| Error::InvalidParameter(format!("capacity {} is too large", capacity)))?;
    let width = cap
        .checked_add(1)
        .ok_or_else(|| Error::InvalidParameter("capacity is too large".into()))?;
    let cells = (items.len() + 1)
        .checked_mul(width)
        .filter(|&cells| cells <= MAX_TABLE_CELLS)
        .ok_or_else(|| {
            Error::InvalidParameter(format!(
                "knapsack table for {} items and capacity {} is too large",
                items.len(),
                cap
            ))
        })?;

    // row i holds the best value using the first i items, per capacity
    let mut table = Vec::new();
    table.try_reserve_exact(cells).map_err(|err| {
        Error::InvalidParameter(format!("cannot allocate knapsack table: {}", err))
    })?;
    table.resize(cells, 0i64);

    for (i, item) in items.iter().enumerate() {
        let (done, rest) = table.split_at_mut((i + 1) * width);
        let prev = &done[i * width..];
        let row = &mut rest[..width];
        let weight = usize::try_from(item.weight).unwrap_or(usize::MAX);

        for c in 0..width {
            let mut best = prev[c];
            if weight <= c {
                let take = prev[c - weight]
                    .checked_add(item.value)
                    .ok_or_else(|| Error::InvalidInput("item values overflow".into()))?;
                best = best.max(take);
            }
            row[c] = best;
        }
    }

    let mut indices = Vec::new();
    let mut c = cap;
    for i in (0..items.len()).rev() {
        if table[(i + 1) * width + c] != table[i * width + c] {
            indices.push(i);
            c -= items[i].weight as usize;
        }
    }
    indices.reverse();

    let total_weight = indices.iter().map(|&i| items[i].weight).sum();
    let total_value = table[items.len() * width + cap];

    debug!(items = items.len(), capacity, total_value, "solved knapsack");

    Ok(Selection { indices, total_weight, total_value })
}
