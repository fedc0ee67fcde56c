#![no_main]

use knapcrypt::knapsack::{self, Item};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&capacity, rest)) = data.split_first() else {
        return;
    };

    let items: Vec<Item> = rest
        .chunks_exact(2)
        .take(24)
        .map(|pair| Item::new(i64::from(pair[0] % 32), i64::from(pair[1] as i8)))
        .collect();
    let capacity = i64::from(capacity);

    let selection = knapsack::solve(&items, capacity).unwrap();

    let weight: i64 = selection.indices.iter().map(|&i| items[i].weight).sum();
    let value: i64 = selection.indices.iter().map(|&i| items[i].value).sum();
    assert!(weight <= capacity);
    assert_eq!(weight, selection.total_weight);
    assert_eq!(value, selection.total_value);
    assert!(selection.total_value >= 0);
});
