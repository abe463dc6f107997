//! Builds a small trie and prints its arrays
//!
//! Run with `cargo run --example print_arrays`.

use datrie::{DoubleArrayTrie, LowercaseAscii, StatisticsProvider};

fn main() -> datrie::Result<()> {
    datrie::init();

    let words = [
        "cat",
        "car",
        "cargo",
        "cabin",
        "metal",
        "mental",
        "metallica",
        "mask",
        "tree",
        "train",
        "dispatcher",
    ];

    let mut trie = DoubleArrayTrie::new(26)?;
    trie.insert_all(words, &LowercaseAscii)?;
    trie.verify()?;

    println!("base:  {:?}", trie.base_values());
    println!("check: {:?}", trie.check_values());

    let stats = trie.stats();
    println!(
        "{} states in {} slots ({:.1}% used), {} relocations",
        stats.num_states,
        stats.array_len,
        stats.load_factor() * 100.0,
        stats.relocations
    );
    Ok(())
}
