//! # `chaincopy` - Chained Hash Tables with Honest Copies
//!
//! A small toolkit around two API conventions that are easy to get wrong:
//!
//! - **Copies that share nothing.** A hash table whose buckets own linked chains is the
//!   classic place where a shallow copy goes wrong: the bucket array is duplicated but
//!   the entries are not, so writes through the copy show up in the original.
//!   [`ChainedTable`] and [`Chain`] only ever hand out deep copies.
//! - **A documented string form.** [`PhoneNumber`] renders one exact format through
//!   `Display` and parses exactly that format back through `FromStr`, failing with a
//!   typed error on anything else.
//!
//! ## Deep copy without recursion
//!
//! Copying a chain entry by entry with one call per entry needs stack proportional to
//! the chain length. `Chain::clone` instead walks the source with a read cursor and
//! keeps a write cursor on the tail link of the copy, appending each fresh entry in
//! O(1). Teardown is iterative for the same reason. Both are safe for chains of any
//! length.
//!
//! ## Copy factories
//!
//! Besides `Clone`, [`ChainedTable::copy_of`] builds an independent table from any
//! source of borrowed pairs (another table, a `std` map, a slice of tuples), and
//! `FromIterator`/`Extend` accept owned pairs.
//!
//! ## Example
//!
//! ```rust
//! use chaincopy::{ChainedTable, PhoneNumber};
//!
//! let jenny: PhoneNumber = "707-867-5309".parse().unwrap();
//!
//! let mut original = ChainedTable::new();
//! original.insert(jenny, String::from("Jenny"));
//!
//! let mut copy = original.clone();
//! copy.get_mut(&jenny).unwrap().push_str(" (copy)");
//!
//! assert_eq!(original.get(&jenny).map(String::as_str), Some("Jenny"));
//! assert_eq!(copy.to_string(), "{707-867-5309=Jenny (copy)}");
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `trace!`/`debug!` events for every deep copy.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod chain;
pub mod config;
pub mod error;
pub mod phone;
pub mod table;

pub use chain::{Chain, Entry};
pub use config::TableConfig;
pub use error::{ConfigError, PhoneNumberError};
pub use phone::PhoneNumber;
pub use table::{ChainedTable, DEFAULT_BUCKETS};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // An empty link is the null niche of the box pointer.
    assert!(mem::size_of::<Option<Box<Entry<u64, u64>>>>() == mem::size_of::<usize>());

    // A chain is its head link plus a length.
    assert!(mem::size_of::<Chain<u64, u64>>() == mem::size_of::<usize>() * 2);

    // Three u16 components, no padding.
    assert!(mem::size_of::<PhoneNumber>() == 6);
};
