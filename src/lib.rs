//! [![github]](https://github.com/duncanlivingston/tombola)&ensp;
//! [![crates-io]](https://crates.io/duncanlivingston/tombola)&ensp;
//!
//! [github]: https://img.shields.io/badge/github-8da0cb?style=for-the-badge&labelColor=555555&logo=github
//! [crates-io]: https://img.shields.io/badge/crates.io-fc8d62?style=for-the-badge&labelColor=555555&logo=rust
//!
//! ## Introduction
//!
//! This crate implements collections that can draw a member uniformly at random in constant
//! time, while keeping insertion, removal and membership tests constant time as well. A tombola
//! is the rotating drum that raffle tickets are drawn from, and these collections behave the
//! same way: every ticket inside is equally likely to come out.
//!
//! Each collection pairs a dense slice of its members with a position index that maps every
//! member back to its current slot in the slice. Insertion appends to the slice. Removal swaps
//! the departing member into the last slot, pops the tail, and repoints the single index entry
//! that moved, so nothing is shifted. Because the members are always packed into `0..count`,
//! drawing one uniformly takes a single random index.
//!
//! ## Benefits
//!
//! The crate complements the standard `std::collection` routines, but provides the following
//! benefits:
//!
//! - A uniform random draw is O(1). Neither `HashSet` nor `BTreeSet` can pick a random member
//!   without walking an iterator, which costs O(n) per draw.
//! - Draws take the generator as an argument rather than owning one, so sampling is
//!   deterministic and repeatable under a seeded generator. Any `rand::Rng` will do.
//! - `pop_random` draws without replacement: repeated calls consume the collection in a
//!   uniformly random order, again at O(1) per draw.
//! - Removal never shifts the remaining members; the only reordering cost is one swap.
//! - The crate is small and `#![no_std]`.
//!
//! Iteration order is arbitrary. It reflects the history of insertions and removal swaps and
//! carries no meaning, so these are not the collections to reach for when a stable order
//! matters. Keys are held both in the dense slice and in the position index, so they should be
//! cheap to clone - integers, small strings, identifiers and the like.
//!
//! ## Contents
//!
//! The initial release of the `tombola` crate includes the following types
//!
//! <center>
//!
//! | Type              | Stores       | Keyed By | Iterator                  |
//! |:------------------|:-------------|:---------|---------------------------|
//! | `RandomMap`       | Key/Value    | Hash     | `RandomMapIterator`       |
//! | `RandomSet`       | Key          | Hash     | `RandomSetIterator`       |
//! | `StringRandomMap` | String/Value | Hash     | `StringRandomMapIterator` |
//! | `StringRandomSet` | String       | Hash     | `StringRandomSetIterator` |
//!
//! </center>
//!
//! `RandomMap` and `RandomSet` accept an optional `BuildHasher` parameter in the same way as
//! the `hashbrown` collections they are built on, for callers that need a custom hash. The
//! string variants store their keys as compact strings internally and take and return plain
//! `&str`.

#![no_std]
#![warn(missing_docs)]

mod map;
mod set;

pub use map::*;
pub use set::*;
