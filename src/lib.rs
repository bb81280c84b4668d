//! The `pipeline::run` function is the kernel of the application. The `args`
//! module parses the command line, and the `words` module turns a text file
//! into a list of words.
//!
//! The two pieces with real substance are:
//! * `set::ProbeHashSet`, a fixed-capacity open-addressing set that drops
//!   duplicate words while remembering the order they were first seen, and
//! * the `sort` module's quicksort, merge sort and heap sort over owned words.
//!
//! Current Limitations:
//! * A word is made of ASCII letters only; everything else in a token is
//!   thrown away.
//! * The set never grows, and with the default `probe::ProbeScheme::Checksum`
//!   some walks can't reach every slot. `--probe double-hash` avoids that.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![deny(missing_docs)]

pub mod args;
pub mod pipeline;
pub mod probe;
pub mod set;
pub mod sort;
pub mod words;

pub use crate::pipeline::Options;
pub use crate::probe::ProbeScheme;
pub use crate::set::{Insertion, Lookup, ProbeHashSet, ProbeSetError, Removal, RemovalPolicy};
pub use crate::sort::{Algorithm, Order, SortError};
