//! Code to parse the command line using `clap`, and definitions of the parsed
//! result

use clap::{Parser, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::pipeline::Options;
use crate::probe::ProbeScheme;
use crate::sort::{Algorithm, Order};
use crate::words::MAX_WORDS;

/// Returns the parsed command line
#[must_use]
pub fn parsed() -> Args {
    from_cli(CliArgs::parse())
}

/// The command line, translated into the library's own types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The file whose words are sorted
    pub file: PathBuf,
    /// The most words to read from `file`
    pub max_words: usize,
    /// How to arrange the words
    pub options: Options,
}

fn from_cli(parsed: CliArgs) -> Args {
    let algorithm = match parsed.algorithm {
        CliAlgorithm::Quick => Algorithm::Quick,
        CliAlgorithm::Merge => Algorithm::Merge,
        CliAlgorithm::Heap => Algorithm::Heap,
    };
    let probe = match parsed.probe {
        CliProbe::Checksum => ProbeScheme::Checksum,
        CliProbe::DoubleHash => ProbeScheme::DoubleHash,
    };
    let order = if parsed.desc { Order::Descending } else { Order::Ascending };
    let capacity = parsed.capacity.map_or(parsed.max_words, NonZeroUsize::get);
    let options = Options {
        algorithm,
        order,
        uniq: parsed.uniq,
        random: parsed.random_sort,
        capacity,
        probe,
    };
    Args { file: parsed.file, max_words: parsed.max_words, options }
}

#[derive(Debug, Parser)]
#[command(name = "wordsort", version, about = "Sort the words of a text file")]
/// `CliArgs` contains the parsed command line.
struct CliArgs {
    /// Text file to be sorted
    file: PathBuf,
    #[arg(value_enum, default_value_t = CliAlgorithm::Quick)]
    /// Sort method
    algorithm: CliAlgorithm,
    #[arg(short, long)]
    /// Show each word only once
    uniq: bool,
    #[arg(short, long)]
    /// Sort in descending order
    desc: bool,
    #[arg(short = 'R', long)]
    /// Sort by word rank instead of the word, grouping equal words together
    random_sort: bool,
    #[arg(long, value_name = "SLOTS")]
    /// Slots in the set used by --uniq [default: the word limit]
    capacity: Option<NonZeroUsize>,
    #[arg(long, value_name = "N", default_value_t = MAX_WORDS)]
    /// Read at most N words
    max_words: usize,
    #[arg(long, value_enum, default_value_t = CliProbe::Checksum)]
    /// How the --uniq set resolves collisions
    probe: CliProbe,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
/// Name of the requested sort
enum CliAlgorithm {
    /// Quicksort (Lomuto partition)
    Quick,
    /// Merge sort
    Merge,
    /// Heap sort
    Heap,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
/// Name of the probe scheme
enum CliProbe {
    /// Character-sum hash with a fixed stride
    Checksum,
    /// Character-sum hash with a coprime stride from a second hash
    DoubleHash,
}
