use anyhow::Result;
use is_terminal::IsTerminal;
use std::io;
use wordsort::pipeline::run;
use wordsort::words::read_words;

fn main() -> Result<()> {
    env_logger::init();
    let args = wordsort::args::parsed();
    log::debug!("running with {args:?}");

    let words = read_words(&args.file, args.max_words)?;
    let result = if io::stdout().is_terminal() {
        run(words, &args.options, io::stdout().lock())
    } else {
        run(words, &args.options, io::BufWriter::new(io::stdout().lock()))
    };
    match result {
        Err(e) if is_broken_pipe(&e) => Ok(()), // e.g. `wordsort big.txt | head`
        other => other,
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io_error| io_error.kind() == io::ErrorKind::BrokenPipe)
}
