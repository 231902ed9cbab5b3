mod app;
mod data;
mod engine;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use app::{ExplorerApp, open_interactively};
use data::loader::LoadOptions;
use ui::prompt::{InputClosed, Prompter};

#[derive(Parser)]
#[command(author, version, about = "Explore a delimited table from the terminal")]
struct Args {
    /// File to open; asked for interactively when omitted.
    file: Option<PathBuf>,
    /// Field delimiter for delimited text (`\t` or `tab` for tabs).
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,
    /// Rows shown after sorting or resetting.
    #[arg(long, default_value_t = 5)]
    preview_rows: usize,
}

fn parse_delimiter(s: &str) -> Result<u8> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => bail!("delimiter must be a single ASCII character, got '{s}'"),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = LoadOptions {
        delimiter: args.delimiter,
    };

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    let engine = match open_interactively(&mut prompter, args.file.as_deref(), &options) {
        Ok(Some(engine)) => engine,
        Ok(None) => return Ok(()),
        Err(e) if e.is::<InputClosed>() => return Ok(()),
        Err(e) => return Err(e),
    };

    ExplorerApp::new(engine, prompter, args.preview_rows).run()
}
