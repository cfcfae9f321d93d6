//! Apply the security-header policy to an edge event document.
//!
//! Usage: `cargo run --bin transform -- event.json`
//!        `cat event.json | cargo run --bin transform -- --shape origin`

#![allow(clippy::print_stdout)]

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use eh_policy::{origin, viewer, OriginEvent, ViewerEvent};

#[derive(Parser)]
#[command(about = "Run an edge hook against an event document and print the response")]
struct Args {
    /// Event document path; reads stdin when omitted
    input: Option<PathBuf>,

    /// Event envelope shape
    #[arg(long, value_enum, default_value = "viewer")]
    shape: Shape,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Shape {
    /// CloudFront Functions viewer-response event
    Viewer,
    /// Lambda@Edge origin-response event
    Origin,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let output = match args.shape {
        Shape::Viewer => {
            let response = viewer::handler(ViewerEvent::from_json(&input)?);
            serde_json::to_string_pretty(&response)?
        }
        Shape::Origin => {
            let response = origin::handler(OriginEvent::from_json(&input)?)?;
            serde_json::to_string_pretty(&response)?
        }
    };

    println!("{output}");
    Ok(())
}
