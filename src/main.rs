//! Command line front end.
//!
//! Usage:
//!   prefix_tree_compression <input>
//!   prefix_tree_compression compress <input>
//!   prefix_tree_compression expand <bitstream> <table> <output>

use std::path::Path;
use std::time::Instant;
use std::{env, fs, process};

use prefix_tree_compression::{compress, expand, expand_with_tree, Compression, Error};


fn usage(program: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {program} <input>                               compress, then expand");
    eprintln!("  {program} compress <input>");
    eprintln!("  {program} expand <bitstream> <table> <output>");
    process::exit(1);
}


fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}


fn report_compression(input: &Path, compression: &Compression) {

    let original = file_size(input);
    let compressed = file_size(&compression.artifacts.bitstream);

    println!("Code table written to {}", compression.artifacts.table.display());
    println!("Bitstream written to {}", compression.artifacts.bitstream.display());

    println!("Original size: {} bytes\nCompressed size: {} bytes\nCompression ratio: {}%",
        original, compressed, (compressed as f64 / original.max(1) as f64 * 100.0) as i32);
}


fn run_both(input: &Path) -> Result<(), Error> {

    println!("Compressing {}...\n", input.display());

    let start = Instant::now();
    let compression = compress(input)?;
    println!("Compression takes {:.2} seconds", start.elapsed().as_secs_f64());

    let expand_start = Instant::now();
    let summary = expand_with_tree(
        &compression.tree,
        &compression.artifacts.bitstream,
        &compression.artifacts.expanded
    )?;
    println!("Expansion takes {:.2} seconds\n", expand_start.elapsed().as_secs_f64());

    report_compression(input, &compression);
    println!("Expanded {} bytes to {}", summary.bytes, compression.artifacts.expanded.display());

    println!("Total time: {:.2} seconds", start.elapsed().as_secs_f64());

    Ok(())
}


fn main() {

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("prefix_tree_compression");

    let result = match args.get(1..).unwrap_or_default() {

        [command, input] if command == "compress" => {
            let input = Path::new(input);
            compress(input).map(|compression| report_compression(input, &compression))
        },

        [command, bitstream, table, output] if command == "expand" => {
            expand(bitstream, table, output).map(|summary| {
                println!("Expanded {} bytes to {}", summary.bytes, output);
            })
        },

        [input] if input != "compress" && input != "expand" => run_both(Path::new(input)),

        _ => usage(program),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
