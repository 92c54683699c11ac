use std::{fs, path::PathBuf, process};

use clap::Parser;
use log::info;
use huffman_rust::{
    BitString, CodecConfig, DecodeMode, HuffmanError, Result,
    encode_with, decode_with, utils::timer::Timer,
};

#[derive(Parser, Debug)]
#[command(about = "Huffman-encode a text into a string of '0'/'1' and decode it back")]
struct Args {
    /// The text to encode. Without it (and without --input) the built-in scenarios are run
    text: Option<String>,
    /// Read the text from this file instead
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Codec configuration (.properties file)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Fail on bit strings that do not split exactly into codes
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Print the tree
    #[arg(long = "dump-tree", default_value_t = false)]
    dump_tree: bool,
    /// Print the tree as JSON (implies --dump-tree)
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Encodes and decodes `text`, printing what happened. Returns whether the
/// decoded text matches.
fn roundtrip(text: &str, config: &CodecConfig, dump_tree: bool, json: bool) -> Result<bool> {
    let input: Vec<char> = text.chars().collect();
    let mut timer = Timer::new();

    timer.start();
    let encoded = encode_with(&input, config)?;
    let encode_time = timer.stop();

    timer.start();
    let decoded: String = decode_with(&encoded.bits, &encoded.tree, config)?.into_iter().collect();
    let decode_time = timer.stop();

    let input_bits = text.len() * 8;
    println!("The content of the data is: {}", text);
    println!("The size of the data is: {} bits", input_bits);
    println!("The content of the encoded data is: {}", encoded.bits);
    println!("The size of the encoded data is: {} bits ({:.2}% of the input)",
        encoded.bits.len(), 100.0 * encoded.bits.len() as f64 / input_bits as f64);

    let mut codes: Vec<(char, &BitString, usize)> = encoded.frequencies.iter()
        .filter_map(|(&c, e)| e.code.as_ref().map(|code| (c, code, e.count)))
        .collect();
    codes.sort_by(|a, b| a.1.len().cmp(&b.1.len()).then(a.1.as_str().cmp(b.1.as_str())));
    for (c, code, count) in codes {
        println!("  {:?} x{}: {}", c, count, code);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&encoded.tree)?);
    } else if dump_tree {
        print!("{}", encoded.tree);
    }

    println!("The content of the decoded data is: {}", decoded);
    info!("encode took {}ns, decode took {}ns", encode_time, decode_time);

    Ok(decoded == text)
}

fn report(name: &str, pass: bool) -> bool {
    println!("{}: {}\n", name, if pass { "pass" } else { "Fail" });
    pass
}

/// The fixed scenarios: rejected inputs, a single repeated character and a
/// whole sentence.
fn scenarios(config: &CodecConfig) -> Result<bool> {
    let mut all = true;

    all &= report("Encoding empty input", matches!(
        encode_with::<char>(&[], config),
        Err(HuffmanError::InvalidInput(_))
    ));
    all &= report("Decoding non-binary input", matches!(
        "01x".parse::<BitString>(),
        Err(HuffmanError::TypeMismatch(_))
    ));

    for text in ["aaa", "The bird is the word"] {
        let pass = roundtrip(text, config, true, false)?;
        all &= report(&format!("Round trip of {:?}", text), pass);
    }

    Ok(all)
}

fn run(args: Args) -> Result<bool> {
    let mut config = match &args.config {
        Some(path) => CodecConfig::load_properties(path)?,
        None => CodecConfig::default(),
    };
    if args.strict {
        config = config.set_decode_mode(DecodeMode::Strict);
    }

    let text = match (&args.text, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => return scenarios(&config),
    };

    roundtrip(&text, &config, args.dump_tree || args.json, args.json)
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    match run(args) {
        Ok(true) => {},
        Ok(false) => {
            eprintln!("round trip mismatch");
            process::exit(1);
        },
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        },
    }
}
