use std::hint::black_box;

use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use huffman_rust::{CodecConfig, encode_with, decode_with, utils::timer::Timer};

#[derive(Parser, Debug)]
#[command(about = "Time encoding and decoding of random skewed inputs")]
struct Args {
    /// Number of symbols per input
    #[arg(short, long, default_value_t = 100_000)]
    len: usize,
    /// Number of distinct symbols
    #[arg(short, long, default_value_t = 64)]
    alphabet: u8,
    /// Number of runs
    #[arg(short, long, default_value_t = 5)]
    runs: usize,
    /// Seed of the input generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

/// Draws `len` symbols out of `0..alphabet`, low values more often.
fn gen_input(rng: &mut StdRng, len: usize, alphabet: u8) -> Vec<u8> {
    (0..len)
        .map(|_| {
            let x: f64 = rng.gen();
            (x * x * alphabet as f64) as u8
        })
        .collect()
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    assert!(args.len > 0, "Inputs must not be empty");
    assert!(args.alphabet > 0, "The alphabet must not be empty");
    assert!(args.runs > 0, "At least one run is needed");

    let config = CodecConfig::default();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut encode_timer = Timer::new();
    let mut decode_timer = Timer::new();
    let mut total_bits = 0;

    for _ in 0..args.runs {
        let input = gen_input(&mut rng, args.len, args.alphabet);

        encode_timer.start();
        let encoded = black_box(encode_with(&input, &config).expect("Failed encoding"));
        encode_timer.stop();

        decode_timer.start();
        let decoded = black_box(decode_with(&encoded.bits, &encoded.tree, &config).expect("Failed decoding"));
        decode_timer.stop();

        assert_eq!(decoded, input, "Round trip mismatch");
        total_bits += encoded.bits.len();
    }

    let symbols = args.len * args.runs;
    println!("encode: {:.2}ns per symbol", encode_timer.nanos_per(symbols));
    println!("decode: {:.2}ns per symbol", decode_timer.nanos_per(symbols));
    println!("average code length: {:.3} bits per symbol", total_bits as f64 / symbols as f64);
}
