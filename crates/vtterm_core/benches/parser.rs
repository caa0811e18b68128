//! Throughput profiler for the terminal engine's byte-stream parser.
//!
//! ```sh
//! cargo bench --bench parser
//! cargo bench --bench parser -- --kind csi
//! cargo bench --bench parser -- --kind ascii --kind unicode
//! ```

use std::hint::black_box;
use std::time::{Duration, Instant};

use vtterm_core::{GlyphTable, Terminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Ascii,
    Unicode,
    Control,
    Csi,
    Pathological,
}

impl Kind {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ascii" | "plain" => Some(Kind::Ascii),
            "unicode" | "utf8" => Some(Kind::Unicode),
            "control" | "ctrl" => Some(Kind::Control),
            "csi" => Some(Kind::Csi),
            "pathological" | "path" => Some(Kind::Pathological),
            _ => None,
        }
    }

    fn all() -> Vec<Kind> {
        vec![
            Kind::Ascii,
            Kind::Unicode,
            Kind::Control,
            Kind::Csi,
            Kind::Pathological,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Kind::Ascii => "Plain ASCII",
            Kind::Unicode => "Unicode text",
            Kind::Control => "Control chars",
            Kind::Csi => "CSI sequences",
            Kind::Pathological => "Pathological",
        }
    }

    fn generate(&self, size: usize) -> Vec<u8> {
        match self {
            Kind::Ascii => cycle_fill(b"The quick brown fox jumps over the lazy dog. ", size),
            Kind::Unicode => cycle_fill("Hello 世界! café Ω α β γ. ".as_bytes(), size),
            Kind::Control => cycle_fill(b"Hello\r\n\tWorld\x08", size),
            Kind::Csi => generate_csi(size),
            Kind::Pathological => generate_pathological(size),
        }
    }
}

fn cycle_fill(pattern: &[u8], size: usize) -> Vec<u8> {
    pattern.iter().cycle().take(size).copied().collect()
}

fn generate_csi(size: usize) -> Vec<u8> {
    let sequences: [&[u8]; 6] = [
        b"\x1b[A",
        b"\x1b[B",
        b"\x1b[H",
        b"\x1b[2J",
        b"\x1b[38;5;208m",
        b"\x1b[48;2;100;150;200m",
    ];
    let mut result = Vec::new();
    let mut idx = 0;
    while result.len() < size {
        result.extend_from_slice(sequences[idx % sequences.len()]);
        result.extend_from_slice(b"text ");
        idx += 1;
    }
    result.truncate(size);
    result
}

/// Worst case for the escape-sequence state machine: a long run of
/// never-terminated-until-the-last-byte CSI sequences.
fn generate_pathological(size: usize) -> Vec<u8> {
    let mut result = Vec::new();
    while result.len() < size {
        result.push(0x1b);
        result.push(b'[');
        result.extend_from_slice(b"1;2;3;4;5");
        result.push(b'm');
        result.push(b'x');
    }
    result.truncate(size);
    result
}

fn run_benchmark(kind: Kind, size: usize, iterations: usize) -> Duration {
    let data = kind.generate(size);
    let start = Instant::now();
    for _ in 0..iterations {
        let mut term = Terminal::new(80, 24, GlyphTable::ascii_for_tests()).unwrap();
        let data = black_box(&data);
        term.parse(data);
        black_box(term.take_responses());
    }
    start.elapsed()
}

fn main() {
    let kinds: Vec<Kind> = std::env::args()
        .skip(1)
        .filter_map(|arg| Kind::from_str(arg.trim_start_matches("--kind=")))
        .collect();
    let kinds = if kinds.is_empty() { Kind::all() } else { kinds };

    println!("vtterm_core parser profile");
    println!("===========================\n");

    const SIZE: usize = 64 * 1024;
    const ITERATIONS: usize = 200;

    for kind in kinds {
        let elapsed = run_benchmark(kind, SIZE, ITERATIONS);
        let total_bytes = (SIZE * ITERATIONS) as f64;
        let throughput_mbs = (total_bytes / 1_000_000.0) / elapsed.as_secs_f64();
        println!(
            "{:<16} {:>8} iters  {:>8.2} ms  {:>10.2} MB/s",
            kind.label(),
            ITERATIONS,
            elapsed.as_secs_f64() * 1000.0,
            throughput_mbs
        );
    }
}
