//! Replays recorded trails through a line counter and prints the counts.
//!
//! Usage: `count_trails <trails.jsonl> [config]`
//!
//! Every input line holds one frame:
//! `{"trails": {"7": [[l, t, r, b], ...]}, "classes": {"7": "car"}}`

use std::collections::HashMap;
use std::io::BufRead;

use qcount::bbox::{BBox, Ltrb};
use qcount::{FrameResult, LineCounter, LineCounterConfig, ResultAnalyzer};
use serde_derive::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
struct RecordedFrame {
    trails: HashMap<String, Vec<[f32; 4]>>,
    #[serde(default)]
    classes: HashMap<String, String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args();
    let _ = args.next();
    let in_file_name = args.next().ok_or("expected trails file name")?;
    let config_name = args.next().unwrap_or_else(|| "qcount".to_string());

    let config = LineCounterConfig::load(&config_name)?;
    let mut counter: LineCounter<String> = LineCounter::configure(config);

    let reader = std::io::BufReader::new(std::fs::File::open(in_file_name)?);

    for (frame_idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let recorded: RecordedFrame = match serde_json::from_str(&line) {
            Ok(x) => x,
            Err(err) => {
                eprintln!("frame {}: wrong file format: {}", frame_idx, err);
                continue;
            }
        };

        let mut result = FrameResult::new();
        result.trails = recorded
            .trails
            .into_iter()
            .map(|(id, boxes)| (id, boxes.iter().map(BBox::<Ltrb>::assigned).collect()))
            .collect();
        result.trail_classes = recorded.classes;

        ResultAnalyzer::analyze(&mut counter, &mut result)?;

        if let Some(counts) = &result.line_counts {
            println!("{}: {}", frame_idx, serde_json::to_string(counts)?);
        }
    }

    Ok(())
}
