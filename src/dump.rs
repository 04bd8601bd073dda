use crate::placement::PlacementOutcome;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct PlacementDump {
    pub texts: Vec<TextDump>,
    pub unplaced: usize,
    pub advisory: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TextDump {
    pub index: usize,
    /// `None` (JSON `null`) when the text was removed.
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub placed: bool,
    pub attempts: usize,
}

impl PlacementDump {
    pub fn from_outcome(outcome: &PlacementOutcome) -> Self {
        let texts = outcome
            .texts()
            .iter()
            .zip(outcome.positions())
            .enumerate()
            .map(|(index, (text, position))| TextDump {
                index,
                x: position.map(|p| p.x),
                y: position.map(|p| p.y),
                placed: text.placed,
                attempts: text.attempts,
            })
            .collect();

        PlacementDump {
            texts,
            unplaced: outcome.unplaced(),
            advisory: outcome.advisory().map(str::to_string),
        }
    }
}

/// Write the dump as JSON to `path`, or to stdout when no path is given.
pub fn write_placement_dump(
    path: Option<&Path>,
    dump: &PlacementDump,
    pretty: bool,
) -> anyhow::Result<()> {
    let mut writer: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    if pretty {
        serde_json::to_writer_pretty(&mut writer, dump)?;
    } else {
        serde_json::to_writer(&mut writer, dump)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
