//! Result files: per-match detail (JSON lines or one JSON array) plus a
//! CSV summary row per match.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::metrics::{CsvSummaryRow, GameMetrics};
use crate::types::OutputFormat;

type BoxError = Box<dyn std::error::Error>;

/// Detail output in the chosen format.
enum Detail {
    /// One line per match, written as it finishes.
    Lines(Box<dyn Write>),
    /// Held back and written as an array by [`OutputWriter::finish`].
    Array {
        out: Box<dyn Write>,
        games: Vec<GameMetrics>,
    },
}

pub struct OutputWriter {
    detail: Detail,
    summary: csv::Writer<BufWriter<File>>,
    detail_path: PathBuf,
    summary_path: PathBuf,
}

/// Open `path` for writing, gzipped when `compress` is set.
fn open_sink(path: &Path, compress: bool) -> io::Result<Box<dyn Write>> {
    let file = File::create(path)?;
    Ok(if compress {
        Box::new(BufWriter::new(GzEncoder::new(file, Compression::default())))
    } else {
        Box::new(BufWriter::new(file))
    })
}

/// File-name safe UTC timestamp shared by one run's files.
fn run_stamp() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap_or_else(|_| String::from("unknown"))
        .replace(':', "-")
}

impl OutputWriter {
    pub fn new(output_dir: &str, format: &OutputFormat, compress: bool) -> Result<Self, BoxError> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;
        let stamp = run_stamp();

        let ext = match format {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
        };
        let mut detail_name = format!("shithead_{stamp}.{ext}");
        if compress {
            detail_name.push_str(".gz");
        }
        let detail_path = dir.join(detail_name);
        let out = open_sink(&detail_path, compress)?;
        let detail = match format {
            OutputFormat::Jsonl => Detail::Lines(out),
            OutputFormat::Json => Detail::Array {
                out,
                games: Vec::new(),
            },
        };

        // The CSV header comes from the first serialized row
        let summary_path = dir.join(format!("shithead_{stamp}_summary.csv"));
        let summary = csv::Writer::from_writer(BufWriter::new(File::create(&summary_path)?));

        Ok(Self {
            detail,
            summary,
            detail_path,
            summary_path,
        })
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), BoxError> {
        match &mut self.detail {
            Detail::Lines(out) => {
                serde_json::to_writer(&mut *out, metrics)?;
                out.write_all(b"\n")?;
            }
            Detail::Array { games, .. } => games.push(metrics.clone()),
        }
        self.summary.serialize(CsvSummaryRow::from(metrics))?;
        self.summary.flush()?;
        Ok(())
    }

    pub fn finish(self) -> Result<(), BoxError> {
        let Self {
            detail,
            mut summary,
            ..
        } = self;
        match detail {
            Detail::Lines(mut out) => out.flush()?,
            Detail::Array { mut out, games } => {
                serde_json::to_writer_pretty(&mut out, &games)?;
                out.flush()?;
            }
        }
        summary.flush()?;
        Ok(())
    }

    /// Detail and summary file paths.
    pub fn output_paths(&self) -> (&Path, &Path) {
        (&self.detail_path, &self.summary_path)
    }
}
