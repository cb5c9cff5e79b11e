use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use autotris_ai::auto_player::AutoPlayerConfig;
use autotris_engine::Board;
use serde::{Serialize, de::DeserializeOwned};

/// Writes `value` as pretty JSON to `output_path`, or to stdout when `None`.
pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))
        }
        None => write_json(io::stdout().lock(), value).context("Failed to write JSON to stdout"),
    }
}

fn write_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Read auto-player configuration from a JSON file
///
/// Fields missing from the file take their default values.
pub fn read_config_file<P>(path: P) -> anyhow::Result<AutoPlayerConfig>
where
    P: AsRef<Path>,
{
    read_json_file("config", path)
}

/// Read an ASCII board (`#` filled, `.` empty) from a text file
pub fn read_board_file<P>(path: P) -> anyhow::Result<Board>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let art = fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file: {}", path.display()))?;
    let board = Board::from_ascii(&art)
        .with_context(|| format!("Failed to parse board file: {}", path.display()))?;
    Ok(board)
}
