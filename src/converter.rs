//! ASCII conversion through the external `ascii-image-converter`
//! binary. The converter is spawned per render with its stdout
//! captured, so the tool works with any build of it on PATH.

use crate::resolution::GridSize;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Binary probed on PATH when the config names no other command.
pub const DEFAULT_COMMAND: &str = "ascii-image-converter";

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(
        "'{0}' not found. Please install ascii-image-converter:\n\n    https://github.com/TheZoraiz/ascii-image-converter#installation\n"
    )]
    CommandNotFound(String),
    #[error("Failed to run '{command}': {source}")]
    SpawnFailed {
        command: String,
        source: std::io::Error,
    },
    #[error("'{command}' failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Converter produced no output")]
    EmptyOutput,
    #[error("'{0}' produced non-UTF-8 output")]
    BadEncoding(String),
}

/// Character grid produced by a conversion, normalized to exactly the
/// requested dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiBlock {
    rows: Vec<Vec<char>>,
    columns: usize,
}

impl AsciiBlock {
    /// Parse converter stdout into a grid of `grid` dimensions.
    ///
    /// Converter builds disagree by a row or column at some sizes, so
    /// long lines are trimmed and short ones padded with blanks rather
    /// than rejected. Any adjustment is logged. Output with no visible
    /// characters at all is an error.
    pub fn from_output(text: &str, grid: GridSize) -> Result<Self, ConvertError> {
        if text.trim().is_empty() {
            return Err(ConvertError::EmptyOutput);
        }
        let columns = grid.columns as usize;
        let target_rows = grid.rows as usize;
        let produced = text.lines().count();

        let mut adjusted = produced != target_rows;
        let mut rows: Vec<Vec<char>> = Vec::with_capacity(target_rows);
        for line in text.lines().take(target_rows) {
            let mut chars: Vec<char> = line.chars().collect();
            if chars.len() != columns {
                adjusted = true;
                chars.resize(columns, ' ');
            }
            rows.push(chars);
        }
        while rows.len() < target_rows {
            rows.push(vec![' '; columns]);
        }

        if adjusted {
            log::warn!(
                "converter produced {} line(s), normalized to {} grid",
                produced,
                grid
            );
        }
        Ok(AsciiBlock { rows, columns })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Rows top to bottom, each exactly `columns` characters.
    pub fn lines(&self) -> impl Iterator<Item = &[char]> {
        self.rows.iter().map(|row| row.as_slice())
    }
}

/// Anything that can turn an image file into a character grid.
pub trait AsciiSource {
    fn convert(&self, image: &Path, grid: GridSize) -> Result<AsciiBlock, ConvertError>;
}

/// The real converter subprocess.
pub struct ExternalConverter {
    command: String,
    braille: bool,
}

impl ExternalConverter {
    pub fn new(command: impl Into<String>, braille: bool) -> Self {
        ExternalConverter {
            command: command.into(),
            braille,
        }
    }

    fn build_args(&self, image: &Path, grid: GridSize) -> Vec<String> {
        let mut args = vec![
            "--dimensions".to_string(),
            format!("{},{}", grid.columns, grid.rows),
        ];
        if self.braille {
            args.push("--braille".to_string());
            args.push("--dither".to_string());
        }
        args.push(image.display().to_string());
        args
    }
}

impl AsciiSource for ExternalConverter {
    fn convert(&self, image: &Path, grid: GridSize) -> Result<AsciiBlock, ConvertError> {
        let args = self.build_args(image, grid);
        log::debug!("running {} {}", self.command, args.join(" "));

        let output = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConvertError::CommandNotFound(self.command.clone())
                } else {
                    ConvertError::SpawnFailed {
                        command: self.command.clone(),
                        source: e,
                    }
                }
            })?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                command: self.command.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|_| ConvertError::BadEncoding(self.command.clone()))?;
        AsciiBlock::from_output(&text, grid)
    }
}
