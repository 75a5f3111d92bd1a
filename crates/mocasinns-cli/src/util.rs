use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use mocasinns_stats::{
    loader::{self, LoadOptions},
    precision::Precision,
    table::{KeyedMapping, Table},
};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        if let Output::File { path, .. } = &output {
            tracing::info!("Result saved to {}", path.display());
        }
        Ok(())
    }

    pub fn from_output_path(output_path: Option<&Path>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path.to_path_buf()),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Options for parsing input tables, shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TableArg {
    /// Marker that starts a comment; an empty string disables comments
    #[arg(long, default_value = "#")]
    pub comment: String,
    /// Field delimiter (default: any run of whitespace)
    #[arg(long)]
    pub delimiter: Option<String>,
    /// Number of leading lines to skip
    #[arg(long, default_value_t = 0)]
    pub skip_rows: usize,
    /// Precision for parsing and averaging (f32 or f64)
    #[arg(long, default_value = "f64")]
    pub precision: Precision,
}

impl TableArg {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::default()
            .with_comment_marker(self.comment.clone())
            .with_delimiter(self.delimiter.clone())
            .with_skip_rows(self.skip_rows)
            .with_precision(self.precision)
    }
}

/// Read a numeric table from a text file
///
/// # Errors
///
/// Returns error if the file cannot be opened or a line is malformed
pub fn read_table_file<P>(path: P, options: &LoadOptions) -> anyhow::Result<Table>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let table = loader::load_table(path, options)
        .with_context(|| format!("Failed to load table file: {}", path.display()))?;
    tracing::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.width(),
        path.display()
    );
    Ok(table)
}

/// Read one column of a table file as a sample series
pub fn read_column<P>(path: P, column: usize, options: &LoadOptions) -> anyhow::Result<Vec<f64>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let table = read_table_file(path, options)?;
    table
        .column(column)
        .with_context(|| format!("Failed to select column {column} of {}", path.display()))
}

/// Read a table file into a keyed mapping
pub fn read_mapping_file<P>(path: P, options: &LoadOptions) -> anyhow::Result<KeyedMapping>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mapping = loader::load_mapping(path, options)
        .with_context(|| format!("Failed to load table file: {}", path.display()))?;
    tracing::info!("Loaded {} keys from {}", mapping.len(), path.display());
    Ok(mapping)
}
