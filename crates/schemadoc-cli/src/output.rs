//! Output writing utilities
//!
//! Rendered documents go to stdout (or a file), status messages to stderr
//! so that piping the output never mixes the two.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::cli::MergeFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Serialize a value in the requested merge format
pub fn serialize<T: Serialize>(value: &T, format: MergeFormat) -> Result<String> {
    match format {
        MergeFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        MergeFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

/// Output writer for documents and status messages
pub struct OutputWriter {
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
    status: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer over stdout and stderr
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self::with_writers(use_color, quiet, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Create an output writer with custom writers
    pub fn with_writers(use_color: bool, quiet: bool, writer: Box<dyn Write>, status: Box<dyn Write>) -> Self {
        Self {
            use_color,
            quiet,
            writer,
            status,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a document to `save_to`, or to the output when not given
    pub fn document(&mut self, content: &str, save_to: Option<&Path>) -> Result<()> {
        let Some(path) = save_to else {
            return self.writeln(content);
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, format!("{content}\n"))?;
        debug!(path = %path.display(), bytes = content.len(), "Document saved");

        self.success(&format!("✓ Output saved to {}", path.display()))
    }

    fn status_line(&mut self, content: &str) -> Result<()> {
        writeln!(self.status, "{}", content)?;
        self.status.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet {
            return Ok(());
        }

        if self.use_color {
            self.status_line(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.status_line(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_color {
            self.status_line(&message.green().to_string())
        } else {
            self.status_line(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            self.status_line(&message.yellow().to_string())
        } else {
            self.status_line(&format!("WARNING: {}", message))
        }
    }
}
