//! CSV export of snapshot history

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{MetricsError, PerformanceTracker};

/// First line of every export.
pub const CSV_HEADER: &str =
    "operation,input_size,comparisons,swaps,array_accesses,memory_allocations";

impl PerformanceTracker {
    /// Write the header and one row per snapshot to `writer`.
    ///
    /// Labels are checked before the first byte is written. IO errors are
    /// returned as-is; whatever was written before the failure stays written.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        self.check_labels()
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

        self.with_history(|history| -> std::io::Result<()> {
            writeln!(writer, "{CSV_HEADER}")?;
            for snapshot in history {
                writeln!(writer, "{}", snapshot.to_csv_row())?;
            }
            Ok(())
        })?;
        writer.flush()
    }

    /// Render the full export into a string.
    pub fn to_csv_string(&self) -> Result<String, MetricsError> {
        self.check_labels()?;
        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        self.with_history(|history| {
            for snapshot in history {
                out.push_str(&snapshot.to_csv_row());
                out.push('\n');
            }
        });
        Ok(out)
    }

    /// Export snapshot history to `path`, creating parent directories.
    ///
    /// On failure the history is preserved so the caller may retry.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<(), MetricsError> {
        let path = path.as_ref();
        self.check_labels()?;

        let io_err = |source| MetricsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = File::create(path).map_err(io_err)?;
        self.write_csv(BufWriter::new(file)).map_err(io_err)?;

        tracing::debug!(
            path = %path.display(),
            rows = self.snapshot_count(),
            "exported metrics"
        );
        Ok(())
    }

    /// blake3 digest of the rendered export, hex encoded.
    ///
    /// Two runs performing the same operation sequence produce the same
    /// fingerprint.
    pub fn fingerprint(&self) -> Result<String, MetricsError> {
        let csv = self.to_csv_string()?;
        Ok(blake3::hash(csv.as_bytes()).to_hex().to_string())
    }

    fn check_labels(&self) -> Result<(), MetricsError> {
        self.with_history(|history| {
            match history
                .iter()
                .find(|s| s.operation.contains([',', '\n', '\r']))
            {
                Some(bad) => Err(MetricsError::InvalidLabel(bad.operation.clone())),
                None => Ok(()),
            }
        })
    }
}
