//! Persistence: hand the finished document to the user.
//!
//! The exporter's last I/O step is `save(filename, content)`. The
//! [`Sink`] trait is that seam. [`FileSink`] writes into a directory,
//! [`StdoutSink`] prints the document for piping.

use crate::error::ExportError;
use crate::model::RenderedDocument;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Makes a rendered document available to the user.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn save(&self, document: &RenderedDocument) -> Result<(), ExportError>;
}

/// Replace characters that are not allowed in file names on common
/// platforms with `_`. Everything else, including spaces and non-ASCII
/// text, is kept.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Writes documents into a directory.
///
/// Writes are atomic: content goes to a temp file in the target directory
/// which is then renamed over the destination, so a failed save never
/// leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Destination path for a document file name.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(sanitize_filename(filename))
    }
}

#[async_trait]
impl Sink for FileSink {
    async fn save(&self, document: &RenderedDocument) -> Result<(), ExportError> {
        let path = self.path_for(&document.filename);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ExportError::OutputWriteFailed {
                path: path.clone(),
                source: e,
            })?;

        let dir = self.dir.clone();
        let dest = path.clone();
        let content = document.content.clone();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut tmp = tempfile::Builder::new()
                .prefix(".outline2html-")
                .suffix(".tmp")
                .tempfile_in(&dir)?;
            tmp.write_all(content.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(&dest).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| ExportError::Internal(format!("save task failed: {e}")))?
        .map_err(|e| ExportError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;

        info!(
            "Saved {} ({} bytes, {})",
            path.display(),
            document.content.len(),
            document.mime_type()
        );
        Ok(())
    }
}

/// Prints the document to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

#[async_trait]
impl Sink for StdoutSink {
    async fn save(&self, document: &RenderedDocument) -> Result<(), ExportError> {
        let mut out = tokio::io::stdout();
        let write = async {
            out.write_all(document.content.as_bytes()).await?;
            out.flush().await?;
            Ok::<_, std::io::Error>(())
        };
        write.await.map_err(|e| ExportError::OutputWriteFailed {
            path: PathBuf::from("<stdout>"),
            source: e,
        })?;
        debug!("Wrote {} to stdout", document.filename);
        Ok(())
    }
}
