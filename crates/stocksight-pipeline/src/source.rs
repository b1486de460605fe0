//! Line-delimited payload stream

use crate::PipelineError;
use async_trait::async_trait;
use std::path::Path;
use stocksight_domain::traits::PostSource;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Split, Stdin};

/// [`PostSource`] reading one JSON payload per line
///
/// Blank lines are skipped; end of input ends the stream. A line that is
/// not valid UTF-8 is passed on lossily so the pipeline drops it as a
/// malformed payload; only read failures end the stream with an error.
pub struct JsonLinesSource<R> {
    lines: Split<R>,
}

impl<R: AsyncBufRead + Unpin + Send> JsonLinesSource<R> {
    /// Read payloads from any buffered reader
    pub fn new(reader: R) -> Self {
        Self { lines: reader.split(b'\n') }
    }
}

impl JsonLinesSource<BufReader<File>> {
    /// Read payloads from a file
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let file = File::open(path).await?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl JsonLinesSource<BufReader<Stdin>> {
    /// Read payloads from standard input
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> PostSource for JsonLinesSource<R> {
    type Error = PipelineError;

    async fn next_payload(&mut self) -> Result<Option<String>, Self::Error> {
        while let Some(mut raw) = self.lines.next_segment().await? {
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Payload line is not valid UTF-8: {}", e.utf8_error());
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}
