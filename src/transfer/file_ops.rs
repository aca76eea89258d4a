//! Module `file_ops`
//!
//! Streaming copies between HTTP bodies and files. Both directions hold at
//! most one buffer of data in memory regardless of the size of the file.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use log::{debug, error};
use std::fmt::Display;
use std::pin::pin;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio_util::io::ReaderStream;

use crate::error::TransferError;

/// Drains `body` into `file`, returning the number of bytes written.
///
/// The file is consumed and closed on every return path. A failure part way
/// through leaves whatever was already written in place.
pub async fn copy_body_to_file<S, E>(
    body: S,
    file: File,
    buffer_size: usize,
) -> Result<u64, TransferError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let mut body = pin!(body);
    let mut writer = BufWriter::with_capacity(buffer_size, file);
    let mut total_bytes_received = 0u64;

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| {
            error!("Request body read failed after {total_bytes_received} bytes: {e}");
            TransferError::BodyRead(e.to_string())
        })?;

        writer.write_all(&chunk).await.map_err(|e| {
            error!("Write failed after {total_bytes_received} bytes: {e}");
            TransferError::Write(e)
        })?;
        total_bytes_received += chunk.len() as u64;
    }

    writer.flush().await.map_err(TransferError::Flush)?;
    writer.into_inner().sync_all().await.map_err(TransferError::Flush)?;

    debug!("Copied {total_bytes_received} bytes from request body");
    Ok(total_bytes_received)
}

/// Wraps an open file in a bounded stream suitable for a response body.
pub fn file_body_stream(file: File, buffer_size: usize) -> ReaderStream<File> {
    ReaderStream::with_capacity(file, buffer_size)
}
