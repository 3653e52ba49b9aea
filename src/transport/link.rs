//! The byte link the engine writes to.
//!
//! A link accepts one chunk at a time and confirms each write before the
//! next is issued. It has no notion of windows or acknowledgments; those
//! arrive separately through [`AckManager`](crate::AckManager).

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Ordered, write-confirmed byte link (e.g. a BLE characteristic).
#[allow(async_fn_in_trait)]
pub trait ByteLink {
    /// Write one chunk, returning once the link has accepted it.
    async fn write(&mut self, chunk: &[u8]) -> io::Result<()>;
}

impl<L: ByteLink + ?Sized> ByteLink for &mut L {
    async fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        (**self).write(chunk).await
    }
}

/// [`ByteLink`] over any async writer, flushing after every chunk.
///
/// Useful for serial bridges, sockets and capturing traffic in tests.
#[derive(Debug)]
pub struct StreamLink<W> {
    inner: W,
    written: usize,
}

impl<W: AsyncWrite + Unpin> StreamLink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Total bytes accepted so far.
    #[inline]
    pub fn bytes_written(&self) -> usize {
        self.written
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: AsyncWrite + Unpin> ByteLink for StreamLink<W> {
    async fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.inner.write_all(chunk).await?;
        self.inner.flush().await?;
        self.written += chunk.len();
        Ok(())
    }
}
