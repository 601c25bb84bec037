//! Transport boundary between the relay and a live customer connection.
//!
//! The connection is split in two halves: the relay loop owns the
//! [`FrameSource`], the session entry owns the [`FrameSink`] so both the loop
//! and the review trigger can write to it.

use reviewbot_types::error::TransportError;

/// One application message on the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

impl Frame {
    /// Payload as text. Binary payloads are decoded as lossy UTF-8.
    pub fn to_text(&self) -> String {
        match self {
            Frame::Text(text) => text.clone(),
            Frame::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// A reply carrying `content` with the same framing as `self`.
    pub fn reply(&self, content: String) -> Frame {
        match self {
            Frame::Text(_) => Frame::Text(content),
            Frame::Binary(_) => Frame::Binary(content.into_bytes()),
        }
    }
}

/// Read half of a customer connection.
pub trait FrameSource: Send {
    /// Wait for the next application frame.
    ///
    /// A disconnect or protocol violation is an error; there is no "end of
    /// stream" success value.
    fn next_frame(
        &mut self,
    ) -> impl std::future::Future<Output = Result<Frame, TransportError>> + Send;
}

/// Write half of a customer connection.
pub trait FrameSink: Send + Sync + 'static {
    /// Write one frame. Fails when the peer is gone.
    fn send(
        &mut self,
        frame: Frame,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}
