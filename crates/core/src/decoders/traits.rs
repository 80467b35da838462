/// One candidate text encoding for statement bytes.
///
/// A decoder is a pure `bytes → Option<text>` attempt: `None` means the
/// bytes are not valid in this encoding and the next candidate should be
/// tried. Whether the text is actually a statement is decided by the
/// registry, not here.
pub trait TextDecoder: Send + Sync {
    /// Human-readable encoding name (for logs/errors).
    fn name(&self) -> &str;

    /// Decode the full buffer, or `None` if this encoding cannot.
    fn decode(&self, bytes: &[u8]) -> Option<String>;
}
