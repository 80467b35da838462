use encoding_rs::Encoding;
use log::warn;

use super::traits::TextDecoder;

/// One candidate encoding (UTF-8, Shift_JIS, EUC-JP, ...) via `encoding_rs`.
///
/// Decoding is lossy: malformed byte sequences become U+FFFD instead of
/// rejecting the candidate. The section marker check upstream is what tells
/// a real decode from garbage. A byte-order mark is kept.
pub struct EncodingDecoder {
    encoding: &'static Encoding,
}

impl EncodingDecoder {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Look up an encoding by its WHATWG label (e.g. "utf-8", "shift_jis", "euc-jp").
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(Self::new)
    }
}

impl TextDecoder for EncodingDecoder {
    fn name(&self) -> &str {
        self.encoding.name()
    }

    fn decode(&self, bytes: &[u8]) -> Option<String> {
        let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
        if had_errors {
            warn!("{} decode replaced malformed byte sequences", self.encoding.name());
        }
        Some(text.into_owned())
    }
}
