use log::{debug, info};

use crate::errors::CoreError;

use super::encodings::EncodingDecoder;
use super::traits::TextDecoder;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Ordered list of candidate decoders.
///
/// Candidates are tried in registration order and the first decode that
/// contains the section marker wins. Most specific encoding first: a legacy
/// encoding will happily mis-decode a UTF-8 file.
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn TextDecoder>>,
}

impl DecoderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// Build a registry from WHATWG encoding labels, keeping their order.
    pub fn from_labels(labels: &[String]) -> Result<Self, CoreError> {
        let mut registry = Self::new();
        for label in labels {
            let decoder = EncodingDecoder::for_label(label).ok_or_else(|| {
                CoreError::ValidationError(format!("Unknown text encoding label: {label}"))
            })?;
            registry.register(Box::new(decoder));
        }
        Ok(registry)
    }

    /// Register a new candidate at the lowest priority.
    pub fn register(&mut self, decoder: Box<dyn TextDecoder>) {
        self.decoders.push(decoder);
    }

    /// Names of the registered candidates, in trial order.
    pub fn names(&self) -> Vec<&str> {
        self.decoders.iter().map(|d| d.name()).collect()
    }

    /// Decode statement bytes into text.
    ///
    /// Returns the first candidate decode containing `marker`, with a leading
    /// byte-order mark removed.
    pub fn decode_statement(&self, bytes: &[u8], marker: &str) -> Result<String, CoreError> {
        let text = self
            .decoders
            .iter()
            .find_map(|decoder| {
                let Some(text) = decoder.decode(bytes) else {
                    debug!("{} could not decode the statement", decoder.name());
                    return None;
                };
                if text.contains(marker) {
                    info!("statement decoded as {}", decoder.name());
                    Some(text)
                } else {
                    debug!("{} decode has no '{}' section", decoder.name(), marker);
                    None
                }
            })
            .ok_or_else(|| CoreError::UnsupportedEncoding {
                marker: marker.to_string(),
            })?;

        Ok(match text.strip_prefix(BYTE_ORDER_MARK) {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }
}

impl Default for DecoderRegistry {
    /// UTF-8, then Shift_JIS, then EUC-JP.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(EncodingDecoder::new(encoding_rs::UTF_8)));
        registry.register(Box::new(EncodingDecoder::new(encoding_rs::SHIFT_JIS)));
        registry.register(Box::new(EncodingDecoder::new(encoding_rs::EUC_JP)));
        registry
    }
}
