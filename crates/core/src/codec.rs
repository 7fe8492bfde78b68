//! Compress/decompress entry points.
//!
//! Compression runs FrequencyModel -> HuffmanTree -> CodeTable -> bitstream;
//! decompression runs the [`Decoder`] state machine over the packed bytes.
//! Each call works on a fully materialized input and either returns the
//! complete result or an error.

use std::time::Instant;

use crate::bitstream::{serialize_with_layout, BitstreamLayout};
use crate::code::CodeTable;
use crate::config::{CodecConfig, SingleSymbolPolicy};
use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::frequency::FrequencyModel;
use crate::stats::CompressionStats;
use crate::tree::HuffmanTree;

/// A configured Huffman codec.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a codec after validating `config`.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// The code table compression of `input` would use.
    pub fn code_table(&self, input: &[u8]) -> Result<CodeTable> {
        let (tree, _) = self.build(input)?;
        Ok(tree.codes().clone())
    }

    /// Compress `input` into a packed bitstream.
    ///
    /// # Errors
    /// - `Error::EmptyInput` for empty input
    /// - `Error::InputTooLarge` above the configured maximum
    /// - `Error::SingleSymbolRejected` under `SingleSymbolPolicy::Reject`
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.encode(input).map(|(bytes, _, _)| bytes)
    }

    /// Compress `input` and report section sizes and timing.
    pub fn compress_with_stats(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        let start = Instant::now();
        let (bytes, layout, distinct) = self.encode(input)?;
        let stats = CompressionStats::new(
            input.len(),
            bytes.len(),
            distinct,
            &layout,
            start.elapsed(),
        );
        Ok((bytes, stats))
    }

    /// Decompress a packed bitstream back to the original bytes.
    ///
    /// # Errors
    /// `Error::Malformed` if the stream does not decode.
    pub fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        Decoder::new(bytes, self.config.strict_framing)?.run()
    }

    fn build(&self, input: &[u8]) -> Result<(HuffmanTree, FrequencyModel)> {
        if let Some(max) = self.config.max_input_len {
            if input.len() > max {
                return Err(Error::InputTooLarge {
                    len: input.len(),
                    max,
                });
            }
        }

        let freq = FrequencyModel::count(input)?;
        if let (Some(symbol), SingleSymbolPolicy::Reject) =
            (freq.single_symbol(), self.config.single_symbol)
        {
            return Err(Error::SingleSymbolRejected { symbol });
        }

        let tree = HuffmanTree::build(&freq)?;
        Ok((tree, freq))
    }

    fn encode(&self, input: &[u8]) -> Result<(Vec<u8>, BitstreamLayout, usize)> {
        let (tree, freq) = self.build(input)?;
        let (bytes, layout) = serialize_with_layout(&tree, input, tree.codes())?;
        Ok((bytes, layout, freq.distinct()))
    }
}

/// Compress with the default configuration.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    Codec::default().compress(input)
}

/// Decompress with the default configuration.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    Codec::default().decompress(bytes)
}
