//! Compression statistics.
//!
//! Filled in by [`Codec::compress_with_stats`](crate::codec::Codec::compress_with_stats)
//! so callers can report sizes without the core printing anything.

use std::time::Duration;

use crate::bitstream::BitstreamLayout;

/// Sizes and timing for one compression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressionStats {
    // === Input/Output ===
    /// Bytes handed to the compressor
    pub input_bytes: u64,

    /// Bytes in the packed stream
    pub output_bytes: u64,

    /// Distinct symbols in the input
    pub distinct_symbols: usize,

    // === Stream layout ===
    /// Tree shape bits
    pub shape_bits: u64,

    /// Leaf symbol bits (8 per leaf on the wire)
    pub leaf_symbol_bits: u64,

    /// Encoded payload bits
    pub payload_bits: u64,

    /// Marker plus alignment bits
    pub padding_bits: u64,

    // === Timing ===
    /// Wall time spent compressing
    pub duration: Duration,
}

impl CompressionStats {
    pub(crate) fn new(
        input_bytes: usize,
        output_bytes: usize,
        distinct_symbols: usize,
        layout: &BitstreamLayout,
        duration: Duration,
    ) -> Self {
        Self {
            input_bytes: input_bytes as u64,
            output_bytes: output_bytes as u64,
            distinct_symbols,
            shape_bits: layout.shape_bits as u64,
            leaf_symbol_bits: layout.leaf_symbol_bits as u64,
            payload_bits: layout.payload_bits as u64,
            padding_bits: layout.padding_bits as u64,
            duration,
        }
    }

    /// Compression ratio (output / input).
    ///
    /// Returns 0.0 if nothing was compressed.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average payload code length per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.input_bytes as f64
        }
    }

    /// Bits that are not payload: tree shape, leaf symbols, marker and padding.
    pub fn overhead_bits(&self) -> u64 {
        self.shape_bits + self.leaf_symbol_bits + self.padding_bits
    }

    /// Throughput in input bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / secs
        }
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "input_bytes={}\n\
             output_bytes={}\n\
             distinct_symbols={}\n\
             shape_bits={}\n\
             leaf_symbol_bits={}\n\
             payload_bits={}\n\
             padding_bits={}\n\
             compression_ratio={:.4}\n\
             bits_per_symbol={:.4}\n\
             duration_us={}\n",
            self.input_bytes,
            self.output_bytes,
            self.distinct_symbols,
            self.shape_bits,
            self.leaf_symbol_bits,
            self.payload_bits,
            self.padding_bits,
            self.compression_ratio(),
            self.bits_per_symbol(),
            self.duration.as_micros(),
        )
    }
}
