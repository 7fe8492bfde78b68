//! Error types for the huffpack codec.
//!
//! All operations return structured errors rather than panicking. Every
//! failure is fatal for the compress/decompress call in progress: no partial
//! tree and no partial output is ever handed back.

use thiserror::Error;

/// Top-level error type for all operations in the codec.
///
/// Each variant corresponds to a specific failure domain:
/// - Input: nothing to encode, or input the configuration refuses
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Huffman: code table construction or lookup failures
/// - Malformed: a compressed stream that does not decode
#[derive(Debug, Error)]
pub enum Error {
    /// Construction invoked with zero symbols; no tree can be built
    #[error("empty input: no symbols to encode")]
    EmptyInput,

    /// Input has a single distinct symbol and the policy is `Reject`
    #[error("single-symbol input rejected (symbol {symbol:#04x})")]
    SingleSymbolRejected { symbol: u8 },

    /// Input is longer than the configured maximum
    #[error("input of {len} bytes exceeds configured maximum of {max}")]
    InputTooLarge { len: usize, max: usize },

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman codec error (e.g., symbol missing from the code table)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Compressed stream does not match the expected shape/leaf/payload layout
    #[error("malformed bitstream: {0}")]
    Malformed(#[from] MalformedBitstream),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (e.g., more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Huffman code construction errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// A payload symbol has no entry in the code table
    #[error("symbol {symbol:#04x} not in code table")]
    SymbolNotInTable { symbol: u8 },
}

/// Ways a compressed stream can fail to decode.
///
/// Positions are bit offsets into the stream after the leading
/// marker/padding run has been stripped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedBitstream {
    /// No leading marker/padding run, or no set bit at all
    #[error("missing framing: leading zero run of {zeros} bits (expected 1..=8)")]
    MissingFraming { zeros: usize },

    /// Bits ran out while rebuilding the tree shape
    #[error("tree shape truncated at bit {position}")]
    TruncatedShape { position: usize },

    /// Fewer than 8 bits left for a leaf symbol
    #[error("leaf {leaf} symbol truncated at bit {position}")]
    TruncatedLeafSymbol { leaf: usize, position: usize },

    /// Payload walk stepped onto an absent child
    #[error("payload walk hit a missing child at bit {position}")]
    MissingChild { position: usize },

    /// Payload ended in the middle of a code
    #[error("payload ended mid-code at bit {position}")]
    IncompleteCode { position: usize },

    /// A node closed as a leaf already had one child
    #[error("node closed with a single child at bit {position}")]
    DanglingBranch { position: usize },

    /// More leaves than distinct byte values
    #[error("tree has {count} leaves (max 256)")]
    TooManyLeaves { count: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
