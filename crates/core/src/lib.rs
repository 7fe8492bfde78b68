//! huffpack-core: lossless Huffman compression with a self-describing bitstream
//!
//! This library provides the complete codec:
//! - Counts symbol frequencies over an in-memory input
//! - Builds a Huffman tree by repeatedly merging the two lightest nodes
//! - Derives a prefix-free code per symbol from the tree
//! - Serializes tree shape, leaf symbols and payload into one packed stream
//! - Rebuilds the tree and the original bytes from that stream
//!
//! # Architecture
//!
//! - `frequency`: Symbol occurrence counting
//! - `tree`: Arena-backed Huffman tree, construction and code derivation
//! - `code`: Codes and the symbol -> code table
//! - `bitstream`: Stream layout and serialization
//! - `decode`: Decode state machine
//! - `bitio`: Low-level bit reading/writing
//! - `codec`: Configured compress/decompress entry points
//! - `config`, `stats`, `error`: Ambient types
//!
//! # Example
//! ```
//! let compressed = huffpack_core::compress(b"abracadabra").unwrap();
//! let restored = huffpack_core::decompress(&compressed).unwrap();
//! assert_eq!(restored, b"abracadabra");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and returned
//! - **All or nothing**: A failed call yields no partial tree or output
//! - **Quiet**: Progress goes through the `log` facade, never stdout

pub mod bitio;
pub mod bitstream;
pub mod code;
pub mod codec;
pub mod config;
pub mod decode;
pub mod error;
pub mod frequency;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use code::{Code, CodeTable};
pub use codec::{compress, decompress, Codec};
pub use config::{CodecConfig, SingleSymbolPolicy};
pub use decode::{DecodeState, Decoder};
pub use error::{Error, MalformedBitstream, Result};
pub use frequency::FrequencyModel;
pub use stats::CompressionStats;
pub use tree::HuffmanTree;
