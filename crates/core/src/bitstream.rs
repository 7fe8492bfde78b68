//! Tree + payload serialization to the packed bitstream.
//!
//! # Stream Format
//!
//! ```text
//! +---------------------------+
//! | marker + padding          |  1..=8 zero bits: one `0` end marker plus
//! |                           |  0-7 zeros so the stream fills whole bytes
//! +---------------------------+
//! | shape bits                |  pre-order; per child slot `1` if the child
//! |                           |  exists (then its subtree), `0` if absent.
//! |                           |  Every leaf therefore contributes `00`.
//! +---------------------------+
//! | leaf symbols              |  8 bits per leaf, pre-order leaf order
//! +---------------------------+
//! | payload                   |  code of each input symbol, input order
//! +---------------------------+
//! ```
//!
//! Bits are packed MSB-first. The marker/padding run sits in front so the
//! stream ends exactly on the last payload bit; the decoder strips it by
//! skipping to the first `1`, which is always the first shape bit.
//!
//! There is no version field, length field or checksum.
//!
//! # Single-symbol input
//!
//! A single-leaf tree has no left/right split to walk. It goes on the wire
//! as a branch whose left child is the real symbol and whose right child is
//! a filler leaf (`symbol + 1`, wrapping), and each occurrence is one `1`
//! bit. Decoders need no special case for it.

use crate::bitio::BitWriter;
use crate::code::CodeTable;
use crate::error::{Error, HuffmanError, Result};
use crate::tree::{HuffmanTree, NodeId};

/// Bit counts of each section of a serialized stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitstreamLayout {
    /// Marker bit plus alignment zeros (1..=8)
    pub padding_bits: usize,
    pub shape_bits: usize,
    pub leaf_symbol_bits: usize,
    pub payload_bits: usize,
}

impl BitstreamLayout {
    fn new(leaves: usize, payload_bits: usize) -> Self {
        let shape_bits = 4 * leaves - 2;
        let leaf_symbol_bits = 8 * leaves;
        let content = shape_bits + leaf_symbol_bits + payload_bits;
        Self {
            padding_bits: 8 - content % 8,
            shape_bits,
            leaf_symbol_bits,
            payload_bits,
        }
    }

    pub fn total_bits(&self) -> usize {
        self.padding_bits + self.shape_bits + self.leaf_symbol_bits + self.payload_bits
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bits() / 8
    }
}

/// Serialize `tree`, then `payload` encoded with `codes`, into packed bytes.
///
/// # Errors
/// `HuffmanError::SymbolNotInTable` if a payload symbol has no code.
pub fn serialize(tree: &HuffmanTree, payload: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    serialize_with_layout(tree, payload, codes).map(|(bytes, _)| bytes)
}

/// Like [`serialize`], also reporting the size of each section.
pub fn serialize_with_layout(
    tree: &HuffmanTree,
    payload: &[u8],
    codes: &CodeTable,
) -> Result<(Vec<u8>, BitstreamLayout)> {
    let root = tree.node(tree.root());
    let (bytes, layout) = match (tree.is_degenerate(), root.symbol()) {
        (true, Some(symbol)) => serialize_single_symbol(symbol, payload)?,
        _ => serialize_tree(tree, payload, codes)?,
    };

    log::debug!(
        "serialized {} symbols: shape={} leaves={} payload={} padding={} bits",
        payload.len(),
        layout.shape_bits,
        layout.leaf_symbol_bits,
        layout.payload_bits,
        layout.padding_bits
    );
    Ok((bytes, layout))
}

fn serialize_tree(
    tree: &HuffmanTree,
    payload: &[u8],
    codes: &CodeTable,
) -> Result<(Vec<u8>, BitstreamLayout)> {
    let mut payload_bits = 0;
    for &symbol in payload {
        let code = codes
            .get(symbol)
            .ok_or(HuffmanError::SymbolNotInTable { symbol })?;
        payload_bits += code.len();
    }

    let leaves: Vec<u8> = tree
        .preorder()
        .filter_map(|id| {
            let node = tree.node(id);
            if node.is_leaf() {
                node.symbol()
            } else {
                None
            }
        })
        .collect();
    if leaves.is_empty() {
        return Err(Error::EmptyInput);
    }

    let layout = BitstreamLayout::new(leaves.len(), payload_bits);
    let mut writer = BitWriter::with_capacity(layout.total_bits());

    writer.write_zeros(layout.padding_bits);
    write_shape(tree, tree.root(), &mut writer);
    for &symbol in &leaves {
        writer.write_bits(symbol as u64, 8)?;
    }
    for &symbol in payload {
        if let Some(code) = codes.get(symbol) {
            for &bit in code.bits() {
                writer.write_bit(bit);
            }
        }
    }

    debug_assert_eq!(writer.bit_len(), layout.total_bits());
    debug_assert!(writer.is_aligned());
    Ok((writer.finish(), layout))
}

/// Emit `1` + subtree for each present child slot, `0` for each empty one.
fn write_shape(tree: &HuffmanTree, id: NodeId, writer: &mut BitWriter) {
    let node = tree.node(id);
    for child in [node.left(), node.right()] {
        match child {
            Some(child) => {
                writer.write_bit(true);
                write_shape(tree, child, writer);
            }
            None => writer.write_bit(false),
        }
    }
}

fn serialize_single_symbol(symbol: u8, payload: &[u8]) -> Result<(Vec<u8>, BitstreamLayout)> {
    if let Some(&other) = payload.iter().find(|&&s| s != symbol) {
        return Err(HuffmanError::SymbolNotInTable { symbol: other }.into());
    }
    log::warn!(
        "single-symbol input ({symbol:#04x} x {}): encoding with filler leaf",
        payload.len()
    );

    let filler = symbol.wrapping_add(1);
    let layout = BitstreamLayout::new(2, payload.len());
    let mut writer = BitWriter::with_capacity(layout.total_bits());

    writer.write_zeros(layout.padding_bits);
    // branch: left leaf, right leaf
    writer.write_bits(0b100100, 6)?;
    writer.write_bits(symbol as u64, 8)?;
    writer.write_bits(filler as u64, 8)?;
    for _ in payload {
        writer.write_bit(true);
    }

    debug_assert!(writer.is_aligned());
    Ok((writer.finish(), layout))
}
