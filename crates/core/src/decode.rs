//! Bitstream decoding as an explicit state machine.
//!
//! ```text
//! BuildingShape ──stack empty──▶ ReadingLeafSymbols ──all leaves named──▶ WalkingPayload ──bits exhausted──▶ Done
//! ```
//!
//! # BuildingShape
//!
//! A stack of in-progress nodes starts with a blank root. Each step first
//! pops every node on top whose two children are both set; an empty stack
//! ends the phase. Otherwise one bit is consumed:
//! - `1`: attach a fresh child to the top node (left slot first) and push it.
//! - `0`: if no pop is pending, set the pending flag. If one is pending,
//!   clear it, pop the top node and record it as a leaf.
//!
//! Two consecutive `0` bits after a push therefore close a leaf. The flag
//! is not cleared by a `1` bit.
//!
//! # ReadingLeafSymbols
//!
//! Each recorded leaf, in recording order, takes the next 8 bits as its
//! symbol.
//!
//! # WalkingPayload
//!
//! From the root, `1` steps left and `0` steps right. Reaching a leaf emits
//! its symbol and returns to the root. The walk must end at the root.
//!
//! Any violation is fatal; no partial output is returned.

use crate::bitio::BitReader;
use crate::error::{MalformedBitstream, Result};
use crate::tree::{HuffmanTree, NodeId};

/// Most leaves a valid tree can have (one per byte value).
const MAX_LEAVES: usize = 256;

/// Longest marker/padding run an encoder produces.
const MAX_FRAMING_ZEROS: usize = 8;

/// Phase of a [`Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    BuildingShape,
    ReadingLeafSymbols,
    WalkingPayload,
    Done,
}

/// Incremental decoder over one compressed stream.
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: BitReader<'a>,
    /// Bit offset of the first shape bit
    origin: usize,
    state: DecodeState,
    tree: HuffmanTree,
    stack: Vec<NodeId>,
    pending_pop: bool,
    leaves: Vec<NodeId>,
    next_leaf: usize,
    cursor: NodeId,
    output: Vec<u8>,
}

impl<'a> Decoder<'a> {
    /// Strip the leading marker/padding run and prepare to rebuild the tree.
    ///
    /// With `strict_framing` the run must be 1..=8 zero bits long; without
    /// it any run (including none) is skipped.
    ///
    /// # Errors
    /// `MalformedBitstream::MissingFraming` if the stream has no set bit or,
    /// when strict, the run length is out of range.
    pub fn new(bytes: &'a [u8], strict_framing: bool) -> Result<Self> {
        let mut reader = BitReader::new(bytes);
        let zeros = reader.skip_zeros();

        if reader.is_empty() || (strict_framing && !(1..=MAX_FRAMING_ZEROS).contains(&zeros)) {
            return Err(MalformedBitstream::MissingFraming { zeros }.into());
        }

        let tree = HuffmanTree::blank();
        let root = tree.root();
        Ok(Self {
            origin: reader.position(),
            reader,
            state: DecodeState::BuildingShape,
            tree,
            stack: vec![root],
            pending_pop: false,
            leaves: Vec::new(),
            next_leaf: 0,
            cursor: root,
            output: Vec::new(),
        })
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// The tree as rebuilt so far.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Symbols emitted so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Nodes still waiting for children during `BuildingShape`.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// A single `0` has been seen and the next `0` will close a leaf.
    pub fn pending_pop(&self) -> bool {
        self.pending_pop
    }

    /// Bits consumed since the end of the marker/padding run.
    pub fn position(&self) -> usize {
        self.reader.position() - self.origin
    }

    /// Advance by one unit of work: one shape bit, one leaf symbol, or one
    /// payload bit. Returns the state after the step.
    pub fn step(&mut self) -> Result<DecodeState> {
        match self.state {
            DecodeState::BuildingShape => self.step_shape()?,
            DecodeState::ReadingLeafSymbols => self.step_leaf_symbol()?,
            DecodeState::WalkingPayload => self.step_payload()?,
            DecodeState::Done => {}
        }
        Ok(self.state)
    }

    /// Run to `Done` and return the decoded symbols.
    pub fn run(mut self) -> Result<Vec<u8>> {
        self.run_to_end()?;
        Ok(self.output)
    }

    /// Run to `Done` and return the rebuilt tree alongside the symbols.
    pub fn finish(mut self) -> Result<(HuffmanTree, Vec<u8>)> {
        self.run_to_end()?;
        Ok((self.tree, self.output))
    }

    fn run_to_end(&mut self) -> Result<()> {
        while self.step()? != DecodeState::Done {}
        log::debug!(
            "decoded {} symbols from {} leaves ({} bits)",
            self.output.len(),
            self.leaves.len(),
            self.position()
        );
        Ok(())
    }

    fn step_shape(&mut self) -> Result<()> {
        while let Some(&top) = self.stack.last() {
            if !self.tree.node(top).is_complete() {
                break;
            }
            self.stack.pop();
        }

        let Some(&top) = self.stack.last() else {
            log::trace!("shape complete: {} leaves", self.leaves.len());
            self.state = DecodeState::ReadingLeafSymbols;
            return Ok(());
        };

        let position = self.position();
        let bit = self
            .reader
            .next_bit()
            .ok_or(MalformedBitstream::TruncatedShape { position })?;

        if bit {
            let child = self.tree.attach_child(top);
            self.stack.push(child);
        } else if self.pending_pop {
            self.pending_pop = false;
            self.stack.pop();
            if !self.tree.node(top).is_leaf() {
                return Err(MalformedBitstream::DanglingBranch { position }.into());
            }
            self.leaves.push(top);
            self.tree.record_leaf(top);
            if self.leaves.len() > MAX_LEAVES {
                return Err(MalformedBitstream::TooManyLeaves {
                    count: self.leaves.len(),
                }
                .into());
            }
        } else {
            self.pending_pop = true;
        }
        Ok(())
    }

    fn step_leaf_symbol(&mut self) -> Result<()> {
        let Some(&leaf) = self.leaves.get(self.next_leaf) else {
            log::trace!("leaf symbols assigned, walking payload");
            self.tree.refresh_codes();
            self.cursor = self.tree.root();
            self.state = DecodeState::WalkingPayload;
            return Ok(());
        };

        let position = self.position();
        if self.reader.bits_remaining() < 8 {
            return Err(MalformedBitstream::TruncatedLeafSymbol {
                leaf: self.next_leaf,
                position,
            }
            .into());
        }
        let symbol = self.reader.read_bits(8)? as u8;
        self.tree.set_symbol(leaf, symbol);
        self.next_leaf += 1;
        Ok(())
    }

    fn step_payload(&mut self) -> Result<()> {
        let position = self.position();
        let root = self.tree.root();

        let Some(bit) = self.reader.next_bit() else {
            if self.cursor != root {
                return Err(MalformedBitstream::IncompleteCode { position }.into());
            }
            self.state = DecodeState::Done;
            return Ok(());
        };

        let node = self.tree.node(self.cursor);
        let next = if bit { node.left() } else { node.right() };
        let next = next.ok_or(MalformedBitstream::MissingChild { position })?;

        let next_node = self.tree.node(next);
        if next_node.is_leaf() {
            let symbol = next_node
                .symbol()
                .ok_or(MalformedBitstream::MissingChild { position })?;
            self.output.push(symbol);
            self.cursor = root;
        } else {
            self.cursor = next;
        }
        Ok(())
    }
}

/// Decode a compressed stream with strict framing.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
    Decoder::new(bytes, true)?.run()
}
