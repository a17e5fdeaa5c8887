//! Block engine: the capture stack behind `start`/`stop`/`parent`/`get`.
//!
//! A block is a named region of output. `start(name)` opens a frame that
//! swallows everything written until the matching `stop()`, at which point the
//! captured text becomes the block's finalized value. The same name may be
//! finalized many times during one page render; successive captures layer on
//! top of each other through `parent()`:
//!
//! - If the name already holds a complete value, `parent()` returns it, so the
//!   new capture can embed what it is about to replace.
//! - If the name holds nothing yet (or a value still waiting for its parent),
//!   `parent()` returns an empty string and leaves a *slot* at the current
//!   position. The next capture of that name is spliced into every slot.
//!
//! The first form lets a later definition extend an earlier one; the second
//! lets a child page open a block before the layout that supplies the base
//! content has run, and still end up with the layout's content in front.
//! Unfilled slots render as nothing.
//!
//! Contributors that all begin with `parent()` and find no base therefore
//! finalize newest first: captures of `parent()+X1`, `parent()+X2` and
//! `parent()+X3` leave `X3X2X1`. Write `parent()` last to collect in
//! document order.
//!
//! One `BlockEngine` belongs to one page render. It is not shared between
//! requests.

use std::collections::HashMap;

use crate::error::BlockError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk {
    Text(String),
    Parent,
}

/// Text interleaved with parent slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Content {
    chunks: Vec<Chunk>,
}

impl Content {
    fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.chunks.last_mut() {
            Some(Chunk::Text(last)) => last.push_str(text),
            _ => self.chunks.push(Chunk::Text(text.to_string())),
        }
    }

    fn push_slot(&mut self) {
        self.chunks.push(Chunk::Parent);
    }

    fn has_slot(&self) -> bool {
        self.chunks.iter().any(|c| matches!(c, Chunk::Parent))
    }

    /// Replace every slot with `child`.
    fn fill(&self, child: &Content) -> Content {
        let mut filled = Content::default();
        for chunk in &self.chunks {
            match chunk {
                Chunk::Text(text) => filled.push_str(text),
                Chunk::Parent => {
                    for inner in &child.chunks {
                        match inner {
                            Chunk::Text(text) => filled.push_str(text),
                            Chunk::Parent => filled.push_slot(),
                        }
                    }
                }
            }
        }
        filled
    }

    fn render(&self) -> String {
        self.chunks
            .iter()
            .filter_map(|c| match c {
                Chunk::Text(text) => Some(text.as_str()),
                Chunk::Parent => None,
            })
            .collect()
    }
}

/// A capture in progress.
#[derive(Debug)]
struct Frame {
    name: String,
    content: Content,
}

/// Capture stack plus the finalized value of every block seen so far.
#[derive(Debug, Default)]
pub struct BlockEngine {
    frames: Vec<Frame>,
    blocks: HashMap<String, Content>,
    /// Frames below this depth belong to an enclosing view and are invisible
    /// to the view currently executing.
    floor: usize,
}

impl BlockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a frame for `name`. Output goes to it until the matching `stop`.
    pub fn start(&mut self, name: impl Into<String>) {
        let name = name.into();
        tracing::trace!(block = %name, depth = self.frames.len(), "Block started");
        self.frames.push(Frame {
            name,
            content: Content::default(),
        });
    }

    /// Close the innermost frame and finalize its content.
    ///
    /// When another frame of the same view is still open, the finished block
    /// is also written into it.
    pub fn stop(&mut self) -> Result<(), BlockError> {
        if self.frames.len() <= self.floor {
            return Err(BlockError::NoOpenBlock);
        }
        let frame = self.frames.pop().ok_or(BlockError::NoOpenBlock)?;

        let finalized = match self.blocks.get(&frame.name) {
            Some(existing) if existing.has_slot() => existing.fill(&frame.content),
            _ => frame.content,
        };
        tracing::debug!(
            block = %frame.name,
            pending = finalized.has_slot(),
            "Block finalized"
        );

        let rendered = finalized.render();
        self.blocks.insert(frame.name, finalized);

        if let Some(outer) = self.current_frame_mut() {
            outer.content.push_str(&rendered);
        }
        Ok(())
    }

    /// Content the innermost open block is layered on top of.
    ///
    /// Returns the block's complete finalized value if there is one. Otherwise
    /// returns `""` and marks the current position of the frame so that the
    /// next capture of the same name lands there. Outside any frame this is
    /// always `""`.
    ///
    /// The returned text is meant to be written immediately.
    pub fn parent(&mut self) -> String {
        let Some(depth) = self.frames.len().checked_sub(1).filter(|d| *d >= self.floor) else {
            return String::new();
        };

        match self.blocks.get(&self.frames[depth].name) {
            Some(existing) if !existing.has_slot() => existing.render(),
            _ => {
                self.frames[depth].content.push_slot();
                String::new()
            }
        }
    }

    /// Finalized content of `name`, or `""` if it was never finalized.
    pub fn get(&self, name: &str) -> String {
        self.blocks.get(name).map(Content::render).unwrap_or_default()
    }

    /// Whether `name` has been finalized at least once.
    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// Names of all finalized blocks, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.blocks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Finalized blocks rendered to text, keyed by name.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.blocks
            .iter()
            .map(|(name, content)| (name.clone(), content.render()))
            .collect()
    }

    /// Append `text` to the innermost open frame visible to the current view.
    ///
    /// Returns `false` (and writes nothing) when no such frame is open, in
    /// which case the caller owns the output.
    pub fn capture(&mut self, text: &str) -> bool {
        match self.current_frame_mut() {
            Some(frame) => {
                frame.content.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Whether a frame of the current view is open.
    pub fn is_capturing(&self) -> bool {
        self.frames.len() > self.floor
    }

    /// Number of open frames across all views.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Drop all open frames and finalized blocks.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.blocks.clear();
        self.floor = 0;
    }

    /// Begin a nested view: frames opened so far become invisible to it.
    /// Returns the token to hand back to [`leave_scope`](Self::leave_scope)
    /// or [`abandon_scope`](Self::abandon_scope).
    pub(crate) fn enter_scope(&mut self) -> usize {
        let outer = self.floor;
        self.floor = self.frames.len();
        outer
    }

    /// End a nested view. Fails if the view left one of its own frames open;
    /// those frames are discarded either way.
    pub(crate) fn leave_scope(&mut self, outer: usize) -> Result<(), BlockError> {
        let result = match self.frames.get(self.floor) {
            Some(frame) => Err(BlockError::UnclosedBlock {
                name: frame.name.clone(),
            }),
            None => Ok(()),
        };
        self.abandon_scope(outer);
        result
    }

    /// End a nested view that failed, discarding any frames it opened.
    pub(crate) fn abandon_scope(&mut self, outer: usize) {
        self.frames.truncate(self.floor);
        self.floor = outer;
    }

    fn current_frame_mut(&mut self) -> Option<&mut Frame> {
        if self.frames.len() > self.floor {
            self.frames.last_mut()
        } else {
            None
        }
    }
}
