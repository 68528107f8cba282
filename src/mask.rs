//! Freehand mask stroke buffer.
//!
//! The buffer is host-visible memory owned by the compute engine and read
//! verbatim by the mask rasterizer on the GPU. Layout, in native-endian
//! `u32` words:
//!
//! ```text
//! [count] [pos 0] [brush 0] [pos 1] [brush 1] ...
//! pos   = v:16 << 16 | u:16              (normalized image position)
//! brush = hardness:8 << 24 | opacity:8 << 16 | radius/2:16
//! ```
//!
//! A vertex whose brush word is zero ends a stroke.

use serde::Serialize;

use crate::constants::mask::{HEADER_WORDS, UNORM16_MAX, UNORM8_MAX, WORDS_PER_VERTEX};
use crate::error::MaskError;

/// One brush dab, or a stroke terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StrokeVertex {
    pub u: u16,
    pub v: u16,
    /// Half the brush radius, 16-bit normalized.
    pub radius: u16,
    pub opacity: u8,
    pub hardness: u8,
}

impl StrokeVertex {
    /// Marks the boundary between two strokes.
    pub const TERMINATOR: StrokeVertex = StrokeVertex {
        u: 0,
        v: 0,
        radius: 0,
        opacity: 0,
        hardness: 0,
    };

    /// Quantize a dab at a normalized position.
    pub fn dab(pos: (f32, f32), radius: f32, opacity: f32, hardness: f32) -> Self {
        Self {
            u: unorm16(pos.0),
            v: unorm16(pos.1),
            radius: unorm16(0.5 * radius),
            opacity: unorm8(opacity),
            hardness: unorm8(hardness),
        }
    }

    pub fn pack(&self) -> [u32; 2] {
        [
            (u32::from(self.v) << 16) | u32::from(self.u),
            u32::from(self.radius) | (u32::from(self.opacity) << 16) | (u32::from(self.hardness) << 24),
        ]
    }

    pub fn unpack(words: [u32; 2]) -> Self {
        let [pos, brush] = words;
        Self {
            u: (pos & 0xFFFF) as u16,
            v: (pos >> 16) as u16,
            radius: (brush & 0xFFFF) as u16,
            opacity: ((brush >> 16) & 0xFF) as u8,
            hardness: (brush >> 24) as u8,
        }
    }

    #[inline]
    pub fn is_terminator(&self) -> bool {
        self.pack()[1] == 0
    }

    /// Normalized position.
    pub fn position(&self) -> (f32, f32) {
        (f32::from(self.u) / UNORM16_MAX, f32::from(self.v) / UNORM16_MAX)
    }
}

fn unorm16(x: f32) -> u16 {
    (x * UNORM16_MAX).round().clamp(0.0, UNORM16_MAX) as u16
}

fn unorm8(x: f32) -> u8 {
    (x * UNORM8_MAX).round().clamp(0.0, UNORM8_MAX) as u8
}

/// Bounds-checked view over a mapped mask buffer.
///
/// The buffer never grows; strokes are only ever removed by rewinding the
/// count.
#[derive(Debug)]
pub struct MaskBufferView<'a> {
    words: &'a mut [u32],
}

impl<'a> MaskBufferView<'a> {
    /// View a mapped byte region. It must be 4-byte aligned, a whole number
    /// of words, and hold at least the header.
    pub fn new(bytes: &'a mut [u8]) -> Result<Self, MaskError> {
        let words = bytemuck::try_cast_slice_mut::<u8, u32>(bytes).map_err(|_| MaskError::Layout {
            reason: "not a whole number of aligned u32 words",
        })?;
        Self::from_words(words)
    }

    pub fn from_words(words: &'a mut [u32]) -> Result<Self, MaskError> {
        if words.len() < HEADER_WORDS {
            return Err(MaskError::Layout {
                reason: "shorter than the header",
            });
        }
        Ok(Self { words })
    }

    /// Capacity in words, header included.
    pub fn capacity_words(&self) -> usize {
        self.words.len()
    }

    /// Number of vertices currently stored, terminators included.
    pub fn len(&self) -> usize {
        self.words[0] as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most vertices the buffer can hold.
    fn max_vertices(&self) -> usize {
        (self.capacity_words() - HEADER_WORDS) / WORDS_PER_VERTEX
    }

    fn has_room(&self) -> bool {
        self.len().saturating_mul(WORDS_PER_VERTEX).saturating_add(2) < self.capacity_words()
    }

    fn set_len(&mut self, count: usize) {
        self.words[0] = count as u32;
    }

    /// Append a vertex. Fails with [`MaskError::Full`] without touching the
    /// buffer when there is no room.
    pub fn append(&mut self, vertex: StrokeVertex) -> Result<(), MaskError> {
        if !self.has_room() {
            return Err(MaskError::Full);
        }
        let count = self.len();
        let at = HEADER_WORDS + WORDS_PER_VERTEX * count;
        self.words[at..at + WORDS_PER_VERTEX].copy_from_slice(&vertex.pack());
        self.set_len(count + 1);
        Ok(())
    }

    /// Append a brush dab at a normalized position.
    pub fn append_vertex(
        &mut self,
        pos: (f32, f32),
        radius: f32,
        opacity: f32,
        hardness: f32,
    ) -> Result<(), MaskError> {
        self.append(StrokeVertex::dab(pos, radius, opacity, hardness))
    }

    /// End the current stroke with a terminator. An empty buffer needs no
    /// boundary; returns whether a terminator was written.
    pub fn start_new_stroke(&mut self) -> Result<bool, MaskError> {
        if self.is_empty() {
            return Ok(false);
        }
        self.append(StrokeVertex::TERMINATOR)?;
        Ok(true)
    }

    /// Drop the most recent stroke, including the terminator that opened
    /// it. Returns the number of vertices removed.
    pub fn undo_last_stroke(&mut self) -> usize {
        let count = self.len().min(self.max_vertices());
        let mut keep = 0;
        for i in (0..count).rev() {
            if i == 0 || self.brush_word(i) == 0 {
                keep = i;
                break;
            }
        }
        let removed = self.len() - keep;
        self.set_len(keep);
        removed
    }

    fn brush_word(&self, index: usize) -> u32 {
        self.words[HEADER_WORDS + WORDS_PER_VERTEX * index + 1]
    }

    /// Decode the vertex at `index`.
    pub fn vertex(&self, index: usize) -> Option<StrokeVertex> {
        if index >= self.len().min(self.max_vertices()) {
            return None;
        }
        let at = HEADER_WORDS + WORDS_PER_VERTEX * index;
        Some(StrokeVertex::unpack([self.words[at], self.words[at + 1]]))
    }

    /// Decode all stored vertices in order.
    pub fn vertices(&self) -> impl Iterator<Item = StrokeVertex> + '_ {
        (0..self.len().min(self.max_vertices())).filter_map(move |i| self.vertex(i))
    }

    /// Number of strokes (runs of dabs between terminators).
    pub fn stroke_count(&self) -> usize {
        let mut strokes = 0;
        let mut in_stroke = false;
        for vertex in self.vertices() {
            if vertex.is_terminator() {
                in_stroke = false;
            } else if !in_stroke {
                in_stroke = true;
                strokes += 1;
            }
        }
        strokes
    }
}
