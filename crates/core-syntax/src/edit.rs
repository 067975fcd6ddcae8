//! Edit descriptors handed to a tokenizer after each primitive change.
//!
//! Positions are codepoints like the rest of the engine. The byte and point
//! coordinates are captured alongside because tree-sitter addresses text in
//! bytes; they must be sampled before the change (start and old end) and
//! after it (new end), which is what [`PendingEdit`] enforces.

use core_text::Document;

/// Row and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextPoint {
    pub row: usize,
    pub column: usize,
}

impl TextPoint {
    fn at(doc: &Document, pos: usize) -> Self {
        let (row, column) = doc.point_at(pos);
        Self { row, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub pos: usize,
    pub num_inserted: usize,
    pub num_deleted: usize,
    pub start_byte: usize,
    pub old_end_byte: usize,
    pub new_end_byte: usize,
    pub start_point: TextPoint,
    pub old_end_point: TextPoint,
    pub new_end_point: TextPoint,
}

impl Edit {
    /// Capture the pre-change coordinates of a change at `pos` that removes
    /// `num_deleted` codepoints (zero for a pure insertion).
    pub fn begin(doc: &Document, pos: usize, num_deleted: usize) -> PendingEdit {
        let old_end = pos.saturating_add(num_deleted).min(doc.num_chars());
        PendingEdit {
            pos,
            num_deleted,
            start_byte: doc.char_to_byte(pos),
            old_end_byte: doc.char_to_byte(old_end),
            start_point: TextPoint::at(doc, pos),
            old_end_point: TextPoint::at(doc, old_end),
        }
    }
}

/// First half of an [`Edit`], taken before the document changes.
#[derive(Debug, Clone, Copy)]
pub struct PendingEdit {
    pos: usize,
    num_deleted: usize,
    start_byte: usize,
    old_end_byte: usize,
    start_point: TextPoint,
    old_end_point: TextPoint,
}

impl PendingEdit {
    /// Complete the descriptor once the change (inserting `num_inserted`
    /// codepoints at the same position) has been applied.
    pub fn finish(self, doc: &Document, num_inserted: usize) -> Edit {
        let new_end = self.pos + num_inserted;
        Edit {
            pos: self.pos,
            num_inserted,
            num_deleted: self.num_deleted,
            start_byte: self.start_byte,
            old_end_byte: self.old_end_byte,
            new_end_byte: doc.char_to_byte(new_end),
            start_point: self.start_point,
            old_end_point: self.old_end_point,
            new_end_point: TextPoint::at(doc, new_end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insertion_coordinates() {
        let mut doc = Document::from_text("aé\nb");
        let pending = Edit::begin(&doc, 3, 0);
        doc.insert_str(3, "ü\n").unwrap();
        let edit = pending.finish(&doc, 2);
        assert_eq!(edit.start_byte, 4);
        assert_eq!(edit.old_end_byte, 4);
        assert_eq!(edit.new_end_byte, 7);
        assert_eq!(edit.start_point, TextPoint { row: 1, column: 0 });
        assert_eq!(edit.new_end_point, TextPoint { row: 2, column: 0 });
    }

    #[test]
    fn deletion_coordinates() {
        let mut doc = Document::from_text("ab\ncd");
        let pending = Edit::begin(&doc, 1, 3);
        doc.delete_range(1, 3);
        let edit = pending.finish(&doc, 0);
        assert_eq!(edit.num_deleted, 3);
        assert_eq!(edit.old_end_byte, 4);
        assert_eq!(edit.old_end_point, TextPoint { row: 1, column: 1 });
        assert_eq!(edit.new_end_byte, 1);
        assert_eq!(edit.new_end_point, TextPoint { row: 0, column: 1 });
    }
}
