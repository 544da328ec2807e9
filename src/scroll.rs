use crate::blot::{EmbedBlot, Scope};
use crate::error::{EmbedError, EmbedResult};
use crate::escape::escape_text;

/// Content inside a paragraph
#[derive(Debug, Clone)]
pub enum Inline {
    Text(String),
    Embed(EmbedBlot),
}

impl Inline {
    pub fn length(&self) -> usize {
        match self {
            Inline::Text(text) => text.chars().count(),
            Inline::Embed(_) => 1,
        }
    }
}

/// Top-level child of the document
#[derive(Debug, Clone)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Embed(EmbedBlot),
}

impl Block {
    /// Paragraphs count their trailing newline
    pub fn length(&self) -> usize {
        match self {
            Block::Paragraph(inlines) => inlines.iter().map(Inline::length).sum::<usize>() + 1,
            Block::Embed(_) => 1,
        }
    }
}

/// The document tree: paragraphs of text and inline embeds, plus block embeds.
///
/// Positions are counted in chars; every embed occupies one position.
#[derive(Debug, Clone)]
pub struct Scroll {
    blocks: Vec<Block>,
}

impl Default for Scroll {
    fn default() -> Self {
        Self {
            blocks: vec![Block::Paragraph(Vec::new())],
        }
    }
}

impl Scroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn length(&self) -> usize {
        self.blocks.iter().map(Block::length).sum()
    }

    /// Block index and offset within it; `None` at the very end of the document
    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (i, block) in self.blocks.iter().enumerate() {
            let len = block.length();
            if index < start + len {
                return Some((i, index - start));
            }
            start += len;
        }
        None
    }

    fn check_index(&self, index: usize) -> EmbedResult<()> {
        let length = self.length();
        if index > length {
            return Err(EmbedError::IndexOutOfBounds { index, length });
        }
        Ok(())
    }

    /// Insert text; `\n` starts a new paragraph
    pub fn insert_text(&mut self, index: usize, text: &str) -> EmbedResult<()> {
        self.check_index(index)?;
        let mut cursor = index;
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.insert_newline(cursor);
                cursor += 1;
            }
            if !segment.is_empty() {
                self.insert_inline(cursor, Inline::Text(segment.to_string()));
                cursor += segment.chars().count();
            }
        }
        Ok(())
    }

    pub fn insert_embed(&mut self, index: usize, blot: EmbedBlot) -> EmbedResult<()> {
        self.check_index(index)?;
        tracing::trace!(index, blot = blot.blot_name(), "insert embed");
        match blot.scope() {
            Scope::Inline => self.insert_inline(index, Inline::Embed(blot)),
            Scope::Block => self.insert_block(index, Block::Embed(blot)),
        }
        Ok(())
    }

    fn insert_inline(&mut self, index: usize, inline: Inline) {
        match self.locate(index) {
            Some((bi, offset)) if matches!(self.blocks[bi], Block::Paragraph(_)) => {
                if let Block::Paragraph(inlines) = &mut self.blocks[bi] {
                    let at = split_inlines(inlines, offset);
                    inlines.insert(at, inline);
                    normalize(inlines);
                }
            }
            Some((bi, _)) => self.blocks.insert(bi, Block::Paragraph(vec![inline])),
            None => self.blocks.push(Block::Paragraph(vec![inline])),
        }
    }

    fn insert_block(&mut self, index: usize, block: Block) {
        match self.locate(index) {
            Some((bi, 0)) => self.blocks.insert(bi, block),
            Some((bi, offset)) => {
                let tail = self.split_paragraph(bi, offset);
                self.blocks.insert(bi + 1, block);
                self.blocks.insert(bi + 2, tail);
            }
            None => self.blocks.push(block),
        }
    }

    fn insert_newline(&mut self, index: usize) {
        match self.locate(index) {
            Some((bi, offset)) if matches!(self.blocks[bi], Block::Paragraph(_)) => {
                let tail = self.split_paragraph(bi, offset);
                self.blocks.insert(bi + 1, tail);
            }
            Some((bi, _)) => self.blocks.insert(bi, Block::Paragraph(Vec::new())),
            None => self.blocks.push(Block::Paragraph(Vec::new())),
        }
    }

    /// Cut paragraph `bi` at `offset`, returning the tail as a new paragraph
    fn split_paragraph(&mut self, bi: usize, offset: usize) -> Block {
        match &mut self.blocks[bi] {
            Block::Paragraph(inlines) => {
                let at = split_inlines(inlines, offset);
                Block::Paragraph(inlines.split_off(at))
            }
            Block::Embed(_) => Block::Paragraph(Vec::new()),
        }
    }

    pub fn embed_at(&self, index: usize) -> Option<&EmbedBlot> {
        let (bi, offset) = self.locate(index)?;
        match &self.blocks[bi] {
            Block::Embed(blot) => Some(blot),
            Block::Paragraph(inlines) => {
                let ii = inline_at(inlines, offset)?;
                match &inlines[ii] {
                    Inline::Embed(blot) => Some(blot),
                    Inline::Text(_) => None,
                }
            }
        }
    }

    pub fn embed_at_mut(&mut self, index: usize) -> Option<&mut EmbedBlot> {
        let (bi, offset) = self.locate(index)?;
        match &mut self.blocks[bi] {
            Block::Embed(blot) => Some(blot),
            Block::Paragraph(inlines) => {
                let ii = inline_at(inlines, offset)?;
                match &mut inlines[ii] {
                    Inline::Embed(blot) => Some(blot),
                    Inline::Text(_) => None,
                }
            }
        }
    }

    /// Serialize `length` positions starting at `index`.
    ///
    /// A range inside a single paragraph that does not cover the whole line is
    /// returned without the `<p>` wrapper.
    pub fn html(&self, index: usize, length: usize) -> String {
        if length == 0 {
            return String::new();
        }
        let end = index.saturating_add(length);

        if let Some((bi, offset)) = self.locate(index) {
            if let Block::Paragraph(inlines) = &self.blocks[bi] {
                let line_length = self.blocks[bi].length();
                let within_line = line_length >= offset.saturating_add(length);
                if within_line && !(offset == 0 && length == line_length) {
                    return inline_html(inlines, offset, offset + length);
                }
            }
        }

        let mut out = String::new();
        let mut start = 0;
        for block in &self.blocks {
            let len = block.length();
            if start + len > index && start < end {
                match block {
                    Block::Embed(blot) => out.push_str(&blot.html()),
                    Block::Paragraph(inlines) => {
                        let from = index.saturating_sub(start);
                        let to = (end - start).min(len - 1);
                        let inner = inline_html(inlines, from, to);
                        if inner.is_empty() {
                            out.push_str("<p><br></p>");
                        } else {
                            out.push_str("<p>");
                            out.push_str(&inner);
                            out.push_str("</p>");
                        }
                    }
                }
            }
            start += len;
        }
        out
    }
}

fn char_to_byte(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Make `offset` an inline boundary, splitting a text run if needed.
/// Returns the position where content at `offset` starts.
fn split_inlines(inlines: &mut Vec<Inline>, offset: usize) -> usize {
    let mut pos = 0;
    for i in 0..inlines.len() {
        if offset == pos {
            return i;
        }
        let len = inlines[i].length();
        if offset < pos + len {
            if let Inline::Text(text) = &mut inlines[i] {
                let tail = text.split_off(char_to_byte(text, offset - pos));
                inlines.insert(i + 1, Inline::Text(tail));
            }
            return i + 1;
        }
        pos += len;
    }
    inlines.len()
}

/// Inline starting exactly at `offset`
fn inline_at(inlines: &[Inline], offset: usize) -> Option<usize> {
    let mut pos = 0;
    for (i, inline) in inlines.iter().enumerate() {
        if pos == offset {
            return Some(i);
        }
        pos += inline.length();
        if pos > offset {
            return None;
        }
    }
    None
}

/// Merge adjacent text runs and drop empty ones
fn normalize(inlines: &mut Vec<Inline>) {
    let mut merged: Vec<Inline> = Vec::with_capacity(inlines.len());
    for inline in inlines.drain(..) {
        if let Inline::Text(text) = &inline {
            if text.is_empty() {
                continue;
            }
            if let Some(Inline::Text(prev)) = merged.last_mut() {
                prev.push_str(text);
                continue;
            }
        }
        merged.push(inline);
    }
    *inlines = merged;
}

fn inline_html(inlines: &[Inline], from: usize, to: usize) -> String {
    let mut out = String::new();
    let mut pos = 0;
    for inline in inlines {
        let len = inline.length();
        if pos >= to {
            break;
        }
        if pos + len > from {
            match inline {
                Inline::Text(text) => {
                    let skip = from.saturating_sub(pos);
                    let take = to.min(pos + len) - pos - skip;
                    let slice: String = text.chars().skip(skip).take(take).collect();
                    out.push_str(&escape_text(&slice));
                }
                Inline::Embed(blot) => out.push_str(&blot.html()),
            }
        }
        pos += len;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{EmbedFormat, Image, Video};

    fn image(url: &str) -> EmbedBlot {
        EmbedBlot::create(&EmbedFormat::from(Image::default()), url).unwrap()
    }

    fn video(url: &str) -> EmbedBlot {
        EmbedBlot::create(&EmbedFormat::from(Video::default()), url).unwrap()
    }

    #[test]
    fn test_empty_scroll() {
        let scroll = Scroll::new();
        assert_eq!(scroll.length(), 1);
        assert_eq!(scroll.html(0, 1), "<p><br></p>");
    }

    #[test]
    fn test_insert_text_with_newlines() {
        let mut scroll = Scroll::new();
        scroll.insert_text(0, "ab\ncd").unwrap();
        assert_eq!(scroll.length(), 6);
        assert_eq!(scroll.blocks().len(), 2);
        assert_eq!(scroll.html(0, 6), "<p>ab</p><p>cd</p>");
    }

    #[test]
    fn test_text_is_escaped() {
        let mut scroll = Scroll::new();
        scroll.insert_text(0, "<b>&</b>").unwrap();
        assert_eq!(scroll.html(0, scroll.length()), "<p>&lt;b&gt;&amp;&lt;/b&gt;</p>");
    }

    #[test]
    fn test_inline_embed_splits_text() {
        let mut scroll = Scroll::new();
        scroll.insert_text(0, "héllo").unwrap();
        scroll.insert_embed(2, image("a.png")).unwrap();
        assert_eq!(scroll.length(), 7);
        assert_eq!(scroll.html(0, 7), "<p>hé<img src=\"a.png\">llo</p>");
        assert_eq!(scroll.embed_at(2).map(|b| b.blot_name()), Some("image"));
        assert!(scroll.embed_at(1).is_none());
    }

    #[test]
    fn test_block_embed_at_line_start() {
        let mut scroll = Scroll::new();
        scroll.insert_embed(0, video("")).unwrap();
        assert_eq!(scroll.length(), 2);
        assert_eq!(scroll.html(0, 2), "<a href=\"\"></a><p><br></p>");
    }

    #[test]
    fn test_block_embed_splits_line() {
        let mut scroll = Scroll::new();
        scroll.insert_text(0, "abcd").unwrap();
        scroll.insert_embed(2, video("https://v.com/1")).unwrap();
        assert_eq!(scroll.blocks().len(), 3);
        assert_eq!(
            scroll.html(0, scroll.length()),
            "<p>ab</p><a href=\"https://v.com/1\">https://v.com/1</a><p>cd</p>"
        );
        assert_eq!(scroll.embed_at(3).map(|b| b.blot_name()), Some("video"));
    }

    #[test]
    fn test_text_before_block_embed_gets_own_paragraph() {
        let mut scroll = Scroll::new();
        scroll.insert_embed(0, video("https://v.com/1")).unwrap();
        scroll.insert_text(0, "x").unwrap();
        assert_eq!(
            scroll.html(0, scroll.length()),
            "<p>x</p><a href=\"https://v.com/1\">https://v.com/1</a><p><br></p>"
        );
    }

    #[test]
    fn test_partial_line_has_no_wrapper() {
        let mut scroll = Scroll::new();
        scroll.insert_text(0, "a<b").unwrap();
        assert_eq!(scroll.html(1, 2), "&lt;b");
        assert_eq!(scroll.html(0, 0), "");
    }

    #[test]
    fn test_index_out_of_bounds() {
        let mut scroll = Scroll::new();
        assert_eq!(
            scroll.insert_embed(5, image("a.png")).unwrap_err(),
            EmbedError::IndexOutOfBounds { index: 5, length: 1 }
        );
    }

    #[test]
    fn test_insert_at_end_appends_paragraph() {
        let mut scroll = Scroll::new();
        scroll.insert_embed(1, image("a.png")).unwrap();
        assert_eq!(scroll.html(0, scroll.length()), "<p><br></p><p><img src=\"a.png\"></p>");
    }

    #[test]
    fn test_adjacent_text_is_merged() {
        let mut scroll = Scroll::new();
        scroll.insert_text(0, "ac").unwrap();
        scroll.insert_text(1, "b").unwrap();
        match &scroll.blocks()[0] {
            Block::Paragraph(inlines) => assert_eq!(inlines.len(), 1),
            Block::Embed(_) => panic!("expected paragraph"),
        }
        assert_eq!(scroll.html(0, 4), "<p>abc</p>");
    }
}
