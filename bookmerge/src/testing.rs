//! In-memory codec for engine tests.
//!
//! Documents are encoded as text: one line per page, followed by one
//! `#title@index` line per outline entry. Bytes starting with `!` fail to
//! decode.

use crate::codec::{CodecError, CodecResult, PdfCodec};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDoc {
    pub pages: Vec<String>,
    pub outline: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCodec {
    /// Fail `encode` when set.
    pub fail_encode: bool,
}

impl MemoryCodec {
    /// Source bytes for a document with `count` pages labelled `label-N`.
    pub fn source(label: &str, count: usize) -> Vec<u8> {
        (0..count)
            .map(|i| format!("{label}-{i}\n"))
            .collect::<String>()
            .into_bytes()
    }
}

impl PdfCodec for MemoryCodec {
    type Document = MemoryDoc;

    fn empty_document(&self) -> MemoryDoc {
        MemoryDoc::default()
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<MemoryDoc> {
        if bytes.first() == Some(&b'!') {
            return Err(CodecError::malformed("corrupt test document"));
        }
        let text = std::str::from_utf8(bytes).map_err(|e| CodecError::malformed(e.to_string()))?;

        let mut doc = MemoryDoc::default();
        for line in text.lines().filter(|l| !l.is_empty()) {
            match line.strip_prefix('#').and_then(|l| l.rsplit_once('@')) {
                Some((title, index)) => {
                    let index = index
                        .parse()
                        .map_err(|_| CodecError::malformed("bad outline line"))?;
                    doc.outline.push((title.to_string(), index));
                }
                None => doc.pages.push(line.to_string()),
            }
        }
        Ok(doc)
    }

    fn encode(&self, document: MemoryDoc) -> CodecResult<Vec<u8>> {
        if self.fail_encode {
            return Err(CodecError::Serialize {
                details: "encode disabled".to_string(),
            });
        }
        let mut text = String::new();
        for page in &document.pages {
            text.push_str(page);
            text.push('\n');
        }
        for (title, index) in &document.outline {
            text.push_str(&format!("#{title}@{index}\n"));
        }
        Ok(text.into_bytes())
    }

    fn page_count(&self, document: &MemoryDoc) -> usize {
        document.pages.len()
    }

    fn append_pages(&self, target: &mut MemoryDoc, source: MemoryDoc) -> CodecResult<()> {
        target.pages.extend(source.pages);
        Ok(())
    }

    fn add_outline_entry(
        &self,
        target: &mut MemoryDoc,
        title: &str,
        page_index: usize,
    ) -> CodecResult<()> {
        if page_index >= target.pages.len() {
            return Err(CodecError::PageOutOfRange {
                index: page_index,
                page_count: target.pages.len(),
            });
        }
        target.outline.push((title.to_string(), page_index));
        Ok(())
    }
}
