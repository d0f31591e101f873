//! Feed document output.
//!
//! A feed is a `<channel>` carrying `title`, `description` and `link`,
//! followed by one `<item>` per record whose children are the record's
//! populated fields:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <channel>
//!   <title>FARFETCH</title>
//!   <description>FARFETCH UK</description>
//!   <link>https://www.farfetch.com/</link>
//!   <item>
//!     <id>19023311</id>
//!     ...
//!   </item>
//! </channel>
//! ```
//!
//! [`FeedLayout`] decides how successive batches share a sink.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::{Result, ShopfeedError};
use crate::domain::{Batch, ProductRecord};

mod config;

pub use config::FeedConfig;

const CHANNEL: &str = "channel";
const ITEM: &str = "item";

/// Fixed channel metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMeta {
    pub title: String,
    pub description: String,
    /// Site root written as the channel `link`
    pub link: String,
}

/// How batches are laid out in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedLayout {
    /// One document; every batch adds items to the same channel
    Merged,
    /// Each batch is appended as its own complete document
    Fragments,
}

/// Receives full (or final partial) batches from the pipeline.
pub trait BatchSink {
    fn write_batch(&mut self, batch: Batch) -> Result<()>;

    /// Called once after the last batch
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Write `records` to `sink` as one self-contained feed document.
pub fn write_fragment<W: Write>(records: &[ProductRecord], sink: W, meta: &FeedMeta) -> Result<()> {
    let mut xml = Writer::new_with_indent(sink, b' ', 2);
    write_document(&mut xml, records, meta).map_err(ShopfeedError::FeedWrite)
}

fn write_document<W: Write>(
    xml: &mut Writer<W>,
    records: &[ProductRecord],
    meta: &FeedMeta,
) -> io::Result<()> {
    write_header(xml, meta)?;
    write_items(xml, records)?;
    write_footer(xml)?;
    xml.get_mut().flush()
}

fn write_header<W: Write>(xml: &mut Writer<W>, meta: &FeedMeta) -> io::Result<()> {
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    xml.write_event(Event::Start(BytesStart::new(CHANNEL)))?;
    write_text_element(xml, "title", &meta.title)?;
    write_text_element(xml, "description", &meta.description)?;
    write_text_element(xml, "link", &meta.link)
}

fn write_items<W: Write>(xml: &mut Writer<W>, records: &[ProductRecord]) -> io::Result<()> {
    for record in records {
        xml.write_event(Event::Start(BytesStart::new(ITEM)))?;
        for (field, value) in record.iter() {
            write_text_element(xml, field.as_str(), value)?;
        }
        xml.write_event(Event::End(BytesEnd::new(ITEM)))?;
    }
    Ok(())
}

fn write_footer<W: Write>(xml: &mut Writer<W>) -> io::Result<()> {
    xml.write_event(Event::End(BytesEnd::new(CHANNEL)))?;
    xml.get_mut().write_all(b"\n")
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    xml.write_event(Event::Start(BytesStart::new(tag)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(tag)))
}

/// Batch sink writing feed XML to any `Write`.
pub struct FeedWriter<W: Write> {
    xml: Writer<W>,
    meta: FeedMeta,
    layout: FeedLayout,
    opened: bool,
    finished: bool,
    written: usize,
}

impl FeedWriter<BufWriter<File>> {
    /// Open `path` for the given layout.
    ///
    /// `Merged` truncates the file; `Fragments` appends to it.
    pub fn create(path: &Path, meta: FeedMeta, layout: FeedLayout) -> Result<Self> {
        let file = match layout {
            FeedLayout::Merged => File::create(path),
            FeedLayout::Fragments => OpenOptions::new().create(true).append(true).open(path),
        }
        .map_err(ShopfeedError::FeedWrite)?;

        Ok(Self::new(BufWriter::new(file), meta, layout))
    }
}

impl<W: Write> FeedWriter<W> {
    pub fn new(inner: W, meta: FeedMeta, layout: FeedLayout) -> Self {
        Self {
            xml: Writer::new_with_indent(inner, b' ', 2),
            meta,
            layout,
            opened: false,
            finished: false,
            written: 0,
        }
    }

    /// Records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.xml.into_inner()
    }

    fn write_merged(&mut self, records: &[ProductRecord]) -> io::Result<()> {
        if !self.opened {
            write_header(&mut self.xml, &self.meta)?;
            self.opened = true;
        }
        write_items(&mut self.xml, records)?;
        self.xml.get_mut().flush()
    }
}

impl<W: Write> BatchSink for FeedWriter<W> {
    fn write_batch(&mut self, batch: Batch) -> Result<()> {
        if self.finished {
            return Err(ShopfeedError::Other("Feed already finished".to_string()));
        }

        let records = batch.records();
        match self.layout {
            FeedLayout::Merged => self.write_merged(records),
            FeedLayout::Fragments => write_document(&mut self.xml, records, &self.meta),
        }
        .map_err(ShopfeedError::FeedWrite)?;

        self.written += records.len();
        debug!("Serialized {} items", records.len());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        if self.layout == FeedLayout::Merged {
            if !self.opened {
                write_header(&mut self.xml, &self.meta).map_err(ShopfeedError::FeedWrite)?;
                self.opened = true;
            }
            write_footer(&mut self.xml).map_err(ShopfeedError::FeedWrite)?;
        }
        self.xml.get_mut().flush().map_err(ShopfeedError::FeedWrite)
    }
}
