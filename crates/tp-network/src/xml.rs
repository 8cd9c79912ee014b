//! Shared plumbing for the streaming XML readers.
//!
//! Every input of the pipeline is read with `quick_xml` in pull mode, one
//! element at a time, reusing a single event buffer.  Files ending in `.gz`
//! are decompressed on the fly.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use quick_xml::Reader;
use quick_xml::events::BytesStart;

use crate::{NetworkError, NetworkResult};

/// Buffer size of the file reader wrapped around every input.
const READ_BUFFER: usize = 1 << 16;

/// Open `path` for buffered reading, decompressing `.gz` files.
pub fn open_input(path: &Path) -> std::io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    let gz = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    Ok(if gz {
        Box::new(BufReader::with_capacity(READ_BUFFER, MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(READ_BUFFER, file))
    })
}

/// Wrap `source` in a `quick_xml` reader configured the same way for all
/// inputs.
pub fn xml_reader<R: BufRead>(source: R) -> Reader<R> {
    let mut reader = Reader::from_reader(source);
    reader.trim_text(true);
    reader
}

/// Value of the attribute whose local name is `name`, unescaped.
pub fn attr(e: &BytesStart<'_>, name: &str) -> quick_xml::Result<Option<String>> {
    for a in e.attributes() {
        let a = a?;
        if a.key.local_name().as_ref() == name.as_bytes() {
            return Ok(Some(a.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// All attributes of `e` as `(local name, unescaped value)` pairs.
pub fn attributes(e: &BytesStart<'_>) -> quick_xml::Result<Vec<(String, String)>> {
    e.attributes()
        .map(|a| -> quick_xml::Result<(String, String)> {
            let a = a?;
            let key = String::from_utf8_lossy(a.key.local_name().as_ref()).into_owned();
            Ok((key, a.unescape_value()?.into_owned()))
        })
        .collect()
}

pub(crate) fn required(
    e: &BytesStart<'_>,
    element: &'static str,
    attribute: &'static str,
) -> NetworkResult<String> {
    attr(e, attribute)?.ok_or(NetworkError::MissingAttribute { element, attribute })
}

pub(crate) fn required_f64(
    e: &BytesStart<'_>,
    element: &'static str,
    attribute: &'static str,
) -> NetworkResult<f64> {
    let text = required(e, element, attribute)?;
    parse_f64(&text, element, attribute)
}

pub(crate) fn parse_f64(text: &str, element: &'static str, attribute: &'static str) -> NetworkResult<f64> {
    text.trim().parse().map_err(|_| NetworkError::BadNumber {
        element,
        attribute,
        value: text.to_owned(),
    })
}
