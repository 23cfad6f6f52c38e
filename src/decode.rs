//! Response body decoding.

use std::borrow::Cow;

use encoding_rs::WINDOWS_1251;
use serde::de::Error as _;

use crate::{
	error::{Error, Result},
	rates::Rates,
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Splits the body into the declared encoding and the document after the XML declaration.
///
/// Without a declaration the whole body is the document.
fn split_declaration(body: &[u8]) -> (Option<&str>, &[u8]) {
	let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
	let start = body.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(body.len());
	let Some(declaration) = body[start..].strip_prefix(b"<?xml") else { return (None, body) };
	let Some(end) = declaration.windows(2).position(|w| w == b"?>") else { return (None, body) };
	let document = &declaration[end + 2..];
	let encoding = std::str::from_utf8(&declaration[..end]).ok().and_then(encoding_label);
	(encoding, document)
}

/// Extracts the `encoding` pseudo-attribute value from the declaration body.
fn encoding_label(declaration: &str) -> Option<&str> {
	let (_, rest) = declaration.split_once("encoding")?;
	let rest = rest.trim_start().strip_prefix('=')?.trim_start();
	let quote = rest.chars().next().filter(|&c| c == '"' || c == '\'')?;
	let (label, _) = rest[1..].split_once(quote)?;
	Some(label.trim())
}

fn is_utf8(label: &str) -> bool {
	label.eq_ignore_ascii_case("utf-8")
}

/// Decodes the document to UTF-8 according to its declared encoding.
fn decode(body: &[u8]) -> Result<Cow<'_, str>> {
	let (encoding, document) = split_declaration(body);
	match encoding {
		Some(label) if label.eq_ignore_ascii_case("windows-1251") => {
			let (text, _) = WINDOWS_1251.decode_without_bom_handling(document);
			Ok(text)
		}
		Some(label) if !is_utf8(label) => Err(Error::UnsupportedEncoding(label.to_owned())),
		_ => std::str::from_utf8(document)
			.map(Cow::Borrowed)
			.map_err(|e| Error::Parse(serde_xml_rs::Error::custom(e))),
	}
}

/// Parses a daily rates response body.
///
/// The body may be UTF-8 or, if so declared, windows-1251. The table must not list a currency
/// code twice.
pub fn parse(body: &[u8]) -> Result<Rates> {
	let document = decode(body)?;
	let rates: Rates = serde_xml_rs::from_str(&document)?;
	if let Some(currency) = rates.duplicate() {
		return Err(Error::Parse(serde_xml_rs::Error::custom(format!(
			"duplicate currency code: {}",
			currency.char_code(),
		))));
	}
	Ok(rates)
}
