//! Known-answer tests in the NIST lightweight cryptography
//! `LWC_HASH_KAT_*.txt` and `LWC_AEAD_KAT_*.txt` formats.
//!
//! A KAT file is a sequence of records separated by blank
//! lines. Each record is a list of `Name = value` lines where
//! every value except `Count` is hex.

extern crate std;

use std::{string::String, vec, vec::Vec};

use crate::{
    aead::{Aead, OpenError},
    error::Error,
    hash::Hash,
};

/// A single KAT record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Record {
    /// The record's `Count` value.
    pub count: u64,
    fields: Vec<(String, Vec<u8>)>,
}

impl Record {
    /// Returns the decoded value of the field called `name`.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_slice())
    }

    fn require(&self, name: &'static str) -> Result<&[u8], Error> {
        self.get(name)
            .ok_or(Error::InvalidArgument("KAT record is missing a field"))
    }
}

/// Parses the records in `text`.
pub fn parse(text: &str) -> Result<Vec<Record>, Error> {
    let mut records = Vec::new();
    let mut cur: Option<Record> = None;

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            if let Some(rec) = cur.take() {
                records.push(rec);
            }
            continue;
        }
        let (name, value) = line
            .split_once('=')
            .ok_or(Error::InvalidArgument("KAT line is not `Name = value`"))?;
        let (name, value) = (name.trim(), value.trim());

        if name == "Count" {
            if let Some(rec) = cur.take() {
                records.push(rec);
            }
            let count = value
                .parse()
                .map_err(|_| Error::InvalidArgument("invalid KAT `Count`"))?;
            cur = Some(Record {
                count,
                fields: Vec::new(),
            });
            continue;
        }

        let rec = cur
            .as_mut()
            .ok_or(Error::InvalidArgument("KAT field appears before `Count`"))?;
        let value =
            hex::decode(value).map_err(|_| Error::InvalidArgument("KAT value is not hex"))?;
        rec.fields.push((String::from(name), value));
    }
    if let Some(rec) = cur {
        records.push(rec);
    }
    Ok(records)
}

/// Checks every record in `text` (a `LWC_HASH_KAT_*.txt` file)
/// against `H`.
///
/// Returns the number of records checked.
///
/// # Panics
///
/// Panics if a digest does not match.
pub fn run_hash_kat<H: Hash>(text: &str) -> Result<usize, Error> {
    let records = parse(text)?;
    for rec in &records {
        let msg = rec.require("Msg")?;
        let want = rec.require("MD")?;
        let got = H::hash(msg);
        assert_eq!(got.as_bytes(), want, "{}: Count = {}", H::ID, rec.count);
    }
    tracing::debug!(alg = %H::ID, n = records.len(), "hash KAT passed");
    Ok(records.len())
}

/// Checks every record in `text` (a `LWC_AEAD_KAT_*.txt` file)
/// against `A`.
///
/// Each record's `CT` is the ciphertext followed by the tag.
/// Every record is also checked to fail authentication after
/// its last octet is flipped.
///
/// Returns the number of records checked.
///
/// # Panics
///
/// Panics if a ciphertext, tag or plaintext does not match.
pub fn run_aead_kat<A: Aead>(text: &str) -> Result<usize, Error> {
    let records = parse(text)?;
    for rec in &records {
        let key = A::Key::try_from(rec.require("Key")?)?;
        let nonce = rec.require("Nonce")?;
        let pt = rec.require("PT")?;
        let ad = rec.require("AD")?;
        let want = rec.require("CT")?;

        let aead = A::new(&key);

        let mut ct = vec![0u8; pt.len() + A::OVERHEAD];
        aead.seal(&mut ct, nonce, pt, ad)?;
        assert_eq!(ct, want, "{}: Count = {}", A::ID, rec.count);

        let mut got = vec![0u8; pt.len()];
        aead.open(&mut got, nonce, want, ad)?;
        assert_eq!(got, pt, "{}: Count = {}", A::ID, rec.count);

        if let Some(last) = ct.last_mut() {
            *last ^= 1;
        }
        assert_eq!(
            aead.open(&mut got, nonce, &ct, ad),
            Err(OpenError::Authentication),
            "{}: Count = {}",
            A::ID,
            rec.count
        );
    }
    tracing::debug!(alg = %A::ID, n = records.len(), "AEAD KAT passed");
    Ok(records.len())
}
