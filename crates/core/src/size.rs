use std::{
    fmt,
    io::{self, Write},
    iter::Sum,
    ops::Add,
};

use serde::{Serialize, Serializer};
use serde_json::ser::Formatter;

use crate::Result;

/// Fixed per-record envelope overhead counted on top of the JSON text.
pub const ENVELOPE_OVERHEAD_BYTES: u64 = 49;

const BYTES_PER_KB: u64 = 1024;

/// A size in KB, stored as whole hundredths of a KB so sums stay exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SizeKb(u64);

impl SizeKb {
    pub const ZERO: SizeKb = SizeKb(0);

    /// Convert a byte count, rounding half away from zero to two decimals.
    pub fn from_bytes(bytes: u64) -> Self {
        Self((bytes * 100 + BYTES_PER_KB / 2) / BYTES_PER_KB)
    }

    /// Round a KB value to two decimals. Negative and NaN inputs clamp to zero.
    pub fn from_kb(kb: f64) -> Self {
        let hundredths = (kb * 100.0).round();
        if hundredths.is_nan() || hundredths <= 0.0 {
            Self::ZERO
        } else {
            Self(hundredths as u64)
        }
    }

    pub fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    pub fn hundredths(self) -> u64 {
        self.0
    }

    pub fn as_kb(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Add for SizeKb {
    type Output = SizeKb;

    fn add(self, rhs: SizeKb) -> SizeKb {
        SizeKb(self.0 + rhs.0)
    }
}

impl Sum for SizeKb {
    fn sum<I: Iterator<Item = SizeKb>>(iter: I) -> SizeKb {
        iter.fold(SizeKb::ZERO, Add::add)
    }
}

impl fmt::Display for SizeKb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for SizeKb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_kb())
    }
}

/// Size of `record` in KB, rounded to two decimals.
pub fn size_kb<T: Serialize + ?Sized>(record: &T) -> Result<f64> {
    measure(record).map(SizeKb::as_kb)
}

/// Measure the canonical JSON encoding of `record` plus the envelope overhead.
pub fn measure<T: Serialize + ?Sized>(record: &T) -> Result<SizeKb> {
    let mut counter = ByteCounter::default();
    let mut ser = serde_json::Serializer::with_formatter(&mut counter, CanonicalFormatter);
    record.serialize(&mut ser)?;
    Ok(SizeKb::from_bytes(counter.0 + ENVELOPE_OVERHEAD_BYTES))
}

#[derive(Default)]
struct ByteCounter(u64);

impl Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Compact JSON with `", "` and `": "` separators and every non-ASCII
/// character escaped as `\uXXXX`.
struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "size_tests.rs"]
mod tests;
