#![cfg(not(tarpaulin_include))]

use bytesize::ByteSize;
use core::fmt;
use std::time::Duration;
use tensor_lossless_transform_api::api::width_from_bits;
use tensor_lossless_transform_api::ElementWidth;

/// Parses `--bits` into an element width.
pub fn parse_element_width(value: &str) -> Result<ElementWidth, String> {
    let bits = value
        .parse::<u32>()
        .map_err(|e| format!("Invalid element width '{value}': {e}"))?;
    width_from_bits(bits).map_err(|e| e.to_string())
}

/// A wrapper around [`ByteSize`] that represents throughput in bytes per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Throughput(pub ByteSize);

impl Throughput {
    /// Throughput of processing `bytes` in `elapsed`; zero for an instant operation.
    pub fn from_elapsed(bytes: usize, elapsed: Duration) -> Self {
        let seconds = elapsed.as_secs_f64();
        if seconds > 0.0 {
            Self(ByteSize((bytes as f64 / seconds) as u64))
        } else {
            Self(ByteSize(0))
        }
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/s", self.0)
    }
}

/// Compressed size as a percentage of the original; 100% for empty input.
pub fn ratio_percent(compressed: usize, original: usize) -> f64 {
    if original == 0 {
        return 100.0;
    }
    compressed as f64 / original as f64 * 100.0
}
