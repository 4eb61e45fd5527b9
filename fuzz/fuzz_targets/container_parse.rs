#![no_main]

// Arbitrary bytes must either decompress or fail with an error; never panic or read out of bounds.

use libfuzzer_sys::fuzz_target;
use tensor_lossless_transform_api::{coder::StoreCoder, inspect, TensorCompressBuilder};
use tensor_lossless_transform_zstd::ZStandardCoder;

fuzz_target!(|data: &[u8]| {
    let Ok(parsed) = inspect(data) else {
        return;
    };

    let restored = TensorCompressBuilder::new(ZStandardCoder::new_fast()).decompress(data);
    if let Ok(restored) = restored {
        assert_eq!(restored.len(), parsed.decompressed_len());
    }
    let _ = TensorCompressBuilder::new(StoreCoder).decompress(data);
});
