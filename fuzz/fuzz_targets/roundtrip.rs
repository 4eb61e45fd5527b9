#![no_main]

use libfuzzer_sys::{arbitrary, fuzz_target};
use tensor_lossless_transform_api::{ElementWidth, TensorCompressBuilder};
use tensor_lossless_transform_zstd::ZStandardCoder;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Input {
    pub wide: bool,
    pub multithreaded: bool,
    pub bytes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let width = if input.wide {
        ElementWidth::Bits32
    } else {
        ElementWidth::Bits16
    };
    let length = input.bytes.len() / width.bytes() * width.bytes();
    let tensor = &input.bytes[..length];

    let builder = TensorCompressBuilder::new(ZStandardCoder::new_fast())
        .multithreaded(input.multithreaded)
        .entropy_threshold(None);
    let container = builder.compress(tensor, width).unwrap();
    assert!(container.len() <= tensor_lossless_transform_api::max_compressed_len(width, length / width.bytes()).unwrap());
    assert_eq!(builder.decompress(&container).unwrap(), tensor);
});
