#![no_main]

// The dispatched (possibly vectorized) split must agree with the per element reference.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let even = data.len() / 2 * 2;
    let input16 = &data[..even];
    let count16 = even / 2;
    let mut planes16 = vec![0u8; even];
    tensor_lossless_transform_dtype16::split_planes_slice(input16, &mut planes16).unwrap();
    for (index, element) in input16.chunks_exact(2).enumerate() {
        let planes = tensor_lossless_transform_dtype16::split_element(u16::from_le_bytes([
            element[0], element[1],
        ]));
        assert_eq!(planes16[index], planes[0]);
        assert_eq!(planes16[count16 + index], planes[1]);
    }

    let whole = data.len() / 4 * 4;
    let input32 = &data[..whole];
    let count32 = whole / 4;
    let mut planes32 = vec![0u8; whole];
    tensor_lossless_transform_dtype32::split_planes_slice(input32, &mut planes32).unwrap();
    for (index, element) in input32.chunks_exact(4).enumerate() {
        let planes = tensor_lossless_transform_dtype32::split_element(u32::from_le_bytes([
            element[0], element[1], element[2], element[3],
        ]));
        for (plane, &byte) in planes.iter().enumerate() {
            assert_eq!(planes32[plane * count32 + index], byte);
        }
    }

    let mut restored = vec![0u8; whole];
    tensor_lossless_transform_dtype32::join_planes_slice(&planes32, &mut restored).unwrap();
    assert_eq!(restored, input32);
});
