//! Common test imports and utilities for dtype32 tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Core functionality from this crate
pub use crate::element::{join_element, split_element};

#[allow(unused_imports)] // Might be unused in some CPU architectures, and that's ok.
pub use tensor_lossless_transform_common::cpu_detect::*;

/// Signature shared by every split implementation.
pub(crate) type SplitFn = unsafe fn(*const u8, *mut u8, *mut u8, *mut u8, *mut u8, usize);

/// Signature shared by every join implementation.
pub(crate) type JoinFn = unsafe fn(*const u8, *const u8, *const u8, *const u8, *mut u8, usize);

/// Helper to assert implementation results match reference implementation
pub(crate) fn assert_implementation_matches_reference(
    output_expected: &[u8],
    output_test: &[u8],
    impl_name: &str,
    element_count: usize,
) {
    assert_eq!(
        output_expected, output_test,
        "{impl_name} implementation produced different results than reference for {element_count} elements.\n\
        Input elements follow a predictable sequence; see generate_dtype32_test_data."
    );
}

/// Generates `element_count` little-endian elements.
///
/// Element `i` is `0x3F00_0000 + i * 0x0101_0101` (wrapping), so every byte changes on every
/// step and the sign bit is visited.
pub(crate) fn generate_dtype32_test_data(element_count: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(element_count * 4);
    let mut element = 0x3F00_0000_u32;
    for _ in 0..element_count {
        data.extend_from_slice(&element.to_le_bytes());
        element = element.wrapping_add(0x0101_0101);
    }
    data
}

/// fp32 bit patterns which must survive the transform unchanged.
///
/// 20 elements, so the vectorized kernels see one full SSE2 iteration plus a tail.
pub(crate) fn special_values_test_data() -> Vec<u8> {
    let elements: [u32; 20] = [
        0x0000_0000, // +0
        0x8000_0000, // -0
        0x7F80_0000, // +inf
        0xFF80_0000, // -inf
        0x7FC0_0000, // quiet NaN
        0xFFFF_FFFF, // all ones NaN
        0x7F80_0001, // signalling NaN, minimal payload
        0xFFA5_5A5A, // negative NaN, mixed payload
        0x0000_0001, // smallest subnormal
        0x807F_FFFF, // negative largest subnormal
        0x0040_0000, // mid subnormal
        0x3F80_0000, // 1.0
        0xBF80_0000, // -1.0
        0x7F7F_FFFF, // f32::MAX
        0xFF7F_FFFF, // f32::MIN
        0x0080_0000, // f32::MIN_POSITIVE
        0x3EAA_AAAB, // 1/3
        0xC2F6_E979, // -123.456
        0x3380_0000, // 2^-24
        0x4B00_0000, // 2^23
    ];
    elements.iter().flat_map(|e| e.to_le_bytes()).collect()
}

/// Splits via [`split_element`], one element at a time.
pub(crate) fn reference_split(input: &[u8]) -> Vec<u8> {
    let element_count = input.len() / 4;
    let mut output = vec![0u8; input.len()];
    for (index, bytes) in input.chunks_exact(4).enumerate() {
        let element = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        for (plane, byte) in split_element(element).into_iter().enumerate() {
            output[plane * element_count + index] = byte;
        }
    }
    output
}

/// Returns pointers to the 4 back to back planes of `output`.
pub(crate) fn plane_pointers_mut(output: &mut [u8], element_count: usize) -> [*mut u8; 4] {
    let base = output.as_mut_ptr();
    unsafe {
        [
            base,
            base.add(element_count),
            base.add(element_count * 2),
            base.add(element_count * 3),
        ]
    }
}

/// Compares `implementation` against the portable implementation.
#[allow(dead_code)] // only used by vectorized tests
pub(crate) fn run_split_matches_portable_test(
    implementation: SplitFn,
    element_count: usize,
    impl_name: &str,
) {
    let input = generate_dtype32_test_data(element_count);
    let mut expected = vec![0u8; input.len()];
    let mut actual = vec![0u8; input.len()];
    unsafe {
        let [plane0, plane1, plane2, plane3] = plane_pointers_mut(&mut expected, element_count);
        crate::transform::portable::split_planes(
            input.as_ptr(),
            plane0,
            plane1,
            plane2,
            plane3,
            element_count,
        );

        let [plane0, plane1, plane2, plane3] = plane_pointers_mut(&mut actual, element_count);
        implementation(input.as_ptr(), plane0, plane1, plane2, plane3, element_count);
    }

    assert_implementation_matches_reference(&expected, &actual, impl_name, element_count);
}

/// Executes a split with every buffer offset by 1 byte from its allocation.
pub(crate) fn run_split_unaligned_test(
    implementation: SplitFn,
    element_count: usize,
    impl_name: &str,
) {
    let input = generate_dtype32_test_data(element_count);
    let mut input_unaligned = vec![0u8; input.len() + 1];
    input_unaligned[1..].copy_from_slice(&input);

    let mut planes: [Vec<u8>; 4] = core::array::from_fn(|_| vec![0u8; element_count + 1]);
    unsafe {
        let [plane0, plane1, plane2, plane3] = &mut planes;
        implementation(
            input_unaligned.as_ptr().add(1),
            plane0.as_mut_ptr().add(1),
            plane1.as_mut_ptr().add(1),
            plane2.as_mut_ptr().add(1),
            plane3.as_mut_ptr().add(1),
            element_count,
        );
    }

    let actual: Vec<u8> = planes.iter().flat_map(|plane| plane[1..].to_vec()).collect();
    assert_implementation_matches_reference(
        &reference_split(&input),
        &actual,
        impl_name,
        element_count,
    );
}

/// Splits via the reference, joins via `implementation` and checks the original comes back.
pub(crate) fn run_join_roundtrip_test(
    implementation: JoinFn,
    element_count: usize,
    impl_name: &str,
) {
    let input = generate_dtype32_test_data(element_count);
    let planes = reference_split(&input);
    let mut reconstructed = vec![0xCC_u8; input.len()];
    unsafe {
        let base = planes.as_ptr();
        implementation(
            base,
            base.add(element_count),
            base.add(element_count * 2),
            base.add(element_count * 3),
            reconstructed.as_mut_ptr(),
            element_count,
        );
    }

    assert_implementation_matches_reference(&input, &reconstructed, impl_name, element_count);
}

/// Executes a join with every buffer offset by 1 byte from its allocation.
pub(crate) fn run_join_unaligned_test(
    implementation: JoinFn,
    element_count: usize,
    impl_name: &str,
) {
    let input = generate_dtype32_test_data(element_count);
    let planes = reference_split(&input);

    let unaligned: Vec<Vec<u8>> = planes
        .chunks(element_count.max(1))
        .map(|plane| {
            let mut buffer = vec![0u8; element_count + 1];
            buffer[1..].copy_from_slice(plane);
            buffer
        })
        .collect();

    let mut reconstructed = vec![0u8; input.len() + 1];
    unsafe {
        implementation(
            unaligned[0].as_ptr().add(1),
            unaligned[1].as_ptr().add(1),
            unaligned[2].as_ptr().add(1),
            unaligned[3].as_ptr().add(1),
            reconstructed.as_mut_ptr().add(1),
            element_count,
        );
    }

    assert_implementation_matches_reference(
        &input,
        &reconstructed[1..],
        impl_name,
        element_count,
    );
}

#[test]
fn validate_dtype32_test_data_generator() {
    let expected: Vec<u8> = vec![
        0x00, 0x00, 0x00, 0x3F, // element 0
        0x01, 0x01, 0x01, 0x40, // element 1
        0x02, 0x02, 0x02, 0x41, // element 2
    ];
    assert_eq!(generate_dtype32_test_data(3), expected);
}
