//! Common test imports and utilities for dtype16 tests
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
pub(crate) type SplitFn = unsafe fn(*const u8, *mut u8, *mut u8, usize);

/// Signature shared by every join implementation.
pub(crate) type JoinFn = unsafe fn(*const u8, *const u8, *mut u8, usize);

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
        Input elements follow a predictable sequence; see generate_dtype16_test_data."
    );
}

/// Generates `element_count` little-endian elements.
///
/// Element `i` is `0x3F00 + i * 0x0101` (wrapping), which changes both bytes on every step
/// and visits the sign bit.
pub(crate) fn generate_dtype16_test_data(element_count: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(element_count * 2);
    let mut element = 0x3F00_u16;
    for _ in 0..element_count {
        data.extend_from_slice(&element.to_le_bytes());
        element = element.wrapping_add(0x0101);
    }
    data
}

/// bf16/fp16 bit patterns which must survive the transform unchanged.
pub(crate) fn special_values_test_data() -> Vec<u8> {
    let elements: [u16; 16] = [
        0x0000, // +0
        0x8000, // -0
        0x7F80, // bf16 +inf
        0xFF80, // bf16 -inf
        0x7C00, // fp16 +inf
        0xFC00, // fp16 -inf
        0x7FC0, // bf16 quiet NaN
        0xFFFF, // all ones NaN
        0x7F81, // bf16 signalling NaN with payload
        0xFE55, // fp16 NaN with mixed payload
        0x0001, // smallest subnormal
        0x807F, // negative bf16 subnormal
        0x03FF, // largest fp16 subnormal
        0x3F80, // bf16 1.0
        0x3C00, // fp16 1.0
        0xC000, // -2.0 bf16
    ];
    elements.iter().flat_map(|e| e.to_le_bytes()).collect()
}

/// Splits via [`split_element`], one element at a time.
pub(crate) fn reference_split(input: &[u8]) -> Vec<u8> {
    let element_count = input.len() / 2;
    let mut output = vec![0u8; input.len()];
    for (index, bytes) in input.chunks_exact(2).enumerate() {
        let [high, low] = split_element(u16::from_le_bytes([bytes[0], bytes[1]]));
        output[index] = high;
        output[element_count + index] = low;
    }
    output
}

/// Compares `implementation` against the portable implementation.
#[allow(dead_code)] // only used by vectorized tests
pub(crate) fn run_split_matches_portable_test(
    implementation: SplitFn,
    element_count: usize,
    impl_name: &str,
) {
    let input = generate_dtype16_test_data(element_count);
    let mut expected = vec![0u8; input.len()];
    let mut actual = vec![0u8; input.len()];
    unsafe {
        let (plane0, plane1) = expected.split_at_mut(element_count);
        crate::transform::portable::split_planes(
            input.as_ptr(),
            plane0.as_mut_ptr(),
            plane1.as_mut_ptr(),
            element_count,
        );

        let (plane0, plane1) = actual.split_at_mut(element_count);
        implementation(
            input.as_ptr(),
            plane0.as_mut_ptr(),
            plane1.as_mut_ptr(),
            element_count,
        );
    }

    assert_implementation_matches_reference(&expected, &actual, impl_name, element_count);
}

/// Executes a split with every buffer offset by 1 byte from its allocation.
pub(crate) fn run_split_unaligned_test(
    implementation: SplitFn,
    element_count: usize,
    impl_name: &str,
) {
    let input = generate_dtype16_test_data(element_count);
    let mut input_unaligned = vec![0u8; input.len() + 1];
    input_unaligned[1..].copy_from_slice(&input);

    let mut plane0 = vec![0u8; element_count + 1];
    let mut plane1 = vec![0u8; element_count + 1];
    unsafe {
        implementation(
            input_unaligned.as_ptr().add(1),
            plane0.as_mut_ptr().add(1),
            plane1.as_mut_ptr().add(1),
            element_count,
        );
    }

    let mut actual = Vec::with_capacity(input.len());
    actual.extend_from_slice(&plane0[1..]);
    actual.extend_from_slice(&plane1[1..]);
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
    let input = generate_dtype16_test_data(element_count);
    let planes = reference_split(&input);
    let mut reconstructed = vec![0xCC_u8; input.len()];
    unsafe {
        implementation(
            planes.as_ptr(),
            planes.as_ptr().add(element_count),
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
    let input = generate_dtype16_test_data(element_count);
    let planes = reference_split(&input);

    let mut plane0 = vec![0u8; element_count + 1];
    let mut plane1 = vec![0u8; element_count + 1];
    plane0[1..].copy_from_slice(&planes[..element_count]);
    plane1[1..].copy_from_slice(&planes[element_count..]);

    let mut reconstructed = vec![0u8; input.len() + 1];
    unsafe {
        implementation(
            plane0.as_ptr().add(1),
            plane1.as_ptr().add(1),
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
fn validate_dtype16_test_data_generator() {
    let expected: Vec<u8> = vec![
        0x00, 0x3F, // element 0
        0x01, 0x40, // element 1
        0x02, 0x41, // element 2
    ];
    assert_eq!(generate_dtype16_test_data(3), expected);
}
