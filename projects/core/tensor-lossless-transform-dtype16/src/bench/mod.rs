//! Benchmark functions re-exported for external benchmarks.
//!
//! Exposes the individual `pub(crate)` kernels when the `bench` feature is enabled.
#![allow(clippy::missing_safety_doc)]
#![cfg(not(tarpaulin_include))]
#![allow(missing_docs)]

pub mod transform {
    //! Split kernels

    pub unsafe fn portable(input_ptr: *const u8, plane0: *mut u8, plane1: *mut u8, len: usize) {
        crate::transform::portable::split_planes(input_ptr, plane0, plane1, len)
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    pub unsafe fn sse2(input_ptr: *const u8, plane0: *mut u8, plane1: *mut u8, len: usize) {
        crate::transform::sse2::split_planes(input_ptr, plane0, plane1, len)
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    pub unsafe fn avx2(input_ptr: *const u8, plane0: *mut u8, plane1: *mut u8, len: usize) {
        crate::transform::avx2::split_planes(input_ptr, plane0, plane1, len)
    }
}

pub mod untransform {
    //! Join kernels

    pub unsafe fn portable(plane0: *const u8, plane1: *const u8, output_ptr: *mut u8, len: usize) {
        crate::untransform::portable::join_planes(plane0, plane1, output_ptr, len)
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    pub unsafe fn sse2(plane0: *const u8, plane1: *const u8, output_ptr: *mut u8, len: usize) {
        crate::untransform::sse2::join_planes(plane0, plane1, output_ptr, len)
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    pub unsafe fn avx2(plane0: *const u8, plane1: *const u8, output_ptr: *mut u8, len: usize) {
        crate::untransform::avx2::join_planes(plane0, plane1, output_ptr, len)
    }
}
