//! Benchmark functions re-exported for external benchmarks.
//!
//! Exposes the individual `pub(crate)` kernels when the `bench` feature is enabled.
#![allow(clippy::missing_safety_doc)]
#![cfg(not(tarpaulin_include))]
#![allow(missing_docs)]

pub mod transform {
    //! Split kernels

    /// Plane output pointers, in plane order.
    pub type Planes = [*mut u8; 4];

    pub unsafe fn portable(input_ptr: *const u8, planes: Planes, len: usize) {
        let [p0, p1, p2, p3] = planes;
        crate::transform::portable::split_planes(input_ptr, p0, p1, p2, p3, len)
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    pub unsafe fn sse2(input_ptr: *const u8, planes: Planes, len: usize) {
        let [p0, p1, p2, p3] = planes;
        crate::transform::sse2::split_planes(input_ptr, p0, p1, p2, p3, len)
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    pub unsafe fn avx2(input_ptr: *const u8, planes: Planes, len: usize) {
        let [p0, p1, p2, p3] = planes;
        crate::transform::avx2::split_planes(input_ptr, p0, p1, p2, p3, len)
    }
}

pub mod untransform {
    //! Join kernels

    /// Plane input pointers, in plane order.
    pub type Planes = [*const u8; 4];

    pub unsafe fn portable(planes: Planes, output_ptr: *mut u8, len: usize) {
        let [p0, p1, p2, p3] = planes;
        crate::untransform::portable::join_planes(p0, p1, p2, p3, output_ptr, len)
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    pub unsafe fn sse2(planes: Planes, output_ptr: *mut u8, len: usize) {
        let [p0, p1, p2, p3] = planes;
        crate::untransform::sse2::join_planes(p0, p1, p2, p3, output_ptr, len)
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    pub unsafe fn avx2(planes: Planes, output_ptr: *mut u8, len: usize) {
        let [p0, p1, p2, p3] = planes;
        crate::untransform::avx2::join_planes(p0, p1, p2, p3, output_ptr, len)
    }
}
