//! SIMD abstraction layer

use cfg_if::cfg_if;
use data::Cell;

/// SIMD vector of cells
pub trait Vector: Copy + Sized {
    /// Number of cells per vector
    const WIDTH: usize;

    /// Broadcasting constructor
    fn splat(x: Cell) -> Self;

    /// Load the first `WIDTH` cells of a slice
    fn load(cells: &[Cell]) -> Self;

    /// Store this vector into the first `WIDTH` cells of a slice
    fn store(self, cells: &mut [Cell]);

    /// Lane-wise wrapping addition
    fn add(self, other: Self) -> Self;

    /// Lane-wise equality, as a mask with all bits set in equal lanes
    fn eq_mask(self, other: Self) -> Self;

    /// Bitwise AND
    fn and(self, other: Self) -> Self;

    /// Bitwise OR
    fn or(self, other: Self) -> Self;

    /// Bitwise AND of the complement of `self` with `other`
    fn and_not(self, other: Self) -> Self;
}

// Pick vector size based on hardware support for vectorization of 8-bit
// integer operations.
//
// Notice that the code will not vectorize at all on non-x86 hardware, and that
// you need to build with e.g. RUSTFLAGS="-C target-cpu=native" to get AVX2.
cfg_if! {
    if #[cfg(target_feature = "avx2")] {
        // Use AVX2 if available
        use safe_arch::m256i;

        /// Chosen SIMD vector type
        pub type Values = m256i;

        impl Vector for m256i {
            const WIDTH: usize = 32;

            #[inline]
            fn splat(x: Cell) -> Self {
                safe_arch::set_splat_i8_m256i(x as i8)
            }

            #[inline]
            fn load(cells: &[Cell]) -> Self {
                let bytes: &[u8; 32] = cells.first_chunk().expect("not enough cells to load");
                m256i::from(*bytes)
            }

            #[inline]
            fn store(self, cells: &mut [Cell]) {
                let bytes: &mut [u8; 32] = cells
                    .first_chunk_mut()
                    .expect("not enough cells to store");
                *bytes = self.into();
            }

            #[inline]
            fn add(self, other: Self) -> Self {
                safe_arch::add_i8_m256i(self, other)
            }

            #[inline]
            fn eq_mask(self, other: Self) -> Self {
                safe_arch::cmp_eq_mask_i8_m256i(self, other)
            }

            #[inline]
            fn and(self, other: Self) -> Self {
                safe_arch::bitand_m256i(self, other)
            }

            #[inline]
            fn or(self, other: Self) -> Self {
                safe_arch::bitor_m256i(self, other)
            }

            #[inline]
            fn and_not(self, other: Self) -> Self {
                safe_arch::bitandnot_m256i(self, other)
            }
        }
    } else if #[cfg(target_feature = "sse2")] {
        // If there is no AVX2, use SSE2 if available
        use safe_arch::m128i;

        /// Chosen SIMD vector type
        pub type Values = m128i;

        impl Vector for m128i {
            const WIDTH: usize = 16;

            #[inline]
            fn splat(x: Cell) -> Self {
                safe_arch::set_splat_i8_m128i(x as i8)
            }

            #[inline]
            fn load(cells: &[Cell]) -> Self {
                let bytes: &[u8; 16] = cells.first_chunk().expect("not enough cells to load");
                m128i::from(*bytes)
            }

            #[inline]
            fn store(self, cells: &mut [Cell]) {
                let bytes: &mut [u8; 16] = cells
                    .first_chunk_mut()
                    .expect("not enough cells to store");
                *bytes = self.into();
            }

            #[inline]
            fn add(self, other: Self) -> Self {
                safe_arch::add_i8_m128i(self, other)
            }

            #[inline]
            fn eq_mask(self, other: Self) -> Self {
                safe_arch::cmp_eq_mask_i8_m128i(self, other)
            }

            #[inline]
            fn and(self, other: Self) -> Self {
                safe_arch::bitand_m128i(self, other)
            }

            #[inline]
            fn or(self, other: Self) -> Self {
                safe_arch::bitor_m128i(self, other)
            }

            #[inline]
            fn and_not(self, other: Self) -> Self {
                safe_arch::bitandnot_m128i(self, other)
            }
        }
    } else {
        // If all else fails, go for a scalar fallback

        /// Chosen SIMD vector type
        pub type Values = Cell;

        impl Vector for Cell {
            const WIDTH: usize = 1;

            #[inline]
            fn splat(x: Cell) -> Self {
                x
            }

            #[inline]
            fn load(cells: &[Cell]) -> Self {
                cells[0]
            }

            #[inline]
            fn store(self, cells: &mut [Cell]) {
                cells[0] = self;
            }

            #[inline]
            fn add(self, other: Self) -> Self {
                self.wrapping_add(other)
            }

            #[inline]
            fn eq_mask(self, other: Self) -> Self {
                if self == other { Cell::MAX } else { 0 }
            }

            #[inline]
            fn and(self, other: Self) -> Self {
                self & other
            }

            #[inline]
            fn or(self, other: Self) -> Self {
                self | other
            }

            #[inline]
            fn and_not(self, other: Self) -> Self {
                !self & other
            }
        }
    }
}
