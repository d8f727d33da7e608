//! SSE2 4-lane f32 SIMD vector.
//!
//! `F32x4` wraps an `__m128` register and is the lane abstraction the 128-bit
//! tiers are written against. A `Vector3` maps onto lanes `[x, y, z, pad]`, a
//! `Quaternion` onto `[x, y, z, w]`, and each matrix row onto one register.
//!
//! # Supported Operations
//!
//! ## Loading and Storing
//! - `load_aligned()`, `store_aligned()` - raw memory access
//! - `from_vector3()`, `to_vector3()` - `Vector3` lanes; the store forces the pad lane to zero
//! - `from_quaternion()`, `to_quaternion()` - all four lanes
//!
//! ## Lane Operations
//! - `shuffle::<MASK>()` - permutes lanes of one register
//! - `hsum3()`, `hsum4()` - horizontal sums in left-to-right lane order
//! - `min()`, `max()`, `abs()`, `sqrt()`, bitwise `and()`, `xor()`
//!
//! ## Arithmetic Operators
//! - Element-wise `+`, `-`, `*`, `/` and unary `-`
//!
//! Every method is `#[inline(always)]` so that it compiles into the
//! `#[target_feature]` kernel that calls it.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::{quaternion::Quaternion, vector::Vector3};

/// Number of f32 elements in an SSE register.
pub(crate) const LANE_COUNT: usize = 4;

/// SSE memory alignment requirement in bytes, for `_mm_load_ps` / `_mm_store_ps`.
pub(crate) const SSE_ALIGNMENT: usize = 16;

/// Immediate for `shufps`: result lane 3 takes `z`, lane 2 `y`, lane 1 `x`, lane 0 `w`.
#[inline(always)]
pub(crate) const fn shuffle_mask(z: u32, y: u32, x: u32, w: u32) -> i32 {
    ((z << 6) | (y << 4) | (x << 2) | w) as i32
}

/// SSE vector containing 4 packed f32 values.
#[derive(Copy, Clone, Debug)]
pub(crate) struct F32x4 {
    pub elements: __m128,
}

#[inline(always)]
fn is_aligned(ptr: *const f32) -> bool {
    (ptr as usize) % SSE_ALIGNMENT == 0
}

impl F32x4 {
    #[inline(always)]
    pub fn from_raw(elements: __m128) -> Self {
        Self { elements }
    }

    #[inline(always)]
    pub fn splat(value: f32) -> Self {
        Self::from_raw(unsafe { _mm_set1_ps(value) })
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self::from_raw(unsafe { _mm_setzero_ps() })
    }

    /// Lanes in memory order `[a, b, c, d]`.
    #[inline(always)]
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self::from_raw(unsafe { _mm_setr_ps(a, b, c, d) })
    }

    /// Loads four floats from a 16-byte aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading 4 floats and aligned to 16 bytes.
    #[inline(always)]
    pub unsafe fn load_aligned(ptr: *const f32) -> Self {
        debug_assert!(is_aligned(ptr), "pointer must be {SSE_ALIGNMENT}-byte aligned");
        Self::from_raw(_mm_load_ps(ptr))
    }

    /// # Safety
    ///
    /// `ptr` must be valid for writing 4 floats and aligned to 16 bytes.
    #[inline(always)]
    pub unsafe fn store_aligned(self, ptr: *mut f32) {
        debug_assert!(is_aligned(ptr), "pointer must be {SSE_ALIGNMENT}-byte aligned");
        _mm_store_ps(ptr, self.elements)
    }

    #[inline(always)]
    pub fn from_vector3(v: &Vector3) -> Self {
        // Vector3 is 16 bytes, 16-byte aligned.
        unsafe { Self::load_aligned(v as *const Vector3 as *const f32) }
    }

    /// Stores lanes `x, y, z`; the pad lane is cleared regardless of lane 3.
    #[inline(always)]
    pub fn to_vector3(self) -> Vector3 {
        let mut out = Vector3::ZERO;
        let masked = self.and(Self::xyz_mask());
        unsafe { masked.store_aligned(&mut out as *mut Vector3 as *mut f32) };
        out
    }

    #[inline(always)]
    pub fn from_quaternion(q: &Quaternion) -> Self {
        unsafe { Self::load_aligned(q as *const Quaternion as *const f32) }
    }

    #[inline(always)]
    pub fn to_quaternion(self) -> Quaternion {
        let mut out = Quaternion::IDENTITY;
        unsafe { self.store_aligned(&mut out as *mut Quaternion as *mut f32) };
        out
    }

    /// All-ones bits in lanes 0 to 2, zero in lane 3.
    #[inline(always)]
    pub fn xyz_mask() -> Self {
        Self::from_raw(unsafe { _mm_castsi128_ps(_mm_setr_epi32(-1, -1, -1, 0)) })
    }

    /// Only the sign bit set in every lane.
    #[inline(always)]
    pub fn sign_mask() -> Self {
        Self::splat(-0.0)
    }

    #[inline(always)]
    pub fn to_array(self) -> [f32; LANE_COUNT] {
        let mut out = [0.0f32; LANE_COUNT];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.elements) };
        out
    }

    /// Lane 0.
    #[inline(always)]
    pub fn first(self) -> f32 {
        unsafe { _mm_cvtss_f32(self.elements) }
    }

    /// Permutes lanes; `MASK` is built with `shuffle_mask(d, c, b, a)`.
    #[inline(always)]
    pub fn shuffle<const MASK: i32>(self) -> Self {
        Self::from_raw(unsafe { _mm_shuffle_ps(self.elements, self.elements, MASK) })
    }

    /// `(lane0 + lane1) + lane2`, matching the scalar summation order.
    #[inline(always)]
    pub fn hsum3(self) -> f32 {
        unsafe {
            let v = self.elements;
            let s = _mm_add_ss(v, _mm_shuffle_ps(v, v, shuffle_mask(1, 1, 1, 1)));
            let s = _mm_add_ss(s, _mm_shuffle_ps(v, v, shuffle_mask(2, 2, 2, 2)));
            _mm_cvtss_f32(s)
        }
    }

    /// `((lane0 + lane1) + lane2) + lane3`.
    #[inline(always)]
    pub fn hsum4(self) -> f32 {
        unsafe {
            let v = self.elements;
            let s = _mm_add_ss(v, _mm_shuffle_ps(v, v, shuffle_mask(1, 1, 1, 1)));
            let s = _mm_add_ss(s, _mm_shuffle_ps(v, v, shuffle_mask(2, 2, 2, 2)));
            let s = _mm_add_ss(s, _mm_shuffle_ps(v, v, shuffle_mask(3, 3, 3, 3)));
            _mm_cvtss_f32(s)
        }
    }

    #[inline(always)]
    pub fn min(self, rhs: Self) -> Self {
        Self::from_raw(unsafe { _mm_min_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    pub fn max(self, rhs: Self) -> Self {
        Self::from_raw(unsafe { _mm_max_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    pub fn and(self, rhs: Self) -> Self {
        Self::from_raw(unsafe { _mm_and_ps(self.elements, rhs.elements) })
    }

    /// `!self & rhs`, bitwise.
    #[inline(always)]
    pub fn andnot(self, rhs: Self) -> Self {
        Self::from_raw(unsafe { _mm_andnot_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    pub fn or(self, rhs: Self) -> Self {
        Self::from_raw(unsafe { _mm_or_ps(self.elements, rhs.elements) })
    }

    #[inline(always)]
    pub fn xor(self, rhs: Self) -> Self {
        Self::from_raw(unsafe { _mm_xor_ps(self.elements, rhs.elements) })
    }

    /// Clears the sign bit of every lane.
    #[inline(always)]
    pub fn abs(self) -> Self {
        Self::sign_mask().andnot(self)
    }

    #[inline(always)]
    pub fn sqrt(self) -> Self {
        Self::from_raw(unsafe { _mm_sqrt_ps(self.elements) })
    }

    /// Lane-wise `self >= rhs` as an all-ones/all-zeros mask.
    #[inline(always)]
    pub fn cmp_ge(self, rhs: Self) -> Self {
        Self::from_raw(unsafe { _mm_cmpge_ps(self.elements, rhs.elements) })
    }

    /// Transposes four rows in place.
    #[inline(always)]
    pub fn transpose4(r0: &mut Self, r1: &mut Self, r2: &mut Self, r3: &mut Self) {
        unsafe {
            _MM_TRANSPOSE4_PS(
                &mut r0.elements,
                &mut r1.elements,
                &mut r2.elements,
                &mut r3.elements,
            )
        };
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self::from_raw(unsafe { _mm_add_ps(self.elements, rhs.elements) })
    }
}

impl Sub for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_raw(unsafe { _mm_sub_ps(self.elements, rhs.elements) })
    }
}

impl Mul for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_raw(unsafe { _mm_mul_ps(self.elements, rhs.elements) })
    }
}

impl Div for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        Self::from_raw(unsafe { _mm_div_ps(self.elements, rhs.elements) })
    }
}

impl Neg for F32x4 {
    type Output = Self;

    /// Flips the sign bit.
    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.xor(Self::sign_mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector3_round_trip_clears_pad() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let lanes = F32x4::from_vector3(&v) + F32x4::new(0.0, 0.0, 0.0, 7.0);
        assert_eq!(lanes.to_array(), [1.0, 2.0, 3.0, 7.0]);
        let back = lanes.to_vector3();
        assert_eq!(back, v);
        assert_eq!(F32x4::from_vector3(&back).to_array()[3], 0.0);
    }

    #[test]
    fn test_shuffle_mask_encoding() {
        assert_eq!(shuffle_mask(0, 0, 0, 0), 0x00);
        assert_eq!(shuffle_mask(1, 1, 1, 1), 0x55);
        assert_eq!(shuffle_mask(3, 3, 3, 3), 0xFF);
        assert_eq!(shuffle_mask(3, 0, 2, 1), 0b11_00_10_01);
        assert_eq!(shuffle_mask(0, 1, 2, 3), 0x1B);

        let v = F32x4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            v.shuffle::<{ shuffle_mask(3, 0, 2, 1) }>().to_array(),
            [2.0, 3.0, 1.0, 4.0]
        );
    }

    #[test]
    fn test_shuffle_and_sums() {
        let v = F32x4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            v.shuffle::<{ shuffle_mask(0, 1, 2, 3) }>().to_array(),
            [4.0, 3.0, 2.0, 1.0]
        );
        assert_eq!(v.shuffle::<{ shuffle_mask(2, 2, 2, 2) }>().to_array(), [3.0; 4]);
        assert_eq!(v.hsum3(), 6.0);
        assert_eq!(v.hsum4(), 10.0);
        assert_eq!(v.first(), 1.0);
    }

    #[test]
    fn test_bitwise_helpers() {
        let v = F32x4::new(-1.5, 2.0, -0.0, 4.0);
        assert_eq!(v.abs().to_array(), [1.5, 2.0, 0.0, 4.0]);
        assert_eq!((-v).to_array(), [1.5, -2.0, 0.0, -4.0]);
        assert_eq!(v.and(F32x4::xyz_mask()).to_array(), [-1.5, 2.0, -0.0, 0.0]);
    }

    #[test]
    fn test_transpose() {
        let mut r0 = F32x4::new(0.0, 1.0, 2.0, 3.0);
        let mut r1 = F32x4::new(4.0, 5.0, 6.0, 7.0);
        let mut r2 = F32x4::new(8.0, 9.0, 10.0, 11.0);
        let mut r3 = F32x4::new(12.0, 13.0, 14.0, 15.0);
        F32x4::transpose4(&mut r0, &mut r1, &mut r2, &mut r3);
        assert_eq!(r0.to_array(), [0.0, 4.0, 8.0, 12.0]);
        assert_eq!(r3.to_array(), [3.0, 7.0, 11.0, 15.0]);
    }
}
