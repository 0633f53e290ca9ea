//! 64-bit addition with a carry kept between calls.
//!
//! Adding the mask of header markers to the mask of non-line-feed bytes
//! makes the carry ripple from each `>` up to the next line feed, so the
//! XOR with the non-line-feed mask yields the whole header line. The carry
//! out of bit 63 continues a header in the next block.

#[derive(Default, Clone, Copy)]
pub(crate) struct Carry(u8);

impl Carry {
    #[inline(always)]
    pub const fn new(carry: bool) -> Self {
        Self(carry as u8)
    }

    #[cfg(test)]
    #[inline(always)]
    pub const fn is_set(self) -> bool {
        self.0 != 0
    }

    #[cfg(target_arch = "x86_64")]
    #[inline(always)]
    #[allow(unused_unsafe)]
    pub fn add(&mut self, lhs: u64, rhs: u64) -> u64 {
        use core::arch::x86_64::_addcarry_u64;
        let mut res = 0;
        self.0 = unsafe { _addcarry_u64(self.0, lhs, rhs, &mut res) };
        res
    }

    #[cfg(not(target_arch = "x86_64"))]
    #[inline(always)]
    pub fn add(&mut self, lhs: u64, rhs: u64) -> u64 {
        let (a, c1) = lhs.overflowing_add(rhs);
        let (b, c2) = a.overflowing_add(self.0 as u64);
        self.0 = (c1 | c2) as u8;
        b
    }
}
