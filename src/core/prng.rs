// Minimal PRNG for the decorative animation.
//
// This is NOT cryptographically secure. Seeding it explicitly keeps a frame
// sequence reproducible, which is what the tests and the CLI rely on.

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state: seed }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn next_f64_01(&mut self) -> f64 {
        let x = self.next_u32();
        (x as f64) / (u32::MAX as f64 + 1.0)
    }

    #[inline]
    pub fn gen_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u32() % len as u32) as usize
    }
}

impl Default for Prng {
    fn default() -> Self {
        Self::new(0)
    }
}
