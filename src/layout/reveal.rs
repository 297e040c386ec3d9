//! Staggered reveal timing.
//!
//! Each node gets `index * step` where `index` is its position in the
//! global traversal, so nodes cascade in the order they were discovered.

/// Default delay between consecutive nodes.
pub const REVEAL_STEP_MS: u32 = 50;

/// Hands out display delays in traversal order.
#[derive(Debug, Clone)]
pub struct RevealScheduler {
    step_ms: u32,
    issued: u32,
}

impl RevealScheduler {
    pub fn new(step_ms: u32) -> Self {
        Self { step_ms, issued: 0 }
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }

    /// Delay for the next node in traversal order.
    pub fn next_delay(&mut self) -> u32 {
        let delay = self.delay_for(self.issued);
        self.issued = self.issued.saturating_add(1);
        delay
    }

    /// Delay for the node at `index` in traversal order.
    #[inline]
    pub fn delay_for(&self, index: u32) -> u32 {
        index.saturating_mul(self.step_ms)
    }

    /// CSS `animation-delay` value for a delay.
    pub fn css_delay(delay_ms: u32) -> String {
        format!("{delay_ms}ms")
    }
}

impl Default for RevealScheduler {
    fn default() -> Self {
        Self::new(REVEAL_STEP_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_step_evenly() {
        let mut scheduler = RevealScheduler::default();
        let delays: Vec<u32> = (0..5).map(|_| scheduler.next_delay()).collect();
        assert_eq!(delays, vec![0, 50, 100, 150, 200]);
    }

    #[test]
    fn test_custom_step() {
        let mut scheduler = RevealScheduler::new(30);
        scheduler.next_delay();
        assert_eq!(scheduler.next_delay(), 30);
        assert_eq!(scheduler.delay_for(10), 300);
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        let scheduler = RevealScheduler::new(u32::MAX);
        assert_eq!(scheduler.delay_for(3), u32::MAX);
    }

    #[test]
    fn test_css_delay() {
        assert_eq!(RevealScheduler::css_delay(150), "150ms");
    }
}
