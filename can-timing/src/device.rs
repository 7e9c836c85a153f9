use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use crate::constant::{SJA1000_MAX_BRP, SJA1000_MAX_SJW, SJA1000_MAX_TSEG1, SJA1000_MAX_TSEG2, SYNC_SEG};

/// Hardware limits of one CAN controller.
///
/// All ranges are inclusive. Values are taken as given: a capability whose
/// `min_*` exceeds its `max_*` is not rejected, it just leaves nothing to search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceCapability {
    /// Oscillator frequency in Hz.
    pub clock: u32,
    pub min_ps: u32,
    pub max_ps: u32,
    /// Total time quanta per bit, SYNC_SEG included.
    pub min_tq: u32,
    pub max_tq: u32,
    pub min_prop_seg: u32,
    pub max_prop_seg: u32,
    /// Propagation segment plus phase segment 1.
    pub min_tseg1: u32,
    pub max_tseg1: u32,
    /// Phase segment 2.
    pub min_tseg2: u32,
    pub max_tseg2: u32,
    #[serde(default)]
    pub min_sjw: u32,
    pub max_sjw: u32,
}

impl DeviceCapability {
    /// SJA1000 class controller, the BTR0/BTR1 register layout.
    pub fn sja1000(clock: u32) -> Self {
        Self {
            clock,
            min_ps: 1,
            max_ps: SJA1000_MAX_BRP,
            min_tq: SYNC_SEG + 1 + 1,
            max_tq: SYNC_SEG + SJA1000_MAX_TSEG1 + SJA1000_MAX_TSEG2,
            min_prop_seg: 1,
            max_prop_seg: SJA1000_MAX_TSEG1 - 1,
            min_tseg1: 1,
            max_tseg1: SJA1000_MAX_TSEG1,
            min_tseg2: 1,
            max_tseg2: SJA1000_MAX_TSEG2,
            min_sjw: 1,
            max_sjw: SJA1000_MAX_SJW,
        }
    }

    /// Feasible range of total time quanta for the device as a whole.
    ///
    /// The bounds are signed; an empty window (`min > max`) means no bit
    /// period can be built.
    #[inline]
    pub fn tq_window(&self) -> (i64, i64) {
        let sync = SYNC_SEG as i64;
        let min = (sync + self.min_tseg1 as i64 + self.min_tseg2 as i64).max(self.min_tq as i64);
        let max = (sync + self.max_tseg1 as i64 + self.max_tseg2 as i64).min(self.max_tq as i64);
        (min, max)
    }
}

/// The bit rate and sample point to aim for.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Getters)]
pub struct TimingRequest {
    /// bits per second
    #[getter(copy)]
    bitrate: f64,
    /// percentage of the bit period, e.g. 87.5
    #[getter(copy)]
    sample_point: f64,
}

impl TimingRequest {
    pub fn new(bitrate: f64, sample_point: f64) -> Self {
        Self { bitrate, sample_point }
    }
}

#[cfg(test)]
mod tests {
    use super::DeviceCapability;

    #[test]
    fn test_tq_window() {
        let cap = DeviceCapability::sja1000(16_000_000);
        assert_eq!(cap.tq_window(), (3, 25));

        let mut cap = cap;
        cap.min_tq = 8;
        cap.max_tq = 20;
        assert_eq!(cap.tq_window(), (8, 20));

        cap.min_tseg1 = 30;
        let (min, max) = cap.tq_window();
        assert!(min > max);
    }
}
