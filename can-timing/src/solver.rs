use std::sync::atomic::{AtomicBool, Ordering};
use derive_getters::Getters;
use serde::Serialize;
use crate::constant::SYNC_SEG;
use crate::device::{DeviceCapability, TimingRequest};
use crate::error::TimingError;

/// A nominal bit timing found for a [`DeviceCapability`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Getters)]
pub struct Solution {
    /// achieved bit rate in Hz
    #[getter(copy)]
    baud_rate: f64,
    #[getter(copy)]
    baud_error: f64,
    /// achieved sample point in percent
    #[getter(copy)]
    sample_point: f64,
    #[getter(copy)]
    sample_point_error: f64,
    /// maximum relative oscillator deviation still resynchronized correctly
    #[getter(copy)]
    oscillator_tolerance: f64,
    #[getter(copy)]
    prescaler: u32,
    #[getter(copy)]
    time_quanta: u32,
    #[getter(copy)]
    prop_seg: u32,
    #[getter(copy)]
    phase_seg1: u32,
    #[getter(copy)]
    phase_seg2: u32,
    #[getter(copy)]
    max_sjw: u32,
}

impl Solution {
    /// Propagation segment plus phase segment 1.
    #[inline]
    pub fn tseg1(&self) -> u32 {
        self.prop_seg + self.phase_seg1
    }

    #[inline]
    pub fn tseg2(&self) -> u32 {
        self.phase_seg2
    }

    /// Preference order: lowest baud error, lowest sample point error, largest oscillator
    /// tolerance, then any other prescaler.
    ///
    /// The last clause replaces `best` on a full tie whenever the prescaler differs, so the
    /// winner of a tie depends on scan order. The prescaler scan runs downwards, which makes
    /// ties settle on the lowest prescaler (most TQ).
    fn outranks(&self, best: &Self) -> bool {
        let baud_le = self.baud_error <= best.baud_error;
        let sample_le = self.sample_point_error <= best.sample_point_error;

        self.baud_error < best.baud_error
            || (baud_le && self.sample_point_error < best.sample_point_error)
            || (baud_le && sample_le && self.oscillator_tolerance > best.oscillator_tolerance)
            || (baud_le && sample_le
                && self.oscillator_tolerance >= best.oscillator_tolerance
                && self.prescaler != best.prescaler)
    }
}

/// Find the best nominal bit timing of `capability` for the desired baud rate and sample point.
///
/// Every prescaler from `max_ps` down to `min_ps` and every propagation segment that leaves
/// room for the minimum phase segments is tried. `None` when no combination fits the device.
pub fn solve(
    capability: &DeviceCapability,
    desired_baud: f64,
    desired_sample_point: f64,
) -> Option<Solution> {
    search(capability, desired_baud, desired_sample_point, || false)
        .ok()
        .flatten()
}

/// Same as [`solve`], but gives up with [`TimingError::Cancelled`] once `cancel` is set.
///
/// The flag is polled before each prescaler.
pub fn solve_with_cancel(
    capability: &DeviceCapability,
    desired_baud: f64,
    desired_sample_point: f64,
    cancel: &AtomicBool,
) -> Result<Option<Solution>, TimingError> {
    search(capability, desired_baud, desired_sample_point, || cancel.load(Ordering::Relaxed))
}

impl TimingRequest {
    /// Solve this request for `capability`, a missing timing is reported as an error.
    pub fn solve(&self, capability: &DeviceCapability) -> Result<Solution, TimingError> {
        solve(capability, self.bitrate(), self.sample_point())
            .ok_or(TimingError::SolutionNotFound {
                bitrate: self.bitrate(),
                sample_point: self.sample_point(),
            })
    }
}

fn search<F: FnMut() -> bool>(
    cap: &DeviceCapability,
    desired_baud: f64,
    desired_sample_point: f64,
    mut cancelled: F,
) -> Result<Option<Solution>, TimingError> {
    if !desired_baud.is_finite() || !desired_sample_point.is_finite() {
        log::warn!("CAN-TIMING - bitrate: {} or sample point: {} is not a number", desired_baud, desired_sample_point);
        return Ok(None);
    }

    let sync = SYNC_SEG as i64;
    let (min_tq, max_tq) = cap.tq_window();
    let clock = cap.clock as f64;
    let mut best: Option<Solution> = None;

    for prescaler in (cap.min_ps..=cap.max_ps).rev() {
        if cancelled() {
            return Err(TimingError::Cancelled);
        }

        let tq = (clock / prescaler as f64 / desired_baud).round();
        if !tq.is_finite() || tq < 0. {
            log::trace!("CAN-TIMING - prescaler: {} gives no usable TQ count", prescaler);
            continue;
        }
        let time_quanta = tq as i64;
        if time_quanta < min_tq || time_quanta > max_tq {
            continue;
        }

        let baud_rate = clock / (prescaler as f64 * tq);
        if !baud_rate.is_finite() || baud_rate < 0. {
            continue;
        }
        let baud_error = (baud_rate - desired_baud).abs();

        // leave enough TQ for the minimum phase segments
        let max_prop_seg = (cap.max_prop_seg as i64).min(
            time_quanta - (sync + (cap.min_tseg1 as i64 - cap.min_prop_seg as i64) + cap.min_tseg2 as i64)
        );

        for prop_seg in (cap.min_prop_seg as i64)..=max_prop_seg {
            let remaining = time_quanta - (sync + prop_seg);
            // odd remainders give the extra TQ to phase segment 2
            let phase_seg1 = remaining.div_euclid(2);
            let phase_seg2 = remaining - phase_seg1;
            debug_assert_eq!(sync + prop_seg + phase_seg1 + phase_seg2, time_quanta, "segments do not add to total TQ");

            let tseg1 = prop_seg + phase_seg1;
            if tseg1 < cap.min_tseg1 as i64 || tseg1 > cap.max_tseg1 as i64 {
                continue;
            }
            if phase_seg2 < cap.min_tseg2 as i64 || phase_seg2 > cap.max_tseg2 as i64 {
                continue;
            }

            let max_sjw = phase_seg1.min(phase_seg2).min(cap.max_sjw as i64);
            let df1 = phase_seg1.min(phase_seg2) as f64 / (2. * (13. * tq - phase_seg2 as f64));
            let df2 = max_sjw as f64 / (20. * tq);
            let oscillator_tolerance = df1.min(df2);
            if oscillator_tolerance < 0. {
                continue;
            }

            let sample_point = ((sync + prop_seg + phase_seg1) as f64 / tq) * 100.;
            let candidate = Solution {
                baud_rate,
                baud_error,
                sample_point,
                sample_point_error: (desired_sample_point - sample_point).abs(),
                oscillator_tolerance,
                prescaler,
                time_quanta: time_quanta as u32,
                prop_seg: prop_seg as u32,
                phase_seg1: phase_seg1 as u32,
                phase_seg2: phase_seg2 as u32,
                max_sjw: max_sjw as u32,
            };

            let better = match &best {
                Some(v) => candidate.outranks(v),
                None => true,
            };
            if better {
                log::debug!("CAN-TIMING - best so far: {:?}", candidate);
                best = Some(candidate);
            }
        }
    }

    if best.is_none() {
        log::warn!("CAN-TIMING - no timing found for bitrate: {} sample point: {}%", desired_baud, desired_sample_point);
    }

    Ok(best)
}
