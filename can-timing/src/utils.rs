use crate::constant::{SJA1000_MAX_BRP, SJA1000_MAX_SJW, SJA1000_MAX_TSEG1, SJA1000_MAX_TSEG2};
use crate::error::TimingError;
use crate::solver::Solution;

#[inline]
fn field(name: &str, value: u32, max: u32) -> Result<u8, TimingError> {
    match value {
        1..=255 if value <= max => Ok((value - 1) as u8),
        _ => Err(TimingError::RegisterOutOfRange(format!("{}: {} not in 1..={}", name, value, max))),
    }
}

/// Pack a solution into SJA1000 bus timing registers, returns `(timing0, timing1)`.
///
/// BTR0: `SJW-1` in bits 7..6, `BRP-1` in bits 5..0.
/// BTR1: `SAM` in bit 7, `TSEG2-1` in bits 6..4, `TSEG1-1` in bits 3..0.
pub fn btr_registers(solution: &Solution, triple_sampling: bool) -> Result<(u8, u8), TimingError> {
    let brp = field("brp", solution.prescaler(), SJA1000_MAX_BRP)?;
    let sjw = field("sjw", solution.max_sjw(), SJA1000_MAX_SJW)?;
    let tseg1 = field("tseg1", solution.tseg1(), SJA1000_MAX_TSEG1)?;
    let tseg2 = field("tseg2", solution.tseg2(), SJA1000_MAX_TSEG2)?;

    let timing0 = (sjw << 6) | brp;
    let timing1 = ((triple_sampling as u8) << 7) | (tseg2 << 4) | tseg1;

    Ok((timing0, timing1))
}

#[cfg(test)]
mod tests {
    use super::field;

    #[test]
    fn test_field() {
        assert_eq!(field("brp", 1, 64), Ok(0));
        assert_eq!(field("brp", 64, 64), Ok(63));
        assert!(field("brp", 0, 64).is_err());
        assert!(field("brp", 65, 64).is_err());
        assert!(field("tseg1", 300, 300).is_err());
    }
}
