//! Splits a long move trajectory into segments no longer than `max_ticks`,
//! re-originating each motor's cubic coefficients so the concatenation
//! reproduces the original trajectory exactly, and rejects any segment
//! whose step rate would exceed the device's Nyquist limit.
//!
//! Both the re-origination and the Nyquist bound are computed in exact
//! integer arithmetic (`i128` intermediates, checked against the `i64`
//! device ALU width) — floating point would silently round the fixed-point
//! trajectory and cannot be trusted for either contract.

mod error;

pub use error::SegmentError;

use scan_core::{Coef, Ticks};
use wire_codec::MoveSegment;

/// Split `total_ticks` of motion, described by each motor's `[c0, c1, c2]`
/// position-polynomial coefficients, into segments of at most `max_ticks`
/// ticks. `f_motor` is the device's sample frequency, used for the Nyquist
/// bound (`F_MOTOR / 2`).
pub fn segment(
    total_ticks: u64,
    coefficients: &[[Coef; 3]],
    max_ticks: u64,
    f_motor: u64,
) -> Result<Vec<MoveSegment>, SegmentError> {
    let threshold = u128::from(f_motor) / 2;

    let mut segments = Vec::new();
    let mut offset: u64 = 0;

    while offset < total_ticks {
        let remaining = total_ticks - offset;
        let ticks_i = remaining.min(max_ticks);

        let mut re_originated = Vec::with_capacity(coefficients.len());
        for motor in coefficients {
            let coefs = reoriginate(*motor, offset)?;
            check_nyquist(coefs, ticks_i, threshold)?;
            re_originated.push(coefs);
        }

        segments.push(MoveSegment {
            ticks: Ticks::new(ticks_i),
            coefficients: re_originated,
        });

        offset += ticks_i;
    }

    if segments.is_empty() {
        segments.push(MoveSegment {
            ticks: Ticks::ZERO,
            coefficients: coefficients.to_vec(),
        });
    }

    Ok(segments)
}

/// `c0' = c0 + 2*c1*tau + 3*c2*tau^2`, `c1' = c1 + 3*c2*tau`, `c2' = c2`.
fn reoriginate(coefs: [Coef; 3], tau: u64) -> Result<[Coef; 3], SegmentError> {
    let [c0, c1, c2] = coefs.map(i128::from);
    let tau = i128::from(tau);

    let c0_new = c0 + 2 * c1 * tau + 3 * c2 * tau * tau;
    let c1_new = c1 + 3 * c2 * tau;
    let c2_new = c2;

    Ok([
        to_coef(c0_new)?,
        to_coef(c1_new)?,
        to_coef(c2_new)?,
    ])
}

fn to_coef(value: i128) -> Result<Coef, SegmentError> {
    Coef::try_from(value).map_err(|_| SegmentError::Overflow)
}

/// Exact max `|v(t)|` for `v(t) = c0 + 2*c1*t + 3*c2*t^2`, `t` in
/// `0..ticks_i`, evaluated at every integer tick (segments are bounded by
/// `max_ticks`, so this is cheap and avoids any floating-point rounding of
/// the closed-form vertex).
fn check_nyquist(coefs: [Coef; 3], ticks_i: u64, threshold: u128) -> Result<(), SegmentError> {
    let [c0, c1, c2] = coefs.map(i128::from);

    let mut bound: u128 = 0;
    for t in 0..ticks_i.max(1) {
        let t = i128::from(t);
        let v = c0 + 2 * c1 * t + 3 * c2 * t * t;
        bound = bound.max(v.unsigned_abs());
    }

    if bound > threshold {
        return Err(SegmentError::Nyquist { bound, threshold });
    }
    Ok(())
}
