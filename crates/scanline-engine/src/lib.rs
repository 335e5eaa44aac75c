//! Translates scan geometry and a per-line bit pattern into `laserline`
//! instruction frames, and the pure polling logic for the scan lifecycle
//! (pin → spin-up → wait-for-stable → stream).
//!
//! This crate does no I/O: it has no `Transport`. The lifecycle helpers
//! ([`poll_stable`], [`check_mid_scan`]) are state-transition functions the
//! caller drives with whatever status reads and clock it owns, matching the
//! geometry engine's role as a pure translator rather than a session.

mod error;

pub use error::ScanError;

use scan_core::{Direction, RawFrame, StatusByte};
use scan_params::Parameters;

/// Pack a bit pattern into `words_per_line` 64-bit words, honoring
/// `direction`'s bit order (forward: LSB-first per word; backward:
/// MSB-first). `bits` may be shorter than `bits_per_line`; the remainder is
/// left off (laser off). Supplying more bits than `bits_per_line` is
/// [`ScanError::OverLong`].
pub fn pack_bits(
    direction: Direction,
    bits: &[bool],
    bits_per_line: u32,
    words_per_line: usize,
) -> Result<Vec<u64>, ScanError> {
    if bits.len() > bits_per_line as usize {
        return Err(ScanError::OverLong {
            bits_per_line,
            got: bits.len(),
        });
    }

    let mut words = vec![0u64; words_per_line];
    for (i, &on) in bits.iter().enumerate() {
        if !on {
            continue;
        }
        let word_idx = i / 64;
        let bit_idx = i % 64;
        let shift = match direction {
            Direction::Forward => bit_idx,
            Direction::Backward => 63 - bit_idx,
        };
        words[word_idx] |= 1u64 << shift;
    }
    Ok(words)
}

/// Inverse of [`pack_bits`], recovering the first `bits_per_line` bits from
/// `words`. Used for round-trip tests and host-side diagnostics.
#[must_use]
pub fn unpack_bits(direction: Direction, words: &[u64], bits_per_line: u32) -> Vec<bool> {
    (0..bits_per_line as usize)
        .map(|i| {
            let word_idx = i / 64;
            let bit_idx = i % 64;
            let shift = match direction {
                Direction::Forward => bit_idx,
                Direction::Backward => 63 - bit_idx,
            };
            (words[word_idx] >> shift) & 1 == 1
        })
        .collect()
}

/// Build the complete frame sequence for one laserline instruction from the
/// session's frozen [`Parameters`] and a caller-supplied bit pattern.
pub fn build_laserline(params: &Parameters, bits: &[bool]) -> Result<Vec<RawFrame>, ScanError> {
    let words = pack_bits(
        params.direction(),
        bits,
        params.bits_per_line(),
        params.words_per_line(),
    )?;
    let frames = wire_codec::encode_laserline(
        params.direction(),
        params.ticks_per_half_step(),
        params.words_per_line(),
        &words,
    )?;
    Ok(frames)
}

/// How often the host must push a fresh laserline payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamCadence {
    /// `single_line`: the device repeats the one pattern streamed; the host
    /// only streams again if the pattern changes.
    Once,
    /// Normal mode: a fresh payload is expected per active facet.
    PerFacet,
}

/// [`StreamCadence`] implied by `params`. `single_facet` narrows which
/// facets are active but does not change how often the host streams.
#[must_use]
pub fn stream_cadence(params: &Parameters) -> StreamCadence {
    if params.single_line() {
        StreamCadence::Once
    } else {
        StreamCadence::PerFacet
    }
}

/// Outcome of one [`poll_stable`] check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Facet sync observed; the caller may begin streaming.
    Stable,
    /// Not yet stable; keep polling.
    KeepWaiting,
}

/// One iteration of the spin-up wait loop: the caller reads a status word
/// via `READ` and reports elapsed wall time since spin-up began.
///
/// The device-facing status byte (§6.1) carries no separate photodiode-sync
/// bit; `executing` is the only bit that can plausibly carry "facet sync
/// locked" semantics, so it is read as the stable signal here.
pub fn poll_stable(status: StatusByte, elapsed_s: f64, stable_s: f64) -> Result<PollOutcome, ScanError> {
    if status.executing() {
        return Ok(PollOutcome::Stable);
    }
    if elapsed_s >= stable_s {
        return Err(ScanError::SyncTimeout { stable_s });
    }
    Ok(PollOutcome::KeepWaiting)
}

/// Check a status byte observed between laserline frames for a mid-scan
/// FIFO drain. The device asserting `dispatch_error` while streaming is
/// fatal to the current scan.
pub fn check_mid_scan(status: StatusByte) -> Result<(), ScanError> {
    if status.dispatch_error() {
        return Err(ScanError::FifoDrained);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Parameters {
        scan_params::ParametersBuilder::new()
            .rpm(2400.0)
            .facets(4)
            .fractions(0.35, 0.85)
            .f_motor(1_000_000)
            .bits_per_line(625)
            .build()
            .unwrap()
    }

    #[test]
    fn scanline_geometry_worked_example() {
        let p = params();
        assert_eq!(p.ticks_per_facet(), 6_250);
        assert_eq!(p.window_ticks(), 3_125);
        assert_eq!(p.ticks_per_half_step(), 5);
        assert_eq!(p.words_per_line(), 10);
    }

    #[test]
    fn all_ones_payload_pads_final_word_high_bits() {
        let p = params();
        let bits = vec![true; p.bits_per_line() as usize];
        let words = pack_bits(p.direction(), &bits, p.bits_per_line(), p.words_per_line()).unwrap();
        assert_eq!(words.len(), 10);
        assert!(words[..9].iter().all(|&w| w == u64::MAX));
        // 625 bits total, 9 full words of 64 = 576, so the last word uses 49
        // bits; the high 15 bits stay zero (forward = LSB-first).
        assert_eq!(words[9], (1u64 << 49) - 1);
    }

    #[test]
    fn pack_unpack_round_trips() {
        let p = params();
        let bits: Vec<bool> = (0..p.bits_per_line()).map(|i| i % 3 == 0).collect();
        let words = pack_bits(p.direction(), &bits, p.bits_per_line(), p.words_per_line()).unwrap();
        let back = unpack_bits(p.direction(), &words, p.bits_per_line());
        assert_eq!(back, bits);
    }

    #[test]
    fn backward_direction_is_msb_first_per_word() {
        let words = pack_bits(Direction::Backward, &[true], 1, 1).unwrap();
        assert_eq!(words[0], 1u64 << 63);
    }

    #[test]
    fn over_long_payload_is_rejected() {
        let err = pack_bits(Direction::Forward, &[true; 5], 4, 1);
        assert_eq!(err, Err(ScanError::OverLong { bits_per_line: 4, got: 5 }));
    }

    #[test]
    fn short_payload_is_zero_padded() {
        let words = pack_bits(Direction::Forward, &[true], 8, 1).unwrap();
        assert_eq!(words[0], 0b0000_0001);
    }

    #[test]
    fn poll_stable_times_out_after_stable_s() {
        let idle = StatusByte::new(0);
        assert_eq!(poll_stable(idle, 0.5, 1.0).unwrap(), PollOutcome::KeepWaiting);
        assert_eq!(
            poll_stable(idle, 1.0, 1.0),
            Err(ScanError::SyncTimeout { stable_s: 1.0 })
        );
    }

    #[test]
    fn poll_stable_reports_executing_as_stable() {
        let executing = StatusByte::new(0b0000_1000);
        assert_eq!(poll_stable(executing, 0.0, 1.0).unwrap(), PollOutcome::Stable);
    }

    #[test]
    fn mid_scan_dispatch_error_drains_fifo() {
        let bad = StatusByte::new(0b0000_0001);
        assert_eq!(check_mid_scan(bad), Err(ScanError::FifoDrained));
        assert_eq!(check_mid_scan(StatusByte::new(0)), Ok(()));
    }

    #[test]
    fn single_line_mode_streams_once() {
        let p = scan_params::ParametersBuilder::new()
            .rpm(2400.0)
            .facets(4)
            .fractions(0.1, 0.9)
            .bits_per_line(1)
            .single_line(true)
            .build()
            .unwrap();
        assert_eq!(stream_cadence(&p), StreamCadence::Once);
    }
}
