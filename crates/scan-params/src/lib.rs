//! The validated, immutable parameter model.
//!
//! [`Parameters`] is constructed once per session (through
//! [`ParametersBuilder`]) and frozen; every derived constant the segmenter
//! and scanline engine need is computed once here and cached, never
//! recomputed on a hot path.
//!
//! **Open-question resolution.** spec.md lists `bits_per_line` only among
//! the parameter model's *cached derived* values, but also derives it from
//! `ticks_per_half_step`, which is not a base parameter either — the two
//! quantities are only mutually constrained (`window_ticks = bits_per_line
//! * ticks_per_half_step`), not independently determined by `rpm`/`facets`/
//! the scan fractions alone. This implementation resolves the gap by
//! treating `bits_per_line` as a base input (the scan resolution the
//! caller wants — naturally owned by the image/pattern layer upstream of
//! this core) and deriving `ticks_per_half_step` from it. The exactness
//! requirement described for the scanline engine (§4.E) is enforced here,
//! once, at construction, rather than re-checked on every scanline.

mod error;

pub use error::ParamsError;

use scan_core::Direction;

/// Validated, immutable snapshot of operational parameters for one
/// session. Every derived field is computed once in [`ParametersBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters {
    rpm: f64,
    start_frac: f64,
    end_frac: f64,
    spinup_s: f64,
    stable_s: f64,
    facets: u32,
    direction: Direction,
    single_line: bool,
    single_facet: bool,
    f_motor: u64,
    ticks_move: u64,
    motors: usize,
    bits_per_line: u32,

    ticks_per_facet: u64,
    window_ticks: u64,
    ticks_per_half_step: u64,
    words_per_line: usize,
}

impl Parameters {
    #[must_use]
    pub const fn rpm(&self) -> f64 {
        self.rpm
    }

    #[must_use]
    pub const fn start_frac(&self) -> f64 {
        self.start_frac
    }

    #[must_use]
    pub const fn end_frac(&self) -> f64 {
        self.end_frac
    }

    #[must_use]
    pub const fn spinup_s(&self) -> f64 {
        self.spinup_s
    }

    #[must_use]
    pub const fn stable_s(&self) -> f64 {
        self.stable_s
    }

    #[must_use]
    pub const fn facets(&self) -> u32 {
        self.facets
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn single_line(&self) -> bool {
        self.single_line
    }

    #[must_use]
    pub const fn single_facet(&self) -> bool {
        self.single_facet
    }

    #[must_use]
    pub const fn f_motor(&self) -> u64 {
        self.f_motor
    }

    #[must_use]
    pub const fn ticks_move(&self) -> u64 {
        self.ticks_move
    }

    #[must_use]
    pub const fn motors(&self) -> usize {
        self.motors
    }

    #[must_use]
    pub const fn bits_per_line(&self) -> u32 {
        self.bits_per_line
    }

    #[must_use]
    pub const fn ticks_per_facet(&self) -> u64 {
        self.ticks_per_facet
    }

    #[must_use]
    pub const fn window_ticks(&self) -> u64 {
        self.window_ticks
    }

    #[must_use]
    pub const fn ticks_per_half_step(&self) -> u64 {
        self.ticks_per_half_step
    }

    #[must_use]
    pub const fn words_per_line(&self) -> usize {
        self.words_per_line
    }
}

/// Builder for [`Parameters`], with defaults for the fields spec.md does
/// not require the caller to set explicitly.
#[derive(Debug, Clone)]
pub struct ParametersBuilder {
    rpm: Option<f64>,
    start_frac: Option<f64>,
    end_frac: Option<f64>,
    spinup_s: f64,
    stable_s: f64,
    facets: Option<u32>,
    direction: Direction,
    single_line: bool,
    single_facet: bool,
    f_motor: u64,
    ticks_move: u64,
    motors: usize,
    bits_per_line: Option<u32>,
}

impl Default for ParametersBuilder {
    fn default() -> Self {
        Self {
            rpm: None,
            start_frac: None,
            end_frac: None,
            spinup_s: 1.0,
            stable_s: 1.5,
            facets: None,
            direction: Direction::Forward,
            single_line: false,
            single_facet: false,
            f_motor: 1_000_000,
            ticks_move: 10_000,
            motors: 1,
            bits_per_line: None,
        }
    }
}

impl ParametersBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rpm(mut self, rpm: f64) -> Self {
        self.rpm = Some(rpm);
        self
    }

    #[must_use]
    pub fn fractions(mut self, start_frac: f64, end_frac: f64) -> Self {
        self.start_frac = Some(start_frac);
        self.end_frac = Some(end_frac);
        self
    }

    #[must_use]
    pub fn spinup_s(mut self, spinup_s: f64) -> Self {
        self.spinup_s = spinup_s;
        self
    }

    #[must_use]
    pub fn stable_s(mut self, stable_s: f64) -> Self {
        self.stable_s = stable_s;
        self
    }

    #[must_use]
    pub fn facets(mut self, facets: u32) -> Self {
        self.facets = Some(facets);
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }

    #[must_use]
    pub fn single_facet(mut self, single_facet: bool) -> Self {
        self.single_facet = single_facet;
        self
    }

    #[must_use]
    pub fn f_motor(mut self, f_motor: u64) -> Self {
        self.f_motor = f_motor;
        self
    }

    #[must_use]
    pub fn ticks_move(mut self, ticks_move: u64) -> Self {
        self.ticks_move = ticks_move;
        self
    }

    #[must_use]
    pub fn motors(mut self, motors: usize) -> Self {
        self.motors = motors;
        self
    }

    #[must_use]
    pub fn bits_per_line(mut self, bits_per_line: u32) -> Self {
        self.bits_per_line = Some(bits_per_line);
        self
    }

    /// Validate and freeze the parameter set, computing every derived
    /// constant once.
    pub fn build(self) -> Result<Parameters, ParamsError> {
        let rpm = self.rpm.unwrap_or(0.0);
        if rpm <= 0.0 {
            return Err(ParamsError::InvalidRpm(rpm));
        }

        let facets = self.facets.unwrap_or(0);
        if facets == 0 {
            return Err(ParamsError::InvalidFacets);
        }

        let start_frac = self.start_frac.unwrap_or(0.0);
        let end_frac = self.end_frac.unwrap_or(0.0);
        if !(start_frac > 0.0 && start_frac < end_frac && end_frac < 1.0) {
            return Err(ParamsError::InvalidFractions {
                start: start_frac,
                end: end_frac,
            });
        }

        if self.motors == 0 {
            return Err(ParamsError::InvalidMotors);
        }

        let bits_per_line = self.bits_per_line.unwrap_or(0);
        if bits_per_line == 0 {
            return Err(ParamsError::InvalidBitsPerLine);
        }

        if self.ticks_move > scan_core::MAX_TICKS_FIELD {
            return Err(ParamsError::TicksMoveOverflow(self.ticks_move));
        }

        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ticks_per_facet = ((self.f_motor as f64 * 60.0) / (rpm * f64::from(facets))).round() as u64;

        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let window_ticks = ((end_frac - start_frac) * ticks_per_facet as f64).floor() as u64;

        if window_ticks % u64::from(bits_per_line) != 0 {
            return Err(ParamsError::WindowUnaligned {
                window_ticks,
                bits_per_line,
            });
        }
        let ticks_per_half_step = window_ticks / u64::from(bits_per_line);

        let words_per_line = (bits_per_line as usize).div_ceil(64);

        Ok(Parameters {
            rpm,
            start_frac,
            end_frac,
            spinup_s: self.spinup_s,
            stable_s: self.stable_s,
            facets,
            direction: self.direction,
            single_line: self.single_line,
            single_facet: self.single_facet,
            f_motor: self.f_motor,
            ticks_move: self.ticks_move,
            motors: self.motors,
            bits_per_line,
            ticks_per_facet,
            window_ticks,
            ticks_per_half_step,
            words_per_line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ParametersBuilder {
        ParametersBuilder::new()
            .rpm(2400.0)
            .facets(4)
            .fractions(0.35, 0.85)
            .f_motor(1_000_000)
            .bits_per_line(625)
    }

    #[test]
    fn worked_example_geometry() {
        let params = base().build().unwrap();
        assert_eq!(params.ticks_per_facet(), 6_250);
        assert_eq!(params.window_ticks(), 3_125);
        assert_eq!(params.ticks_per_half_step(), 5);
        assert_eq!(params.words_per_line(), 10);
    }

    #[test]
    fn rejects_non_positive_rpm() {
        let err = ParametersBuilder::new()
            .rpm(0.0)
            .facets(4)
            .fractions(0.1, 0.9)
            .bits_per_line(1)
            .build();
        assert_eq!(err, Err(ParamsError::InvalidRpm(0.0)));
    }

    #[test]
    fn rejects_out_of_order_fractions() {
        let err = ParametersBuilder::new()
            .rpm(2400.0)
            .facets(4)
            .fractions(0.9, 0.1)
            .bits_per_line(1)
            .build();
        assert!(matches!(err, Err(ParamsError::InvalidFractions { .. })));
    }

    #[test]
    fn rejects_unaligned_window() {
        let err = base().bits_per_line(7).build();
        assert!(matches!(err, Err(ParamsError::WindowUnaligned { .. })));
    }

    #[test]
    fn rejects_ticks_move_overflow() {
        let err = base().ticks_move(scan_core::MAX_TICKS_FIELD + 1).build();
        assert!(matches!(err, Err(ParamsError::TicksMoveOverflow(_))));
    }
}
