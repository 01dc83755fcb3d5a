//! Tunable parameters controlling how human-like move selection behaves.
//!
//! `PersonalityParams` is a plain configuration value: every field has a
//! documented valid range, and [`PersonalityParams::clamp`] brings an
//! out-of-range value (e.g. loaded from a UCI option or a config file) back
//! into bounds rather than rejecting it outright.

/// Parameters shaping [`crate::root_select`]'s human-like candidate
/// selection. All ranges are inclusive; see each field's doc comment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PersonalityParams {
    /// Centipawn margin below the best candidate's eval within which a move
    /// still qualifies as a candidate. Range 0..=400.
    pub candidate_margin_cp: i32,
    /// Maximum number of candidates considered after the margin filter.
    /// Range 1..=30.
    pub candidate_moves_max: u32,
    /// When false, the engine always plays the search's best move and the
    /// remaining fields are ignored.
    pub human_select: bool,
    /// Softmax temperature applied to candidate weights. 0 means always
    /// pick the top-weighted candidate deterministically. Range 0..=200.
    pub human_temperature: u32,
    /// Centipawns of random noise added to each candidate's eval before
    /// weighting, to avoid rigidly repeating the same line. Range 0..=50.
    pub human_noise_cp: i32,
    /// Seed for the engine's owned PRNG. 0 means seed from a
    /// non-deterministic source. Range 0..=2^31-1.
    pub random_seed: u32,
    /// Multiplicative bias toward eval-losing but sharp candidates.
    /// Range 0..=200, 100 is neutral.
    pub risk_appetite: u32,
    /// Multiplicative bias toward candidates that sacrifice material.
    /// Range 0..=200, 100 is neutral.
    pub sacrifice_bias: u32,
    /// Multiplicative bias toward candidates with fewer legal replies
    /// (quieter resulting positions). Range 0..=200, 100 is neutral.
    pub simplicity_bias: u32,
    /// Multiplicative bias toward capturing/trading candidates.
    /// Range 0..=200, 100 is neutral.
    pub trade_bias: u32,
    /// A candidate is never selected if it scores more than this many
    /// centipawns below the best candidate, regardless of other biases.
    /// Range 0..=600.
    pub human_hard_floor_cp: i32,
    /// In the opening phase, additional scrutiny applied against
    /// edge-knight/edge-pawn candidates. Range 0..=200.
    pub human_opening_sanity: u32,
    /// Overrides `candidate_moves_max` with a smaller top-K cutoff when
    /// nonzero. Range 0..=10 (0 means no override).
    pub human_topk_override: u32,
}

impl Default for PersonalityParams {
    fn default() -> Self {
        PersonalityParams {
            candidate_margin_cp: 50,
            candidate_moves_max: 5,
            human_select: false,
            human_temperature: 50,
            human_noise_cp: 10,
            random_seed: 0,
            risk_appetite: 100,
            sacrifice_bias: 100,
            simplicity_bias: 100,
            trade_bias: 100,
            human_hard_floor_cp: 200,
            human_opening_sanity: 100,
            human_topk_override: 0,
        }
    }
}

impl PersonalityParams {
    /// Returns `true` when every field is within its documented range.
    #[must_use]
    pub fn validate(&self) -> bool {
        (0..=400).contains(&self.candidate_margin_cp)
            && (1..=30).contains(&self.candidate_moves_max)
            && (0..=200).contains(&self.human_temperature)
            && (0..=50).contains(&self.human_noise_cp)
            && (0..=200).contains(&self.risk_appetite)
            && (0..=200).contains(&self.sacrifice_bias)
            && (0..=200).contains(&self.simplicity_bias)
            && (0..=200).contains(&self.trade_bias)
            && (0..=600).contains(&self.human_hard_floor_cp)
            && (0..=200).contains(&self.human_opening_sanity)
            && (0..=10).contains(&self.human_topk_override)
    }

    /// Clamps every field into its documented range, so a value loaded from
    /// an untrusted source (UCI option, config file) can never put the
    /// selection algorithm out of bounds.
    #[must_use]
    pub fn clamp(self) -> Self {
        PersonalityParams {
            candidate_margin_cp: self.candidate_margin_cp.clamp(0, 400),
            candidate_moves_max: self.candidate_moves_max.clamp(1, 30),
            human_select: self.human_select,
            human_temperature: self.human_temperature.clamp(0, 200),
            human_noise_cp: self.human_noise_cp.clamp(0, 50),
            random_seed: self.random_seed,
            risk_appetite: self.risk_appetite.clamp(0, 200),
            sacrifice_bias: self.sacrifice_bias.clamp(0, 200),
            simplicity_bias: self.simplicity_bias.clamp(0, 200),
            trade_bias: self.trade_bias.clamp(0, 200),
            human_hard_floor_cp: self.human_hard_floor_cp.clamp(0, 600),
            human_opening_sanity: self.human_opening_sanity.clamp(0, 200),
            human_topk_override: self.human_topk_override.clamp(0, 10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_validate() {
        assert!(PersonalityParams::default().validate());
    }

    #[test]
    fn clamp_brings_out_of_range_fields_into_bounds() {
        let wild = PersonalityParams {
            candidate_margin_cp: -10,
            candidate_moves_max: 0,
            human_temperature: 9999,
            human_noise_cp: -5,
            risk_appetite: 1000,
            sacrifice_bias: 1000,
            simplicity_bias: 1000,
            trade_bias: 1000,
            human_hard_floor_cp: -1,
            human_opening_sanity: 1000,
            human_topk_override: 99,
            ..PersonalityParams::default()
        };
        assert!(!wild.validate());
        assert!(wild.clamp().validate());
    }
}
