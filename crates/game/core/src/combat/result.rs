//! Damage result type.

/// Result of a resolved hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    /// Final damage applied to the target.
    pub amount: u32,

    /// Whether the crit roll succeeded.
    pub critical: bool,

    /// Variance fraction that was applied (e.g. `-0.08` for an 8% low roll).
    pub variance: f64,

    /// Damage after scaling, variance and crit, before defense.
    pub pre_defense: u32,

    /// Defense that was subtracted, after armor penetration.
    pub effective_defense: u32,
}
