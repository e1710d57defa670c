use bigdecimal::BigDecimal;

use super::policy::Precision;

/// Fees and precision a walk runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub precision: Precision,
    /// Fraction of each fill's gross value charged as taker fee.
    pub taker_fee: BigDecimal,
    /// Fixed fee in quote units, added to the target before walking.
    pub withdrawal_fee: BigDecimal,
    /// Fixed fee in base units charged when depositing the sold asset.
    pub receive_fee: BigDecimal,
}
