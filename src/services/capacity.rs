//! Capacity estimation for a locality.
//!
//! Converts a locality's traffic demand into the number of TRX units needed,
//! using an Erlang-B derived approximation. The estimator is pure and total
//! over the valid input domain; input validation is the responsibility of the
//! record constructors in [`crate::api`].

/// Radio channels provided by one TRX unit (GSM full-rate timeslots).
pub const CHANNELS_PER_TRX: f64 = 8.0;

/// Estimate the TRX capacity needed to serve a locality.
///
/// * `avg_traffic_per_subscriber` - offered traffic per subscriber in Erlang
/// * `total_subscribers` - subscriber count
/// * `blocking_probability` - target blocking probability as a percentage
///
/// The offered traffic `A = avg_traffic_per_subscriber * total_subscribers`
/// is widened by a grade-of-service margin `-ln(p) * sqrt(A)` (stricter
/// targets, i.e. smaller `p`, need more headroom) and converted from channels
/// to TRX units. The result is clamped to zero from below; the same inputs
/// always produce the same output.
pub fn estimate_capacity(
    avg_traffic_per_subscriber: f64,
    total_subscribers: i64,
    blocking_probability: f64,
) -> f64 {
    let p = blocking_probability / 100.0;
    let offered_traffic = avg_traffic_per_subscriber * total_subscribers as f64;

    let channels = offered_traffic - p.ln() * offered_traffic.sqrt();
    let trx = channels / CHANNELS_PER_TRX;

    trx.max(0.0)
}

/// Estimate the TRX capacity needed for a [`crate::api::Locality`] record.
pub fn estimate_locality_capacity(locality: &crate::api::Locality) -> f64 {
    estimate_capacity(
        locality.avg_traffic_per_subscriber,
        locality.total_subscribers,
        locality.blocking_probability,
    )
}
