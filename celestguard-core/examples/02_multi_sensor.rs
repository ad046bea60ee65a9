//! Multi-Sensor Fusion Example
//!
//! This example shows how CelestGuard fuses sun, star and magnetometer
//! sightings into one weighted consensus score.
//!
//! ## What You'll Learn
//!
//! - Listing the stars visible from a claimed position
//! - Simulating honest sensor readings with noise
//! - Reading the per-channel evidence trail
//! - How one spoofed channel moves the consensus
//!
//! ## Weighting
//!
//! - **Sun**: fixed weight 1.0, used only when a sighting is supplied
//! - **Stars**: weighted by their confidence
//! - **Magnetometer**: weighted by its confidence
//!
//! Channels with zero confidence are still signed and reported but do not
//! move the consensus.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_multi_sensor
//! ```

use celestguard_core::{
    simulate_observations, GuardResult, IntegrityValidator, MultiSensorObservations, NavigationState,
    SimulationProfile, ValidatorConfig,
};
use chrono::{TimeZone, Utc};
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    println!("CelestGuard Multi-Sensor Fusion Example");
    println!("=======================================\n");

    if let Err(e) = run() {
        println!("✗ Example failed: {}", e);
    }
}

fn run() -> GuardResult<()> {
    let validator = IntegrityValidator::new("demo-shared-key", ValidatorConfig::default())?;

    let Some(night) = Utc.with_ymd_and_hms(2025, 1, 15, 23, 0, 0).single() else {
        println!("✗ Invalid timestamp");
        return Ok(());
    };
    let paris = NavigationState::new(night, 48.8566, 2.3522, 35.0);

    println!("Sky over Paris, 2025-01-15 23:00 UTC");
    println!("------------------------------------");
    println!("Night time: {}", validator.is_night_time(&paris)?);

    let visible = validator.visible_stars(&paris)?;
    for star in visible.iter().take(6) {
        println!(
            "  {:<12} az {:>7.2}°  el {:>6.2}°  mag {:>5.2}  confidence {:.2}",
            star.name, star.azimuth_deg, star.elevation_deg, star.magnitude, star.confidence
        );
    }
    println!("  ({} stars above the horizon mask)\n", visible.len());

    // Scenario 1: honest sensors with realistic noise
    println!("Scenario 1: Honest sensors");
    let mut rng = StdRng::seed_from_u64(7);
    let honest = simulate_observations(&validator, &paris, &SimulationProfile::default(), &mut rng)?;
    print_fusion(&validator, &paris, &honest)?;

    // Scenario 2: one star sighting replaced by a spoofed bearing
    println!("\nScenario 2: One spoofed star");
    let mut spoofed = simulate_observations(&validator, &paris, &SimulationProfile::exact(), &mut rng)?;
    if let Some(first) = spoofed.stars.first_mut() {
        first.azimuth_deg += 12.0;
    }
    print_fusion(&validator, &paris, &spoofed)?;

    // Scenario 3: same sensors, navigation claims a position 5° away
    println!("\nScenario 3: Spoofed navigation state");
    let mut claimed = paris;
    claimed.latitude_deg -= 5.0;
    claimed.longitude_deg += 5.0;
    let observations = simulate_observations(&validator, &paris, &SimulationProfile::exact(), &mut rng)?;
    print_fusion(&validator, &claimed, &observations)?;

    Ok(())
}

fn print_fusion(
    validator: &IntegrityValidator,
    state: &NavigationState,
    observations: &MultiSensorObservations,
) -> GuardResult<()> {
    let result = validator.validate_multi_sensor(state, observations)?;
    let Some(fusion) = result.multi_sensor() else {
        return Ok(());
    };

    for detail in fusion.signatures() {
        let mark = if detail.hamming_distance_bits() == 0 { "✓" } else { "✗" };
        println!(
            "  {} {:<14} Δ {:>8.4}°  weight {:.2}  score {:>6.2}%",
            mark,
            detail.name().unwrap_or(detail.id()),
            detail.delta_deg(),
            detail.weight(),
            detail.integrity_score_pct()
        );
    }
    println!(
        "  Consensus: {:.2}% across {} sensors -> {:?}",
        fusion.consensus_score_pct(),
        fusion.sensor_count(),
        result.status()
    );
    Ok(())
}
