//! Single-Sensor Solar Validation Example
//!
//! This example shows how CelestGuard checks a claimed navigation state
//! against one sun sighting.
//!
//! ## What You'll Learn
//!
//! - Creating a validator with a shared key
//! - Predicting the sun for a claimed position
//! - Reading scores, verdicts and angular deltas
//! - Spotting a spoofed position
//!
//! ## How It Works
//!
//! 1. **Prediction**: the sun's azimuth and elevation are computed for the
//!    claimed time and place
//! 2. **Signing**: the claimed state and each bearing are packed into a
//!    48-byte message and signed with HMAC-SHA-512
//! 3. **Scoring**: the two signatures are compared bit by bit
//!    - 95% or more: nominal
//!    - 80% or more: degraded
//!    - below: anomalous
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_single_sensor
//! ```

use celestguard_core::{
    IntegrityError, IntegrityResult, IntegrityStatus, IntegrityValidator, NavigationState, ValidatorConfig,
};
use chrono::{TimeZone, Utc};

fn main() {
    println!("CelestGuard Single-Sensor Validation Example");
    println!("============================================\n");

    let validator = match IntegrityValidator::new("demo-shared-key", ValidatorConfig::default()) {
        Ok(v) => v,
        Err(e) => {
            println!("✗ Could not build validator: {}", e);
            return;
        }
    };

    let Some(noon) = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).single() else {
        println!("✗ Invalid timestamp");
        return;
    };
    let paris = NavigationState::new(noon, 48.8566, 2.3522, 35.0);

    let predicted = match validator.predict_sun(&paris) {
        Ok(sun) => sun,
        Err(e) => {
            println!("✗ Prediction failed: {}", e);
            return;
        }
    };
    println!(
        "Predicted sun over Paris: az {:.3}°, el {:.3}°\n",
        predicted.azimuth_deg, predicted.elevation_deg
    );

    // Scenario 1: the sensor agrees with the prediction
    println!("Scenario 1: Honest sun sensor");
    report(validator.validate(&paris, &predicted));

    // Scenario 2: sensor bias of a tenth of a degree
    println!("\nScenario 2: Sensor drift of 0.1° in azimuth");
    report(validator.validate(&paris, &predicted.offset_azimuth(0.1)));

    // Scenario 3: the sensor sees the Paris sun while navigation claims Madrid
    println!("\nScenario 3: Spoofed position (claims Madrid)");
    let madrid = NavigationState::new(noon, 40.4168, -3.7038, 667.0);
    report(validator.validate(&madrid, &predicted));

    println!("\nNote: any mismatch in the signed bearing flips about half the");
    println!("signature bits, so near misses score like wild misses.");
}

fn report(result: Result<IntegrityResult, IntegrityError>) {
    match result {
        Ok(result) => {
            let mark = if result.status() == IntegrityStatus::Nominal { "✓" } else { "✗" };
            println!(
                "  {} {:?}: score {:.2}%, {} bits differ",
                mark,
                result.status(),
                result.integrity_score_pct(),
                result.hamming_distance_bits().unwrap_or_default()
            );
            if let Some(angle) = result.delta_angle_deg() {
                println!("    Angular error: {:.4}°", angle);
            }
        }
        Err(e) => println!("  ✗ Validation error: {}", e),
    }
}
