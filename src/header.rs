//! Dynamic header text.

use chrono::NaiveDate;
use rand::Rng;

/// Number of spots advertised in the header, uniform in `1..=10`.
pub fn available_spots<R: Rng>(rng: &mut R) -> u8 {
    rng.random_range(1..=10)
}

pub fn spots_banner(spots: u8) -> String {
    format!("{spots} SPOTS AVAILABLE")
}

/// Today's date as shown in the header, e.g. `TODAY, FRIDAY, OCTOBER 16, 2026`.
pub fn date_banner(date: NaiveDate) -> String {
    format!("TODAY, {}", date.format("%A, %B %-d, %Y")).to_uppercase()
}
