//! Record id generation.
//!
//! Ids are a type prefix plus random digits (`P4821`, `D107`, `R305114`).
//! Generation does not check for collisions; the store's add operations
//! enforce uniqueness and reject a clashing id, so callers retry by
//! generating again.

use rand::Rng;

/// The record kind an id is generated for, determining prefix and width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    /// `P` + 4 digits.
    Patient,
    /// `D` + 4 digits.
    Doctor,
    /// `R` + 6 digits, unique only within one patient's report list.
    Report,
}

impl IdPrefix {
    fn letter(self) -> char {
        match self {
            IdPrefix::Patient => 'P',
            IdPrefix::Doctor => 'D',
            IdPrefix::Report => 'R',
        }
    }

    fn digits(self) -> u32 {
        match self {
            IdPrefix::Patient | IdPrefix::Doctor => 4,
            IdPrefix::Report => 6,
        }
    }
}

/// Generates a fresh random id for the given record kind.
pub fn generate(prefix: IdPrefix) -> String {
    let mut rng = rand::thread_rng();
    generate_with(&mut rng, prefix)
}

fn generate_with<R: Rng>(rng: &mut R, prefix: IdPrefix) -> String {
    let width = prefix.digits();
    let upper = 10u32.pow(width);
    // Zero-padded so ids are fixed-width within a kind.
    format!(
        "{}{:0width$}",
        prefix.letter(),
        rng.gen_range(0..upper),
        width = width as usize
    )
}
