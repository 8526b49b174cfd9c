//! Live adapter for the `NameGenerator` port.

use crate::generator::generate_random_name;
use crate::ports::NameGenerator;

/// Live name generator drawing fresh random 5-letter names.
pub struct LiveNameGenerator;

impl NameGenerator for LiveNameGenerator {
    fn generate_name(&self) -> String {
        generate_random_name()
    }
}
