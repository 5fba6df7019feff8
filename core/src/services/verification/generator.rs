//! Random numeric code generation

use rand::{rngs::OsRng, Rng};

use super::traits::CodeGenerator;

/// Draws every digit independently and uniformly from the OS RNG
///
/// Uniform range sampling avoids the modulo bias of reducing one large
/// random integer to `10^length`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        let mut rng = OsRng;
        (0..length)
            .map(|_| char::from(rng.gen_range(b'0'..=b'9')))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_format() {
        let generator = RandomCodeGenerator::new();
        for length in [1, 4, 6, 8] {
            for _ in 0..50 {
                let code = generator.generate(length);
                assert_eq!(code.len(), length);
                assert!(code.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn test_zero_length_is_empty() {
        assert_eq!(RandomCodeGenerator::new().generate(0), "");
    }

    #[test]
    fn test_code_uniqueness() {
        let generator = RandomCodeGenerator::new();
        let codes: HashSet<String> = (0..100).map(|_| generator.generate(6)).collect();

        // 100 draws out of a million values
        assert!(codes.len() > 90);
    }

    #[test]
    fn test_every_digit_appears() {
        let generator = RandomCodeGenerator::new();
        let seen: HashSet<char> = (0..200)
            .flat_map(|_| generator.generate(6).chars().collect::<Vec<_>>())
            .collect();
        assert_eq!(seen.len(), 10);
    }
}
