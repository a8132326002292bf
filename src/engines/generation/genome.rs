use crate::error::PatternomaticError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Genotype representation for grammatical evolution
///
/// A genotype is a bit string sliced into fixed-width codons. Each codon is
/// read as an unsigned integer by the `GenotypeCodec` and picks one
/// alternative of the grammar rule being expanded (`codon % alternatives`).
///
/// Genetic operators work on the raw bits:
/// - **Crossover**: swapping suffixes past a bit position
/// - **Mutation**: flipping single bits
/// - **No invalid states**: any bit string decodes or fails cleanly
///
/// # Example
///
/// ```
/// use patternomatic::engines::generation::Genotype;
///
/// let genotype: Genotype = "0000000100000010".parse().unwrap();
/// assert_eq!(genotype.codons(8), vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Genotype {
    bits: Vec<bool>,
}

impl Genotype {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..length).map(|_| rng.gen::<bool>()).collect(),
        }
    }

    /// Pack codon values big-endian into `width`-bit slots
    pub fn from_codons(codons: &[u32], width: usize) -> Self {
        let mut bits = Vec::with_capacity(codons.len() * width);
        for codon in codons {
            for shift in (0..width).rev() {
                bits.push((codon >> shift) & 1 == 1);
            }
        }
        Self { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// Complete codons only; a trailing partial codon is ignored
    pub fn codons(&self, width: usize) -> Vec<u32> {
        if width == 0 {
            return Vec::new();
        }
        self.bits
            .chunks_exact(width)
            .map(|chunk| chunk.iter().fold(0u32, |acc, bit| (acc << 1) | u32::from(*bit)))
            .collect()
    }

    /// `self[..point] + other[point..]`
    pub(crate) fn splice(&self, other: &Genotype, point: usize) -> Genotype {
        let head = &self.bits[..point.min(self.bits.len())];
        let tail = &other.bits[point.min(other.bits.len())..];
        Genotype {
            bits: head.iter().chain(tail.iter()).copied().collect(),
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl FromStr for Genotype {
    type Err = PatternomaticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(PatternomaticError::Configuration(format!(
                    "Invalid genotype character '{}'",
                    other
                ))),
            })
            .collect::<Result<Vec<bool>, _>>()
            .map(Genotype::new)
    }
}

impl From<Genotype> for String {
    fn from(genotype: Genotype) -> Self {
        genotype.to_string()
    }
}

impl TryFrom<String> for Genotype {
    type Error = PatternomaticError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codons_big_endian() {
        let genotype: Genotype = "00101001011010000011001111001110".parse().unwrap();
        assert_eq!(genotype.codons(8), vec![0b0010_1001, 0b0110_1000, 0b0011_0011, 0b1100_1110]);
        assert_eq!(genotype.codons(5).len(), 6);
    }

    #[test]
    fn test_from_codons_round_trip() {
        let genotype = Genotype::from_codons(&[0, 7, 255], 8);
        assert_eq!(genotype.len(), 24);
        assert_eq!(genotype.codons(8), vec![0, 7, 255]);
    }

    #[test]
    fn test_rejects_non_binary() {
        assert!("0102".parse::<Genotype>().is_err());
    }

    #[test]
    fn test_splice_swaps_suffix() {
        let a: Genotype = "0000".parse().unwrap();
        let b: Genotype = "111111".parse().unwrap();

        assert_eq!(a.splice(&b, 2).to_string(), "001111");
        assert_eq!(b.splice(&a, 2).to_string(), "1100");
    }

    #[test]
    fn test_serializes_as_bit_string() {
        let genotype: Genotype = "1010".parse().unwrap();
        assert_eq!(serde_json::to_string(&genotype).unwrap(), "\"1010\"");
    }
}
