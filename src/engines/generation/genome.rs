/// Chromosome representation for grammatical evolution
///
/// A chromosome is a sequence of integers ("genes" or codons) consumed left
/// to right by the `GenotypeMapper`. Each gene resolves exactly one choice
/// between the alternatives of a multi-alternative rule:
///
/// - alternative index = `gene % rule.arity()`
/// - single-alternative rules are expanded without consuming a gene
/// - genes left over after the derivation finishes are ignored
///
/// The core never edits a chromosome in place; mutation returns a new one.
///
/// # Example
///
/// ```
/// use grammevo::Chromosome;
///
/// // With S -> "a" B | "b" B and B -> "x" | "y" | "z":
/// // gene 0 picks the "a" branch, gene 1 picks "y"
/// let chromosome: Chromosome = vec![0, 1];
/// assert_eq!(chromosome.len(), 2);
/// ```
pub type Chromosome = Vec<u32>;
