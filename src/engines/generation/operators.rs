use crate::config::mapping::MappingConfig;
use crate::config::mutation::{MutationConfig, SitePolicy, ValuePolicy};
use crate::engines::generation::{
    genome::Chromosome,
    mapper::{Decision, GenotypeMapper},
    normalizer::NormalizedGrammar,
};
use crate::error::{GrammarError, Result};
use rand::Rng;

/// Locality-preserving point mutation
///
/// Only genes that resolved a rule whose alternatives are each a single
/// terminal (and of which there are at least two) are candidates. Changing
/// such a gene swaps the one terminal emitted at that derivation point and
/// nothing else: the phenotype keeps its length, and since the alternatives
/// consume no further genes every other gene keeps resolving the same rule.
#[derive(Debug, Clone, Default)]
pub struct MutationOperator {
    config: MutationConfig,
    mapper: GenotypeMapper,
}

impl MutationOperator {
    pub fn new(config: MutationConfig, mapping: MappingConfig) -> Self {
        Self {
            config,
            mapper: GenotypeMapper::new(mapping),
        }
    }

    /// Decisions of `chromosome` that may be mutated, in gene order
    pub fn eligible_sites(
        &self,
        grammar: &NormalizedGrammar,
        chromosome: &[u32],
    ) -> Result<Vec<Decision>> {
        let derivation = self.mapper.derive(grammar, chromosome)?;
        Ok(derivation
            .decisions
            .into_iter()
            .filter(|d| grammar.is_mutable(&d.rule))
            .collect())
    }

    /// Return a copy of `chromosome` with one eligible gene re-encoded to
    /// select a different alternative.
    pub fn mutate<R: Rng>(
        &self,
        grammar: &NormalizedGrammar,
        chromosome: &[u32],
        rng: &mut R,
    ) -> Result<Chromosome> {
        let sites = self.eligible_sites(grammar, chromosome)?;

        let site = match self.config.site_policy {
            SitePolicy::Uniform if !sites.is_empty() => sites.get(rng.gen_range(0..sites.len())),
            SitePolicy::Uniform => None,
            SitePolicy::Leftmost => sites.first(),
            SitePolicy::Rightmost => sites.last(),
        };
        let Some(site) = site else {
            log::debug!(
                "No mutable gene among {} genes for grammar <{}>",
                chromosome.len(),
                grammar.grammar().start()
            );
            return Err(GrammarError::NoMutableGene);
        };

        let new_choice = other_alternative(site.arity, site.choice, rng);
        let value = encode_choice(
            new_choice,
            site.arity,
            self.config.value_policy,
            self.config.max_gene,
            rng,
        );

        log::debug!(
            "Mutating gene {} (<{}>): alternative {} -> {} (value {} -> {})",
            site.position,
            site.rule,
            site.choice,
            new_choice,
            chromosome[site.position],
            value
        );

        let mut mutated = chromosome.to_vec();
        mutated[site.position] = value;
        Ok(mutated)
    }
}

/// Mutate with the default site and value policies
pub fn mutate<R: Rng>(
    grammar: &NormalizedGrammar,
    chromosome: &[u32],
    rng: &mut R,
) -> Result<Chromosome> {
    MutationOperator::default().mutate(grammar, chromosome, rng)
}

/// Uniform pick over `0..arity` excluding `current`; `arity` must be >= 2
fn other_alternative<R: Rng>(arity: usize, current: usize, rng: &mut R) -> usize {
    let pick = rng.gen_range(0..arity - 1);
    if pick >= current {
        pick + 1
    } else {
        pick
    }
}

/// Gene value whose residue modulo `arity` is `choice`
fn encode_choice<R: Rng>(
    choice: usize,
    arity: usize,
    policy: ValuePolicy,
    max_gene: u32,
    rng: &mut R,
) -> u32 {
    let canonical = choice as u32;
    match policy {
        ValuePolicy::Canonical => canonical,
        ValuePolicy::Wide => {
            if canonical >= max_gene {
                return canonical;
            }
            let arity = arity as u64;
            let slots = (max_gene as u64 - 1 - canonical as u64) / arity + 1;
            let k = rng.gen_range(0..slots);
            (canonical as u64 + k * arity) as u32
        }
    }
}

/// Generate random chromosome
pub fn random_chromosome<R: Rng>(
    length: usize,
    gene_range: std::ops::Range<u32>,
    rng: &mut R,
) -> Chromosome {
    (0..length)
        .map(|_| rng.gen_range(gene_range.clone()))
        .collect()
}
