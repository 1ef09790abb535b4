use crate::config::mapping::MappingConfig;
use crate::engines::generation::{
    gene_consumer::GeneConsumer,
    grammar::Grammar,
    normalizer::NormalizedGrammar,
};
use crate::error::{GrammarError, Result};
use crate::types::{Phenotype, Symbol};

/// One gene consumed during a derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub position: usize,      // Index of the gene in the chromosome
    pub rule: String,         // Nonterminal the gene resolved
    pub arity: usize,         // Alternatives available to the gene
    pub choice: usize,        // gene % arity
    pub output_offset: usize, // Phenotype length when the choice was made
}

/// Full record of a successful derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub phenotype: Phenotype,
    pub decisions: Vec<Decision>,
    pub steps: usize,
}

impl Derivation {
    pub fn genes_used(&self) -> usize {
        self.decisions.len()
    }
}

/// Leftmost-derivation mapper from chromosomes to phenotypes
///
/// Stateless apart from its configuration; one mapper can serve any number
/// of grammars and chromosomes, from any thread.
#[derive(Debug, Clone, Default)]
pub struct GenotypeMapper {
    config: MappingConfig,
}

impl GenotypeMapper {
    pub fn new(config: MappingConfig) -> Self {
        Self { config }
    }

    pub fn with_max_steps(max_steps: usize) -> Self {
        Self::new(MappingConfig { max_steps })
    }

    pub fn max_steps(&self) -> usize {
        self.config.max_steps
    }

    /// Map a chromosome to its phenotype
    pub fn map<G: AsRef<Grammar>>(&self, grammar: &G, chromosome: &[u32]) -> Result<Phenotype> {
        self.derive(grammar, chromosome).map(|d| d.phenotype)
    }

    /// Map a chromosome and keep the per-gene decision trace
    pub fn derive<G: AsRef<Grammar>>(&self, grammar: &G, chromosome: &[u32]) -> Result<Derivation> {
        let grammar = grammar.as_ref();
        let mut consumer = GeneConsumer::new(chromosome);
        let mut phenotype = Phenotype::default();
        let mut decisions = Vec::new();
        let mut steps = 0usize;

        // Pending symbols, leftmost on top
        let start = Symbol::NonTerminal(grammar.start().to_string());
        let mut pending: Vec<&Symbol> = vec![&start];

        while let Some(symbol) = pending.pop() {
            let name = match symbol {
                Symbol::Terminal(payload) => {
                    phenotype.push(payload.clone());
                    continue;
                }
                Symbol::NonTerminal(name) => name,
            };

            steps += 1;
            if steps > self.config.max_steps {
                return Err(GrammarError::DerivationDidNotTerminate {
                    max_steps: self.config.max_steps,
                });
            }

            let rule = grammar.rule(name).ok_or_else(|| {
                GrammarError::MalformedGrammar(format!("undefined nonterminal <{}>", name))
            })?;

            let choice = if rule.is_choice() {
                let position = consumer.position();
                let choice = consumer.choose(rule.arity()).ok_or_else(|| {
                    GrammarError::GenesExhausted {
                        position,
                        symbol: name.clone(),
                    }
                })?;
                decisions.push(Decision {
                    position,
                    rule: name.clone(),
                    arity: rule.arity(),
                    choice,
                    output_offset: phenotype.len(),
                });
                choice
            } else {
                0
            };

            let production = &rule.alternatives[choice];
            log::trace!("<{}> -> {} (alternative {})", name, production, choice);
            pending.extend(production.symbols().iter().rev());
        }

        Ok(Derivation {
            phenotype,
            decisions,
            steps,
        })
    }
}

/// Map `chromosome` over a normalized grammar with an explicit step limit
pub fn map_genotype(
    grammar: &NormalizedGrammar,
    chromosome: &[u32],
    max_steps: usize,
) -> Result<Phenotype> {
    GenotypeMapper::with_max_steps(max_steps).map(grammar, chromosome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::grammar::{terminals, Rule};
    use crate::engines::generation::normalizer::normalize;
    use crate::types::Production;

    fn scenario_grammar() -> Grammar {
        Grammar::new(
            "S",
            vec![
                Rule::new(
                    "S",
                    vec![
                        Production::new(vec![Symbol::terminal("a"), Symbol::non_terminal("B")]),
                        Production::new(vec![Symbol::terminal("b"), Symbol::non_terminal("B")]),
                    ],
                ),
                Rule::new("B", vec![terminals(&["x"]), terminals(&["y"]), terminals(&["z"])]),
            ],
        )
        .unwrap()
    }

    fn recursive_grammar() -> Grammar {
        Grammar::new(
            "E",
            vec![
                Rule::new(
                    "E",
                    vec![
                        Production::new(vec![
                            Symbol::non_terminal("E"),
                            Symbol::terminal("+"),
                            Symbol::non_terminal("E"),
                        ]),
                        Production::new(vec![Symbol::non_terminal("V")]),
                    ],
                ),
                Rule::new("V", vec![terminals(&["x"]), terminals(&["1"])]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_scenario_mapping() {
        let normalized = normalize(&scenario_grammar()).unwrap();
        let phenotype = GenotypeMapper::default().map(&normalized, &[0, 1]).unwrap();
        assert_eq!(phenotype.terminals(), ["a", "y"]);
    }

    #[test]
    fn test_modulo_indexing_and_excess_genes_ignored() {
        let normalized = normalize(&scenario_grammar()).unwrap();
        let phenotype = GenotypeMapper::default()
            .map(&normalized, &[3, 5, 99, 100])
            .unwrap();
        assert_eq!(phenotype.terminals(), ["b", "z"]);
    }

    #[test]
    fn test_trace_records_consumed_genes() {
        let normalized = normalize(&scenario_grammar()).unwrap();
        let derivation = GenotypeMapper::default().derive(&normalized, &[0, 1, 7]).unwrap();

        assert_eq!(derivation.genes_used(), 2);
        assert_eq!(derivation.decisions[0].rule, "S");
        assert_eq!(derivation.decisions[0].output_offset, 0);
        assert_eq!(derivation.decisions[1].rule, "B");
        assert_eq!(derivation.decisions[1].arity, 3);
        assert_eq!(derivation.decisions[1].choice, 1);
        assert_eq!(derivation.decisions[1].output_offset, 1);
        // S, T[a]#0, B
        assert_eq!(derivation.steps, 3);
    }

    #[test]
    fn test_genes_exhausted() {
        let normalized = normalize(&scenario_grammar()).unwrap();
        let err = GenotypeMapper::default().map(&normalized, &[0]).unwrap_err();
        match err {
            GrammarError::GenesExhausted { position, symbol } => {
                assert_eq!(position, 1);
                assert_eq!(symbol, "B");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_chromosome_exhausts_immediately() {
        let err = GenotypeMapper::default().map(&scenario_grammar(), &[]).unwrap_err();
        assert!(matches!(err, GrammarError::GenesExhausted { position: 0, .. }));
    }

    #[test]
    fn test_single_alternative_consumes_no_gene() {
        let grammar = Grammar::new(
            "S",
            vec![
                Rule::new("S", vec![Production::new(vec![Symbol::non_terminal("A")])]),
                Rule::new("A", vec![terminals(&["only"])]),
            ],
        )
        .unwrap();

        let derivation = GenotypeMapper::default().derive(&grammar, &[]).unwrap();
        assert_eq!(derivation.phenotype.terminals(), ["only"]);
        assert_eq!(derivation.genes_used(), 0);
    }

    #[test]
    fn test_step_limit() {
        let grammar = Grammar::new(
            "L",
            vec![Rule::new(
                "L",
                vec![Production::new(vec![Symbol::terminal("a"), Symbol::non_terminal("L")])],
            )],
        )
        .unwrap();

        let err = GenotypeMapper::with_max_steps(50).map(&grammar, &[]).unwrap_err();
        assert!(matches!(err, GrammarError::DerivationDidNotTerminate { max_steps: 50 }));
    }

    #[test]
    fn test_leftmost_order() {
        // E -> E + E, E -> V, V -> x, E -> V, V -> 1
        let phenotype = GenotypeMapper::default()
            .map(&recursive_grammar(), &[0, 1, 0, 1, 1])
            .unwrap();
        assert_eq!(phenotype.to_string(), "x+1");
    }

    #[test]
    fn test_free_function_matches_mapper() {
        let normalized = normalize(&recursive_grammar()).unwrap();
        let genes = [0, 1, 0, 1, 1];
        assert_eq!(
            map_genotype(&normalized, &genes, 100).unwrap(),
            GenotypeMapper::default().map(&normalized, &genes).unwrap()
        );
    }
}
