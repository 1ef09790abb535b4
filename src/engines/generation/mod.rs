pub mod grammar;
pub mod normalizer;
pub mod genome;
pub mod gene_consumer;
pub mod mapper;
pub mod operators;

pub use genome::Chromosome;
pub use grammar::{Grammar, GrammarDefinition, Rule};
pub use normalizer::{normalize, NormalizedGrammar};
pub use mapper::{map_genotype, Decision, Derivation, GenotypeMapper};
pub use operators::{mutate, random_chromosome, MutationOperator};
