use grammevo::engines::generation::grammar::terminals;
use grammevo::{
    normalize, random_chromosome, ConfigManager, GenotypeMapper, Grammar, GrammarError,
    MutationOperator, Production, Rule, Symbol,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;

fn expression_grammar() -> Result<Grammar, GrammarError> {
    let t = Symbol::terminal;
    let n = Symbol::non_terminal;

    Grammar::new(
        "expr",
        vec![
            Rule::new(
                "expr",
                vec![
                    Production::new(vec![n("expr"), n("op"), n("expr")]),
                    Production::new(vec![t("("), n("expr"), t(")")]),
                    Production::new(vec![n("var")]),
                ],
            ),
            Rule::new("op", vec![terminals(&["+"]), terminals(&["-"]), terminals(&["*"])]),
            Rule::new("var", vec![terminals(&["x"]), terminals(&["y"]), terminals(&["1"])]),
        ],
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Usage: map_and_mutate [config.toml] [seed] [individuals]
    let args: Vec<String> = env::args().collect();
    let manager = ConfigManager::new();
    if let Some(path) = args.get(1) {
        manager.load_from_file(path)?;
    }
    let seed = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(42);
    let individuals = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(10);
    let config = manager.get();

    let grammar = expression_grammar()?;
    let normalized = normalize(&grammar)?;
    println!(
        "Grammar: {} rules ({} wrapper rules added)",
        normalized.grammar().rules().len(),
        normalized.synthetic_rules()
    );
    if !normalized.has_mutable_rules() {
        println!("Grammar has no single-terminal choice rules; mutation will never apply");
    }

    let mapper = GenotypeMapper::new(config.mapping.clone());
    let operator = MutationOperator::new(config.mutation.clone(), config.mapping.clone());
    let mut rng = StdRng::seed_from_u64(seed);

    for i in 0..individuals {
        let chromosome = random_chromosome(24, 0..256, &mut rng);
        let phenotype = match mapper.map(&normalized, &chromosome) {
            Ok(phenotype) => phenotype,
            Err(e) => {
                println!("#{:<3} unmappable: {}", i, e);
                continue;
            }
        };

        match operator.mutate(&normalized, &chromosome, &mut rng) {
            Ok(mutated) => {
                let mutant = mapper.map(&normalized, &mutated)?;
                println!("#{:<3} {:<30} -> {}", i, phenotype, mutant);
            }
            Err(e) => println!("#{:<3} {:<30} (not mutated: {})", i, phenotype, e),
        }
    }

    Ok(())
}
