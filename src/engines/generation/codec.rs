use crate::annotation::FeatureKey;
use crate::config::EvolutionConfig;
use crate::engines::generation::{
    gene_consumer::GeneConsumer,
    genome::Genotype,
    phenotype::{Constraint, PatternValue, Phenotype, TokenPattern},
};
use crate::error::{PatternomaticError, Result};
use crate::grammar::{bnf, Grammar, Operator, Production, Terminal};
use std::sync::Arc;

/// Maps genotypes to phenotypes through a leftmost derivation of the grammar
#[derive(Debug, Clone)]
pub struct GenotypeCodec {
    grammar: Arc<Grammar>,
    codon_width: usize,
    max_wraps: usize,
}

impl GenotypeCodec {
    pub fn new(grammar: Arc<Grammar>, codon_width: usize, max_wraps: usize) -> Self {
        Self {
            grammar,
            codon_width,
            max_wraps,
        }
    }

    pub fn from_config(grammar: Arc<Grammar>, config: &EvolutionConfig) -> Self {
        Self::new(grammar, config.codon_width, config.max_wraps)
    }

    /// Derive the phenotype of `genotype`. Every nonterminal consumes one
    /// codon, including single-alternative rules.
    pub fn decode(&self, genotype: &Genotype) -> Result<Phenotype> {
        let codons = genotype.codons(self.codon_width);
        let mut consumer = GeneConsumer::new(&codons, self.max_wraps);
        let mut builder = PhenotypeBuilder::default();

        self.expand(bnf::S, &mut consumer, &mut builder)?;

        Ok(builder.finish())
    }

    fn expand(
        &self,
        symbol: &str,
        consumer: &mut GeneConsumer,
        builder: &mut PhenotypeBuilder,
    ) -> Result<()> {
        let alternatives = self.grammar.alternatives(symbol).ok_or_else(|| {
            PatternomaticError::Grammar(format!("Unknown nonterminal <{}>", symbol))
        })?;

        let choice = consumer.choose(alternatives.len())?;
        builder.enter(symbol, &self.grammar);

        match &alternatives[choice] {
            Production::Symbols(symbols) => {
                for next in symbols {
                    self.expand(next, consumer, builder)?;
                }
            }
            Production::Terminal(terminal) => builder.terminal(terminal),
        }

        builder.exit(symbol)
    }
}

#[derive(Debug, Default)]
struct PendingConstraint {
    feature: Option<FeatureKey>,
    operator: Option<Operator>,
    value: Option<PatternValue>,
}

/// Assembles token constraint-sets from derivation events
#[derive(Debug, Default)]
struct PhenotypeBuilder {
    tokens: Vec<TokenPattern>,
    pending: Option<PendingConstraint>,
}

impl PhenotypeBuilder {
    fn enter(&mut self, symbol: &str, grammar: &Grammar) {
        match symbol {
            bnf::T => self.tokens.push(TokenPattern::default()),
            bnf::F => self.pending = Some(PendingConstraint::default()),
            _ => {
                if let Some(pending) = self.pending.as_mut() {
                    if let Some(key) = grammar.feature(symbol) {
                        pending.feature = Some(key.clone());
                    } else if let Some(op) = Operator::from_nonterminal(symbol) {
                        pending.operator = Some(op);
                    }
                }
            }
        }
    }

    fn terminal(&mut self, terminal: &Terminal) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        match terminal {
            Terminal::Value(value) => pending.value = Some(PatternValue::Single(value.clone())),
            Terminal::List(values) => pending.value = Some(PatternValue::List(values.clone())),
            Terminal::Operator(op) => pending.operator = Some(*op),
            Terminal::Wildcard => {}
        }
    }

    fn exit(&mut self, symbol: &str) -> Result<()> {
        if symbol != bnf::F {
            return Ok(());
        }

        let pending = self.pending.take().unwrap_or_default();
        let (Some(feature), Some(value)) = (pending.feature, pending.value) else {
            return Err(PatternomaticError::Grammar(
                "Feature expansion produced no value".to_string(),
            ));
        };

        let token = self.tokens.last_mut().ok_or_else(|| {
            PatternomaticError::Grammar("Feature expanded outside of a token".to_string())
        })?;
        token.constraints.push(Constraint {
            feature,
            operator: pending.operator,
            value,
        });
        Ok(())
    }

    fn finish(self) -> Phenotype {
        Phenotype {
            tokens: self.tokens,
        }
    }
}
