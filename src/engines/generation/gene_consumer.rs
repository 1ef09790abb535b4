/// Deterministically consumes genes from a chromosome
///
/// Unlike wrapping GE variants, running off the end is reported to the
/// caller rather than restarting at the first gene.
pub struct GeneConsumer<'a> {
    genes: &'a [u32],
    position: usize,
}

impl<'a> GeneConsumer<'a> {
    pub fn new(genes: &'a [u32]) -> Self {
        Self { genes, position: 0 }
    }

    /// Consume next gene, `None` once exhausted
    pub fn consume(&mut self) -> Option<u32> {
        let gene = *self.genes.get(self.position)?;
        self.position += 1;
        Some(gene)
    }

    /// Consume gene and map to choice index
    pub fn choose(&mut self, num_choices: usize) -> Option<usize> {
        if num_choices == 0 {
            return None;
        }
        self.consume().map(|gene| gene as usize % num_choices)
    }

    /// Index of the next gene to be consumed
    pub fn position(&self) -> usize {
        self.position
    }
}
