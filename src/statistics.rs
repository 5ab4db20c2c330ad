#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub number_of_expressions: u32,
    pub number_of_classes: u32,
    pub number_of_canonical_hits: u32,
    pub number_of_z3_invocations: u32,
    pub number_of_merges: u32,
}

impl Statistics {
    pub fn measure_expression(&mut self) {
        self.number_of_expressions += 1;
    }

    pub fn measure_new_class(&mut self) {
        self.number_of_classes += 1;
    }

    pub fn measure_canonical_hit(&mut self) {
        self.number_of_canonical_hits += 1;
    }

    pub fn measure_invoke_z3(&mut self) {
        self.number_of_z3_invocations += 1;
    }

    pub fn measure_merge(&mut self) {
        self.number_of_merges += 1;
    }
}
