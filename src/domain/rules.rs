use super::Neighborhood;
use super::error::RuleSpecError;

/// Inclusive interval over an alive-neighbor count
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Interval {
    Bounded { min: u32, max: u32 },
    Unbounded { min: u32 },
}

impl Interval {
    pub const fn contains(self, count: u32) -> bool {
        match self {
            Interval::Bounded { min, max } => min <= count && count <= max,
            Interval::Unbounded { min } => count >= min,
        }
    }

    pub const fn min(self) -> u32 {
        match self {
            Interval::Bounded { min, .. } | Interval::Unbounded { min } => min,
        }
    }
}

/// If the count of neighborhood `neighborhood` lies in `interval`,
/// the cell's next state becomes `next_state`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rule {
    pub neighborhood: usize,
    pub interval: Interval,
    pub next_state: bool,
}

impl Rule {
    pub const fn bounded(neighborhood: usize, min: u32, max: u32, next_state: bool) -> Self {
        Self {
            neighborhood,
            interval: Interval::Bounded { min, max },
            next_state,
        }
    }

    pub const fn unbounded(neighborhood: usize, min: u32, next_state: bool) -> Self {
        Self {
            neighborhood,
            interval: Interval::Unbounded { min },
            next_state,
        }
    }

    /// Check the rule against per-neighborhood counts
    #[inline]
    pub fn matches(&self, counts: &[u32]) -> bool {
        self.interval.contains(counts[self.neighborhood])
    }
}

/// All neighborhoods (by index) and rules (by declaration order).
/// Built once, then shared read-only by every generation step.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct EvolutionRules {
    neighborhoods: Vec<Neighborhood>,
    rules: Vec<Rule>,
}

impl EvolutionRules {
    /// Assemble the aggregate, checking that neighborhood ids are dense
    /// and every rule references an existing neighborhood.
    pub fn new(neighborhoods: Vec<Neighborhood>, rules: Vec<Rule>) -> Result<Self, RuleSpecError> {
        if let Some((index, nb)) = neighborhoods.iter().enumerate().find(|(i, nb)| nb.id() != *i) {
            return Err(RuleSpecError::NeighborhoodIndex { index, id: nb.id() });
        }
        if let Some((position, rule)) = rules
            .iter()
            .enumerate()
            .find(|(_, r)| r.neighborhood >= neighborhoods.len())
        {
            return Err(RuleSpecError::UnknownNeighborhood {
                rule: position,
                neighborhood: rule.neighborhood,
                available: neighborhoods.len(),
            });
        }
        Ok(Self { neighborhoods, rules })
    }

    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Largest offset any neighborhood reaches along either axis
    pub fn reach(&self) -> u32 {
        self.neighborhoods.iter().map(Neighborhood::reach).max().unwrap_or(0)
    }

    /// Decide the next alive state. Every rule is visited in declared order and
    /// each match overwrites the result, so the last matching rule wins.
    /// With no match the current state carries over.
    pub fn next_state(&self, current: bool, counts: &[u32]) -> bool {
        self.rules
            .iter()
            .fold(current, |state, rule| if rule.matches(counts) { rule.next_state } else { state })
    }
}
