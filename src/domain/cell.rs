/// Cell is the fundamental unit of the automaton.
/// `age` counts consecutive generations alive and is 0 whenever the cell is dead.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    pub alive: bool,
    pub age: u32,
}

impl Cell {
    pub const DEAD: Cell = Cell { alive: false, age: 0 };

    /// A cell on its first tracked generation alive
    pub const NEWBORN: Cell = Cell { alive: true, age: 1 };

    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        self.alive
    }

    /// Seed state: alive cells start at age 1, dead cells at 0
    pub const fn seeded(alive: bool) -> Self {
        if alive { Cell::NEWBORN } else { Cell::DEAD }
    }

    /// Pure function computing the successor once the next alive state is decided:
    /// 1. Survivor ages by one
    /// 2. Birth resets age to 1
    /// 3. Death resets age to 0
    pub const fn advance(self, next_alive: bool) -> Self {
        match (self.alive, next_alive) {
            (true, true) => Cell { alive: true, age: self.age.saturating_add(1) },
            (false, true) => Cell::NEWBORN,
            (_, false) => Cell::DEAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survivor_ages() {
        let cell = Cell { alive: true, age: 4 };
        assert_eq!(cell.advance(true), Cell { alive: true, age: 5 });
    }

    #[test]
    fn test_birth_resets_age() {
        assert_eq!(Cell::DEAD.advance(true), Cell::NEWBORN);
    }

    #[test]
    fn test_death_clears_age() {
        let cell = Cell { alive: true, age: 17 };
        assert_eq!(cell.advance(false), Cell::DEAD);
        assert_eq!(Cell::DEAD.advance(false), Cell::DEAD);
    }

    #[test]
    fn test_age_sequence() {
        let mut cell = Cell::DEAD;
        let ages: Vec<u32> = (0..4)
            .map(|_| {
                cell = cell.advance(true);
                cell.age
            })
            .collect();
        assert_eq!(ages, vec![1, 2, 3, 4]);

        cell = cell.advance(false);
        assert_eq!(cell.age, 0);

        cell = cell.advance(true);
        assert_eq!(cell.age, 1);
    }

    #[test]
    fn test_age_saturates() {
        let cell = Cell { alive: true, age: u32::MAX };
        assert_eq!(cell.advance(true).age, u32::MAX);
    }

    #[test]
    fn test_seeded() {
        assert_eq!(Cell::seeded(true), Cell::NEWBORN);
        assert_eq!(Cell::seeded(false), Cell::DEAD);
    }
}
