//! Rule file parser.
//!
//! The file has two sections read top to bottom:
//!
//! ```text
//! [N1 14]          header: following bits belong to neighborhood 1, window row 14
//! N1 15=1          bit: column 15 of that row is a member
//! ...
//! [Rule]           switches to the rule section for the rest of the file
//! S1=2 3 1         neighborhood 1, count in [2, 3] -> alive
//! S1=4 0           neighborhood 1, count >= 4 -> dead
//! ```
//!
//! Window cells are converted straight into offsets relative to the center
//! `(15, 15)`; the center itself is never a member.

use std::path::Path;

use super::error::{RuleSpecError, WarningKind};
use super::neighborhood::{Coordinate, Neighborhood, WINDOW_SIZE};
use super::rules::{EvolutionRules, Rule};

const RULE_MARKER: &str = "[Rule]";

/// How malformed lines are treated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Log the line, drop its contribution and keep going.
    /// Unparsable numbers become 0.
    #[default]
    Permissive,
    /// Fail on the first malformed line.
    Strict,
}

/// A dropped or defaulted line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number
    pub line: usize,
    pub kind: WarningKind,
}

/// Parsed rules plus everything that was dropped along the way
#[derive(Clone, Debug)]
pub struct ParseOutcome {
    pub rules: EvolutionRules,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Neighborhoods,
    Rules,
}

/// Line-oriented, single pass parser for rule files
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleSpecParser {
    mode: ParseMode,
}

impl RuleSpecParser {
    pub fn new(mode: ParseMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Read and parse a rule file. A missing or unreadable file is an error in every mode.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<ParseOutcome, RuleSpecError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| RuleSpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&source)
    }

    /// Parse rule file text
    pub fn parse(&self, source: &str) -> Result<ParseOutcome, RuleSpecError> {
        let mut state = ParseState::new(self.mode);

        for (idx, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            state.line = idx + 1;
            match state.section {
                Section::Neighborhoods if line == RULE_MARKER => state.section = Section::Rules,
                Section::Neighborhoods => state.neighborhood_line(line)?,
                Section::Rules => state.rule_line(line)?,
            }
        }

        state.finish()
    }
}

/// Load a rule file and log a summary of what was read
pub fn load_rules<P: AsRef<Path>>(path: P, mode: ParseMode) -> Result<EvolutionRules, RuleSpecError> {
    let path = path.as_ref();
    let outcome = RuleSpecParser::new(mode).load(path)?;
    log::info!(
        "loaded {} neighborhoods and {} rules from {} ({} lines skipped or defaulted)",
        outcome.rules.neighborhoods().len(),
        outcome.rules.rules().len(),
        path.display(),
        outcome.warnings.len()
    );
    Ok(outcome.rules)
}

/// Mutable state of a single parse
struct ParseState {
    mode: ParseMode,
    section: Section,
    line: usize,
    /// (neighborhood id, window row) from the latest header
    header: Option<(usize, usize)>,
    neighborhoods: Vec<Neighborhood>,
    rules: Vec<Rule>,
    warnings: Vec<ParseWarning>,
}

impl ParseState {
    fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            section: Section::Neighborhoods,
            line: 0,
            header: None,
            neighborhoods: Vec::new(),
            rules: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a problem on the current line. Strict mode turns it into an error.
    fn report(&mut self, kind: WarningKind) -> Result<(), RuleSpecError> {
        match self.mode {
            ParseMode::Strict => Err(RuleSpecError::Malformed { line: self.line, kind }),
            ParseMode::Permissive => {
                log::warn!("rule file line {}: {}", self.line, kind);
                self.warnings.push(ParseWarning { line: self.line, kind });
                Ok(())
            }
        }
    }

    fn neighborhood_line(&mut self, line: &str) -> Result<(), RuleSpecError> {
        if line.starts_with('[') {
            return match parse_header(line) {
                Some((id, row)) => self.header_line(id, row),
                None => self.report(WarningKind::MalformedHeader(line.to_string())),
            };
        }

        let Some((id, col, bit)) = parse_bit(line) else {
            return self.report(WarningKind::Unrecognized(line.to_string()));
        };
        let Some((header_id, row)) = self.header else {
            return self.report(WarningKind::MissingRowHeader);
        };
        if id != header_id {
            return self.report(WarningKind::HeaderMismatch { header: header_id, found: id });
        }
        if col >= WINDOW_SIZE {
            return self.report(WarningKind::OutsideWindow { row, col });
        }
        let alive = match bit {
            "0" => false,
            "1" => true,
            other => return self.report(WarningKind::InvalidBit(other.to_string())),
        };

        if alive {
            // Header already registered the slot
            self.neighborhoods[id - 1].insert(Coordinate::from_window(row, col));
        }
        Ok(())
    }

    fn header_line(&mut self, id: usize, row: usize) -> Result<(), RuleSpecError> {
        let expected = self.neighborhoods.len() + 1;
        if id == 0 || id > expected {
            self.header = None;
            return self.report(WarningKind::NonDenseNeighborhood { found: id, expected });
        }
        if row >= WINDOW_SIZE {
            self.header = None;
            return self.report(WarningKind::OutsideWindow { row, col: 0 });
        }
        if id == expected {
            self.neighborhoods.push(Neighborhood::new(id - 1));
        }
        self.header = Some((id, row));
        Ok(())
    }

    fn rule_line(&mut self, line: &str) -> Result<(), RuleSpecError> {
        let Some((key, values)) = line.split_once('=') else {
            return self.report(WarningKind::Unrecognized(line.to_string()));
        };
        let key = key.trim();

        let Some(source_index) = parse_rule_id(key) else {
            return self.report(WarningKind::MalformedRuleId(key.to_string()));
        };
        let available = self.neighborhoods.len();
        if source_index == 0 || source_index > available {
            return self.report(WarningKind::UndefinedNeighborhood { found: source_index, available });
        }
        let neighborhood = source_index - 1;

        let fields: Vec<&str> = values.split_whitespace().collect();
        let rule = match fields.as_slice() {
            [min, max, state] => {
                let min = self.number("min", min)?;
                let max = self.number("max", max)?;
                let next_state = self.state(state)?;
                if max == 0 {
                    Rule::unbounded(neighborhood, min, next_state)
                } else {
                    if max < min {
                        self.report(WarningKind::EmptyInterval { min, max })?;
                    }
                    Rule::bounded(neighborhood, min, max, next_state)
                }
            }
            [min, state] => {
                let min = self.number("min", min)?;
                let next_state = self.state(state)?;
                Rule::unbounded(neighborhood, min, next_state)
            }
            other => return self.report(WarningKind::FieldCount(other.len())),
        };

        self.rules.push(rule);
        Ok(())
    }

    fn number(&mut self, field: &'static str, text: &str) -> Result<u32, RuleSpecError> {
        match text.parse() {
            Ok(value) => Ok(value),
            Err(_) => {
                self.report(WarningKind::InvalidNumber { field, value: text.to_string() })?;
                Ok(0)
            }
        }
    }

    fn state(&mut self, text: &str) -> Result<bool, RuleSpecError> {
        match text {
            "0" => Ok(false),
            "1" => Ok(true),
            other => {
                self.report(WarningKind::InvalidNumber { field: "state", value: other.to_string() })?;
                Ok(false)
            }
        }
    }

    fn finish(self) -> Result<ParseOutcome, RuleSpecError> {
        if self.section == Section::Neighborhoods {
            log::warn!("rule file has no {} section, no rules loaded", RULE_MARKER);
        }
        Ok(ParseOutcome {
            rules: EvolutionRules::new(self.neighborhoods, self.rules)?,
            warnings: self.warnings,
        })
    }
}

/// `[N<id> <row>]`
fn parse_header(line: &str) -> Option<(usize, usize)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let mut parts = inner.split_whitespace();
    let id = parse_tagged(parts.next()?, 'N')?;
    let row = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((id, row))
}

/// `N<id> <col>=<bit>`, bit left unparsed
fn parse_bit(line: &str) -> Option<(usize, usize, &str)> {
    let (lhs, bit) = line.split_once('=')?;
    let mut parts = lhs.split_whitespace();
    let id = parse_tagged(parts.next()?, 'N')?;
    let col = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((id, col, bit.trim()))
}

/// `S<digits>`, 1-based as written in the file
fn parse_rule_id(key: &str) -> Option<usize> {
    parse_tagged(key, 'S')
}

fn parse_tagged(token: &str, tag: char) -> Option<usize> {
    let digits = token.strip_prefix(tag)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Interval;
    use std::fmt::Write as _;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    /// Render a full 31x31 bitmap section for neighborhood `id`
    fn bitmap(id: usize, alive: impl Fn(usize, usize) -> bool) -> String {
        let mut out = String::new();
        for row in 0..WINDOW_SIZE {
            writeln!(out, "[N{id} {row}]").unwrap();
            for col in 0..WINDOW_SIZE {
                writeln!(out, "N{id} {col}={}", u8::from(alive(row, col))).unwrap();
            }
        }
        out
    }

    fn plus(id: usize) -> String {
        format!("[N{id} 14]\nN{id} 15=1\n[N{id} 15]\nN{id} 14=1\nN{id} 16=1\n[N{id} 16]\nN{id} 15=1\n")
    }

    fn permissive(source: &str) -> ParseOutcome {
        RuleSpecParser::default().parse(source).unwrap()
    }

    #[test]
    fn test_full_window_excludes_center() {
        let source = format!("{}[Rule]\n", bitmap(1, |_, _| true));
        let outcome = permissive(&source);

        let nb = &outcome.rules.neighborhoods()[0];
        assert_eq!(nb.size(), 31 * 31 - 1);
        assert!(!nb.members().contains(&Coordinate::ORIGIN));
        assert_eq!(nb.reach(), 15);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_offsets_relative_to_center() {
        let outcome = permissive(&format!("{}[Rule]\n", plus(1)));
        let members = outcome.rules.neighborhoods()[0].members();
        assert_eq!(
            members,
            &[
                Coordinate::new(0, -1),
                Coordinate::new(-1, 0),
                Coordinate::new(1, 0),
                Coordinate::new(0, 1),
            ]
        );
    }

    #[test]
    fn test_multiple_neighborhoods_dense_ids() {
        let source = format!(
            "{}{}[Rule]\nS2=1 1\n",
            bitmap(1, |row, col| row == 0 && col == 0),
            plus(2)
        );
        let outcome = permissive(&source);
        let nbs = outcome.rules.neighborhoods();

        assert_eq!(nbs.len(), 2);
        assert_eq!(nbs[0].id(), 0);
        assert_eq!(nbs[0].members(), &[Coordinate::new(-15, -15)]);
        assert_eq!(nbs[1].id(), 1);
        assert_eq!(nbs[1].size(), 4);
        assert_eq!(outcome.rules.rules()[0].neighborhood, 1);
    }

    #[test]
    fn test_rule_shapes() {
        let source = format!("{}[Rule]\nS1=2 3 1\nS1=4 0 0\nS1=3 1\n", plus(1));
        let rules = permissive(&source).rules;

        assert_eq!(
            rules.rules(),
            &[
                Rule::bounded(0, 2, 3, true),
                Rule::unbounded(0, 4, false),
                Rule::unbounded(0, 3, true),
            ]
        );
    }

    #[test]
    fn test_rule_order_preserved() {
        let source = format!("{}[Rule]\nS1=0 8 1\nS1=3 4 0\nS1=1 2 1\n", plus(1));
        let mins: Vec<u32> = permissive(&source)
            .rules
            .rules()
            .iter()
            .map(|r| r.interval.min())
            .collect();
        assert_eq!(mins, vec![0, 3, 1]);
    }

    #[test]
    fn test_invalid_bit_is_skipped() {
        let source = "[N1 15]\nN1 16=x\nN1 14=1\n[Rule]\n";
        let outcome = permissive(source);

        assert_eq!(outcome.rules.neighborhoods()[0].members(), &[Coordinate::new(-1, 0)]);
        assert_eq!(
            outcome.warnings,
            vec![ParseWarning { line: 2, kind: WarningKind::InvalidBit("x".into()) }]
        );
    }

    #[test]
    fn test_malformed_rule_id_is_skipped() {
        let source = format!("{}[Rule]\nB1=2 3 1\nS=1 1\nSx=1 1\nS1=2 1\n", plus(1));
        let outcome = permissive(&source);

        assert_eq!(outcome.rules.rules(), &[Rule::unbounded(0, 2, true)]);
        assert_eq!(outcome.warnings.len(), 3);
        assert!(outcome
            .warnings
            .iter()
            .all(|w| matches!(w.kind, WarningKind::MalformedRuleId(_))));
    }

    #[test]
    fn test_bad_numbers_default_to_zero() {
        let source = format!("{}[Rule]\nS1=abc 3 1\n", plus(1));
        let outcome = permissive(&source);

        assert_eq!(outcome.rules.rules(), &[Rule::bounded(0, 0, 3, true)]);
        assert_eq!(
            outcome.warnings[0].kind,
            WarningKind::InvalidNumber { field: "min", value: "abc".into() }
        );
    }

    #[test]
    fn test_rule_for_missing_neighborhood_is_skipped() {
        let source = format!("{}[Rule]\nS2=1 1\nS0=1 1\n", plus(1));
        let outcome = permissive(&source);

        assert!(outcome.rules.rules().is_empty());
        assert_eq!(
            outcome.warnings[0].kind,
            WarningKind::UndefinedNeighborhood { found: 2, available: 1 }
        );
    }

    #[test]
    fn test_wrong_field_count() {
        let source = format!("{}[Rule]\nS1=1\nS1=1 2 3 4\n", plus(1));
        let outcome = permissive(&source);

        assert!(outcome.rules.rules().is_empty());
        assert_eq!(outcome.warnings[0].kind, WarningKind::FieldCount(1));
        assert_eq!(outcome.warnings[1].kind, WarningKind::FieldCount(4));
    }

    #[test]
    fn test_non_dense_id_dropped() {
        let source = "[N2 15]\nN2 16=1\n[N1 15]\nN1 16=1\n[Rule]\n";
        let outcome = permissive(source);

        assert_eq!(outcome.rules.neighborhoods().len(), 1);
        assert_eq!(
            outcome.warnings[0].kind,
            WarningKind::NonDenseNeighborhood { found: 2, expected: 1 }
        );
        assert_eq!(outcome.warnings[1].kind, WarningKind::MissingRowHeader);
    }

    #[test]
    fn test_window_bounds() {
        let source = "[N1 31]\n[N1 15]\nN1 31=1\n[Rule]\n";
        let outcome = permissive(source);

        assert!(outcome.rules.neighborhoods()[0].is_empty());
        assert_eq!(outcome.warnings.len(), 2);
    }

    #[test]
    fn test_comments_blank_lines_and_crlf() {
        let source = "# ring\r\n\r\n[N1 15]\r\nN1 16=1\r\n; rules follow\r\n[Rule]\r\nS1=1 1\r\n";
        let outcome = permissive(source);

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.rules.neighborhoods()[0].size(), 1);
        assert_eq!(outcome.rules.rules().len(), 1);
    }

    #[test]
    fn test_rule_section_is_permanent() {
        let source = "[N1 15]\nN1 16=1\n[Rule]\n[N1 15]\nN1 14=1\nS1=1 1\n";
        let outcome = permissive(source);

        assert_eq!(outcome.rules.neighborhoods()[0].size(), 1);
        assert_eq!(outcome.rules.rules().len(), 1);
        assert_eq!(outcome.warnings.len(), 2);
    }

    #[test]
    fn test_empty_interval_kept_with_warning() {
        let source = format!("{}[Rule]\nS1=5 2 1\n", plus(1));
        let outcome = permissive(&source);

        assert_eq!(outcome.rules.rules()[0].interval, Interval::Bounded { min: 5, max: 2 });
        assert_eq!(outcome.warnings[0].kind, WarningKind::EmptyInterval { min: 5, max: 2 });
    }

    #[test]
    fn test_strict_mode_fails_on_first_problem() {
        let source = format!("{}[Rule]\nS1=2 3 1\nS1=two 1\n", plus(1));
        let err = RuleSpecParser::new(ParseMode::Strict).parse(&source).unwrap_err();

        match err {
            RuleSpecError::Malformed { line, kind } => {
                assert_eq!(line, 10);
                assert_eq!(kind, WarningKind::InvalidNumber { field: "min", value: "two".into() });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_mode_accepts_clean_file() {
        let source = format!("{}[Rule]\nS1=2 3 1\n", plus(1));
        let outcome = RuleSpecParser::new(ParseMode::Strict).parse(&source).unwrap();
        assert_eq!(outcome.rules.rules().len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}[Rule]\nS1=2 3 1\n", plus(1)).unwrap();

        let rules = load_rules(file.path(), ParseMode::Permissive).unwrap();
        assert_eq!(rules.neighborhoods()[0].size(), 4);
        assert_eq!(rules.rules(), &[Rule::bounded(0, 2, 3, true)]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rules(dir.path().join("absent.txt"), ParseMode::Permissive).unwrap_err();
        assert!(matches!(err, RuleSpecError::Io { .. }));
        assert!(err.to_string().contains("absent.txt"));
    }
}
