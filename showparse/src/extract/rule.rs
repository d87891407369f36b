//! Ordered line rules and the classification loop.

use std::fmt;

use log::trace;
use regex::Regex;

use super::coerce::Fields;
use crate::error::ParserError;
use crate::record::Record;

/// Writes the fields of one matched line into the record and context.
pub type Apply<C> = fn(&Fields<'_, '_>, &mut C, &mut Record);

/// Decides whether a rule is eligible in the current context.
pub type Guard<C> = fn(&C) -> bool;

/// A line pattern paired with the handler that consumes matching lines.
pub struct Rule<C> {
    name: &'static str,
    pattern: Regex,
    guard: Option<Guard<C>>,
    apply: Apply<C>,
}

impl<C> Rule<C> {
    /// Create a rule from a pattern string.
    pub fn new(name: &'static str, pattern: &str, apply: Apply<C>) -> Result<Self, ParserError> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            guard: None,
            apply,
        })
    }

    /// Only consider this rule while `guard` holds.
    pub fn when(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Try the rule against a line. Returns `true` if it consumed the line.
    fn try_apply(&self, line: &str, ctx: &mut C, record: &mut Record) -> bool {
        if let Some(guard) = self.guard {
            if !guard(ctx) {
                return false;
            }
        }
        match self.pattern.captures(line) {
            Some(caps) => {
                (self.apply)(&Fields::new(&caps), ctx, record);
                true
            }
            None => false,
        }
    }
}

impl<C> fmt::Debug for Rule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// Handler for lines that are recognized and then dropped (headers, rulers).
fn ignore<C>(_: &Fields<'_, '_>, _: &mut C, _: &mut Record) {}

/// An ordered rule table.
///
/// Rules are tried top to bottom and the first eligible rule whose pattern
/// matches consumes the line; later rules never see it. Lines no rule
/// matches are skipped.
pub struct RuleSet<C> {
    rules: Vec<Rule<C>>,
    trim_start: bool,
}

impl<C: Default> RuleSet<C> {
    /// Start building a rule table.
    pub fn builder() -> RuleSetBuilder<C> {
        RuleSetBuilder {
            rules: Vec::new(),
            trim_start: false,
            error: None,
        }
    }

    /// Run every line of `output` through the table.
    ///
    /// The context starts from `C::default()` and lives only for this call,
    /// so one table can serve any number of concurrent parses.
    pub fn extract(&self, output: &str) -> Record {
        let mut ctx = C::default();
        let mut record = Record::new();
        for line in output.lines() {
            self.classify(line, &mut ctx, &mut record);
        }
        record
    }

    /// Classify one line, returning the name of the rule that consumed it.
    pub fn classify(&self, line: &str, ctx: &mut C, record: &mut Record) -> Option<&'static str> {
        let line = line.trim_end();
        let line = if self.trim_start { line.trim_start() } else { line };

        for rule in &self.rules {
            if rule.try_apply(line, ctx, record) {
                trace!("{}: {:?}", rule.name, line);
                return Some(rule.name);
            }
        }
        if !line.is_empty() {
            trace!("unmatched: {:?}", line);
        }
        None
    }
}

impl<C> RuleSet<C> {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }
}

impl<C> fmt::Debug for RuleSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules)
            .field("trim_start", &self.trim_start)
            .finish()
    }
}

/// Builder for [`RuleSet`]. Keeps the first pattern error and reports it
/// from [`build`](RuleSetBuilder::build).
pub struct RuleSetBuilder<C> {
    rules: Vec<Rule<C>>,
    trim_start: bool,
    error: Option<ParserError>,
}

impl<C: Default> RuleSetBuilder<C> {
    fn push(mut self, rule: Result<Rule<C>, ParserError>) -> Self {
        match rule {
            Ok(rule) => self.rules.push(rule),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Add a rule.
    pub fn rule(self, name: &'static str, pattern: &str, apply: Apply<C>) -> Self {
        self.push(Rule::new(name, pattern, apply))
    }

    /// Add a rule that is only eligible while `guard` holds.
    pub fn rule_when(
        self,
        name: &'static str,
        pattern: &str,
        guard: Guard<C>,
        apply: Apply<C>,
    ) -> Self {
        self.push(Rule::new(name, pattern, apply).map(|r| r.when(guard)))
    }

    /// Add a rule that consumes matching lines without writing anything.
    pub fn skip(self, name: &'static str, pattern: &str) -> Self {
        self.push(Rule::new(name, pattern, ignore::<C>))
    }

    /// Strip leading whitespace as well as trailing whitespace from each line.
    pub fn trim_start(mut self) -> Self {
        self.trim_start = true;
        self
    }

    pub fn build(self) -> Result<RuleSet<C>, ParserError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(RuleSet {
                rules: self.rules,
                trim_start: self.trim_start,
            }),
        }
    }
}
