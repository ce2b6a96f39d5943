use crate::options::Rule;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RuleCounts {
  pub applied: usize,
  pub skipped: usize,
}

/// How often each rule fired or gave up, summed over all passes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RewriteStats {
  pub passes: usize,
  pub rules: BTreeMap<Rule, RuleCounts>,
}

impl RewriteStats {
  pub fn applied(&self, rule: Rule) -> usize {
    self.rules.get(&rule).map_or(0, |c| c.applied)
  }

  pub fn skipped(&self, rule: Rule) -> usize {
    self.rules.get(&rule).map_or(0, |c| c.skipped)
  }

  pub fn total_applied(&self) -> usize {
    self.rules.values().map(|c| c.applied).sum()
  }

  pub(crate) fn record_applied(&mut self, rule: Rule) {
    self.rules.entry(rule).or_default().applied += 1;
  }

  pub(crate) fn record_skipped(&mut self, rule: Rule) {
    self.rules.entry(rule).or_default().skipped += 1;
  }

  pub(crate) fn merge(&mut self, other: RewriteStats) {
    self.passes += other.passes;
    for (rule, counts) in other.rules {
      let entry = self.rules.entry(rule).or_default();
      entry.applied += counts.applied;
      entry.skipped += counts.skipped;
    }
  }
}
