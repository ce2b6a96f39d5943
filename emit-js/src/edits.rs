use parse_js::loc::Loc;

/// Source ranges whose syntax was replaced after parsing. A node containing any of them can no
/// longer be copied from the source and is printed from its syntax instead.
#[derive(Clone, Debug, Default)]
pub struct EditSet {
  // Sorted by start, then end; duplicates are not stored.
  locs: Vec<Loc>,
}

impl EditSet {
  pub fn new() -> EditSet {
    EditSet::default()
  }

  pub fn record(&mut self, loc: Loc) {
    let key = (loc.0, loc.1);
    if let Err(pos) = self.locs.binary_search_by_key(&key, |l| (l.0, l.1)) {
      self.locs.insert(pos, loc);
    };
  }

  /// Whether some recorded edit lies within `loc`.
  pub fn is_edited(&self, loc: Loc) -> bool {
    let start = self.locs.partition_point(|l| l.0 < loc.0);
    self.locs[start..]
      .iter()
      .take_while(|l| l.0 <= loc.1)
      .any(|l| l.1 <= loc.1)
  }

  pub fn len(&self) -> usize {
    self.locs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.locs.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = Loc> + '_ {
    self.locs.iter().copied()
  }
}

#[cfg(test)]
mod tests {
  use super::EditSet;
  use parse_js::loc::Loc;

  #[test]
  fn edits_are_found_inside_enclosing_ranges() {
    let mut edits = EditSet::new();
    edits.record(Loc(10, 20));
    edits.record(Loc(2, 4));
    edits.record(Loc(10, 20));
    assert_eq!(edits.len(), 2);
    assert!(edits.is_edited(Loc(0, 30)));
    assert!(edits.is_edited(Loc(10, 20)));
    assert!(edits.is_edited(Loc(2, 5)));
    assert!(!edits.is_edited(Loc(11, 20)));
    assert!(!edits.is_edited(Loc(5, 9)));
    assert!(!edits.is_edited(Loc(15, 40)));
  }
}
