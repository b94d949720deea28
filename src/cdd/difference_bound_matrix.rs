use crate::ta::clock::Clock;
use crate::ta::clock_constraint::clause::{Clause, ClockComparator};
use std::cmp;

const UNBOUNDED_ENTRY: i32 = i32::MAX;

/// Efficient representation of clock constraints.
/// See "Timed Automata: Semantics, Algorithms and Tools" by Bengtsson and Yi for more information
/// on DBMs.
///
/// A DBM only knows clock positions. The owner keeps the sorted list of clocks ("universe") that
/// maps position `i + 1` to the `i`-th clock.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash)]
pub struct DifferenceBoundMatrix {
    // Implementation details:
    // - see "Timed Automata: Semantics, Algorithms and Tools" by Bengtsson and Yi for more
    //   explanations of the encoding details
    // - for efficiency reasons, the two-dimensional matrix is stored in a one-dimensional vector
    // - entries are accessed as follows: entry(row,column) = row * size + column, where size is the
    //   number of rows/columns (e.g., 3 for a 3x3 matrix)
    // - unbounded entries (infinity) are stored as i32::MAX
    // - strictness of the bound of an entry is stored in the least significant bit of an entry
    // - strict bounds (i.e., "<") are stored as an unset bit (i.e., 0)
    // - non-strict bounds (i.e., "<=") are stored as a set bit (i.e., 1)
    // - due to the strictness encoding, the numeric value of the entry is shifted by one bit
    entries: Vec<i32>,
    size: usize,
}

impl DifferenceBoundMatrix {
    /// Constructs the canonical DBM in which every clock is non-negative and nothing else is
    /// constrained.
    pub fn unconstrained(number_of_clocks: usize) -> DifferenceBoundMatrix {
        let size = number_of_clocks + 1; // + 1 for reference clock "zero"
        let leq_0 = encode_dbm_entry(0, ClockComparator::LEQ);
        let mut entries = vec![UNBOUNDED_ENTRY; size * size];
        for i in 0..size {
            entries[i] = leq_0; // row of clock "zero": 0 - x <= 0
            entries[i * size + i] = leq_0;
        }
        DifferenceBoundMatrix { entries, size }
    }

    pub fn number_of_clocks(&self) -> usize {
        self.size - 1
    }

    /// Returns the entry at `(row, column)` where the top left element of the matrix has index
    /// `(0,0)`.
    ///
    /// # Panics
    /// Panics in case of an out-of-bounds access.
    fn get(&self, row: usize, column: usize) -> i32 {
        if row > self.size - 1 || column > self.size - 1 {
            panic!(
                "Tried to get entry ({}, {}) in a matrix with dimensions {} x {}",
                row, column, self.size, self.size
            );
        }
        let translated_pos = row * self.size + column;
        match self.entries.get(translated_pos) {
            Some(entry) => *entry,
            None => panic!(
                "Tried to access entry ({}, {}) at translated position {} in vector of size {}",
                row,
                column,
                translated_pos,
                self.entries.len()
            ),
        }
    }

    /// Sets the entry at `(row, column)` where the top left element of the matrix has index
    /// `(0,0)`.
    ///
    /// # Panics
    /// Panics in case of an out-of-bounds access.
    fn set(&mut self, row: usize, column: usize, val: i32) {
        if row > self.size - 1 || column > self.size - 1 {
            panic!(
                "Tried to set entry ({}, {}) in a matrix with dimensions {} x {}",
                row, column, self.size, self.size
            );
        }

        let translated_pos = row * self.size + column;
        self.entries[translated_pos] = val;
    }

    /// Applies the `and` operator with the provided clause to the DBM. The resulting DBM is
    /// canonical if the input DBM was canonical.
    ///
    /// # None Return
    /// This method returns `None` if and only if the resulting DBM would be unsatisfiable.
    ///
    /// # Panics
    /// Panics if a clock of the clause is not contained in `universe`.
    pub fn and_clause(&mut self, clause: &Clause, universe: &[Clock]) -> Option<()> {
        let lhs_pos = find_clock_pos_in_dbm(clause.lhs(), universe);
        let rhs_pos = match clause.rhs() {
            Some(rhs) => find_clock_pos_in_dbm(rhs, universe),
            None => 0,
        };

        if lhs_pos == rhs_pos {
            // x - x ~ c does not depend on the value of x
            let holds = match clause.op() {
                ClockComparator::LESSER => 0 < clause.bound(),
                ClockComparator::LEQ => 0 <= clause.bound(),
                ClockComparator::GEQ => 0 >= clause.bound(),
                ClockComparator::GREATER => 0 > clause.bound(),
            };
            return if holds { Some(()) } else { None };
        }

        // DBMs only have < and <= in entries, i.e., > and >= need to be "translated"
        let (row, column, encoded_value) = match clause.op() {
            ClockComparator::GEQ => (
                rhs_pos,
                lhs_pos,
                encode_dbm_entry(clause.bound().saturating_neg(), ClockComparator::LEQ),
            ),
            ClockComparator::GREATER => (
                rhs_pos,
                lhs_pos,
                encode_dbm_entry(clause.bound().saturating_neg(), ClockComparator::LESSER),
            ),
            op => (lhs_pos, rhs_pos, encode_dbm_entry(clause.bound(), op)),
        };

        self.and_entry(row, column, encoded_value)
    }

    /// Tightens entry `(row, column)` to `encoded_value` and restores the canonical form. For more
    /// information, see Algorithm 8 of "Timed Automata: Semantics, Algorithms and Tools" by
    /// Bengtsson and Yi.
    ///
    /// # None Return
    /// This method returns `None` if and only if the resulting DBM would be unsatisfiable.
    fn and_entry(&mut self, row: usize, column: usize, encoded_value: i32) -> Option<()> {
        // check satisfiability
        // NOTE: Algorithm 8 in paper says "<", but "<=" is correct in next line
        if add_encoded_dbm_entries(self.get(column, row), encoded_value) <= 0 {
            self.set(0, 0, encode_dbm_entry(-1, ClockComparator::LEQ));
            return None;
        }

        // if current clause is less strict -> do nothing
        if encoded_value >= self.get(row, column) {
            return Some(());
        }

        // set new value and compute canonical form
        self.set(row, column, encoded_value);
        for i in 0..self.size {
            for j in 0..self.size {
                let d_ix = self.get(i, row);
                let d_xj = self.get(row, j);
                let d_ix_plus_d_xj = add_encoded_dbm_entries(d_ix, d_xj);
                if d_ix_plus_d_xj < self.get(i, j) {
                    self.set(i, j, d_ix_plus_d_xj);
                }
                let d_iy = self.get(i, column);
                let d_yj = self.get(column, j);
                let d_iy_plus_d_yj = add_encoded_dbm_entries(d_iy, d_yj);
                if d_iy_plus_d_yj < self.get(i, j) {
                    self.set(i, j, d_iy_plus_d_yj);
                }
            }
        }

        panic_if_clock_diffs_to_self(self);
        Some(())
    }

    /// Intersects the DBM with another DBM over the same clocks.
    ///
    /// # None Return
    /// This method returns `None` if and only if the intersection is empty.
    ///
    /// # Panics
    /// Panics if both DBMs have different dimensions.
    pub fn intersect(&mut self, other: &DifferenceBoundMatrix) -> Option<()> {
        if self.size != other.size {
            panic!(
                "Tried to intersect DBMs with dimensions {} x {} and {} x {}",
                self.size, self.size, other.size, other.size
            );
        }

        for i in 0..self.size {
            for j in 0..self.size {
                let d_ij = other.get(i, j);
                if i != j && d_ij != UNBOUNDED_ENTRY {
                    self.and_entry(i, j, d_ij)?;
                }
            }
        }
        Some(())
    }

    /// Embeds the DBM into a larger set of clocks. `positions[i]` is the position of the DBM's
    /// clock `i + 1` in the result. Clocks not hit by `positions` are unconstrained.
    pub fn extended(&self, positions: &[usize], number_of_clocks: usize) -> DifferenceBoundMatrix {
        let position = |i: usize| if i == 0 { 0 } else { positions[i - 1] };

        let mut result = DifferenceBoundMatrix::unconstrained(number_of_clocks);
        for i in 0..self.size {
            for j in 0..self.size {
                result.set(position(i), position(j), self.get(i, j));
            }
        }
        result.close();

        panic_if_clock_diffs_to_self(&result);
        result
    }

    /// Projects the DBM onto the clocks at `kept_positions` (in the given order). Projecting a
    /// canonical DBM yields a canonical DBM describing exactly the projected zone.
    pub fn projected(&self, kept_positions: &[usize]) -> DifferenceBoundMatrix {
        let mut old_positions = Vec::with_capacity(kept_positions.len() + 1);
        old_positions.push(0);
        old_positions.extend_from_slice(kept_positions);

        let size = old_positions.len();
        let mut entries = Vec::with_capacity(size * size);
        for &i in &old_positions {
            for &j in &old_positions {
                entries.push(self.get(i, j));
            }
        }
        DifferenceBoundMatrix { entries, size }
    }

    /// Returns whether the clock at `pos` is only constrained to be non-negative.
    pub fn is_free(&self, pos: usize) -> bool {
        let leq_0_enc = encode_dbm_entry(0, ClockComparator::LEQ);
        if self.get(pos, 0) != UNBOUNDED_ENTRY || self.get(0, pos) != leq_0_enc {
            return false;
        }
        (1..self.size)
            .filter(|&j| j != pos)
            .all(|j| self.get(pos, j) == UNBOUNDED_ENTRY && self.get(j, pos) == self.get(j, 0))
    }

    /// Returns whether the zone of `other` is a subset of the zone of `self`. Both DBMs have to be
    /// canonical and of the same dimensions.
    pub fn includes(&self, other: &DifferenceBoundMatrix) -> bool {
        self.size == other.size
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(mine, theirs)| mine >= theirs)
    }

    /// Returns whether the clock values satisfy all bounds. `values[i]` is the value of the clock
    /// at position `i`, so `values[0]` has to be `0`.
    pub fn contains(&self, values: &[f64]) -> bool {
        for i in 0..self.size {
            for j in 0..self.size {
                let d_ij = self.get(i, j);
                if i == j || d_ij == UNBOUNDED_ENTRY {
                    continue;
                }
                let (val, comp) = decode_dbm_entry(d_ij);
                let diff = values[i] - values[j];
                let satisfied = match comp {
                    ClockComparator::LESSER => diff < val as f64,
                    _ => diff <= val as f64,
                };
                if !satisfied {
                    return false;
                }
            }
        }
        true
    }

    /// Translates the DBM back into clauses. Bounds that are implied by the non-negativity of
    /// clocks or by the bounds of single clocks are left out.
    pub fn clauses(&self, universe: &[Clock]) -> Vec<Clause> {
        let leq_0_enc = encode_dbm_entry(0, ClockComparator::LEQ);
        let mut clauses = Vec::new();

        for i in 0..self.size {
            for j in 0..self.size {
                let d_ij = self.get(i, j);
                if i == j || d_ij == UNBOUNDED_ENTRY {
                    continue;
                }
                let (val, comp) = decode_dbm_entry(d_ij);
                if i == 0 {
                    if d_ij == leq_0_enc {
                        continue;
                    }
                    let lower_comp = match comp {
                        ClockComparator::LESSER => ClockComparator::GREATER,
                        _ => ClockComparator::GEQ,
                    };
                    clauses.push(Clause::new(&universe[j - 1], lower_comp, -val));
                } else if j == 0 {
                    clauses.push(Clause::new(&universe[i - 1], comp, val));
                } else if d_ij != add_encoded_dbm_entries(self.get(i, 0), self.get(0, j)) {
                    clauses.push(Clause::difference(
                        &universe[i - 1],
                        &universe[j - 1],
                        comp,
                        val,
                    ));
                }
            }
        }

        clauses
    }

    /// Computes the canonical version of a DBM by using Floyd's algorithm for shortest paths. For
    /// more information, see Algorithm 2 of "Timed Automata: Semantics, Algorithms and Tools" by
    /// Bengtsson and Yi.
    fn close(&mut self) {
        for k in 0..self.size {
            for i in 0..self.size {
                for j in 0..self.size {
                    let d_ij = self.get(i, j);
                    let d_ik = self.get(i, k);
                    let d_kj = self.get(k, j);
                    self.set(i, j, cmp::min(d_ij, add_encoded_dbm_entries(d_ik, d_kj)));
                }
            }
        }
    }
}

/// Encodes a DBM entry into an efficient representation. See "Timed Automata: Semantics,
/// Algorithms and Tools" by Bengtsson and Yi for details.
///
/// Bounds beyond the encodable range saturate: too large bounds become unbounded, too small
/// bounds become the smallest entry.
fn encode_dbm_entry(val: i32, clock_comparator: ClockComparator) -> i32 {
    let strictness = match clock_comparator {
        ClockComparator::LESSER => 0,
        ClockComparator::LEQ => 1,
        ClockComparator::GEQ => {
            panic!("Tried to encode comparator >= into DBM entry, but only < and <= allowed")
        }
        ClockComparator::GREATER => {
            panic!("Tried to encode comparator > into DBM entry, but only < and <= allowed")
        }
    };
    saturate_dbm_entry((i64::from(val) << 1) + strictness)
}

fn decode_dbm_entry(encoded_entry: i32) -> (i32, ClockComparator) {
    let comparator = if encoded_entry & 1 == 1 {
        ClockComparator::LEQ
    } else {
        ClockComparator::LESSER
    };
    (encoded_entry >> 1, comparator)
}

/// Performs addition of encoded DBM entries directly on the encoding. See "Timed Automata:
/// Semantics, Algorithms and Tools" by Bengtsson and Yi for details.
fn add_encoded_dbm_entries(first: i32, second: i32) -> i32 {
    // See Algorithm 17 in "Timed Automata: Semantics, Algorithms and Tools" by Bengtsson and Yi
    if first == UNBOUNDED_ENTRY || second == UNBOUNDED_ENTRY {
        return UNBOUNDED_ENTRY;
    }
    let sum = i64::from(first) + i64::from(second) - i64::from((first & 1) | (second & 1));
    saturate_dbm_entry(sum)
}

fn saturate_dbm_entry(entry: i64) -> i32 {
    if entry >= i64::from(UNBOUNDED_ENTRY) {
        UNBOUNDED_ENTRY
    } else {
        entry.max(i64::from(i32::MIN)) as i32
    }
}

fn find_clock_pos_in_dbm(clock: &Clock, universe: &[Clock]) -> usize {
    match universe.binary_search(clock) {
        Ok(i) => i + 1, // + 1 because of special clock "zero" in DBMs
        Err(_) => panic!("Clock {clock} not contained in {universe:?}"),
    }
}

/// Panics if the difference of any clock to itself (i.e., all entries `(i, i)`) is not `(0, <=)`.
fn panic_if_clock_diffs_to_self(dbm: &DifferenceBoundMatrix) {
    let leq_0_enc = encode_dbm_entry(0, ClockComparator::LEQ);
    for i in 0..dbm.size {
        if dbm.get(i, i) != leq_0_enc {
            let (val, comp) = decode_dbm_entry(dbm.get(i, i));
            panic!(
                "Entry at ({i}, {i}) should be (0, <=), but entry is ({val}, {})",
                comp.symbol()
            );
        }
    }
}
