/// One attacker swinging one of its attacks at a particular defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub attacker: usize,
    pub attack: usize,
}

/// What one attacker decided this half-round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pick {
    /// `None` when the attacker sits this one out.
    pub attack: Option<usize>,
    pub targets: Vec<usize>,
}

impl Pick {
    pub fn pass() -> Self {
        Self::default()
    }
}

/// Per-defender buckets of who is attacking it and with what.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    buckets: Vec<Vec<Assignment>>,
}

impl Assignments {
    pub fn with_defenders(defenders: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); defenders],
        }
    }

    pub fn defenders(&self) -> usize {
        self.buckets.len()
    }

    pub fn for_defender(&self, defender: usize) -> &[Assignment] {
        self.buckets.get(defender).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Assignment])> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(defender, bucket)| (defender, bucket.as_slice()))
    }

    /// No defender has anyone coming at it.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    fn reset(&mut self, defenders: usize) {
        self.buckets.resize_with(defenders, Vec::new);
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }
}

/// Transposes attacker picks into per-defender assignments.
///
/// `out` is cleared first and sized to `defenders`. Attackers without an
/// attack or without targets are skipped, as are out-of-range defender indices.
pub fn assign_attackers(out: &mut Assignments, picks: &[Pick], defenders: usize) {
    out.reset(defenders);

    for (attacker, pick) in picks.iter().enumerate() {
        let Some(attack) = pick.attack else {
            continue;
        };
        for &defender in &pick.targets {
            if let Some(bucket) = out.buckets.get_mut(defender) {
                bucket.push(Assignment { attacker, attack });
            }
        }
    }
}
