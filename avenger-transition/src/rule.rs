use serde::{Deserialize, Serialize};

/// One primitive, costed kind of change between two specifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRule {
    pub name: String,
    pub cost: f64,
}

impl TransitionRule {
    pub fn new(name: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            cost,
        }
    }
}

/// All transitions between two specifications, grouped by the axis they change.
/// An empty group means no change was detected along that axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionSet {
    pub marktype: Vec<TransitionRule>,
    pub transform: Vec<TransitionRule>,
    pub encoding: Vec<TransitionRule>,
}

fn total(rules: &[TransitionRule]) -> f64 {
    rules.iter().map(|rule| rule.cost).sum()
}

impl TransitionSet {
    pub fn is_empty(&self) -> bool {
        self.marktype.is_empty() && self.transform.is_empty() && self.encoding.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marktype.len() + self.transform.len() + self.encoding.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitionRule> {
        self.marktype
            .iter()
            .chain(self.transform.iter())
            .chain(self.encoding.iter())
    }

    pub fn marktype_cost(&self) -> f64 {
        total(&self.marktype)
    }

    pub fn transform_cost(&self) -> f64 {
        total(&self.transform)
    }

    pub fn encoding_cost(&self) -> f64 {
        total(&self.encoding)
    }

    /// Sum of the costs of every rule in the set
    pub fn cost(&self) -> f64 {
        self.marktype_cost() + self.transform_cost() + self.encoding_cost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_transition_set_cost() {
        let set = TransitionSet {
            marktype: vec![TransitionRule::new("AREA_POINT", 0.04)],
            transform: vec![
                TransitionRule::new("SCALE", 0.6),
                TransitionRule::new("FILTER", 0.65),
            ],
            encoding: vec![],
        };
        assert!(!set.is_empty());
        assert_eq!(set.len(), 3);
        assert_approx_eq!(f64, set.transform_cost(), 1.25, epsilon = 1e-9);
        assert_approx_eq!(f64, set.encoding_cost(), 0.0);
        assert_approx_eq!(f64, set.cost(), 1.29, epsilon = 1e-9);
        assert_eq!(
            set.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["AREA_POINT", "SCALE", "FILTER"]
        );
        assert!(TransitionSet::default().is_empty());
    }
}
