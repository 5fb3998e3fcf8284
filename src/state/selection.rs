// Circuit selection rules. Selections are indices into the current circuit
// sequence, so they can never point at a circuit outside of it.

use log::debug;

use crate::model::CircuitData;

/// First circuit, if any.
pub fn default_selection(circuits: &[CircuitData]) -> Option<usize> {
    if circuits.is_empty() { None } else { Some(0) }
}

/// Resolves `name` against `circuits` by exact match. An unknown name keeps
/// the `current` selection.
pub fn select(name: &str, circuits: &[CircuitData], current: Option<usize>) -> Option<usize> {
    match circuits.iter().position(|c| c.name == name) {
        Some(index) => Some(index),
        None => {
            debug!("Ignoring selection of unknown circuit '{}'", name);
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circuit(name: &str) -> CircuitData {
        CircuitData {
            name: name.to_string(),
            location: "Somewhere".to_string(),
            length: "5.000km".to_string(),
            track_map_url: None,
            records: Vec::new(),
            history: Vec::new(),
        }
    }

    #[test]
    fn test_default_selection() {
        assert_eq!(default_selection(&[]), None);
        assert_eq!(default_selection(&[circuit("Monza"), circuit("Spa")]), Some(0));
    }

    #[test]
    fn test_select_is_case_sensitive() {
        let circuits = vec![circuit("Monza"), circuit("Spa")];
        assert_eq!(select("spa", &circuits, Some(0)), Some(0));
        assert_eq!(select("Spa", &circuits, Some(0)), Some(1));
    }

    #[test]
    fn test_select_picks_first_duplicate() {
        let circuits = vec![circuit("Monza"), circuit("Spa"), circuit("Spa")];
        assert_eq!(select("Spa", &circuits, None), Some(1));
    }

    #[test]
    fn test_select_on_empty_circuits_keeps_none() {
        assert_eq!(select("Monza", &[], None), None);
    }

    fn circuit_names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[A-Z][a-z]{2,8}", 0..8)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_unknown_name_is_a_no_op(
            names in circuit_names(),
            current in prop::option::of(0usize..8),
        ) {
            let circuits: Vec<CircuitData> = names.iter().map(|n| circuit(n)).collect();
            let current = current.filter(|i| *i < circuits.len());
            // digits never appear in generated names
            prop_assert_eq!(select("Nowhere 0", &circuits, current), current);
        }

        #[test]
        fn prop_known_name_selects_matching_circuit(
            names in circuit_names().prop_filter("non empty", |n| !n.is_empty()),
            pick in any::<prop::sample::Index>(),
        ) {
            let circuits: Vec<CircuitData> = names.iter().map(|n| circuit(n)).collect();
            let wanted = &names[pick.index(names.len())];
            let selected = select(wanted, &circuits, None);
            prop_assert!(selected.is_some());
            prop_assert_eq!(&circuits[selected.unwrap()].name, wanted);
        }

        #[test]
        fn prop_default_selection_is_first(names in circuit_names()) {
            let circuits: Vec<CircuitData> = names.iter().map(|n| circuit(n)).collect();
            let expected = if circuits.is_empty() { None } else { Some(0) };
            prop_assert_eq!(default_selection(&circuits), expected);
        }
    }
}
