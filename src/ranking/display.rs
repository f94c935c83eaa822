//! Display order of an entity's own tiers.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::models::{tier_value, Entity, EntityKind, TierAssignment, TierTable};

/// Order a player's tiers: active first, then retired, then unknown.
///
/// Within each group tiers are listed by fighter points, highest first.
/// Equal keys keep their stored order.
pub fn order_for_display<'a>(
    tiers: &'a [TierAssignment],
    retired: &BTreeSet<String>,
) -> Vec<&'a TierAssignment> {
    let mut ordered: Vec<&TierAssignment> = tiers.iter().collect();
    ordered.sort_by_key(|a| {
        let missing = a.tier.is_none();
        let is_retired = !missing && retired.contains(&a.subject);
        (
            missing,
            is_retired,
            Reverse(tier_value(a.tier, TierTable::Fighter)),
        )
    });
    ordered
}

/// Order a builder's tiers by builder points, unknown last.
pub fn order_builder_tiers(tiers: &[TierAssignment]) -> Vec<&TierAssignment> {
    let mut ordered: Vec<&TierAssignment> = tiers.iter().collect();
    ordered.sort_by_key(|a| {
        (
            a.tier.is_none(),
            Reverse(tier_value(a.tier, TierTable::Builder)),
        )
    });
    ordered
}

/// Display order for any entity, picking the rule for its kind.
pub fn ordered_tiers(entity: &Entity) -> Vec<&TierAssignment> {
    match entity.kind {
        EntityKind::Player => order_for_display(&entity.tiers, &entity.retired),
        EntityKind::Builder => order_builder_tiers(&entity.tiers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TierLabel;
    use pretty_assertions::assert_eq;

    fn tiers(pairs: &[(&str, &str)]) -> Vec<TierAssignment> {
        pairs
            .iter()
            .map(|(s, t)| TierAssignment::new(*s, TierLabel::parse(t)))
            .collect()
    }

    fn subjects(ordered: &[&TierAssignment]) -> Vec<String> {
        ordered.iter().map(|a| a.subject.clone()).collect()
    }

    #[test]
    fn test_points_descending() {
        let t = tiers(&[("Axe", "LT4"), ("SMP", "HT1"), ("Pot", "HT3")]);
        let ordered = order_for_display(&t, &BTreeSet::new());
        assert_eq!(subjects(&ordered), vec!["SMP", "Pot", "Axe"]);
    }

    #[test]
    fn test_retired_after_active_regardless_of_points() {
        let t = tiers(&[("Crystal", "HT1"), ("Axe", "LT5"), ("Sword", "LT2")]);
        let retired: BTreeSet<String> = ["Crystal".to_string()].into();
        let ordered = order_for_display(&t, &retired);
        assert_eq!(subjects(&ordered), vec!["Sword", "Axe", "Crystal"]);
    }

    #[test]
    fn test_unknown_last_even_when_retired() {
        let t = tiers(&[
            ("Mace", "unknown"),
            ("Crystal", "HT1"),
            ("UHC", "garbage"),
            ("Axe", "LT5"),
        ]);
        let retired: BTreeSet<String> = ["Crystal".to_string(), "Mace".to_string()].into();
        let ordered = order_for_display(&t, &retired);
        assert_eq!(subjects(&ordered), vec!["Axe", "Crystal", "Mace", "UHC"]);
    }

    #[test]
    fn test_equal_points_keep_stored_order() {
        let t = tiers(&[("Sword", "HT2"), ("Axe", "HT2"), ("SMP", "HT2")]);
        let ordered = order_for_display(&t, &BTreeSet::new());
        assert_eq!(subjects(&ordered), vec!["Sword", "Axe", "SMP"]);
    }

    #[test]
    fn test_builder_order() {
        let t = tiers(&[
            ("Organics", "unknown"),
            ("Buildings", "LT2"),
            ("Composition", "HT1"),
        ]);
        let ordered = order_builder_tiers(&t);
        assert_eq!(subjects(&ordered), vec!["Composition", "Buildings", "Organics"]);
    }

    #[test]
    fn test_ordered_tiers_dispatches_on_kind() {
        let player = Entity::new("p".into(), EntityKind::Player)
            .with_tier("SMP", "HT1")
            .with_tier("Axe", "LT5")
            .with_retired("SMP");
        assert_eq!(subjects(&ordered_tiers(&player)), vec!["Axe", "SMP"]);

        let builder = Entity::new("b".into(), EntityKind::Builder)
            .with_tier("Interiors", "LT5")
            .with_tier("Organics", "HT2");
        assert_eq!(
            subjects(&ordered_tiers(&builder)),
            vec!["Organics", "Interiors"]
        );
    }

    #[test]
    fn test_empty() {
        assert!(order_for_display(&[], &BTreeSet::new()).is_empty());
    }
}
