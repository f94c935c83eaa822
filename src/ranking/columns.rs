//! Tier-level columns for a single mode.

use crate::models::{Entity, Region, TierLabel};

/// Column (tier level 1..=5) a raw label belongs in.
///
/// Labels without a valid level, including `"unknown"`, get no column.
pub fn assign_column(label: &str) -> Option<u8> {
    TierLabel::parse(label).map(|l| l.level())
}

#[derive(Debug, Clone)]
pub struct ColumnEntry<'a> {
    pub entity: &'a Entity,
    pub tier: TierLabel,
    pub retired: bool,
}

#[derive(Debug, Clone)]
pub struct Column<'a> {
    pub level: u8,
    pub entries: Vec<ColumnEntry<'a>>,
}

/// Split every entity tiered in `subject` into five level columns.
///
/// Within a column: high before low, active before retired, then display
/// name (case-insensitive), then id.
pub fn mode_columns<'a>(
    entities: &'a [Entity],
    subject: &str,
    region: Option<Region>,
) -> Vec<Column<'a>> {
    let mut columns: Vec<Column<'a>> = (1..=5)
        .map(|level| Column {
            level,
            entries: Vec::new(),
        })
        .collect();

    for entity in entities {
        if region.is_some_and(|r| entity.region != Some(r)) {
            continue;
        }
        let Some(tier) = entity.tier_for(subject).and_then(|a| a.tier) else {
            continue;
        };
        columns[usize::from(tier.level() - 1)].entries.push(ColumnEntry {
            entity,
            tier,
            retired: entity.is_retired(subject),
        });
    }

    for column in &mut columns {
        column.entries.sort_by_cached_key(|e| {
            (
                !e.tier.is_high(),
                e.retired,
                e.entity.name_or_unknown().to_lowercase(),
                e.entity.id.clone(),
            )
        });
    }

    columns
}
