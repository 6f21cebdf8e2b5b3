//! Catalog-wide validation of the prerequisite graph.
//!
//! Learning only ever checks prerequisites by direct lookup. A cycle would
//! make every skill on it permanently unlearnable, so cycles are rejected
//! when content is loaded rather than discovered by players.

use std::collections::BTreeMap;

use crate::types::SkillId;

use super::error::TemplateError;
use super::template::SkillTemplate;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Validates every template and the graph they form together.
///
/// Checks, in order: per-template rules, duplicate ids, unknown
/// prerequisites, prerequisite ranks above the referenced max rank, cycles.
pub fn validate_catalog(templates: &[SkillTemplate]) -> Result<(), TemplateError> {
    let mut by_id: BTreeMap<&SkillId, &SkillTemplate> = BTreeMap::new();
    for template in templates {
        template.validate()?;
        if by_id.insert(&template.id, template).is_some() {
            return Err(TemplateError::Duplicate(template.id.clone()));
        }
    }

    for template in templates {
        for prerequisite in &template.prerequisites {
            let Some(required) = by_id.get(&prerequisite.skill) else {
                return Err(TemplateError::UnknownPrerequisite {
                    skill: template.id.clone(),
                    prerequisite: prerequisite.skill.clone(),
                });
            };
            if prerequisite.min_rank > required.max_rank {
                return Err(TemplateError::UnreachablePrerequisiteRank {
                    skill: template.id.clone(),
                    prerequisite: prerequisite.skill.clone(),
                    min_rank: prerequisite.min_rank,
                    max_rank: required.max_rank,
                });
            }
        }
    }

    let mut visits = BTreeMap::new();
    for &id in by_id.keys() {
        let mut path = Vec::new();
        visit(id, &by_id, &mut visits, &mut path)?;
    }
    Ok(())
}

/// Depth-first walk. `path` holds the chain currently being explored so a
/// back edge can be reported as the full cycle.
fn visit<'a>(
    id: &'a SkillId,
    by_id: &BTreeMap<&'a SkillId, &'a SkillTemplate>,
    visits: &mut BTreeMap<&'a SkillId, Visit>,
    path: &mut Vec<&'a SkillId>,
) -> Result<(), TemplateError> {
    match visits.get(id) {
        Some(Visit::Done) => return Ok(()),
        Some(Visit::InProgress) => {
            let start = path.iter().position(|entry| *entry == id).unwrap_or(0);
            let mut cycle: Vec<SkillId> = path[start..].iter().map(|id| (*id).clone()).collect();
            cycle.push(id.clone());
            return Err(TemplateError::PrerequisiteCycle(cycle));
        }
        None => {}
    }

    visits.insert(id, Visit::InProgress);
    path.push(id);
    if let Some(&template) = by_id.get(id) {
        for prerequisite in &template.prerequisites {
            visit(&prerequisite.skill, by_id, visits, path)?;
        }
    }
    path.pop();
    visits.insert(id, Visit::Done);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{RankTables, SkillKind};

    fn skill(id: &str) -> SkillTemplate {
        SkillTemplate::new(id, id, SkillKind::Active)
    }

    #[test]
    fn acyclic_catalog_is_accepted() {
        let catalog = [
            skill("a"),
            skill("b").with_prerequisite("a", 1),
            skill("c").with_prerequisite("a", 1).with_prerequisite("b", 1),
        ];
        assert_eq!(validate_catalog(&catalog), Ok(()));
    }

    #[test]
    fn cycle_is_rejected_with_its_path() {
        let catalog = [
            skill("a").with_prerequisite("c", 1),
            skill("b").with_prerequisite("a", 1),
            skill("c").with_prerequisite("b", 1),
        ];

        let Err(TemplateError::PrerequisiteCycle(cycle)) = validate_catalog(&catalog) else {
            panic!("cycle not detected");
        };
        assert_eq!(cycle.len(), 4);
        assert_eq!(cycle.first(), cycle.last());
    }

    #[test]
    fn unknown_prerequisite_is_rejected() {
        let catalog = [skill("a").with_prerequisite("ghost", 1)];
        assert_eq!(
            validate_catalog(&catalog),
            Err(TemplateError::UnknownPrerequisite {
                skill: "a".into(),
                prerequisite: "ghost".into(),
            })
        );
    }

    #[test]
    fn unreachable_rank_is_rejected() {
        let three_ranks = skill("a").with_ranks(RankTables {
            damage: vec![1.0; 3],
            duration: vec![0.0; 3],
            resource_cost: vec![0; 3],
            cooldown: vec![1.0; 3],
        });
        let catalog = [three_ranks, skill("b").with_prerequisite("a", 4)];

        assert!(matches!(
            validate_catalog(&catalog),
            Err(TemplateError::UnreachablePrerequisiteRank { min_rank: 4, max_rank: 3, .. })
        ));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let catalog = [skill("a"), skill("a")];
        assert_eq!(
            validate_catalog(&catalog),
            Err(TemplateError::Duplicate("a".into()))
        );
    }
}
