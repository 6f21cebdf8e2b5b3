//! Skill template oracle.

use std::collections::BTreeMap;

use crate::skill::SkillTemplate;
use crate::types::SkillId;

/// Oracle providing immutable skill templates shared by every character.
pub trait SkillOracle: Send + Sync {
    /// Returns the template registered under `id`.
    fn template(&self, id: &SkillId) -> Option<&SkillTemplate>;

    /// Returns every registered template, ordered by id.
    fn templates(&self) -> Vec<&SkillTemplate>;
}

/// In-memory template table keyed by skill id.
#[derive(Clone, Debug, Default)]
pub struct StaticSkillTable {
    templates: BTreeMap<SkillId, SkillTemplate>,
}

impl StaticSkillTable {
    pub fn new(templates: impl IntoIterator<Item = SkillTemplate>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|template| (template.id.clone(), template))
                .collect(),
        }
    }

    /// Adds or replaces a template.
    pub fn insert(&mut self, template: SkillTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl SkillOracle for StaticSkillTable {
    fn template(&self, id: &SkillId) -> Option<&SkillTemplate> {
        self.templates.get(id)
    }

    fn templates(&self) -> Vec<&SkillTemplate> {
        self.templates.values().collect()
    }
}
