//! Composable third-party content multipliers.

use progression_core::{ContentOracle, EntityDescriptor, formula::sanitize_multiplier};

/// Multiplies the answers of every registered provider.
///
/// Each provider's value is sanitized on its own, so one misbehaving
/// integration degrades to neutral instead of poisoning the product. An empty
/// registry is neutral.
#[derive(Default)]
pub struct ContentRegistry {
    providers: Vec<(&'static str, Box<dyn ContentOracle>)>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &'static str, provider: impl ContentOracle + 'static) {
        tracing::debug!(provider = name, "registered content provider");
        self.providers.push((name, Box::new(provider)));
    }

    pub fn with(mut self, name: &'static str, provider: impl ContentOracle + 'static) -> Self {
        self.register(name, provider);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ContentOracle for ContentRegistry {
    fn external_content_xp_multiplier(&self, entity: &EntityDescriptor) -> f64 {
        self.providers
            .iter()
            .map(|(_, provider)| {
                sanitize_multiplier(provider.external_content_xp_multiplier(entity))
            })
            .product()
    }

    fn external_difficulty_scale(&self) -> f64 {
        self.providers
            .iter()
            .map(|(_, provider)| sanitize_multiplier(provider.external_difficulty_scale()))
            .product()
    }
}

impl std::fmt::Debug for ContentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl ContentOracle for Fixed {
        fn external_content_xp_multiplier(&self, _entity: &EntityDescriptor) -> f64 {
            self.0
        }

        fn external_difficulty_scale(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn providers_multiply() {
        let registry = ContentRegistry::new()
            .with("calamity", Fixed(1.5))
            .with("thorium", Fixed(2.0));
        let slime = EntityDescriptor::regular("slime", 14, 0, 1);

        assert_eq!(registry.external_content_xp_multiplier(&slime), 3.0);
        assert_eq!(registry.external_difficulty_scale(), 3.0);
    }

    #[test]
    fn broken_provider_is_neutral() {
        let registry = ContentRegistry::new()
            .with("broken", Fixed(f64::NAN))
            .with("fine", Fixed(1.25));
        assert_eq!(registry.external_difficulty_scale(), 1.25);
        assert_eq!(ContentRegistry::new().external_difficulty_scale(), 1.0);
    }
}
