//! Every requested symbol variant of one package.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::functional::{FunctionalGenerator, PhysicalGenerator};
use super::multi_unit::MultiUnitGenerator;
use super::{Metrics, SymbolDrawing, SymbolGenerator};
use crate::package::Package;

/// A symbol variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Single unit, pins grouped by function.
    Functional,
    /// One unit per group.
    MultiUnit,
    /// Single unit, pins in package order.
    Physical,
    /// Single unit, passive pins in package order.
    Socket,
}

impl Variant {
    /// Every variant, in generation order.
    pub const ALL: [Self; 4] = [Self::Functional, Self::MultiUnit, Self::Physical, Self::Socket];

    /// Configuration and output key of the variant.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Functional => "functional",
            Self::MultiUnit => "multi-unit",
            Self::Physical => "physical",
            Self::Socket => "socket",
        }
    }

    /// Looks a variant up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Generator producing this variant.
    #[must_use]
    pub fn generator(&self, metrics: Metrics) -> Box<dyn SymbolGenerator> {
        match self {
            Self::Functional => Box::new(FunctionalGenerator::new(metrics)),
            Self::MultiUnit => Box::new(MultiUnitGenerator::new(metrics)),
            Self::Physical => Box::new(PhysicalGenerator::new(metrics)),
            Self::Socket => Box::new(PhysicalGenerator::socket(metrics)),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A variant that could not be generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantFailure {
    /// The variant.
    pub variant: Variant,
    /// Why it failed.
    pub message: String,
}

/// Drawings of one package, keyed by variant name in generation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSet {
    /// Package name.
    pub package: String,
    /// Generated drawings.
    pub symbols: IndexMap<String, SymbolDrawing>,
    /// Variants that failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<VariantFailure>,
}

impl SymbolSet {
    /// Generates the requested variants.
    ///
    /// A failing variant is recorded in [`failures`](Self::failures) and does
    /// not stop the others. A variant requested twice is generated once.
    #[must_use]
    pub fn generate(package: &Package, variants: &[Variant], metrics: Metrics) -> Self {
        let mut set = Self {
            package: package.name.clone(),
            symbols: IndexMap::new(),
            failures: Vec::new(),
        };

        for &variant in variants {
            if set.symbols.contains_key(variant.name()) {
                continue;
            }
            match variant.generator(metrics).generate(package) {
                Ok(drawing) => {
                    debug!(package = %package.name, variant = %variant, "Generated symbol");
                    set.symbols.insert(variant.name().to_string(), drawing);
                }
                Err(e) => {
                    warn!(package = %package.name, variant = %variant, error = %e, "Skipping variant");
                    set.failures.push(VariantFailure {
                        variant,
                        message: e.to_string(),
                    });
                }
            }
        }

        set
    }

    /// Whether nothing could be generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{Direction, Pin, PinType};

    fn package() -> Package {
        let mut package = Package::new("x");
        package.ungrouped_pins = vec![Pin::new("A", 1, Some(PinType::Input), Direction::In)];
        package
    }

    #[test]
    fn variant_names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_name(variant.name()), Some(variant));
        }
        assert_eq!(Variant::from_name("kicad"), None);
        assert_eq!(
            serde_json::to_string(&Variant::MultiUnit).unwrap(),
            "\"multi-unit\""
        );
    }

    #[test]
    fn failing_variant_does_not_stop_the_others() {
        let set = SymbolSet::generate(&package(), &Variant::ALL, Metrics::default());
        let keys: Vec<&str> = set.symbols.keys().map(String::as_str).collect();
        assert_eq!(keys, ["functional", "multi-unit"]);
        assert_eq!(set.failures.len(), 2);
        assert_eq!(set.failures[0].variant, Variant::Physical);
        assert!(set.failures[0].message.contains("none"));
        assert!(!set.is_empty());
    }

    #[test]
    fn set_is_empty_when_every_variant_fails() {
        let set = SymbolSet::generate(
            &package(),
            &[Variant::Physical, Variant::Socket],
            Metrics::default(),
        );
        assert!(set.is_empty());
        assert_eq!(set.failures.len(), 2);
    }

    #[test]
    fn keeps_requested_order_once() {
        let variants = [Variant::MultiUnit, Variant::Functional, Variant::MultiUnit];
        let set = SymbolSet::generate(&package(), &variants, Metrics::default());
        let keys: Vec<&str> = set.symbols.keys().map(String::as_str).collect();
        assert_eq!(keys, ["multi-unit", "functional"]);
    }
}
