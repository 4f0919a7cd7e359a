//! Concept registry behind the course's discovery map.
//!
//! Each region of the map holds an ordered list of concepts. Concepts carry
//! translation keys rather than text, and typed links to other concepts.

use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;
use tracing::{debug, warn};

/// How one concept bears on another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RelationKind {
    Causal,
    Analogous,
    Contrasting,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Causal => write!(f, "causal"),
            RelationKind::Analogous => write!(f, "analogous"),
            RelationKind::Contrasting => write!(f, "contrasting"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Relation {
    pub target: String,
    pub kind: RelationKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Concept {
    pub id: String,
    pub title_key: String,
    pub summary_key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub relations: Vec<Relation>,
}

impl Concept {
    /// Creates a concept whose translation keys follow `concepts.<id>.*`.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title_key: format!("concepts.{id}.title"),
            summary_key: format!("concepts.{id}.summary"),
            id,
            relations: Vec::new(),
        }
    }

    pub fn with_relation(mut self, target: impl Into<String>, kind: RelationKind) -> Self {
        self.relations.push(Relation {
            target: target.into(),
            kind,
        });
        self
    }
}

/// Maps region ids onto their ordered concepts.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConceptRegistry {
    regions: BTreeMap<String, Vec<Concept>>,
}

impl ConceptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `concepts` under `region`.
    ///
    /// The last registration for a region wins. Returns the concepts it replaced.
    pub fn register(
        &mut self,
        region: impl Into<String>,
        concepts: Vec<Concept>,
    ) -> Option<Vec<Concept>> {
        let region = region.into();
        debug!(%region, count = concepts.len(), "registering concepts");
        let replaced = self.regions.insert(region.clone(), concepts);
        if replaced.is_some() {
            warn!(%region, "replaced existing region registration");
        }

        replaced
    }

    /// Region ids in sorted order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    pub fn concepts(&self, region: &str) -> Option<&[Concept]> {
        self.regions.get(region).map(Vec::as_slice)
    }

    pub fn concept(&self, region: &str, id: &str) -> Option<&Concept> {
        self.concepts(region)?.iter().find(|concept| concept.id == id)
    }

    /// Finds `id` in any region, returning the region it lives in.
    pub fn find(&self, id: &str) -> Option<(&str, &Concept)> {
        self.regions.iter().find_map(|(region, concepts)| {
            concepts
                .iter()
                .find(|concept| concept.id == id)
                .map(|concept| (region.as_str(), concept))
        })
    }

    /// Concepts that `id` links to with a relation of `kind`.
    ///
    /// Links to concepts missing from the registry are skipped.
    pub fn related(
        &self,
        region: &str,
        id: &str,
        kind: RelationKind,
    ) -> Result<Vec<&Concept>, Error> {
        let concepts = self
            .concepts(region)
            .ok_or_else(|| Error::UnknownRegion(region.to_owned()))?;
        let concept = concepts
            .iter()
            .find(|concept| concept.id == id)
            .ok_or_else(|| Error::UnknownConcept(id.to_owned()))?;

        Ok(concept
            .relations
            .iter()
            .filter(|relation| relation.kind == kind)
            .filter_map(|relation| match self.find(&relation.target) {
                Some((_, target)) => Some(target),
                None => {
                    debug!(from = id, to = %relation.target, "dangling relation");
                    None
                }
            })
            .collect())
    }

    /// Total number of concepts across all regions.
    pub fn len(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The regions and concepts of the PolarCraft course.
    pub fn builtin() -> Self {
        use RelationKind::*;

        let mut registry = Self::new();
        registry.register(
            "light-nature",
            vec![
                Concept::new("transverse-wave").with_relation("polarization-state", Causal),
                Concept::new("polarization-state")
                    .with_relation("stokes-parameters", Causal)
                    .with_relation("birefringence", Analogous),
                Concept::new("stokes-parameters").with_relation("mueller-calculus", Causal),
                Concept::new("mueller-calculus"),
            ],
        );
        registry.register(
            "polarizers",
            vec![
                Concept::new("malus-law")
                    .with_relation("crossed-polarizers", Causal)
                    .with_relation("birefringence", Analogous),
                Concept::new("crossed-polarizers")
                    .with_relation("three-polarizer-paradox", Contrasting),
                Concept::new("three-polarizer-paradox").with_relation("malus-law", Causal),
            ],
        );
        registry.register(
            "interfaces",
            vec![
                Concept::new("fresnel-equations").with_relation("brewster-angle", Causal),
                Concept::new("brewster-angle")
                    .with_relation("total-internal-reflection", Contrasting),
                Concept::new("total-internal-reflection"),
            ],
        );
        registry.register(
            "crystals",
            vec![
                Concept::new("birefringence").with_relation("waveplate", Causal),
                Concept::new("waveplate").with_relation("optical-rotation", Contrasting),
                Concept::new("optical-rotation").with_relation("waveplate", Analogous),
            ],
        );
        registry.register(
            "scattering",
            vec![
                Concept::new("rayleigh-scattering").with_relation("sky-polarization", Causal),
                Concept::new("sky-polarization").with_relation("brewster-angle", Analogous),
            ],
        );

        registry
    }
}

/// Tracks which concepts a learner has uncovered.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiscoveryLog {
    discovered: HashSet<String>,
}

impl DiscoveryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as discovered.
    ///
    /// Returns `true` if it was not discovered before.
    pub fn discover(&mut self, registry: &ConceptRegistry, id: &str) -> Result<bool, Error> {
        if registry.find(id).is_none() {
            return Err(Error::UnknownConcept(id.to_owned()));
        }

        Ok(self.discovered.insert(id.to_owned()))
    }

    pub fn is_discovered(&self, id: &str) -> bool {
        self.discovered.contains(id)
    }

    /// Number of discovered concepts in `region` out of its total.
    pub fn progress(
        &self,
        registry: &ConceptRegistry,
        region: &str,
    ) -> Result<(usize, usize), Error> {
        let concepts = registry
            .concepts(region)
            .ok_or_else(|| Error::UnknownRegion(region.to_owned()))?;
        let found = concepts
            .iter()
            .filter(|concept| self.is_discovered(&concept.id))
            .count();

        Ok((found, concepts.len()))
    }
}

/// A point on the map canvas. `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConceptNode {
    pub id: String,
    pub position: MapPosition,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionNode {
    pub id: String,
    pub position: MapPosition,
    pub concepts: Vec<ConceptNode>,
}

/// Node positions for drawing a registry as a world map.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldMap {
    pub width: f64,
    pub height: f64,
    pub regions: Vec<RegionNode>,
}

impl WorldMap {
    /// Places regions on a ring about the centre of a `width` by `height`
    /// canvas, starting at the top and going clockwise. Each region's concepts
    /// sit on a smaller ring about the region.
    pub fn layout(registry: &ConceptRegistry, width: f64, height: f64) -> Self {
        let span = width.min(height);
        let centre = MapPosition {
            x: width / 2.0,
            y: height / 2.0,
        };
        let region_count = registry.regions.len();

        let regions = registry
            .regions
            .iter()
            .enumerate()
            .map(|(i, (id, concepts))| {
                let position = ring_position(centre, 0.35 * span, i, region_count);
                let concepts = concepts
                    .iter()
                    .enumerate()
                    .map(|(j, concept)| ConceptNode {
                        id: concept.id.clone(),
                        position: ring_position(position, 0.12 * span, j, concepts.len()),
                    })
                    .collect();

                RegionNode {
                    id: id.clone(),
                    position,
                    concepts,
                }
            })
            .collect();

        Self {
            width,
            height,
            regions,
        }
    }
}

fn ring_position(centre: MapPosition, radius: f64, index: usize, count: usize) -> MapPosition {
    let phi = -FRAC_PI_2 + TAU * index as f64 / count.max(1) as f64;
    MapPosition {
        x: centre.x + radius * phi.cos(),
        y: centre.y + radius * phi.sin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn last_registration_wins() {
        let mut registry = ConceptRegistry::new();
        assert!(registry.register("optics", vec![Concept::new("a")]).is_none());

        let replaced = registry.register("optics", vec![Concept::new("b"), Concept::new("c")]);

        assert_eq!(replaced, Some(vec![Concept::new("a")]));
        assert_eq!(registry.len(), 2);
        assert!(registry.concept("optics", "a").is_none());
        assert!(registry.concept("optics", "c").is_some());
    }

    #[test]
    fn concept_keys_follow_id() {
        let concept = Concept::new("malus-law");
        assert_eq!(concept.title_key, "concepts.malus-law.title");
        assert_eq!(concept.summary_key, "concepts.malus-law.summary");
    }

    #[test]
    fn find_across_regions() {
        let registry = ConceptRegistry::builtin();
        let (region, concept) = registry.find("brewster-angle").unwrap();
        assert_eq!(region, "interfaces");
        assert_eq!(concept.id, "brewster-angle");
        assert!(registry.find("holography").is_none());
    }

    #[rstest]
    #[case("malus-law", RelationKind::Causal, &["crossed-polarizers"])]
    #[case("malus-law", RelationKind::Analogous, &["birefringence"])]
    #[case("malus-law", RelationKind::Contrasting, &[])]
    fn related_by_kind(#[case] id: &str, #[case] kind: RelationKind, #[case] expected: &[&str]) {
        let registry = ConceptRegistry::builtin();
        let related: Vec<&str> = registry
            .related("polarizers", id, kind)
            .unwrap()
            .into_iter()
            .map(|concept| concept.id.as_str())
            .collect();
        assert_eq!(related, expected);
    }

    #[test]
    fn dangling_relation_is_skipped() {
        let mut registry = ConceptRegistry::new();
        registry.register(
            "optics",
            vec![Concept::new("a").with_relation("missing", RelationKind::Causal)],
        );
        assert!(registry
            .related("optics", "a", RelationKind::Causal)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn related_reports_unknown_ids() {
        let registry = ConceptRegistry::builtin();
        assert!(matches!(
            registry.related("nowhere", "malus-law", RelationKind::Causal),
            Err(Error::UnknownRegion(_))
        ));
        assert!(matches!(
            registry.related("polarizers", "brewster-angle", RelationKind::Causal),
            Err(Error::UnknownConcept(_))
        ));
    }

    #[test]
    fn discovery_progress() {
        let registry = ConceptRegistry::builtin();
        let mut log = DiscoveryLog::new();

        assert!(log.discover(&registry, "malus-law").unwrap());
        assert!(!log.discover(&registry, "malus-law").unwrap());
        assert!(log.discover(&registry, "brewster-angle").unwrap());
        assert!(log.discover(&registry, "holography").is_err());

        assert_eq!(log.progress(&registry, "polarizers").unwrap(), (1, 3));
        assert_eq!(log.progress(&registry, "crystals").unwrap(), (0, 3));
        assert!(log.progress(&registry, "nowhere").is_err());
    }

    #[test]
    fn layout_places_every_concept() {
        let registry = ConceptRegistry::builtin();
        let map = WorldMap::layout(&registry, 800.0, 600.0);

        assert_eq!(map.regions.len(), 5);
        let placed: usize = map.regions.iter().map(|region| region.concepts.len()).sum();
        assert_eq!(placed, registry.len());

        for region in &map.regions {
            assert!((0.0..=800.0).contains(&region.position.x));
            assert!((0.0..=600.0).contains(&region.position.y));
        }
    }

    #[test]
    fn empty_registry_has_empty_map() {
        let map = WorldMap::layout(&ConceptRegistry::new(), 100.0, 100.0);
        assert!(map.regions.is_empty());
    }
}
