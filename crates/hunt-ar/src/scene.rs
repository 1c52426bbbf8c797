//! Scene reconciliation: placements in, host entities out.
//!
//! The host's 3D scene is reached only through [`SceneSink`].  Every
//! projection pass is a full rebuild (clear, then spawn one entity per
//! placement); with a handful of treasures the rebuild is cheaper than
//! diffing.  A host that wants incremental updates can diff inside its own
//! `SceneSink` impl.

use std::collections::BTreeMap;

use glam::Vec3;
use hunt_core::TreasureId;
use hunt_game::VisualKind;

use crate::Placement;

// ── Entity description ────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    Brown,
    Gold,
    Red,
}

impl Color {
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Brown => "brown",
            Color::Gold  => "gold",
            Color::Red   => "red",
        }
    }
}

/// A visual building block, positioned relative to its entity.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Cuboid {
        color:  Color,
        /// Width, height, depth.
        size:   Vec3,
        offset: Vec3,
    },
    Cylinder {
        color:        Color,
        radius:       f32,
        height:       f32,
        /// Euler rotation in degrees.
        rotation_deg: Vec3,
    },
    Cone {
        color:         Color,
        height:        f32,
        radius_bottom: f32,
        radius_top:    f32,
        offset:        Vec3,
    },
}

impl Primitive {
    /// Primitives that draw a treasure of `kind`.
    pub fn for_kind(kind: VisualKind) -> Vec<Primitive> {
        match kind {
            VisualKind::Chest => vec![
                Primitive::Cuboid {
                    color:  Color::Brown,
                    size:   Vec3::new(1.0, 0.7, 0.7),
                    offset: Vec3::ZERO,
                },
                // lid
                Primitive::Cuboid {
                    color:  Color::Gold,
                    size:   Vec3::new(1.0, 0.1, 0.7),
                    offset: Vec3::new(0.0, 0.4, 0.0),
                },
            ],
            VisualKind::Coin => vec![Primitive::Cylinder {
                color:        Color::Gold,
                radius:       0.5,
                height:       0.1,
                rotation_deg: Vec3::new(90.0, 0.0, 0.0),
            }],
        }
    }

    /// The red cone floating above a distant treasure.
    pub fn arrow() -> Primitive {
        Primitive::Cone {
            color:         Color::Red,
            height:        0.5,
            radius_bottom: 0.2,
            radius_top:    0.0,
            offset:        Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

/// One clickable treasure entity as handed to the host.
///
/// The host must route activation of this entity back to
/// `HuntSession::activate(entity.id)`.
#[derive(Clone, Debug, PartialEq)]
pub struct TreasureEntity {
    pub id:         TreasureId,
    pub kind:       VisualKind,
    pub position:   Vec3,
    pub primitives: Vec<Primitive>,
    pub has_arrow:  bool,
    pub clickable:  bool,
}

impl TreasureEntity {
    pub fn from_placement(placement: &Placement) -> Self {
        let mut primitives = Primitive::for_kind(placement.kind);
        if placement.arrow {
            primitives.push(Primitive::arrow());
        }
        Self {
            id:        placement.id,
            kind:      placement.kind,
            position:  placement.offset,
            primitives,
            has_arrow: placement.arrow,
            clickable: true,
        }
    }
}

// ── SceneSink ─────────────────────────────────────────────────────────────────

/// The host's entity graph, as far as treasures are concerned.
pub trait SceneSink {
    /// Remove every treasure entity currently in the scene.
    fn clear_treasures(&mut self);

    /// Add `entity` to the scene, replacing any entity with the same id.
    fn spawn(&mut self, entity: TreasureEntity);

    /// Remove the entity for `id`.  Returns `false` if none was present.
    fn remove(&mut self, id: TreasureId) -> bool;
}

// ── SceneRenderer ─────────────────────────────────────────────────────────────

/// Drives a [`SceneSink`] from projection output.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    passes: u64,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scene's treasures with one entity per placement.
    /// Returns the number of entities spawned.
    pub fn rebuild<S: SceneSink + ?Sized>(&mut self, sink: &mut S, placements: &[Placement]) -> usize {
        sink.clear_treasures();
        for placement in placements {
            sink.spawn(TreasureEntity::from_placement(placement));
        }
        self.passes += 1;
        tracing::trace!(pass = self.passes, entities = placements.len(), "scene rebuilt");
        placements.len()
    }

    /// Remove one treasure immediately, outside of a rebuild.
    pub fn remove<S: SceneSink + ?Sized>(&mut self, sink: &mut S, id: TreasureId) -> bool {
        sink.remove(id)
    }

    /// Number of rebuilds performed so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}

// ── SceneGraph ────────────────────────────────────────────────────────────────

/// In-memory [`SceneSink`] keyed by treasure id.
///
/// Stands in for a real scene host in tests and headless runs.
#[derive(Debug, Default)]
pub struct SceneGraph {
    entities: BTreeMap<TreasureId, TreasureEntity>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TreasureId) -> Option<&TreasureEntity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: TreasureId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Entities in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = &TreasureEntity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl SceneSink for SceneGraph {
    fn clear_treasures(&mut self) {
        self.entities.clear();
    }

    fn spawn(&mut self, entity: TreasureEntity) {
        self.entities.insert(entity.id, entity);
    }

    fn remove(&mut self, id: TreasureId) -> bool {
        self.entities.remove(&id).is_some()
    }
}
