use serde::{Deserialize, Serialize};

use crate::geo::{haversine_distance_m, Coordinate, GeoError};

/// Proximity radius around the first vertex that turns a click into a
/// closure, in meters.
pub const CLOSURE_THRESHOLD_M: f64 = 50.0;

const MIN_RING_VERTICES: usize = 3;

/// Invalid editor operations. The draft is left untouched on every error
/// so the user can keep drawing.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("no drawing in progress")]
    NotDrawing,
    #[error("polygon needs at least {MIN_RING_VERTICES} vertices to close, have {have}")]
    TooFewVertices { have: usize },
    #[error("point repeats the previous vertex")]
    DuplicatePoint,
    #[error(transparent)]
    Geo(#[from] GeoError),
}

/// Closed geofence boundary ring: at least four vertices, first and last
/// identical by literal copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPolygon {
    vertices: Vec<Coordinate>,
}

impl BoundaryPolygon {
    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// What a point click did to the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum PointOutcome {
    Added { vertex_count: usize },
    Closed(BoundaryPolygon),
}

/// Session-scoped polygon editor: Idle until `start_drawing`, then
/// accumulates vertices until a closure click, an explicit finish, or a
/// clear. One user, one draft; every transition is driven by a single
/// externally delivered event.
#[derive(Debug, Default)]
pub struct BoundaryEditor {
    vertices: Vec<Coordinate>,
    active: bool,
}

impl BoundaryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.active
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    /// Begin a fresh draft, discarding any previous vertices.
    pub fn start_drawing(&mut self) {
        self.vertices.clear();
        self.active = true;
    }

    /// Record a map click.
    ///
    /// With three or more vertices down, a click within
    /// [`CLOSURE_THRESHOLD_M`] of the first vertex closes the ring: a
    /// literal copy of the first vertex is appended (not the clicked
    /// point) and the editor returns to Idle. Otherwise the point is
    /// appended, except that a repeat of the current last vertex is
    /// rejected to keep the draft free of adjacent duplicates.
    pub fn add_point(&mut self, coord: Coordinate) -> Result<PointOutcome, BoundaryError> {
        if !self.active {
            return Err(BoundaryError::NotDrawing);
        }
        coord.validate()?;

        if self.vertices.len() >= MIN_RING_VERTICES
            && haversine_distance_m(coord, self.vertices[0]) < CLOSURE_THRESHOLD_M
        {
            let first = self.vertices[0];
            self.vertices.push(first);
            self.active = false;
            return Ok(PointOutcome::Closed(BoundaryPolygon {
                vertices: std::mem::take(&mut self.vertices),
            }));
        }

        if self.vertices.last() == Some(&coord) {
            return Err(BoundaryError::DuplicatePoint);
        }

        self.vertices.push(coord);
        Ok(PointOutcome::Added {
            vertex_count: self.vertices.len(),
        })
    }

    /// Explicitly end the drawing (double-click or button).
    ///
    /// Requires at least three vertices; the ring is closed with a copy of
    /// the first vertex if it is not closed already. With fewer vertices
    /// the call fails and the draft survives unchanged.
    pub fn finish_drawing(&mut self) -> Result<BoundaryPolygon, BoundaryError> {
        if !self.active {
            return Err(BoundaryError::NotDrawing);
        }
        if self.vertices.len() < MIN_RING_VERTICES {
            return Err(BoundaryError::TooFewVertices {
                have: self.vertices.len(),
            });
        }

        if self.vertices.last() != Some(&self.vertices[0]) {
            let first = self.vertices[0];
            self.vertices.push(first);
        }
        self.active = false;

        Ok(BoundaryPolygon {
            vertices: std::mem::take(&mut self.vertices),
        })
    }

    /// Cancellation path: back to Idle with an empty draft, from any state.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.active = false;
    }
}
