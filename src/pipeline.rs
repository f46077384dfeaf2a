//! Map geometry pipeline
//!
//! GeoJSON -> region extraction -> task partition -> workers -> reassembly.
//!
//! The coordinating side never blocks on one group while others could
//! complete: results are integrated in arrival order, either by polling
//! from a render loop or by waiting for all of them.

use crate::config::PipelineConfig;
use crate::draw::generation::partition_regions;
use crate::draw::geometry::Properties;
use crate::draw::parsing::{extract_regions, FeatureCollection, MapProjection};
use crate::error::{GroupError, GroupFailure, PipelineReport};
use crate::scene::{merge_geometries, BorderLine, GeometryGroup, MeshGeometry, RegionMesh};
use crate::worker::{ExtrudeSettings, GeometryRequest, GeometryResponse, WorkerMessage, WorkerPool};
use indexmap::IndexMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

/// Entry point: owns the worker pool and the configuration
pub struct MapGeometryPipeline {
    pool: WorkerPool,
    config: PipelineConfig,
}

impl MapGeometryPipeline {
    pub fn new(config: PipelineConfig) -> anyhow::Result<Self> {
        let config = config.normalized();
        let pool = WorkerPool::new(config.worker_count)?;
        Ok(Self { pool, config })
    }

    /// Pipeline configured from `MAP_EXTRUDE_*` environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(PipelineConfig::from_env())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Parse a GeoJSON document and start generating its geometry
    pub fn load_str<M>(&self, geojson: &str, material: Arc<M>) -> anyhow::Result<PendingMapGeometry<M>> {
        let collection = FeatureCollection::from_json_str(geojson)?;
        Ok(self.load(collection, material))
    }

    pub fn load_value<M>(
        &self,
        geojson: serde_json::Value,
        material: Arc<M>,
    ) -> anyhow::Result<PendingMapGeometry<M>> {
        let collection = FeatureCollection::from_value(geojson)?;
        Ok(self.load(collection, material))
    }

    /// Extract regions and dispatch one task group per worker
    ///
    /// Returns immediately; the geometry arrives through the returned handle.
    pub fn load<M>(&self, collection: FeatureCollection, material: Arc<M>) -> PendingMapGeometry<M> {
        let start = Instant::now();
        let extracted = extract_regions(collection, &self.config);
        let region_count = extracted.shapes.len();

        let groups = partition_regions(extracted.shapes, self.config.worker_count);
        let settings = ExtrudeSettings {
            depth: self.config.extrude_depth,
            border_elevation: self.config.border_elevation,
        };

        let (tx, rx) = mpsc::channel();
        let mut group_regions = Vec::with_capacity(groups.len());
        let mut dispatched = 0;
        for (index, group) in groups.iter().enumerate() {
            let request = GeometryRequest::from_shapes(group);
            group_regions.push(request.region_codes());
            if request.shapes.is_empty() {
                continue;
            }
            self.pool.submit(index, request, settings, tx.clone());
            dispatched += 1;
        }
        drop(tx);

        tracing::info!(
            regions = region_count,
            groups = dispatched,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "dispatched map geometry"
        );

        let mut pending = PendingMapGeometry::new(
            rx,
            group_regions,
            extracted.properties,
            extracted.projection,
            material,
            &self.config,
        );
        pending.report.extraction = extracted.issues;
        pending
    }

    /// Load and block until every task group has reported
    pub fn load_blocking<M>(&self, geojson: &str, material: Arc<M>) -> anyhow::Result<MapGeometry<M>> {
        Ok(self.load_str(geojson, material)?.wait())
    }
}

/// Finished pipeline output
#[derive(Debug)]
pub struct MapGeometry<M> {
    pub group: GeometryGroup<M>,
    /// Region code -> feature properties
    pub properties: IndexMap<String, Properties>,
    pub projection: MapProjection,
    pub report: PipelineReport,
}

/// Geometry still being generated
///
/// The group fills up as task groups report; it can be displayed while
/// incomplete.
pub struct PendingMapGeometry<M> {
    receiver: Receiver<WorkerMessage>,
    group_regions: Vec<Vec<String>>,
    reported: Vec<bool>,
    properties: IndexMap<String, Properties>,
    projection: MapProjection,
    material: Arc<M>,
    border_offset: [f32; 3],
    group: GeometryGroup<M>,
    report: PipelineReport,
    started: Instant,
}

impl<M> PendingMapGeometry<M> {
    pub(crate) fn new(
        receiver: Receiver<WorkerMessage>,
        group_regions: Vec<Vec<String>>,
        properties: IndexMap<String, Properties>,
        projection: MapProjection,
        material: Arc<M>,
        config: &PipelineConfig,
    ) -> Self {
        // Empty groups are never dispatched
        let reported = group_regions.iter().map(Vec::is_empty).collect();
        Self {
            receiver,
            group_regions,
            reported,
            properties,
            projection,
            material,
            border_offset: config.border_offset,
            group: GeometryGroup::new(config.axis_helper_size),
            report: PipelineReport::default(),
            started: Instant::now(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.reported.iter().all(|&r| r)
    }

    pub fn group(&self) -> &GeometryGroup<M> {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut GeometryGroup<M> {
        &mut self.group
    }

    /// Number of task groups still outstanding
    pub fn remaining(&self) -> usize {
        self.reported.iter().filter(|&&r| !r).count()
    }

    /// Integrate every result that has already arrived, without blocking
    ///
    /// Returns true once all task groups have reported.
    pub fn poll(&mut self) -> bool {
        while !self.is_complete() {
            match self.receiver.try_recv() {
                Ok(message) => self.integrate(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.mark_lost(),
            }
        }
        self.is_complete()
    }

    /// Block until every task group has reported
    pub fn wait(mut self) -> MapGeometry<M> {
        while !self.is_complete() {
            match self.receiver.recv() {
                Ok(message) => self.integrate(message),
                Err(_) => self.mark_lost(),
            }
        }
        self.finish()
    }

    /// The finished geometry, or the handle back if groups are outstanding
    pub fn try_finish(mut self) -> Result<MapGeometry<M>, Self> {
        if self.poll() {
            Ok(self.finish())
        } else {
            Err(self)
        }
    }

    fn finish(self) -> MapGeometry<M> {
        tracing::info!(
            regions = self.group.region_count(),
            border_lines = self.group.border_lines().len(),
            failed_shapes = self.report.shapes.len(),
            failed_groups = self.report.groups.len(),
            elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0,
            "map geometry complete"
        );
        MapGeometry {
            group: self.group,
            properties: self.properties,
            projection: self.projection,
            report: self.report,
        }
    }

    fn integrate(&mut self, message: WorkerMessage) {
        let WorkerMessage { group, outcome } = message;
        match self.reported.get(group) {
            Some(false) => self.reported[group] = true,
            _ => {
                tracing::warn!(group, "ignoring unexpected task group result");
                return;
            }
        }

        match outcome {
            Ok(response) => self.add_response(group, response),
            Err(error) => {
                let regions = self.group_regions[group].clone();
                tracing::error!(group, regions = regions.len(), "task group failed: {}", error);
                self.report.groups.push(GroupFailure { group, regions, error });
            }
        }
    }

    fn add_response(&mut self, group: usize, response: GeometryResponse) {
        let GeometryResponse { result, failures } = response;
        tracing::debug!(group, regions = result.len(), "integrating task group");

        for (code, buffers) in result {
            let geometry = merge_geometries(
                buffers.geometries.into_iter().map(MeshGeometry::from_buffers).collect(),
            );
            let properties = self.properties.get(&code).cloned().unwrap_or_default();

            for border in buffers.border_lines {
                self.group
                    .add_border_line(BorderLine::from_buffers(code.clone(), border, self.border_offset));
            }

            self.group.add_mesh(RegionMesh {
                region: code,
                geometry,
                material: Arc::clone(&self.material),
                properties,
                cast_shadow: true,
                receive_shadow: true,
            });
        }

        self.report.shapes.extend(failures);
    }

    /// The channel closed: every outstanding group died without reporting
    fn mark_lost(&mut self) {
        for group in 0..self.reported.len() {
            if self.reported[group] {
                continue;
            }
            self.reported[group] = true;
            let regions = self.group_regions[group].clone();
            tracing::error!(group, regions = regions.len(), "task group lost");
            self.report.groups.push(GroupFailure {
                group,
                regions,
                error: GroupError::WorkerLost,
            });
        }
    }
}
