//! Output scene node holding every region mesh and border line

use super::flow::FlowLineMaterial;
use super::merge::MeshGeometry;
use crate::draw::geometry::{BorderBuffers, Properties};
use std::sync::Arc;

/// Merged solid of one region
#[derive(Debug, Clone)]
pub struct RegionMesh<M> {
    pub region: String,
    pub geometry: MeshGeometry,
    pub material: Arc<M>,
    /// Feature properties for hover/click lookups
    pub properties: Properties,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl<M> RegionMesh<M> {
    /// Pillar anchor standing on the top face of the solid
    ///
    /// Centred on the solid's bounds, half as tall as the solid, with a radius
    /// of a tenth of its height. `None` for an empty geometry.
    pub fn marker(&self) -> Option<RegionMarker> {
        let (min, max) = self.geometry.bounding_box()?;
        let height = (max[2] - min[2]) * 0.5;
        Some(RegionMarker {
            position: [
                (min[0] + max[0]) * 0.5,
                (min[1] + max[1]) * 0.5,
                max[2] + height * 0.5,
            ],
            height,
            radius: height / 10.0,
        })
    }
}

/// Marker pillar placement, in group space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionMarker {
    /// Center of the pillar
    pub position: [f32; 3],
    pub height: f32,
    pub radius: f32,
}

/// One outline of one shape
#[derive(Debug, Clone, PartialEq)]
pub struct BorderLine {
    pub region: String,
    pub position: Vec<f32>,
    pub progress: Vec<f32>,
    /// Local translation applied on top of the group position
    pub offset: [f32; 3],
}

impl BorderLine {
    pub fn from_buffers(region: String, buffers: BorderBuffers, offset: [f32; 3]) -> Self {
        Self {
            region,
            position: buffers.position,
            progress: buffers.progress,
            offset,
        }
    }

    pub fn point_count(&self) -> usize {
        self.progress.len()
    }
}

/// Debug axes attached to the group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisHelper {
    pub size: f32,
    pub visible: bool,
}

/// The composite node a map view attaches to its scene
///
/// Contents are unordered: regions appear in whatever order their task
/// groups finished.
#[derive(Debug)]
pub struct GeometryGroup<M> {
    position: [f32; 3],
    meshes: Vec<RegionMesh<M>>,
    border_lines: Vec<BorderLine>,
    flow_material: FlowLineMaterial,
    helper: AxisHelper,
}

impl<M> GeometryGroup<M> {
    pub fn new(axis_helper_size: f32) -> Self {
        Self {
            position: [0.0; 3],
            meshes: Vec::new(),
            border_lines: Vec::new(),
            flow_material: FlowLineMaterial::default(),
            helper: AxisHelper { size: axis_helper_size, visible: false },
        }
    }

    pub(crate) fn add_mesh(&mut self, mesh: RegionMesh<M>) {
        self.meshes.push(mesh);
    }

    pub(crate) fn add_border_line(&mut self, line: BorderLine) {
        self.border_lines.push(line);
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = [x, y, z];
    }

    /// Swap the shared material on every region mesh
    pub fn update_material(&mut self, material: Arc<M>) {
        for mesh in &mut self.meshes {
            mesh.material = Arc::clone(&material);
        }
    }

    pub fn helper(&self) -> &AxisHelper {
        &self.helper
    }

    pub fn set_helper_visible(&mut self, visible: bool) {
        self.helper.visible = visible;
    }

    pub fn meshes(&self) -> &[RegionMesh<M>] {
        &self.meshes
    }

    pub fn border_lines(&self) -> &[BorderLine] {
        &self.border_lines
    }

    pub fn mesh_for_region(&self, region: &str) -> Option<&RegionMesh<M>> {
        self.meshes.iter().find(|m| m.region == region)
    }

    pub fn marker_for_region(&self, region: &str) -> Option<RegionMarker> {
        self.mesh_for_region(region)?.marker()
    }

    pub fn flow_material(&self) -> &FlowLineMaterial {
        &self.flow_material
    }

    pub fn flow_material_mut(&mut self) -> &mut FlowLineMaterial {
        &mut self.flow_material
    }

    /// Region under a point given in the group's parent space
    ///
    /// Tests the solids' triangles projected onto the map plane; walls are
    /// edge-on and never match.
    pub fn region_at(&self, x: f32, y: f32) -> Option<&RegionMesh<M>> {
        let px = x - self.position[0];
        let py = y - self.position[1];

        self.meshes.iter().find(|mesh| {
            let pos = &mesh.geometry.position;
            mesh.geometry.index.chunks_exact(3).any(|tri| {
                let v = |i: u32| (pos[i as usize * 3], pos[i as usize * 3 + 1]);
                let (x0, y0) = v(tri[0]);
                let (x1, y1) = v(tri[1]);
                let (x2, y2) = v(tri[2]);
                point_in_triangle(px, py, x0, y0, x1, y1, x2, y2)
            })
        })
    }

    pub fn region_count(&self) -> usize {
        self.meshes.len()
    }
}

/// Barycentric point-in-triangle test; degenerate triangles never match
#[allow(clippy::too_many_arguments)]
fn point_in_triangle(
    px: f32, py: f32,
    x0: f32, y0: f32,
    x1: f32, y1: f32,
    x2: f32, y2: f32,
) -> bool {
    let area = 0.5 * (-y1 * x2 + y0 * (-x1 + x2) + x0 * (y1 - y2) + x1 * y2);
    if area.abs() < 1e-10 {
        return false;
    }
    let s = (y0 * x2 - x0 * y2 + (y2 - y0) * px + (x0 - x2) * py) / (2.0 * area);
    let t = (x0 * y1 - y0 * x1 + (y0 - y1) * px + (x1 - x0) * py) / (2.0 * area);
    s >= 0.0 && t >= 0.0 && (s + t) <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::geometry::{Point, Shape};
    use crate::draw::tessellation::extrude_shape;
    use approx::assert_relative_eq;

    fn region_mesh(region: &str, x: f32, material: &Arc<&'static str>) -> RegionMesh<&'static str> {
        let shape = Shape::new(vec![
            Point::new(x, 0.0),
            Point::new(x + 2.0, 0.0),
            Point::new(x + 2.0, 2.0),
            Point::new(x, 2.0),
        ]);
        let buffers = extrude_shape(&shape, 3.0).unwrap();
        RegionMesh {
            region: region.to_string(),
            geometry: MeshGeometry::from_buffers(buffers),
            material: Arc::clone(material),
            properties: Properties::new(),
            cast_shadow: true,
            receive_shadow: true,
        }
    }

    fn sample_group() -> GeometryGroup<&'static str> {
        let material = Arc::new("basic");
        let mut group = GeometryGroup::new(500.0);
        group.add_mesh(region_mesh("west", 0.0, &material));
        group.add_mesh(region_mesh("east", 10.0, &material));
        group
    }

    #[test]
    fn test_update_material_swaps_everywhere() {
        let mut group = sample_group();
        let glass = Arc::new("glass");
        group.update_material(Arc::clone(&glass));
        assert!(group.meshes().iter().all(|m| Arc::ptr_eq(&m.material, &glass)));
    }

    #[test]
    fn test_region_at_follows_position() {
        let mut group = sample_group();
        assert_eq!(group.region_at(1.0, 1.0).map(|m| m.region.as_str()), Some("west"));
        assert_eq!(group.region_at(11.0, 1.0).map(|m| m.region.as_str()), Some("east"));
        assert!(group.region_at(5.0, 1.0).is_none());

        group.set_position(100.0, 0.0, 0.0);
        assert!(group.region_at(1.0, 1.0).is_none());
        assert_eq!(group.region_at(111.0, 1.0).map(|m| m.region.as_str()), Some("east"));
    }

    #[test]
    fn test_helper_and_lookup() {
        let mut group = sample_group();
        assert_eq!(group.helper().size, 500.0);
        assert!(!group.helper().visible, "Axes start hidden");
        group.set_helper_visible(true);
        assert!(group.helper().visible);

        assert!(group.mesh_for_region("east").is_some());
        assert!(group.mesh_for_region("north").is_none());
        assert_eq!(group.region_count(), 2);
    }

    #[test]
    fn test_marker_stands_on_top_face() {
        let group = sample_group();
        let marker = group.marker_for_region("east").unwrap();
        assert_relative_eq!(marker.position[0], 11.0);
        assert_relative_eq!(marker.position[1], 1.0);
        assert_relative_eq!(marker.height, 1.5);
        assert_relative_eq!(marker.position[2], 3.75);
        assert_relative_eq!(marker.radius, 0.15);
        assert!(group.marker_for_region("north").is_none());
    }

    #[test]
    fn test_marker_needs_geometry() {
        let mesh = RegionMesh {
            region: "empty".to_string(),
            geometry: MeshGeometry::default(),
            material: Arc::new(()),
            properties: Properties::new(),
            cast_shadow: true,
            receive_shadow: true,
        };
        assert!(mesh.marker().is_none());
    }

    #[test]
    fn test_point_in_triangle() {
        assert!(point_in_triangle(0.25, 0.25, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0));
        assert!(!point_in_triangle(1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0));
        // degenerate
        assert!(!point_in_triangle(0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 2.0, 2.0));
    }
}
