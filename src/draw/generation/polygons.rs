//! Worker-side geometry generation for one task group
//!
//! Decodes each shape, extrudes it and builds its border line. A shape that
//! fails is reported and skipped; the rest of the group carries on.

use crate::draw::geometry::{decode_shape, BorderBuffers, EncodedShape, MeshBuffers, RegionBuffers};
use crate::draw::tessellation::{build_border_line, extrude_shape};
use crate::error::{ShapeError, ShapeFailure};
use crate::worker::protocol::{ExtrudeSettings, GeometryRequest, GeometryResponse};

/// Build solids and border lines for every shape of a request
///
/// Regions are processed in request order, shapes in region order.
pub fn run_geometry_task(request: GeometryRequest, settings: &ExtrudeSettings) -> GeometryResponse {
    let mut response = GeometryResponse::default();

    for (code, shapes) in request.shapes {
        let mut buffers = RegionBuffers::default();

        for (shape_index, encoded) in shapes.iter().enumerate() {
            match generate_shape(encoded, settings) {
                Ok((mesh, border)) => {
                    buffers.geometries.push(mesh);
                    buffers.border_lines.push(border);
                }
                Err(error) => {
                    tracing::warn!(region = %code, shape = shape_index, "skipping shape: {}", error);
                    response.failures.push(ShapeFailure {
                        region: code.clone(),
                        shape_index,
                        error,
                    });
                }
            }
        }

        if !buffers.geometries.is_empty() {
            response.result.insert(code, buffers);
        }
    }

    response
}

fn generate_shape(
    encoded: &EncodedShape,
    settings: &ExtrudeSettings,
) -> Result<(MeshBuffers, BorderBuffers), ShapeError> {
    let shape = decode_shape(encoded)?;
    let mesh = extrude_shape(&shape, settings.depth)?;
    let border = build_border_line(&shape, settings.border_elevation);
    Ok((mesh, border))
}
