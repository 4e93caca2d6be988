// Surface-of-revolution builder.
//
// Rotates a capped 2D outline around the vertical axis in fixed angular
// steps and connects the rings into an indexed triangle surface with smooth
// outward normals and wrap-ready UVs.
//
// Ring layout: rings 0..=segments sample a full turn, so ring `segments`
// repeats ring 0's positions and carries u = 1. Outline rows that sit on the
// axis collapse their ring to a single point (the caps); those bands emit
// one triangle per quad and their normals are merged across all rings so
// the apex shades as a flat cap.

use glam::{Vec2, Vec3};
use thiserror::Error;

use super::mesh::{accumulate_normals, LatheMesh, MeshVertex};
use super::profile::Outline;

/// Angular resolution of the revolved surface.
pub const DEFAULT_SEGMENTS: u32 = 64;

/// Outline points closer to the axis than this collapse to r = 0.
const AXIS_EPS: f32 = 1e-6;

#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("outline needs at least 2 points, got {0}")]
    DegenerateOutline(usize),
}

/// Revolve `outline` around the vertical axis in `segments` angular steps.
/// Fewer than 3 segments cannot close a surface; the count is floored there.
pub fn revolve(outline: &Outline, segments: u32) -> Result<LatheMesh, MeshError> {
    let rows = &outline.points;
    if rows.len() < 2 {
        return Err(MeshError::DegenerateOutline(rows.len()));
    }

    let segments = segments.max(3);
    let rings = segments as usize + 1;
    let row_count = rows.len();

    // Ring-major vertex grid: vertex (ring, row) lives at ring * row_count + row.
    let mut positions: Vec<Vec3> = Vec::with_capacity(rings * row_count);
    let mut uvs: Vec<Vec2> = Vec::with_capacity(rings * row_count);
    for ring in 0..rings {
        let u = ring as f32 / segments as f32;
        let theta = u * std::f32::consts::TAU;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for (row, p) in rows.iter().enumerate() {
            let r = p.x.abs();
            positions.push(Vec3::new(r * cos_theta, p.y, r * sin_theta));
            let v = row as f32 / (row_count - 1) as f32;
            uvs.push(Vec2::new(u, v));
        }
    }

    let on_axis: Vec<bool> = rows.iter().map(|p| p.x.abs() <= AXIS_EPS).collect();

    // Quad corners between ring i and ring i+1, rows j (a, b) and j+1 (d, c):
    //
    //   a --- b     a = (i,   j)    b = (i+1, j)
    //   |     |     d = (i,   j+1)  c = (i+1, j+1)
    //   d --- c
    //
    // Winding (a, b, d) / (b, c, d) faces outward when the outline runs from
    // the top cap down. Bands touching the axis keep only the non-collapsed
    // triangle; bands with coincident rows emit nothing.
    let mut indices: Vec<u32> = Vec::new();
    for ring in 0..segments as usize {
        let i0 = (ring * row_count) as u32;
        let i1 = ((ring + 1) * row_count) as u32;
        for row in 0..row_count - 1 {
            if rows[row] == rows[row + 1] || (on_axis[row] && on_axis[row + 1]) {
                continue;
            }

            let a = i0 + row as u32;
            let b = i1 + row as u32;
            let c = i1 + row as u32 + 1;
            let d = i0 + row as u32 + 1;

            if on_axis[row] {
                indices.extend_from_slice(&[a, c, d]);
            } else if on_axis[row + 1] {
                indices.extend_from_slice(&[a, b, d]);
            } else {
                indices.extend_from_slice(&[a, b, d]);
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    let mut accum = accumulate_normals(&positions, &indices);

    // Axis rows first: every ring copy of an apex shares one position, so
    // their sums merge into a single axis-aligned normal.
    for row in 0..row_count {
        if !on_axis[row] {
            continue;
        }
        let mut merged = Vec3::ZERO;
        for ring in 0..rings {
            merged += accum[ring * row_count + row];
        }
        for ring in 0..rings {
            accum[ring * row_count + row] = merged;
        }
    }

    // Seam pair: ring 0 and ring `segments` coincide and must shade alike.
    let seam = segments as usize * row_count;
    for row in 0..row_count {
        let merged = accum[row] + accum[seam + row];
        accum[row] = merged;
        accum[seam + row] = merged;
    }

    let vertices: Vec<MeshVertex> = positions
        .iter()
        .zip(accum.iter())
        .zip(uvs.iter())
        .map(|((pos, n), uv)| MeshVertex {
            position: pos.to_array(),
            normal:   n.normalize_or_zero().to_array(),
            uv:       uv.to_array(),
        })
        .collect();

    Ok(LatheMesh { vertices, indices })
}
