// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! STL reader and writers
//!
//! Readers weld vertices whose coordinates compare exactly equal, so a
//! shared corner appearing in several facets is stored once.
//!
//! Binary layout:
//!
//! ```text
//! UINT8[80]    header (ignored)
//! UINT32       triangle count, little-endian
//! per triangle
//!     REAL32[3] normal (ignored on read)
//!     REAL32[3] vertex 1
//!     REAL32[3] vertex 2
//!     REAL32[3] vertex 3
//!     UINT16    attribute byte count
//! ```

use crate::error::{MeshError, Result};
use crate::geometry::{IndexedMesh, VertexWelder};
use crate::utils::math::calculate_triangle_normal;
use nalgebra::{Point3, Vector3};
use std::fs::File;
use std::io::{BufRead, BufWriter, Read, Write};
use std::path::Path;

/// Binary header size in bytes
pub const HEADER_SIZE: usize = 80;

/// Size of one binary triangle record
pub const TRIANGLE_SIZE: usize = 50;

/// Solid name used when none is given
pub const DEFAULT_SOLID_NAME: &str = "MeshEditor";

/// Write an ASCII STL.
///
/// When `normals` is `None`, each facet normal is computed from the winding
/// of its vertices; degenerate triangles get a zero normal.
pub fn write_ascii<W: Write>(
    writer: &mut W,
    mesh: &IndexedMesh,
    normals: Option<&[Vector3<f32>]>,
    name: &str,
) -> Result<()> {
    mesh.validate()?;

    writeln!(writer, "solid {}", name)?;
    for face in 0..mesh.face_count() {
        let [v0, v1, v2] = mesh.triangle(face);
        let normal = facet_normal(normals, face, &v0, &v1, &v2);

        writeln!(writer, "facet normal {} {} {}", normal.x, normal.y, normal.z)?;
        writeln!(writer, "    outer loop")?;
        for v in [v0, v1, v2] {
            writeln!(writer, "        vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "endfacet")?;
    }
    writeln!(writer, "endsolid {}", name)?;

    Ok(())
}

/// Write a binary STL with computed or supplied facet normals
pub fn write_binary<W: Write>(
    writer: &mut W,
    mesh: &IndexedMesh,
    normals: Option<&[Vector3<f32>]>,
) -> Result<()> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    mesh.validate()?;

    let triangles: Vec<StlTriangle> = (0..mesh.face_count())
        .map(|face| {
            let [v0, v1, v2] = mesh.triangle(face);
            let normal = facet_normal(normals, face, &v0, &v1, &v2);
            StlTriangle {
                normal: Normal::new([normal.x, normal.y, normal.z]),
                vertices: [
                    StlVertex::new([v0.x, v0.y, v0.z]),
                    StlVertex::new([v1.x, v1.y, v1.z]),
                    StlVertex::new([v2.x, v2.y, v2.z]),
                ],
            }
        })
        .collect();

    stl_io::write_stl(writer, triangles.iter())?;
    Ok(())
}

fn facet_normal(
    normals: Option<&[Vector3<f32>]>,
    face: usize,
    v0: &Point3<f32>,
    v1: &Point3<f32>,
    v2: &Point3<f32>,
) -> Vector3<f32> {
    normals
        .and_then(|n| n.get(face).copied())
        .unwrap_or_else(|| calculate_triangle_normal(v0, v1, v2))
}

/// Read an ASCII STL.
///
/// Parsing is lenient: a facet that does not contain exactly three parsable
/// `vertex` records is skipped with a warning, as is any line that is not
/// valid UTF-8. A facet cut short by the next `facet` or by the end of input
/// is kept when its three vertices were read. Input without any facet yields
/// an empty mesh. Only I/O failures are returned as errors.
pub fn read_ascii<R: BufRead>(mut reader: R) -> Result<IndexedMesh> {
    let mut welder = VertexWelder::new();
    let mut faces = Vec::new();
    let mut open: Option<OpenFacet> = None;
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let Ok(line) = std::str::from_utf8(&buf) else {
            tracing::warn!(line = line_no, "skipping line that is not valid UTF-8");
            continue;
        };
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword {
            "facet" => {
                if let Some(facet) = open.take() {
                    facet.finish(line_no, &mut welder, &mut faces);
                }
                open = Some(OpenFacet::default());
            }
            "vertex" => {
                if let Some(facet) = open.as_mut() {
                    match parse_vertex(parts) {
                        Some(position) => facet.corners.push(position),
                        None => {
                            tracing::warn!(line = line_no, "unparsable vertex record");
                            facet.malformed = true;
                        }
                    }
                }
            }
            "endfacet" => {
                if let Some(facet) = open.take() {
                    facet.finish(line_no, &mut welder, &mut faces);
                }
            }
            _ => {}
        }
    }

    if let Some(facet) = open.take() {
        facet.finish(line_no, &mut welder, &mut faces);
    }

    Ok(IndexedMesh::new(welder.into_vertices(), faces))
}

/// Corners collected for the facet currently being read
#[derive(Default)]
struct OpenFacet {
    corners: Vec<Point3<f32>>,
    malformed: bool,
}

impl OpenFacet {
    fn finish(self, line_no: usize, welder: &mut VertexWelder, faces: &mut Vec<[u32; 3]>) {
        match self.corners.as_slice() {
            [a, b, c] if !self.malformed => {
                faces.push([welder.insert(*a), welder.insert(*b), welder.insert(*c)]);
            }
            corners => tracing::warn!(
                line = line_no,
                vertices = corners.len(),
                "skipping malformed facet"
            ),
        }
    }
}

fn parse_vertex<'a>(mut parts: impl Iterator<Item = &'a str>) -> Option<Point3<f32>> {
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    let z = parts.next()?.parse().ok()?;
    Some(Point3::new(x, y, z))
}

/// Read a binary STL.
///
/// The triangle count from the header is trusted; input shorter than
/// `84 + 50 * count` bytes fails with [`MeshError::TruncatedInput`].
/// Trailing bytes after the last record are ignored.
pub fn read_binary<R: Read>(mut reader: R) -> Result<IndexedMesh> {
    let mut header = [0u8; HEADER_SIZE + 4];
    let got = read_fully(&mut reader, &mut header)?;
    if got < header.len() {
        return Err(MeshError::TruncatedInput {
            expected: header.len() as u64,
            actual: got as u64,
        });
    }

    let count = u32::from_le_bytes([
        header[HEADER_SIZE],
        header[HEADER_SIZE + 1],
        header[HEADER_SIZE + 2],
        header[HEADER_SIZE + 3],
    ]);
    let expected = binary_size(count);

    let mut welder = VertexWelder::new();
    let mut faces = Vec::with_capacity((count as usize).min(1 << 20));
    let mut record = [0u8; TRIANGLE_SIZE];

    for i in 0..count as u64 {
        let got = read_fully(&mut reader, &mut record)?;
        if got < TRIANGLE_SIZE {
            return Err(MeshError::TruncatedInput {
                expected,
                actual: (HEADER_SIZE + 4) as u64 + i * TRIANGLE_SIZE as u64 + got as u64,
            });
        }

        // Bytes 0..12 hold the normal, 48..50 the attribute count
        faces.push([
            welder.insert(read_point(&record[12..24])),
            welder.insert(read_point(&record[24..36])),
            welder.insert(read_point(&record[36..48])),
        ]);
    }

    Ok(IndexedMesh::new(welder.into_vertices(), faces))
}

/// Exact byte size of a binary STL holding `count` triangles
pub fn binary_size(count: u32) -> u64 {
    (HEADER_SIZE + 4) as u64 + TRIANGLE_SIZE as u64 * count as u64
}

fn read_point(buf: &[u8]) -> Point3<f32> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Point3::new(x, y, z)
}

/// Fill `buf` as far as the reader allows and return the byte count
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Whether raw file contents should be treated as binary STL.
///
/// A size matching the declared triangle count wins over a leading
/// `solid`, since some binary exporters put that word in the header.
pub fn looks_binary(bytes: &[u8]) -> bool {
    if bytes.len() >= HEADER_SIZE + 4 {
        let count = u32::from_le_bytes([
            bytes[HEADER_SIZE],
            bytes[HEADER_SIZE + 1],
            bytes[HEADER_SIZE + 2],
            bytes[HEADER_SIZE + 3],
        ]);
        if binary_size(count) == bytes.len() as u64 {
            return true;
        }
    }
    let text = String::from_utf8_lossy(&bytes[..bytes.len().min(HEADER_SIZE)]);
    !text.trim_start().starts_with("solid")
}

/// Load an STL file, detecting ASCII or binary layout
pub fn load<P: AsRef<Path>>(path: P) -> Result<IndexedMesh> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    let mesh = if looks_binary(&bytes) {
        read_binary(bytes.as_slice())?
    } else {
        read_ascii(bytes.as_slice())?
    };

    tracing::info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "loaded STL"
    );
    Ok(mesh)
}

/// Save a mesh as ASCII or binary STL
pub fn save<P: AsRef<Path>>(path: P, mesh: &IndexedMesh, binary: bool, name: &str) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    if binary {
        write_binary(&mut writer, mesh, None)?;
    } else {
        write_ascii(&mut writer, mesh, None, name)?;
    }
    writer.flush()?;

    tracing::info!(
        path = %path.display(),
        faces = mesh.face_count(),
        binary,
        "saved STL"
    );
    Ok(())
}
