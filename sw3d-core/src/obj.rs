/// Loader for the vertex/face subset of the OBJ text format
use nom::{
    bytes::complete::take_till,
    character::complete::{char, space0, space1, u32 as index},
    combinator::opt,
    multi::many1,
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};
use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::geometry::{Mesh, Triangle};
use crate::vector::Vector3H;

/// Read and parse an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let mesh = parse_obj(&text)?;
    log::info!("loaded {} triangles from {}", mesh.len(), path.display());
    Ok(mesh)
}

/// Parse OBJ text.
///
/// `v x y z` lines define vertices and `f a b c ...` lines define faces by
/// 1-based vertex index; `a/b/c` face tokens use only the vertex index.
/// Faces with more than three corners are split into a triangle fan.
/// Every other line (`vn`, `vt`, comments, groups, ...) is ignored.
pub fn parse_obj(input: &str) -> Result<Mesh, LoadError> {
    let mut vertices: Vec<Vector3H> = Vec::new();
    let mut mesh = Mesh::new();

    for (number, line) in input.lines().enumerate().map(|(i, l)| (i + 1, l.trim())) {
        match line.split_whitespace().next() {
            Some("v") => {
                let (_, vertex) = parse_vertex(line)
                    .map_err(|e| LoadError::parse(number, format!("bad vertex: {:?}", e)))?;
                vertices.push(vertex);
            }
            Some("f") => {
                let (_, face) = parse_face(line)
                    .map_err(|e| LoadError::parse(number, format!("bad face: {:?}", e)))?;
                if face.len() < 3 {
                    return Err(LoadError::parse(
                        number,
                        format!("face needs at least 3 vertices, got {}", face.len()),
                    ));
                }
                let corners = face
                    .iter()
                    .map(|&i| {
                        (i as usize)
                            .checked_sub(1)
                            .and_then(|i| vertices.get(i).copied())
                            .ok_or_else(|| {
                                LoadError::parse(number, format!("face references undefined vertex {}", i))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                // Polygons become a fan around the first corner
                for pair in corners[1..].windows(2) {
                    mesh.add_triangle(Triangle::new(corners[0], pair[0], pair[1]));
                }
            }
            _ => {}
        }
    }

    Ok(mesh)
}

fn parse_vertex(input: &str) -> IResult<&str, Vector3H> {
    let (input, _) = terminated(char('v'), space1)(input)?;
    let (input, x) = float(input)?;
    let (input, y) = preceded(space1, float)(input)?;
    let (input, z) = preceded(space1, float)(input)?;
    Ok((input, Vector3H::new(x, y, z)))
}

fn parse_face(input: &str) -> IResult<&str, Vec<u32>> {
    let (input, _) = char('f')(input)?;
    let (input, indices) = many1(preceded(space1, face_index))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, indices))
}

/// Vertex index of a face token, ignoring any `/texture/normal` suffix
fn face_index(input: &str) -> IResult<&str, u32> {
    terminated(index, opt(preceded(char('/'), take_till(|c: char| c.is_whitespace()))))(input)
}
