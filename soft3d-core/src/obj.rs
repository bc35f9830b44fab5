/// Wavefront OBJ subset parser (`v` and `f` statements)
use std::fs;
use std::path::Path;

use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt},
    multi::many1,
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::MeshError;
use crate::geometry::{Face, Mesh};
use crate::transform::{point, Vec4};

/// Parse OBJ text into a validated mesh.
///
/// `v x y z` adds a vertex with w = 1 (an optional fourth coordinate is
/// ignored). `f a b c ...` adds a face; only the part of each token before
/// the first `/` is used, as a 1-based vertex index. Every other statement
/// is skipped.
pub fn parse_obj(input: &str) -> Result<Mesh, MeshError> {
    let mut mesh = Mesh::default();

    for (number, line) in input.lines().enumerate() {
        let line_no = number + 1;
        let line = line.trim();
        let keyword = line.split_whitespace().next().unwrap_or_default();

        match keyword {
            "v" => {
                let (_, v) = all_consuming(vertex_statement)(line)
                    .map_err(|_| parse_error(line_no, "expected `v x y z`", line))?;
                mesh.vertices.push(v);
            }
            "f" => {
                let (_, indices) = all_consuming(face_statement)(line)
                    .map_err(|_| parse_error(line_no, "expected `f i j k ...`", line))?;
                mesh.faces.push(to_zero_based(line_no, indices)?);
            }
            _ => {}
        }
    }

    mesh.validate()?;
    log::debug!(
        "parsed OBJ: {} vertices, {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

/// Read and parse an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = parse_obj(&text)?;
    log::info!(
        "loaded {} ({} vertices, {} faces)",
        path.display(),
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

fn parse_error(line: usize, expected: &str, text: &str) -> MeshError {
    MeshError::Parse {
        line,
        message: format!("{expected}, found `{text}`"),
    }
}

fn to_zero_based(line: usize, indices: Vec<usize>) -> Result<Face, MeshError> {
    if indices.len() < 2 {
        return Err(MeshError::Parse {
            line,
            message: format!("face needs at least 2 vertices, found {}", indices.len()),
        });
    }
    indices
        .into_iter()
        .map(|i| {
            i.checked_sub(1).ok_or_else(|| MeshError::Parse {
                line,
                message: "vertex indices start at 1".to_string(),
            })
        })
        .collect()
}

fn vertex_statement(input: &str) -> IResult<&str, Vec4> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(space1, float)(input)?;
    let (input, y) = preceded(space1, float)(input)?;
    let (input, z) = preceded(space1, float)(input)?;
    let (input, _) = opt(preceded(space1, float))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, point(x, y, z)))
}

fn face_statement(input: &str) -> IResult<&str, Vec<usize>> {
    let (input, _) = tag("f")(input)?;
    terminated(many1(preceded(space1, face_index)), space0)(input)
}

/// `7`, `7/2`, `7//3` or `7/2/3`, keeping the leading vertex index
fn face_index(input: &str) -> IResult<&str, usize> {
    let (input, index) = map_res(digit1, str::parse::<usize>)(input)?;
    let (input, _) = opt(preceded(char('/'), take_till(char::is_whitespace)))(input)?;
    Ok((input, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
# a comment
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.5 -2e-1
vn 0 0 1
vt 0.5 0.5
f 1 2 3
";

    #[test]
    fn test_parse_simple_triangle() {
        let mesh = parse_obj(TRIANGLE).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert!((mesh.vertices[2] - point(0.0, 1.5, -0.2)).norm() < 1e-6);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_face_tokens_keep_index_before_slash() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\r\nf 1/1/1 2//2 3/3 4\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.faces, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_optional_w_is_ignored() {
        let mesh = parse_obj("v 1 2 3 0.5\n").unwrap();
        assert_eq!(mesh.vertices[0], point(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_malformed_vertex_reports_line() {
        let err = parse_obj("v 0 0 0\nv 1 oops 0\n").unwrap_err();
        match err {
            MeshError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("v 1 oops 0"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_index_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 0 1\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_negative_index_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf -1 -2\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_index_past_end_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::FaceIndexOutOfRange {
                face: 0,
                index: 2,
                count: 2
            }
        ));
    }

    #[test]
    fn test_single_vertex_face_rejected() {
        let err = parse_obj("v 0 0 0\nf 1\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_obj("/nonexistent/model.obj").unwrap_err();
        assert!(matches!(err, MeshError::Io { .. }));
    }
}
