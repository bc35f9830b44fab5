/// Axes gizmo: three labeled unit edges from the origin
use crate::geometry::Mesh;
use crate::object::Object;
use crate::surface::Color;
use crate::transform::point;

/// Edges origin→X, origin→Y, origin→Z colored red, green, blue and labeled
/// "X", "Y", "Z". Vertex markers and self-rotation are off; enable spin on an
/// object-local instance so it follows the object it annotates.
pub fn axes() -> Object {
    let mesh = Mesh::new(
        vec![
            point(0.0, 0.0, 0.0),
            point(1.0, 0.0, 0.0),
            point(0.0, 1.0, 0.0),
            point(0.0, 0.0, 1.0),
        ],
        vec![vec![0, 1], vec![0, 2], vec![0, 3]],
    );
    let colors = vec![Color::RED, Color::GREEN, Color::BLUE];
    let labels = ["X", "Y", "Z"].map(String::from).to_vec();
    Object::from_parts("axes", mesh, colors, Some(labels))
}
