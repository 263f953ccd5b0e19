/// Orthographic view-projection for a `width` × `height` grid.
///
/// Grid cell `(x, y)` occupies `[x, x + 1] × [-y - 1, -y]` in world space; the
/// camera sits over the grid centre looking down -Z, so the whole grid fills
/// clip space. Column-major, ready for `uniform mat4`.
pub fn grid_view_projection(width: f32, height: f32, near: f32, far: f32) -> [f32; 16] {
    let depth = 1.0 / (near - far);
    // eye at (width / 2, -height / 2, 1)
    let eye_z = 1.0;

    [
        2.0 / width, 0.0, 0.0, 0.0, //
        0.0, 2.0 / height, 0.0, 0.0, //
        0.0, 0.0, depth, 0.0, //
        -1.0, 1.0, (near - eye_z) * depth, 1.0,
    ]
}
