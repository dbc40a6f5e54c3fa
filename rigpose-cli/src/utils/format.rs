//! Formatting utilities

use rigpose::glam::Mat4;

/// Format a duration in seconds
pub fn format_seconds(seconds: f32) -> String {
    format!("{seconds:.3}s")
}

/// Format a matrix as four rows, row-major for reading
pub fn format_matrix_rows(matrix: &Mat4) -> [String; 4] {
    let m = matrix.transpose().to_cols_array_2d();
    m.map(|row| {
        row.iter()
            .map(|v| format!("{:>9.4}", clean_zero(*v)))
            .collect::<Vec<_>>()
            .join(" ")
    })
}

// Avoid printing "-0.0000"
fn clean_zero(value: f32) -> f32 {
    if value.abs() < 5e-5 { 0.0 } else { value }
}
