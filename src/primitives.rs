pub mod segment;
pub mod circle;
pub mod rectangle;

pub use segment::intersect_segment;
pub use circle::{intersect_circle, Circle};
pub use rectangle::{intersect_axis_aligned_rect, intersect_oriented_rect, OrientedRect};
