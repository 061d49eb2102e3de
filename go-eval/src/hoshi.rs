use crate::Point;

/// Star points (hoshi) for a square board.
///
/// Boards below 7 have none. Boards of 13 and up use the 4-4 corner points,
/// smaller ones the 3-3 points. Odd boards add the centre; odd boards of 13
/// and up add the four side points as well.
pub fn star_points(size: u8) -> Vec<Point> {
    if size < 7 {
        return Vec::new();
    }

    // 0-based offset from the edge
    let off = if size >= 13 { 3 } else { 2 };
    let far = size - 1 - off;
    let mid = size / 2;
    let odd = !size.is_multiple_of(2);

    let mut pts = vec![(off, off), (off, far), (far, off), (far, far)];
    if odd {
        pts.push((mid, mid));
        if size >= 13 {
            pts.extend([(off, mid), (mid, off), (mid, far), (far, mid)]);
        }
    }
    pts
}

pub fn is_star_point(size: u8, point: Point) -> bool {
    star_points(size).contains(&point)
}
