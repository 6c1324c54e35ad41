use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Integer-pixel rectangle in the host's native coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2,
            y: self.y + self.height / 2,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.y >= self.y && point.x < self.right() && point.y < self.bottom()
    }

    /// Squared distance from `point` to the nearest edge of the rectangle
    /// (zero when the point lies inside). Used to pick the nearest monitor.
    pub fn distance_sq(&self, point: Point) -> i64 {
        let dx = if point.x < self.x {
            self.x - point.x
        } else if point.x >= self.right() {
            point.x - self.right() + 1
        } else {
            0
        };
        let dy = if point.y < self.y {
            self.y - point.y
        } else if point.y >= self.bottom() {
            point.y - self.bottom() + 1
        } else {
            0
        };
        dx as i64 * dx as i64 + dy as i64 * dy as i64
    }
}
