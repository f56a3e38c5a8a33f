use serde::{
    Deserialize,
    Serialize
};

use crate::volumeerror::{
    VolumeError,
    VolumeResult
};

/// Axis-aligned rectangle [x_min, x_max] × [y_min, y_max].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64
}

impl Rectangle {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> VolumeResult<Rectangle> {
        let rectangle = Rectangle { x_min, x_max, y_min, y_max };
        rectangle.validate()?;
        Ok(rectangle)
    }

    pub fn unit_square() -> Rectangle {
        Rectangle { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 }
    }

    /// Checks bounds after deserialization, which bypasses `new`.
    pub fn validate(&self) -> VolumeResult<()> {
        let bounds = [self.x_min, self.x_max, self.y_min, self.y_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(VolumeError::InvalidDomain(format!("bounds must be finite, got {}", self)));
        }
        if self.x_min >= self.x_max || self.y_min >= self.y_max {
            return Err(VolumeError::InvalidDomain(format!("lower bounds must be below upper bounds, got {}", self)));
        }
        Ok(())
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn is_unit_square(&self) -> bool {
        *self == Rectangle::unit_square()
    }

    pub fn describe(&self) -> String {
        if self.is_unit_square() {
            format!("Unit Square {}", self)
        } else {
            self.to_string()
        }
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Rectangle::unit_square()
    }
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}] × [{},{}]", self.x_min, self.x_max, self.y_min, self.y_max)
    }
}
