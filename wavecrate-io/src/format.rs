//! Text formatting shared by the OBJ and MTL writers

use std::fmt;
use wavecrate_core::{Triplet, Vector3f};

/// A float written with six decimals and a `.` separator
#[derive(Debug, Clone, Copy)]
pub struct Float(pub f32);

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// Space separated floats
pub struct Floats<'a>(pub &'a [f32]);

impl fmt::Display for Floats<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", Float(*value))?;
        }
        Ok(())
    }
}

/// The three components of a vector, space separated
pub struct Components(pub Vector3f);

impl fmt::Display for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", Float(self.0.x), Float(self.0.y), Float(self.0.z))
    }
}

/// A triplet in `v`, `v/vt`, `v//vn` or `v/vt/vn` form
pub struct TripletText(pub Triplet);

impl fmt::Display for TripletText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        match (t.has_texture(), t.has_normal()) {
            (false, false) => write!(f, "{}", t.vertex),
            (true, false) => write!(f, "{}/{}", t.vertex, t.texture),
            (false, true) => write!(f, "{}//{}", t.vertex, t.normal),
            (true, true) => write!(f, "{}/{}/{}", t.vertex, t.texture, t.normal),
        }
    }
}
