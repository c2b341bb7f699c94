use anyhow::anyhow;
use serde::{
    de::{self, SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{fmt, str::FromStr};

/// A grid coordinate `(v, h)`: row index, then column index.
///
/// Doubles as grid bounds, in which case `v` and `h` are the exclusive
/// limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridVector {
    pub v: i32,
    pub h: i32,
}

impl GridVector {
    pub fn new(v: i32, h: i32) -> Self {
        Self { v, h }
    }

    pub fn at_center(&self) -> GridVector {
        *self
    }

    pub fn at_down(&self) -> GridVector {
        GridVector {
            v: self.v + 1,
            h: self.h,
        }
    }

    pub fn at_left(&self) -> GridVector {
        GridVector {
            v: self.v,
            h: self.h - 1,
        }
    }

    pub fn at_right(&self) -> GridVector {
        GridVector {
            v: self.v,
            h: self.h + 1,
        }
    }

    pub fn at_up(&self) -> GridVector {
        GridVector {
            v: self.v - 1,
            h: self.h,
        }
    }

    pub fn l1_distance(&self, other: &GridVector) -> u64 {
        self.v.abs_diff(other.v) as u64 + self.h.abs_diff(other.h) as u64
    }

    /// Treats `self` as grid bounds. Unit moves may step outside the grid, so
    /// callers filter generated cells through this.
    pub fn within_grid(&self, cell: &GridVector) -> bool {
        cell.v >= 0 && cell.h >= 0 && cell.v < self.v && cell.h < self.h
    }

    /// Every cell of a `self`-sized grid in row-major order. Seeded sampling
    /// draws from this enumeration, so the order is part of the determinism
    /// contract.
    pub fn enumerate_cells(&self) -> Vec<GridVector> {
        let mut cells = Vec::with_capacity(self.v.max(0) as usize * self.h.max(0) as usize);
        for v in 0..self.v {
            for h in 0..self.h {
                cells.push(GridVector { v, h });
            }
        }
        cells
    }
}

impl fmt::Display for GridVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.v, self.h)
    }
}

impl FromStr for GridVector {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let v = parts
            .next()
            .filter(|part| !part.trim().is_empty())
            .ok_or_else(|| anyhow!("empty coordinate '{}'", s))?;
        let h = parts
            .next()
            .ok_or_else(|| anyhow!("coordinate '{}' is missing its column", s))?;
        Ok(GridVector {
            v: v.trim()
                .parse()
                .map_err(|e| anyhow!("invalid row in '{}': {}", s, e))?,
            h: h.trim()
                .parse()
                .map_err(|e| anyhow!("invalid column in '{}': {}", s, e))?,
        })
    }
}

impl Serialize for GridVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.v)?;
        seq.serialize_element(&self.h)?;
        seq.end()
    }
}

struct GridVectorVisitor;

impl<'de> Visitor<'de> for GridVectorVisitor {
    type Value = GridVector;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a [v, h] pair of integers")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let v = seq
            .next_element::<i32>()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let h = seq
            .next_element::<i32>()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::custom("expected exactly two integers"));
        }
        Ok(GridVector { v, h })
    }
}

impl<'de> Deserialize<'de> for GridVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(GridVectorVisitor)
    }
}
