//! Storage of per-candidate attributes
//!
//! A column holds one physical quantity for every candidate of one object type
//! in a batch of events. It is either flat (just the candidates) or jagged, in
//! which case an offsets array records where each event's candidates start and
//! end. Columns which are used together must be index-aligned, that is, have
//! exactly the same shape.

use crate::error::{Error, Result};

use std::fmt;

/// Per-candidate attribute values, optionally grouped by event
#[derive(Clone, Debug, PartialEq)]
pub struct Column<T> {
    /// Attribute values of all candidates, in event order
    values: Vec<T>,

    /// Event boundaries into `values` (`offsets.len()` is `num_events + 1`)
    offsets: Option<Vec<usize>>,
}

/// Per-candidate selection results
pub type Mask = Column<bool>;

impl<T> Column<T> {
    /// Build a flat column with one value per candidate
    pub fn flat(values: Vec<T>) -> Self {
        Self {
            values,
            offsets: None,
        }
    }

    /// Build a jagged column from per-event candidate lists
    pub fn jagged(events: Vec<Vec<T>>) -> Self {
        let mut offsets = Vec::with_capacity(events.len() + 1);
        offsets.push(0);
        let mut values = Vec::with_capacity(events.iter().map(Vec::len).sum());
        for event in events {
            values.extend(event);
            offsets.push(values.len());
        }
        Self {
            values,
            offsets: Some(offsets),
        }
    }

    /// Build a jagged column from flat values and event offsets
    pub fn from_parts(offsets: Vec<usize>, values: Vec<T>) -> Result<Self> {
        if offsets.first() != Some(&0) {
            return Err(Error::InvalidOffsets("offsets must start at 0".into()));
        }
        if let Some(pos) = offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(Error::InvalidOffsets(format!(
                "offsets decrease between events {} and {}",
                pos,
                pos + 1
            )));
        }
        let last = offsets[offsets.len() - 1];
        if last != values.len() {
            return Err(Error::InvalidOffsets(format!(
                "offsets end at {} but there are {} values",
                last,
                values.len()
            )));
        }
        Ok(Self {
            values,
            offsets: Some(offsets),
        })
    }

    /// Build a column of the given shape from per-candidate values
    pub(crate) fn with_shape(shape: Shape<'_>, values: Vec<T>) -> Self {
        debug_assert_eq!(shape.len, values.len());
        Self {
            values,
            offsets: shape.offsets.map(<[usize]>::to_vec),
        }
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Truth that there are no candidates at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Per-candidate values, in event order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Event offsets, if this column is jagged
    pub fn offsets(&self) -> Option<&[usize]> {
        self.offsets.as_deref()
    }

    /// Shape of this column, used to check index alignment
    pub fn shape(&self) -> Shape<'_> {
        Shape {
            len: self.values.len(),
            offsets: self.offsets(),
        }
    }

    /// Iterate over per-event candidate slices (a flat column is one event)
    pub fn events(&self) -> impl Iterator<Item = &[T]> + '_ {
        let bounds: Box<dyn Iterator<Item = (usize, usize)> + '_> = match &self.offsets {
            Some(offsets) => Box::new(offsets.windows(2).map(|w| (w[0], w[1]))),
            None => Box::new(std::iter::once((0, self.values.len()))),
        };
        bounds.map(move |(start, end)| &self.values[start..end])
    }
}

impl<T> From<Vec<T>> for Column<T> {
    fn from(values: Vec<T>) -> Self {
        Self::flat(values)
    }
}

impl Mask {
    /// Number of selected candidates
    pub fn count_selected(&self) -> usize {
        self.values.iter().filter(|&&pass| pass).count()
    }
}

/// Layout of a column: number of values and event boundaries
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Shape<'a> {
    /// Number of candidates
    pub len: usize,

    /// Event offsets of jagged columns
    pub offsets: Option<&'a [usize]>,
}

impl fmt::Display for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offsets {
            Some(offsets) => write!(
                f,
                "{} values in {} events",
                self.len,
                offsets.len().saturating_sub(1)
            ),
            None => write!(f, "{} flat values", self.len),
        }
    }
}

/// Check that named columns are index-aligned and return their common shape
///
/// The first column serves as the reference. Must be called before any
/// element-wise comparison takes place.
///
pub fn aligned_shape<'a>(columns: &[(&'static str, Shape<'a>)]) -> Result<Shape<'a>> {
    let Some(((reference, expected), others)) = columns.split_first() else {
        return Ok(Shape {
            len: 0,
            offsets: None,
        });
    };
    for (argument, found) in others {
        if found != expected {
            return Err(Error::ShapeMismatch {
                reference: *reference,
                argument: *argument,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }
    Ok(*expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jagged_layout() {
        let col = Column::jagged(vec![vec![1, 2], vec![], vec![3]]);
        assert_eq!(col.values(), &[1, 2, 3]);
        assert_eq!(col.offsets(), Some(&[0, 2, 2, 3][..]));
        let events = col.events().collect::<Vec<_>>();
        assert_eq!(events, vec![&[1, 2][..], &[][..], &[3][..]]);
    }

    #[test]
    fn flat_is_one_event() {
        let col = Column::from(vec![1.5, 2.5]);
        assert_eq!(col.offsets(), None);
        assert_eq!(col.events().count(), 1);
        assert_eq!(col.shape().to_string(), "2 flat values");
    }

    #[test]
    fn offsets_validation() {
        assert!(Column::from_parts(vec![0, 1, 3], vec![1, 2, 3]).is_ok());
        for (offsets, values) in [
            (vec![], vec![1]),
            (vec![1, 2], vec![1, 2]),
            (vec![0, 2, 1, 3], vec![1, 2, 3]),
            (vec![0, 2], vec![1, 2, 3]),
        ] {
            assert!(matches!(
                Column::from_parts(offsets, values),
                Err(Error::InvalidOffsets(_))
            ));
        }
    }

    #[test]
    fn alignment() {
        let a = Column::jagged(vec![vec![1.0], vec![2.0, 3.0]]);
        let b = Column::jagged(vec![vec![true], vec![false, true]]);
        let shape = aligned_shape(&[("a", a.shape()), ("b", b.shape())]).unwrap();
        assert_eq!(shape, a.shape());

        // Same number of values, different event boundaries
        let c = Column::jagged(vec![vec![1, 2], vec![3]]);
        match aligned_shape(&[("a", a.shape()), ("c", c.shape())]) {
            Err(Error::ShapeMismatch {
                reference,
                argument,
                ..
            }) => {
                assert_eq!(reference, "a");
                assert_eq!(argument, "c");
            }
            other => panic!("unexpected alignment result {other:?}"),
        }

        // Flat versus jagged
        let d = Column::flat(vec![1, 2, 3]);
        assert!(aligned_shape(&[("a", a.shape()), ("d", d.shape())]).is_err());
    }

    #[test]
    fn count_selected() {
        let mask = Column::flat(vec![true, false, true, true]);
        assert_eq!(mask.count_selected(), 3);
    }
}
