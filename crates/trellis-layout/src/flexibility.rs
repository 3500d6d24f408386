#![forbid(unsafe_code)]

//! Flexibility: how eagerly a node absorbs excess space.
//!
//! A [`Flex`] is an optional integer priority. Absence means *inflexible*
//! and sorts below every present value. Combination is deliberately
//! asymmetric:
//!
//! - [`Flex::max_of`] ignores absence (`max_of(None, 5) == 5`). Stacks use it
//!   along their axis: if any child can grow, the stack can grow.
//! - [`Flex::min_of`] is dominated by absence (`min_of(None, 5) == None`).
//!   Stacks use it across their axis: one rigid child makes the stack rigid.

use std::cmp::Ordering;
use trellis_core::Axis;

/// An optional flex priority. Larger values are more eager to grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flex(Option<i32>);

impl Flex {
    /// Not flexible, even if there is excess space.
    pub const INFLEXIBLE: Self = Self(None);
    /// The default flex value.
    pub const DEFAULT: Self = Self(Some(0));
    /// Midpoint between the default and the maximum.
    pub const HIGH: Self = Self(Some(i32::MAX / 2));
    /// Midpoint between the default and the minimum.
    pub const LOW: Self = Self(Some(i32::MIN / 2));
    /// The least flexible value that is still flexible.
    pub const MIN: Self = Self(Some(i32::MIN));
    /// The most flexible value.
    pub const MAX: Self = Self(Some(i32::MAX));

    /// A flexible priority.
    #[inline]
    pub const fn new(priority: i32) -> Self {
        Self(Some(priority))
    }

    /// The priority, or `None` when inflexible.
    #[inline]
    pub const fn value(self) -> Option<i32> {
        self.0
    }

    #[inline]
    pub const fn is_flexible(self) -> bool {
        self.0.is_some()
    }

    /// Combine keeping the more flexible value; absence never wins.
    pub const fn max_of(left: Flex, right: Flex) -> Flex {
        match (left.0, right.0) {
            (None, _) => right,
            (_, None) => left,
            (Some(l), Some(r)) => {
                if l >= r {
                    left
                } else {
                    right
                }
            }
        }
    }

    /// Combine keeping the less flexible value; absence always wins.
    pub const fn min_of(left: Flex, right: Flex) -> Flex {
        match (left.0, right.0) {
            (Some(l), Some(r)) => {
                if l <= r {
                    left
                } else {
                    right
                }
            }
            _ => Flex::INFLEXIBLE,
        }
    }
}

impl Ord for Flex {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(l), Some(r)) => l.cmp(&r),
        }
    }
}

impl PartialOrd for Flex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i32> for Flex {
    fn from(priority: i32) -> Self {
        Self::new(priority)
    }
}

impl From<Option<i32>> for Flex {
    fn from(priority: Option<i32>) -> Self {
        Self(priority)
    }
}

/// Per-dimension flexibility of a layout node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flexibility {
    pub horizontal: Flex,
    pub vertical: Flex,
}

impl Flexibility {
    /// Not flexible, even if there is excess space.
    ///
    /// Inflexible nodes may still be compressed when space is short.
    pub const INFLEXIBLE: Self = Self::new(Flex::INFLEXIBLE, Flex::INFLEXIBLE);
    /// The default flexibility.
    pub const FLEXIBLE: Self = Self::new(Flex::DEFAULT, Flex::DEFAULT);
    pub const HIGH: Self = Self::new(Flex::HIGH, Flex::HIGH);
    pub const LOW: Self = Self::new(Flex::LOW, Flex::LOW);
    pub const MIN: Self = Self::new(Flex::MIN, Flex::MIN);
    pub const MAX: Self = Self::new(Flex::MAX, Flex::MAX);

    #[inline]
    pub const fn new(horizontal: Flex, vertical: Flex) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// The flex along `axis`.
    #[inline]
    pub const fn flex(&self, axis: Axis) -> Flex {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Default flexibility of a node stacking `children` along `axis`.
    ///
    /// Along the axis the most flexible child wins; across it the least
    /// flexible child wins. With no children the result is inflexible along
    /// the axis and maximally flexible across it.
    pub fn stacked(axis: Axis, children: impl IntoIterator<Item = Flexibility>) -> Flexibility {
        children
            .into_iter()
            .fold(
                AxisFlexibility::from_flexes(axis, Flex::INFLEXIBLE, Flex::MAX),
                |acc, child| {
                    let child = AxisFlexibility::new(axis, child);
                    AxisFlexibility::from_flexes(
                        axis,
                        Flex::max_of(acc.axis_flex(), child.axis_flex()),
                        Flex::min_of(acc.cross_flex(), child.cross_flex()),
                    )
                },
            )
            .flexibility
    }
}

impl Default for Flexibility {
    fn default() -> Self {
        Self::FLEXIBLE
    }
}

/// A [`Flexibility`] viewed along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisFlexibility {
    pub axis: Axis,
    pub flexibility: Flexibility,
}

impl AxisFlexibility {
    #[inline]
    pub const fn new(axis: Axis, flexibility: Flexibility) -> Self {
        Self { axis, flexibility }
    }

    /// Build from axis-relative flex values.
    pub const fn from_flexes(axis: Axis, axis_flex: Flex, cross_flex: Flex) -> Self {
        let flexibility = match axis {
            Axis::Horizontal => Flexibility::new(axis_flex, cross_flex),
            Axis::Vertical => Flexibility::new(cross_flex, axis_flex),
        };
        Self { axis, flexibility }
    }

    #[inline]
    pub const fn axis_flex(&self) -> Flex {
        self.flexibility.flex(self.axis)
    }

    #[inline]
    pub const fn cross_flex(&self) -> Flex {
        self.flexibility.flex(self.axis.cross())
    }
}
