//! Element data types.
//!
//! Label and index arrays are only meaningful with integer elements.
//! A [`DataType`] tag is attached to every [`Element`] so that arrays of floating point values are rejected at runtime, rather than silently truncated.

use derive_more::Display;

/// A data type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
#[rustfmt::skip]
pub enum DataType {
    /// `int8` Integer in `[-2^7, 2^7-1]`.
    #[display("int8")]
    Int8,
    /// `int16` Integer in `[-2^15, 2^15-1]`.
    #[display("int16")]
    Int16,
    /// `int32` Integer in `[-2^31, 2^31-1]`.
    #[display("int32")]
    Int32,
    /// `int64` Integer in `[-2^63, 2^63-1]`.
    #[display("int64")]
    Int64,
    /// `uint8` Integer in `[0, 2^8-1]`.
    #[display("uint8")]
    UInt8,
    /// `uint16` Integer in `[0, 2^16-1]`.
    #[display("uint16")]
    UInt16,
    /// `uint32` Integer in `[0, 2^32-1]`.
    #[display("uint32")]
    UInt32,
    /// `uint64` Integer in `[0, 2^64-1]`.
    #[display("uint64")]
    UInt64,
    /// `float32` IEEE 754 single-precision floating point.
    #[display("float32")]
    Float32,
    /// `float64` IEEE 754 double-precision floating point.
    #[display("float64")]
    Float64,
}

impl DataType {
    /// Returns true if the data type is an integer type.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        !matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns the data type size in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }
}

/// A numeric element that can appear in a label or index array.
pub trait Element: Copy + num::ToPrimitive {
    /// The data type of the element.
    const DATA_TYPE: DataType;

    /// Convert the element to an `i64` if it is an integer representable as an `i64`.
    fn to_index(self) -> Option<i64> {
        if Self::DATA_TYPE.is_integer() {
            self.to_i64()
        } else {
            None
        }
    }
}

macro_rules! impl_element {
    ($raw_type:ty, $data_type:expr) => {
        impl Element for $raw_type {
            const DATA_TYPE: DataType = $data_type;
        }
    };
}

impl_element!(i8, DataType::Int8);
impl_element!(i16, DataType::Int16);
impl_element!(i32, DataType::Int32);
impl_element!(i64, DataType::Int64);
impl_element!(u8, DataType::UInt8);
impl_element!(u16, DataType::UInt16);
impl_element!(u32, DataType::UInt32);
impl_element!(u64, DataType::UInt64);
impl_element!(f32, DataType::Float32);
impl_element!(f64, DataType::Float64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_integer() {
        assert!(i32::DATA_TYPE.is_integer());
        assert!(u64::DATA_TYPE.is_integer());
        assert!(!f32::DATA_TYPE.is_integer());
        assert_eq!(f64::DATA_TYPE.to_string(), "float64");
        assert_eq!(u16::DATA_TYPE.size(), 2);
    }

    #[test]
    fn element_to_index() {
        assert_eq!(7u8.to_index(), Some(7));
        assert_eq!((-3i16).to_index(), Some(-3));
        assert_eq!(u64::MAX.to_index(), None);
        assert_eq!(1.0f32.to_index(), None);
    }
}
