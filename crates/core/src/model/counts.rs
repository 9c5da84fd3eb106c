use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ProdlineError, Result};

/// The three product lines tracked by every reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderType {
    A,
    B,
    C,
}

impl OrderType {
    pub const ALL: [OrderType; 3] = [OrderType::A, OrderType::B, OrderType::C];

    /// Key used in JSON payloads (`typeA`, ...).
    pub fn wire_label(self) -> &'static str {
        match self {
            Self::A => "typeA",
            Self::B => "typeB",
            Self::C => "typeC",
        }
    }

    /// Label shown on dashboard widgets.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::A => "Type A",
            Self::B => "Type B",
            Self::C => "Type C",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

impl FromStr for OrderType {
    type Err = ProdlineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "typea" | "type a" => Ok(Self::A),
            "b" | "typeb" | "type b" => Ok(Self::B),
            "c" | "typec" | "type c" => Ok(Self::C),
            _ => Err(ProdlineError::Parse(format!("unknown order type: {s}"))),
        }
    }
}

/// One integer per order type. Every field is required on the wire, a
/// payload missing `typeC` is rejected rather than defaulted. Values match the
/// 32-bit `INTEGER` columns, so an out-of-range count fails decoding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TypeCounts {
    #[serde(rename = "typeA")]
    pub type_a: i32,
    #[serde(rename = "typeB")]
    pub type_b: i32,
    #[serde(rename = "typeC")]
    pub type_c: i32,
}

impl TypeCounts {
    pub fn new(type_a: i32, type_b: i32, type_c: i32) -> Self {
        Self {
            type_a,
            type_b,
            type_c,
        }
    }

    pub fn get(&self, ty: OrderType) -> i32 {
        match ty {
            OrderType::A => self.type_a,
            OrderType::B => self.type_b,
            OrderType::C => self.type_c,
        }
    }

    pub fn get_mut(&mut self, ty: OrderType) -> &mut i32 {
        match ty {
            OrderType::A => &mut self.type_a,
            OrderType::B => &mut self.type_b,
            OrderType::C => &mut self.type_c,
        }
    }

    pub fn total(&self) -> i64 {
        i64::from(self.type_a) + i64::from(self.type_b) + i64::from(self.type_c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OrderType, i32)> + '_ {
        OrderType::ALL.into_iter().map(|ty| (ty, self.get(ty)))
    }
}
