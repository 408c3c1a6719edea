//! Protocol messages — typed descriptors that a transport turns into OSC packets.

use std::fmt;

use rosc::{encoder, OscBundle, OscMessage, OscPacket, OscTime, OscType};
use serde::{Deserialize, Serialize};

use crate::error::{FluidError, Result};

/// One typed message argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Arg {
    String(String),
    Integer(i64),
    Float(f64),
}

impl Arg {
    pub fn string(s: impl Into<String>) -> Self {
        Arg::String(s.into())
    }

    fn to_osc(&self) -> Result<OscType> {
        Ok(match self {
            Arg::String(s) => OscType::String(s.clone()),
            Arg::Integer(i) => OscType::Int(
                i32::try_from(*i)
                    .map_err(|_| FluidError::Encode(format!("integer {i} does not fit in 32 bits")))?,
            ),
            Arg::Float(f) => OscType::Float(*f as f32),
        })
    }

    fn from_osc(arg: &OscType) -> Option<Self> {
        match arg {
            OscType::String(s) => Some(Arg::String(s.clone())),
            OscType::Int(i) => Some(Arg::Integer(i64::from(*i))),
            OscType::Long(i) => Some(Arg::Integer(*i)),
            OscType::Float(f) => Some(Arg::Float(f64::from(*f))),
            OscType::Double(d) => Some(Arg::Float(*d)),
            _ => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::String(s) => write!(f, "{s:?}"),
            Arg::Integer(i) => write!(f, "{i}"),
            Arg::Float(v) => write!(f, "{v}"),
        }
    }
}

/// An address plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub address: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Arg>,
}

impl Message {
    pub fn new(address: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            address: address.into(),
            args,
        }
    }

    /// Convert to a rosc message. Integers are sent as 32-bit ints and
    /// floats as 32-bit floats.
    pub fn to_osc(&self) -> Result<OscMessage> {
        Ok(OscMessage {
            addr: self.address.clone(),
            args: self.args.iter().map(Arg::to_osc).collect::<Result<_>>()?,
        })
    }

    /// Convert from a rosc message. Returns `None` for argument types that
    /// have no counterpart here (blobs, time tags, ...).
    pub fn from_osc(msg: &OscMessage) -> Option<Self> {
        Some(Self {
            address: msg.addr.clone(),
            args: msg.args.iter().map(Arg::from_osc).collect::<Option<_>>()?,
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Encode a batch as a single OSC bundle with an immediate time tag, so
/// the receiver applies it as one edit.
pub fn encode_batch(batch: &[Message]) -> Result<Vec<u8>> {
    let content = batch
        .iter()
        .map(|m| m.to_osc().map(OscPacket::Message))
        .collect::<Result<Vec<_>>>()?;
    let packet = OscPacket::Bundle(OscBundle {
        timetag: OscTime {
            seconds: 0,
            fractional: 1,
        },
        content,
    });
    encoder::encode(&packet).map_err(|e| FluidError::Encode(format!("{e:?}")))
}
