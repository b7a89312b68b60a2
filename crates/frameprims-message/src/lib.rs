//! Message-format seam for the frameprims codec.
//!
//! The framing layer never interprets message bytes itself. It learns a
//! message's length from the wire, slices exactly that byte range, and
//! hands it to a [`MessageFormat`], the one trait a serialization
//! format implements to ride on frameprims framing.
//!
//! This is the lowest layer of frameprims. The codec crate builds on
//! the [`MessageFormat`] trait provided here.

pub mod error;
pub mod raw;
pub mod traits;

#[cfg(feature = "json")]
pub mod json;

pub use error::{ParseError, SerializeError};
pub use raw::RawFormat;
pub use traits::MessageFormat;

#[cfg(feature = "json")]
pub use json::JsonFormat;
