//! Built-in cell normalizers.
//!
//! Each normalizer is a small value type implementing
//! [`ftab_model::CellNormalizer`]. They are pure and total: input that
//! cannot be read yields the normalizer's default instead of an error.
//! [`NormalizerConfig`] is the serializable form used by configuration
//! files.

pub mod choice;
pub mod config;
pub mod datetime;
pub mod numeric;
pub mod text;

pub use choice::{Choice, StringChoice, StringChoiceMulti};
pub use config::{ChoiceConfig, NormalizerConfig};
pub use datetime::{Date, parse_datetime};
pub use numeric::{Float, Integer, IntegerList, digit_runs, parse_number};
pub use text::{Boolean, Digit, Text, WordList};
