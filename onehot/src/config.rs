//! Compile-time configuration of the parser.

/// Configuration for the parser, represented using bitflags.
pub type Config = u64;

pub mod advanced {
    //! Bitflags used for the configuration.

    use super::*;

    #[inline(always)]
    pub const fn flag_is_set(config: Config, flag: Config) -> bool {
        config & flag != 0
    }

    #[inline(always)]
    pub const fn flag_is_not_set(config: Config, flag: Config) -> bool {
        config & flag == 0
    }

    pub const DEFAULT_CONFIG: Config = COMPUTE_HEADER | COMPUTE_SEQUENCE;

    pub const COMPUTE_HEADER: Config = 1 << 0;
    pub const COMPUTE_SEQUENCE: Config = 1 << 1;
    pub const COMPUTE_SEQ_LEN: Config = 1 << 2;
    pub const COMPUTE_CLASS_COUNTS: Config = 1 << 3;
}

use advanced::*;

/// Compile-time builder for the configuration of the parser.
#[derive(Clone, Copy)]
pub struct ParserOptions(Config);

impl ParserOptions {
    /// Creates a default configuration, which computes headers and sequences as bytes.
    #[inline(always)]
    pub const fn default() -> Self {
        Self(DEFAULT_CONFIG)
    }

    /// Load an existing configuration.
    #[inline(always)]
    pub const fn from_config(config: Config) -> Self {
        Self(config)
    }

    /// Build the configuration of the parser.
    #[inline(always)]
    pub const fn config(self) -> Config {
        self.0
    }

    /// Enable the computation of headers (default).
    #[inline(always)]
    pub const fn compute_headers(self) -> Self {
        Self(self.0 | COMPUTE_HEADER)
    }

    /// Disable the computation of headers.
    #[inline(always)]
    pub const fn ignore_headers(self) -> Self {
        Self(self.0 & !COMPUTE_HEADER)
    }

    /// Enable the computation of sequences as bytes (default).
    #[inline(always)]
    pub const fn compute_sequence(self) -> Self {
        Self(self.0 | COMPUTE_SEQUENCE)
    }

    /// Disable the computation of sequences.
    /// Lengths and class counts can still be enabled on their own.
    #[inline(always)]
    pub const fn ignore_sequence(self) -> Self {
        Self(self.0 & !COMPUTE_SEQUENCE)
    }

    /// Count the symbols of each record, without storing them.
    #[inline(always)]
    pub const fn compute_length(self) -> Self {
        Self(self.0 | COMPUTE_SEQ_LEN)
    }

    /// Count the symbols of each class (A, T, G, C, N, other) in each record.
    /// The counts come from the lexer bitmasks, so they are available even
    /// when [`ignore_sequence`](#method.ignore_sequence) is set.
    #[inline(always)]
    pub const fn compute_class_counts(self) -> Self {
        Self(self.0 | COMPUTE_CLASS_COUNTS | COMPUTE_SEQ_LEN)
    }
}
