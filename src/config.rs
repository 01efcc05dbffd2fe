//! Predictor configuration.

use std::str::FromStr;
use log::debug;
use thiserror::Error;

use crate::predictor::*;

/// The widest history or index width accepted by [PredictorConfig::validate].
///
/// Program counters and history registers are 32 bits wide, so no wider
/// index can be formed from them.
pub const MAX_INDEX_BITS: u32 = 32;

/// Errors produced while parsing or validating a [PredictorConfig].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown prediction scheme '{0}'")]
    UnknownScheme(String),

    #[error("'{scheme}' expects {expected} parameter(s), got {got}")]
    ParameterCount { scheme: &'static str, expected: usize, got: usize },

    #[error("invalid width '{value}' for {field}")]
    InvalidWidth { field: &'static str, value: String },

    #[error("{field} is {bits} bits (at most {max} are supported)")]
    WidthTooLarge { field: &'static str, bits: u32, max: u32 },
}

/// The available prediction schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scheme {
    Static,
    Gshare,
    Tournament,
    Custom,
}
impl Scheme {
    pub const ALL: [Scheme; 4] = [
        Scheme::Static, Scheme::Gshare, Scheme::Tournament, Scheme::Custom,
    ];

    /// Return the display name of this scheme.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Gshare => "Gshare",
            Self::Tournament => "Tournament",
            Self::Custom => "Custom",
        }
    }
}
impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration for building a [Predictor].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PredictorConfig {
    pub scheme: Scheme,

    /// Number of bits of global history
    pub ghistory_bits: u32,

    /// Number of bits of local history
    pub lhistory_bits: u32,

    /// Number of program counter bits used to select local history
    pub pc_index_bits: u32,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::Static,
            ghistory_bits: 14,
            lhistory_bits: 10,
            pc_index_bits: 10,
        }
    }
}

impl PredictorConfig {
    pub fn new(scheme: Scheme,
        ghistory_bits: u32, lhistory_bits: u32, pc_index_bits: u32
    ) -> Self
    {
        Self { scheme, ghistory_bits, lhistory_bits, pc_index_bits }
    }

    /// Check that every table described by this configuration can be
    /// indexed and allocated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("ghistory bits", self.ghistory_bits),
            ("lhistory bits", self.lhistory_bits),
            ("pc index bits", self.pc_index_bits),
        ];
        for (field, bits) in fields {
            if bits > MAX_INDEX_BITS || 1usize.checked_shl(bits).is_none() {
                return Err(ConfigError::WidthTooLarge {
                    field, bits, max: MAX_INDEX_BITS,
                });
            }
        }
        Ok(())
    }

    /// Allocate and initialize the tables for the selected scheme.
    pub fn build(&self) -> Predictor {
        debug!("building {} predictor (ghistory={}, lhistory={}, pcindex={})",
            self.scheme, self.ghistory_bits, self.lhistory_bits,
            self.pc_index_bits,
        );
        match self.scheme {
            Scheme::Static => Predictor::Static(TakenPredictor),
            Scheme::Gshare => {
                Predictor::Gshare(GsharePredictor::new(self.ghistory_bits))
            },
            Scheme::Tournament => Predictor::Tournament(
                TournamentPredictor::new(GlobalIndexing::History,
                    self.ghistory_bits, self.lhistory_bits, self.pc_index_bits)
            ),
            Scheme::Custom => Predictor::Custom(
                TournamentPredictor::new(GlobalIndexing::PcXorHistory,
                    self.ghistory_bits, self.lhistory_bits, self.pc_index_bits)
            ),
        }
    }
}

fn parse_width(field: &'static str, s: &str) -> Result<u32, ConfigError> {
    s.trim().parse::<u32>().map_err(|_| ConfigError::InvalidWidth {
        field, value: s.to_string(),
    })
}

/// Parse a predictor selector: `static`, `gshare:<ghistory>`,
/// `tournament:<ghistory>:<lhistory>:<pcindex>`, or `custom` (optionally
/// with the same parameters as `tournament`).
///
/// Widths that are not given keep their default values.
impl FromStr for PredictorConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let name = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
        let params: Vec<&str> = parts.collect();
        let mut cfg = Self::default();

        let check_count = |scheme: Scheme, expected: &[usize]| {
            if expected.contains(&params.len()) {
                Ok(())
            } else {
                Err(ConfigError::ParameterCount {
                    scheme: scheme.name(),
                    expected: *expected.last().unwrap_or(&0),
                    got: params.len(),
                })
            }
        };

        match name.as_str() {
            "static" => {
                check_count(Scheme::Static, &[0])?;
                cfg.scheme = Scheme::Static;
            },
            "gshare" => {
                check_count(Scheme::Gshare, &[1])?;
                cfg.scheme = Scheme::Gshare;
                cfg.ghistory_bits = parse_width("ghistory bits", params[0])?;
            },
            "tournament" | "custom" => {
                let scheme = if name == "custom" {
                    check_count(Scheme::Custom, &[0, 3])?;
                    Scheme::Custom
                } else {
                    check_count(Scheme::Tournament, &[3])?;
                    Scheme::Tournament
                };
                cfg.scheme = scheme;
                if let [g, l, pc] = &params[..] {
                    cfg.ghistory_bits = parse_width("ghistory bits", g)?;
                    cfg.lhistory_bits = parse_width("lhistory bits", l)?;
                    cfg.pc_index_bits = parse_width("pc index bits", pc)?;
                }
            },
            _ => return Err(ConfigError::UnknownScheme(s.to_string())),
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_selectors() {
        assert_eq!("static".parse::<PredictorConfig>().unwrap().scheme,
            Scheme::Static);
        assert_eq!("gshare:13".parse::<PredictorConfig>().unwrap(),
            PredictorConfig::new(Scheme::Gshare, 13, 10, 10));
        assert_eq!("tournament:9:10:10".parse::<PredictorConfig>().unwrap(),
            PredictorConfig::new(Scheme::Tournament, 9, 10, 10));
        assert_eq!("custom".parse::<PredictorConfig>().unwrap(),
            PredictorConfig::new(Scheme::Custom, 14, 10, 10));
        assert_eq!("Custom:12:8:9".parse::<PredictorConfig>().unwrap(),
            PredictorConfig::new(Scheme::Custom, 12, 8, 9));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!("bimodal".parse::<PredictorConfig>(),
            Err(ConfigError::UnknownScheme(_))));
        assert!(matches!("gshare".parse::<PredictorConfig>(),
            Err(ConfigError::ParameterCount { expected: 1, got: 0, .. })));
        assert!(matches!("tournament:1:2".parse::<PredictorConfig>(),
            Err(ConfigError::ParameterCount { .. })));
        assert!(matches!("gshare:x".parse::<PredictorConfig>(),
            Err(ConfigError::InvalidWidth { .. })));
        assert!(matches!("gshare:33".parse::<PredictorConfig>(),
            Err(ConfigError::WidthTooLarge { bits: 33, .. })));
    }

    #[test]
    fn build_matches_scheme() {
        for scheme in Scheme::ALL {
            let p = PredictorConfig::new(scheme, 4, 3, 2).build();
            assert_eq!(p.scheme(), scheme);
            assert_eq!(p.name(), scheme.name());
        }
    }

    #[test]
    fn zero_widths_are_valid() {
        let cfg = PredictorConfig::new(Scheme::Tournament, 0, 0, 0);
        assert_eq!(cfg.validate(), Ok(()));
        let mut p = cfg.build();
        // Every branch shares one counter in each table.
        p.update(0x1234, crate::Outcome::T);
        assert_eq!(p.predict(0x5678), crate::Outcome::T);
    }
}
