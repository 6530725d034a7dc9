//! Symbol provider: turns text into a square grid of QR modules
//!
//! The encoding itself is delegated to the `qrcode` crate. Everything past this
//! module only ever sees a [`Grid`].

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised when text cannot be turned into a symbol
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Nothing to encode
    #[error("cannot encode empty text")]
    EmptyInput,

    /// The text does not fit the largest symbol version at this level
    #[error("text of {len} bytes does not fit a QR symbol at error correction level {level}")]
    DataTooLong { len: usize, level: EcLevel },

    /// Any other failure reported by the encoder
    #[error("QR encoder failed: {0}")]
    Encoder(String),
}

/// Error correction level, weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
pub enum EcLevel {
    /// Recovers about 7% of codewords
    #[default]
    #[serde(alias = "l", alias = "low")]
    L,
    /// Recovers about 15% of codewords
    #[serde(alias = "m", alias = "medium")]
    M,
    /// Recovers about 25% of codewords
    #[serde(alias = "q", alias = "quartile")]
    Q,
    /// Recovers about 30% of codewords
    #[serde(alias = "h", alias = "high")]
    H,
}

impl EcLevel {
    /// All levels in ascending strength
    pub const ALL: [EcLevel; 4] = [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H];

    fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        };
        f.write_str(letter)
    }
}

impl FromStr for EcLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(EcLevel::L),
            "M" | "MEDIUM" => Ok(EcLevel::M),
            "Q" | "QUARTILE" => Ok(EcLevel::Q),
            "H" | "HIGH" => Ok(EcLevel::H),
            other => Err(format!(
                "unknown error correction level '{}' (expected L, M, Q or H)",
                other
            )),
        }
    }
}

/// A square grid of modules; `true` is a dark module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    modules: Vec<bool>,
}

impl Grid {
    /// Build a grid from row-major modules. Returns `None` unless
    /// `modules.len() == size * size` and `size > 0`.
    pub fn new(size: usize, modules: Vec<bool>) -> Option<Self> {
        if size == 0 || modules.len() != size * size {
            return None;
        }
        Some(Self { size, modules })
    }

    /// Build a grid from rows; every row must be as long as there are rows
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Self::new(size, rows.into_iter().flatten().collect())
    }

    /// Side length N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the module at column `x`, row `y` is dark.
    /// Coordinates outside the grid are light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.modules[y * self.size + x]
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&dark| dark).count()
    }
}

/// Anything that can turn text into a module grid
pub trait SymbolProvider {
    fn encode(&self, text: &str, level: EcLevel) -> Result<Grid, EncodingError>;
}

/// Symbol provider backed by the `qrcode` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl SymbolProvider for QrEncoder {
    fn encode(&self, text: &str, level: EcLevel) -> Result<Grid, EncodingError> {
        if text.is_empty() {
            return Err(EncodingError::EmptyInput);
        }

        let code = qrcode::QrCode::with_error_correction_level(text.as_bytes(), level.to_qrcode())
            .map_err(|err| match err {
                qrcode::types::QrError::DataTooLong => EncodingError::DataTooLong {
                    len: text.len(),
                    level,
                },
                other => EncodingError::Encoder(other.to_string()),
            })?;

        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| color == qrcode::Color::Dark)
            .collect();

        Grid::new(code.width(), modules)
            .ok_or_else(|| EncodingError::Encoder("encoder returned a malformed grid".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_rows() {
        let grid = Grid::from_rows(vec![vec![true, false], vec![false, true]]).unwrap();
        assert_eq!(grid.size(), 2);
        assert!(grid.is_dark(0, 0));
        assert!(!grid.is_dark(1, 0));
        assert!(grid.is_dark(1, 1));
        assert_eq!(grid.dark_count(), 2);
    }

    #[test]
    fn test_grid_rejects_ragged_rows() {
        assert!(Grid::from_rows(vec![vec![true, false], vec![false]]).is_none());
        assert!(Grid::from_rows(vec![]).is_none());
        assert!(Grid::new(3, vec![false; 8]).is_none());
    }

    #[test]
    fn test_out_of_range_is_light() {
        let grid = Grid::new(1, vec![true]).unwrap();
        assert!(!grid.is_dark(1, 0));
        assert!(!grid.is_dark(0, 5));
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("m".parse::<EcLevel>().unwrap(), EcLevel::M);
        assert_eq!("High".parse::<EcLevel>().unwrap(), EcLevel::H);
        assert!("X".parse::<EcLevel>().is_err());
        assert!(EcLevel::L < EcLevel::H);
        assert_eq!(EcLevel::Q.to_string(), "Q");
    }

    #[test]
    fn test_encode_produces_square_grid() {
        let grid = QrEncoder.encode("https://react.dev", EcLevel::M).unwrap();
        // Versions 1..=40 have sides 21..=177 in steps of four
        assert!(grid.size() >= 21);
        assert_eq!((grid.size() - 17) % 4, 0);
        assert!(grid.dark_count() > 0);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let a = QrEncoder.encode("hello", EcLevel::Q).unwrap();
        let b = QrEncoder.encode("hello", EcLevel::Q).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stronger_level_never_shrinks_symbol() {
        let sizes: Vec<usize> = EcLevel::ALL
            .iter()
            .map(|&level| {
                QrEncoder
                    .encode("https://example.com/some/long/path", level)
                    .unwrap()
                    .size()
            })
            .collect();
        assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]), "{:?}", sizes);
    }

    #[test]
    fn test_level_display_round_trips() {
        for level in EcLevel::ALL {
            assert_eq!(level.to_string().parse::<EcLevel>(), Ok(level));
        }
    }

    #[test]
    fn test_encode_empty_text_fails() {
        assert_eq!(QrEncoder.encode("", EcLevel::L), Err(EncodingError::EmptyInput));
    }

    #[test]
    fn test_encode_too_long_fails() {
        let text = "x".repeat(4000);
        let err = QrEncoder.encode(&text, EcLevel::H).unwrap_err();
        assert!(matches!(err, EncodingError::DataTooLong { len: 4000, level: EcLevel::H }));
    }
}
