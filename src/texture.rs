//! Text-encoded texture maps.
//!
//! A texture is a rectangular grid of colors parsed from a plain-text
//! encoding: one row per line, one `R;G;B` triplet per cell, columns
//! separated by whitespace. The `texgen` binary produces this format from
//! ordinary image files.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::shade::Color;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read texture file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed color triplet {token:?} on line {line}")]
    MalformedColor { line: usize, token: String },
    #[error("line {line} has {got} columns, expected {expected}")]
    RaggedRow { line: usize, got: usize, expected: usize },
    #[error("texture contains no pixels")]
    Empty,
}

#[derive(Debug)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<Color>,
}

impl Texture {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Texture, TextureError> {
        let contents = fs::read_to_string(path)?;
        Texture::parse(&contents)
    }

    /// Parse the `R;G;B` grid. A corrupt texture makes rendering
    /// meaningless, so any malformed triplet or ragged row is fatal here
    /// rather than silently patched.
    pub fn parse(contents: &str) -> Result<Texture, TextureError> {
        let mut width = 0;
        let mut texels = Vec::new();
        let mut height = 0;
        for (row, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut columns = 0;
            for token in line.split_whitespace() {
                texels.push(parse_triplet(token, row + 1)?);
                columns += 1;
            }
            if height == 0 {
                width = columns;
            } else if columns != width {
                return Err(TextureError::RaggedRow {
                    line: row + 1,
                    got: columns,
                    expected: width,
                });
            }
            height += 1;
        }
        if texels.is_empty() {
            return Err(TextureError::Empty);
        }
        Ok(Texture { width, height, texels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at normalized coordinates, clamped to the grid edges.
    ///
    /// The horizontal axis is flipped so east-positive texture maps read
    /// correctly on a sphere swept with a counterclockwise longitude.
    pub fn get_at(&self, u: f32, v: f32) -> Color {
        let x = ((u.max(0.0) * self.width as f32) as usize).min(self.width - 1);
        let y = ((v.max(0.0) * self.height as f32) as usize).min(self.height - 1);
        self.texels[y * self.width + (self.width - 1 - x)]
    }
}

fn parse_triplet(token: &str, line: usize) -> Result<Color, TextureError> {
    let malformed = || TextureError::MalformedColor { line, token: token.to_string() };
    let mut parts = token.split(';');
    let mut channel = || -> Result<u8, TextureError> {
        parts.next().ok_or_else(|| malformed())?.parse::<u8>().map_err(|_| malformed())
    };
    let red = channel()?;
    let green = channel()?;
    let blue = channel()?;
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok(Color::new(red, green, blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: &str = "255;0;0 0;255;0\n0;0;255 9;9;9\n";

    #[test]
    fn test_parse_dimensions() {
        let texture = Texture::parse(GRID).unwrap();
        assert_eq!(texture.width(), 2);
        assert_eq!(texture.height(), 2);
    }

    #[test]
    fn test_get_at_flips_horizontally() {
        let texture = Texture::parse(GRID).unwrap();
        // u = 0 reads the rightmost column
        assert_eq!(texture.get_at(0.0, 0.0), Color::new(0, 255, 0));
        assert_eq!(texture.get_at(0.9, 0.0), Color::new(255, 0, 0));
        assert_eq!(texture.get_at(0.0, 0.9), Color::new(9, 9, 9));
    }

    #[test]
    fn test_get_at_clamps_edges() {
        let texture = Texture::parse(GRID).unwrap();
        assert_eq!(texture.get_at(1.0, 1.0), Color::new(0, 0, 255));
        assert_eq!(texture.get_at(-0.5, 2.0), Color::new(9, 9, 9));
    }

    #[test]
    fn test_malformed_triplet_is_fatal() {
        let err = Texture::parse("255;0;0 banana\n").unwrap_err();
        assert!(matches!(err, TextureError::MalformedColor { line: 1, .. }));
        let err = Texture::parse("1;2\n").unwrap_err();
        assert!(matches!(err, TextureError::MalformedColor { .. }));
        let err = Texture::parse("1;2;3;4\n").unwrap_err();
        assert!(matches!(err, TextureError::MalformedColor { .. }));
    }

    #[test]
    fn test_ragged_rows_are_fatal() {
        let err = Texture::parse("1;1;1 2;2;2\n3;3;3\n").unwrap_err();
        assert!(matches!(err, TextureError::RaggedRow { line: 2, got: 1, expected: 2 }));
    }

    #[test]
    fn test_empty_input_is_fatal() {
        assert!(matches!(Texture::parse("\n  \n"), Err(TextureError::Empty)));
    }
}
