//! The built-in 500x500 arena layout.

use crate::error::ArenaError;
use crate::figure::{Circle, Figure, Polygon, Texture};
use crate::types::Point;

fn quad(corners: [(f64, f64); 4], texture: Texture) -> Result<Figure, ArenaError> {
    let points = corners.iter().map(|&(x, y)| Point::new(x, y)).collect();
    Ok(Polygon::uniform(points, texture)?.into())
}

fn round(x: f64, y: f64, radius: f64, texture: Texture) -> Result<Figure, ArenaError> {
    Ok(Circle::new(Point::new(x, y), radius, texture)?.into())
}

/// Outer wall, corner pillars, side slabs, trees and cover blocks.
pub fn standard_figures() -> Result<Vec<Figure>, ArenaError> {
    Ok(vec![
        // Outer wall
        quad(
            [(50.0, 50.0), (450.0, 50.0), (450.0, 450.0), (50.0, 450.0)],
            Texture::Planks,
        )?,
        round(50.0, 50.0, 50.0, Texture::Wood)?,
        round(450.0, 50.0, 50.0, Texture::Wood)?,
        round(450.0, 450.0, 50.0, Texture::Wood)?,
        round(50.0, 450.0, 50.0, Texture::Wood)?,
        // Side slabs
        quad(
            [(110.0, 130.0), (110.0, 230.0), (120.0, 230.0), (120.0, 130.0)],
            Texture::StoneBricks,
        )?,
        quad(
            [(110.0, 270.0), (110.0, 370.0), (120.0, 370.0), (120.0, 270.0)],
            Texture::Bricks,
        )?,
        quad(
            [(390.0, 130.0), (390.0, 230.0), (380.0, 230.0), (380.0, 130.0)],
            Texture::Bricks,
        )?,
        quad(
            [(390.0, 270.0), (390.0, 370.0), (380.0, 370.0), (380.0, 270.0)],
            Texture::StoneBricks,
        )?,
        round(80.0, 250.0, 8.0, Texture::Birch)?,
        round(420.0, 250.0, 8.0, Texture::Birch)?,
        // Cover
        quad(
            [(160.0, 100.0), (160.0, 140.0), (230.0, 140.0), (230.0, 100.0)],
            Texture::Stone,
        )?,
        quad(
            [(340.0, 400.0), (340.0, 360.0), (270.0, 360.0), (270.0, 400.0)],
            Texture::Stone,
        )?,
        round(270.0, 120.0, 15.0, Texture::Wood)?,
        round(230.0, 380.0, 15.0, Texture::Wood)?,
        quad(
            [(310.0, 110.0), (310.0, 120.0), (350.0, 120.0), (350.0, 110.0)],
            Texture::StoneBricks,
        )?,
        quad(
            [(190.0, 390.0), (190.0, 380.0), (150.0, 380.0), (150.0, 390.0)],
            Texture::StoneBricks,
        )?,
    ])
}

pub fn standard_spawns() -> Vec<Point> {
    [
        (80.0, 150.0),
        (80.0, 350.0),
        (420.0, 150.0),
        (420.0, 350.0),
        (250.0, 75.0),
        (250.0, 425.0),
    ]
    .into_iter()
    .map(|(x, y)| Point::new(x, y))
    .collect()
}
