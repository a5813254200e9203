// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene configuration from TOML.
//!
//! Load a partial configuration plus a list of placements, build the scene, and report
//! which placements fit. Fields missing from the `[scene]` table keep their defaults.
//!
//! Pass a path to use your own file; otherwise a built-in document is used.
//!
//! Run:
//! - `cargo run -p tether_demos --example config_from_toml`
//! - `cargo run -p tether_demos --example config_from_toml -- layout.toml`

use std::path::PathBuf;

use serde::Deserialize;
use tether_scene::{ConfigError, Gesture, GestureOutcome, Point, Scene, SceneConfig};
use thiserror::Error;

const BUILTIN: &str = r#"
[scene]
world_width = 400
world_height = 300
rect_width = 80
rect_height = 60
quadtree_capacity = 2

[[place]]
x = 50
y = 40

[[place]]
x = 90
y = 60

[[place]]
x = 390
y = 290
"#;

#[derive(Debug, Error)]
enum DemoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid layout document: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid scene configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Layout {
    scene: SceneConfig,
    place: Vec<Placement>,
}

#[derive(Debug, Deserialize)]
struct Placement {
    x: i64,
    y: i64,
}

fn load(path: Option<PathBuf>) -> Result<Layout, DemoError> {
    let text = match path {
        Some(path) => {
            std::fs::read_to_string(&path).map_err(|source| DemoError::Read { path, source })?
        }
        None => BUILTIN.to_owned(),
    };
    Ok(toml::from_str(&text)?)
}

fn run() -> Result<(), DemoError> {
    let layout = load(std::env::args_os().nth(1).map(PathBuf::from))?;
    println!("config = {:?}", layout.scene);

    let mut scene = Scene::new(layout.scene)?;
    for Placement { x, y } in layout.place {
        match scene.handle(Gesture::double_click(Point::new(x, y))) {
            GestureOutcome::RectangleCreated(id) => {
                let bounds = scene.registry().rectangle(id).map(|r| r.bounds);
                println!("place ({x}, {y}) -> rect {} at {bounds:?}", id.get());
            }
            other => println!("place ({x}, {y}) -> {other:?}"),
        }
    }
    println!(
        "{} rectangles, quadtree {:?}",
        scene.list_rectangles().len(),
        scene.registry().index().stats()
    );
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
