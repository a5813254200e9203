// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted session.
//!
//! Replay a fixed list of gestures against a default scene and print what each one
//! did, followed by the final rectangles and lines as kurbo shapes.
//!
//! Set `RUST_LOG=tether_scene=debug` (or `trace`) to see rejected commands and
//! resolver results.
//!
//! Run:
//! - `cargo run -p tether_demos --example scripted_session`

use tether_scene::{Button, Gesture, Modifiers, Scene, SceneConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), tether_scene::ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::new(SceneConfig::default())?;
    tracing::info!(world = ?scene.config().world(), "scene ready");

    let script = [
        // Three rectangles; the repeat at (100, 100) overlaps and is ignored.
        Gesture::double_click((100, 100)),
        Gesture::double_click((100, 100)),
        Gesture::double_click((400, 100)),
        Gesture::double_click((400, 400)),
        // Drag the first one right; it stops flush against the second.
        Gesture::down((100, 100), Button::Left),
        Gesture::move_to((300, 100)),
        Gesture::move_to((600, 100)),
        Gesture::up((600, 100)),
        // Connect the second and third with a reference line.
        Gesture::down((400, 100), Button::Right),
        Gesture::move_to((400, 250)),
        Gesture::up((400, 400)),
        // A line dropped on empty space is discarded.
        Gesture::down((400, 400), Button::Right),
        Gesture::up((700, 500)),
        // Dragging an anchor carries the line endpoint with it.
        Gesture::down((400, 400), Button::Left),
        Gesture::move_to((600, 450)),
        Gesture::up((600, 450)),
        // Control-click on the line deletes it.
        Gesture::down((500, 275), Button::Left).with_modifiers(Modifiers::CONTROL),
        Gesture::up((500, 275)),
    ];

    for gesture in script {
        let outcome = scene.handle(gesture);
        println!("{:?} at {:?} -> {outcome:?}", gesture.kind, gesture.point);
    }

    println!();
    for rect in scene.list_rectangles() {
        println!(
            "rect {} #{:06x} {:?}",
            rect.id.get(),
            rect.color.to_u32(),
            rect.to_kurbo_rect()
        );
    }
    for line in scene.list_lines() {
        println!("line {} {:?}", line.id.get(), line.to_kurbo_line());
    }
    println!("index in sync: {}", scene.index_in_sync());
    Ok(())
}
