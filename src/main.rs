mod audio;
mod camera;
mod config;
mod core;
mod feedback;
mod input;
mod scene;
mod sim;
mod ui;

use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Minotaur Arena".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((
            core::CorePlugin,
            config::ConfigPlugin,
            input::InputPlugin,
            sim::SimPlugin,
            camera::ArenaCameraPlugin,
            scene::ScenePlugin,
            feedback::FeedbackPlugin,
            ui::UiPlugin,
            audio::AudioPlugin,
        ))
        .run();
}
