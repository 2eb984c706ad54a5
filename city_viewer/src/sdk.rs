//! SDK entry points and builder for composing the city viewer app.

use bevy::prelude::*;

use crate::camera::{rise_camera_plugin, CameraSettings};
use crate::config;
use crate::data::{init_chain_channel, ChainChannel, ChainConfig};
use crate::scene::{ingest_city, setup_scene};
use crate::ui::{hud_plugin, mint_plugin, HudState};

/// Builder for constructing a Metropolis app. Camera step and panel choices
/// vary per deployment, so everything an entry point might pin lives here.
pub struct CityViewerBuilder {
    chain: Option<ChainConfig>,
    channel: Option<ChainChannel>,
    camera: CameraSettings,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_hud: bool,
    enable_mint_panel: bool,
}

impl Default for CityViewerBuilder {
    fn default() -> Self {
        Self {
            chain: None,
            channel: None,
            camera: CameraSettings::default(),
            window_title: "Metropolis".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.05, 0.05, 0.08),
            enable_hud: true,
            enable_mint_panel: true,
        }
    }
}

impl CityViewerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit chain configuration.
    pub fn config(mut self, config: ChainConfig) -> Self {
        self.chain = Some(config);
        self
    }

    /// Load the chain configuration from environment variables.
    pub fn chain_config(mut self) -> Self {
        self.chain = Some(config::chain_config());
        self
    }

    /// Use an already-initialized channel (e.g. a fixture replay) instead of
    /// spawning a chain worker.
    pub fn channel(mut self, channel: ChainChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn camera_settings(mut self, settings: CameraSettings) -> Self {
        self.camera = settings;
        self
    }

    pub fn camera_step(mut self, step: f32) -> Self {
        self.camera = CameraSettings { step };
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_mint_panel(mut self) -> Self {
        self.enable_mint_panel = false;
        self
    }

    /// Build the Bevy app with the selected configuration. The connection
    /// handshake starts on its worker thread here; the render loop runs
    /// independently of it from the first frame.
    pub fn build(self) -> App {
        let channel = match self.channel {
            Some(channel) => channel,
            None => init_chain_channel(self.chain.unwrap_or_else(config::chain_config)),
        };

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(channel)
        .insert_resource(self.camera)
        .init_resource::<HudState>()
        .add_plugins(rise_camera_plugin)
        .add_systems(Startup, setup_scene)
        .add_systems(Update, ingest_city);

        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_mint_panel {
            app.add_plugins(mint_plugin);
        }

        app
    }
}
