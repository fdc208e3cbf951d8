use serde::{Deserialize, Serialize};

/// Which overall visual behavior the backdrop shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    #[default]
    None,
    Intro,
    Idle,
    Blog,
}

impl AnimationMode {
    pub const ALL: [AnimationMode; 4] = [
        AnimationMode::None,
        AnimationMode::Intro,
        AnimationMode::Idle,
        AnimationMode::Blog,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnimationMode::None => "none",
            AnimationMode::Intro => "intro",
            AnimationMode::Idle => "idle",
            AnimationMode::Blog => "blog",
        }
    }

    /// Lenient parse for values coming from JS; unknown names map to `None`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "intro" => AnimationMode::Intro,
            "idle" => AnimationMode::Idle,
            "blog" => AnimationMode::Blog,
            _ => AnimationMode::None,
        }
    }

    /// Numeric value of the `u_mode` uniform. Intro encodes differently once
    /// its ramp has finished so the shader can hold the final frame.
    pub fn shader_code(self, intro_complete: bool) -> f32 {
        match self {
            AnimationMode::None => 0.0,
            AnimationMode::Intro if intro_complete => 1.5,
            AnimationMode::Intro => 1.0,
            AnimationMode::Idle => 2.0,
            AnimationMode::Blog => 3.0,
        }
    }
}
