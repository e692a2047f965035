//! Map interaction modes and their help text

use crate::sketch::SketchKind;
use std::fmt;

/// What a click on the map currently does
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum InteractionMode {
    #[default]
    Idle,
    Drawing,
    Deleting,
    Editing,
    MeasuringAngle,
    Modifying,
}

impl InteractionMode {
    pub const ALL: [InteractionMode; 6] = [
        InteractionMode::Idle,
        InteractionMode::Drawing,
        InteractionMode::Deleting,
        InteractionMode::Editing,
        InteractionMode::MeasuringAngle,
        InteractionMode::Modifying,
    ];

    /// Mode entered when a sketch of `kind` starts
    pub fn for_sketch(kind: SketchKind) -> Self {
        match kind {
            SketchKind::Distance => InteractionMode::Drawing,
            SketchKind::Angle => InteractionMode::MeasuringAngle,
        }
    }

    /// Help tooltip shown next to the pointer
    pub fn help_text(self) -> &'static str {
        match self {
            InteractionMode::Drawing => "Click to continue drawing the line",
            InteractionMode::Deleting => "Click on a line to delete it",
            InteractionMode::Modifying => "Click on a line to modify",
            InteractionMode::MeasuringAngle => "Draw two lines to measure the angle",
            InteractionMode::Idle | InteractionMode::Editing => {
                "Click on the button to choose functionality"
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InteractionMode::Idle => "idle",
            InteractionMode::Drawing => "drawing",
            InteractionMode::Deleting => "deleting",
            InteractionMode::Editing => "editing",
            InteractionMode::MeasuringAngle => "measuringAngle",
            InteractionMode::Modifying => "modifying",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
