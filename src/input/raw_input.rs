use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use gilrs::{Axis, Button};
use serde::{Deserialize, Serialize};

/// Direction an axis is pushed past the activation threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisDir {
    Negative,
    Positive,
}

impl fmt::Display for AxisDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisDir::Negative => f.write_str("-1"),
            AxisDir::Positive => f.write_str("1"),
        }
    }
}

/// Identifier for one concrete input on a device.
///
/// Canonical string forms, used for persistence:
/// - keyboard key tokens as the host reports them: `"a"`, `"ArrowLeft"`
/// - gamepad buttons by gilrs name: `"button-South"`
/// - gamepad axis directions: `"axis-LeftStickX:-1"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RawInput {
    Key(String),
    Button(String),
    Axis { axis: String, dir: AxisDir },
}

impl RawInput {
    pub fn key(token: impl Into<String>) -> Self {
        RawInput::Key(token.into())
    }

    pub fn button(button: Button) -> Self {
        RawInput::Button(button_name(button).to_string())
    }

    pub fn axis(axis: Axis, dir: AxisDir) -> Self {
        RawInput::Axis {
            axis: axis_name(axis).to_string(),
            dir,
        }
    }
}

impl fmt::Display for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawInput::Key(token) => f.write_str(token),
            RawInput::Button(name) => write!(f, "button-{name}"),
            RawInput::Axis { axis, dir } => write!(f, "axis-{axis}:{dir}"),
        }
    }
}

impl From<RawInput> for String {
    fn from(raw: RawInput) -> String {
        raw.to_string()
    }
}

impl FromStr for RawInput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix("button-") {
            if button_from_name(rest).is_none() {
                bail!("unknown gamepad button: {rest}");
            }
            Ok(RawInput::Button(rest.to_string()))
        } else if let Some(rest) = s.strip_prefix("axis-") {
            let Some((name, dir)) = rest.split_once(':') else {
                bail!("malformed axis input: {s}");
            };
            if axis_from_name(name).is_none() {
                bail!("unknown gamepad axis: {name}");
            }
            let dir = match dir {
                "-1" => AxisDir::Negative,
                "1" => AxisDir::Positive,
                other => bail!("malformed axis direction: {other}"),
            };
            Ok(RawInput::Axis {
                axis: name.to_string(),
                dir,
            })
        } else if s.is_empty() {
            bail!("empty input token");
        } else {
            Ok(RawInput::Key(s.to_string()))
        }
    }
}

impl TryFrom<String> for RawInput {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Short label for binding menus. Presentation only; the canonical string
/// form above is what gets persisted and compared.
pub fn display_label(raw: &RawInput) -> String {
    match raw {
        RawInput::Key(token) => match token.as_str() {
            "ArrowLeft" => "←".to_string(),
            "ArrowDown" => "↓".to_string(),
            "ArrowRight" => "→".to_string(),
            _ => token.to_uppercase(),
        },
        other => other.to_string(),
    }
}

/// Convert Button to its canonical name.
pub fn button_name(button: Button) -> &'static str {
    match button {
        Button::South => "South",
        Button::East => "East",
        Button::North => "North",
        Button::West => "West",
        Button::C => "C",
        Button::Z => "Z",
        Button::LeftTrigger => "LeftTrigger",
        Button::LeftTrigger2 => "LeftTrigger2",
        Button::RightTrigger => "RightTrigger",
        Button::RightTrigger2 => "RightTrigger2",
        Button::Select => "Select",
        Button::Start => "Start",
        Button::Mode => "Mode",
        Button::LeftThumb => "LeftThumb",
        Button::RightThumb => "RightThumb",
        Button::DPadUp => "DPadUp",
        Button::DPadDown => "DPadDown",
        Button::DPadLeft => "DPadLeft",
        Button::DPadRight => "DPadRight",
        Button::Unknown => "Unknown",
    }
}

/// Convert a canonical name back to a Button.
pub fn button_from_name(name: &str) -> Option<Button> {
    let button = match name {
        "South" => Button::South,
        "East" => Button::East,
        "North" => Button::North,
        "West" => Button::West,
        "C" => Button::C,
        "Z" => Button::Z,
        "LeftTrigger" => Button::LeftTrigger,
        "LeftTrigger2" => Button::LeftTrigger2,
        "RightTrigger" => Button::RightTrigger,
        "RightTrigger2" => Button::RightTrigger2,
        "Select" => Button::Select,
        "Start" => Button::Start,
        "Mode" => Button::Mode,
        "LeftThumb" => Button::LeftThumb,
        "RightThumb" => Button::RightThumb,
        "DPadUp" => Button::DPadUp,
        "DPadDown" => Button::DPadDown,
        "DPadLeft" => Button::DPadLeft,
        "DPadRight" => Button::DPadRight,
        "Unknown" => Button::Unknown,
        _ => return None,
    };
    Some(button)
}

/// Convert Axis to its canonical name.
pub fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::LeftStickX => "LeftStickX",
        Axis::LeftStickY => "LeftStickY",
        Axis::LeftZ => "LeftZ",
        Axis::RightStickX => "RightStickX",
        Axis::RightStickY => "RightStickY",
        Axis::RightZ => "RightZ",
        Axis::DPadX => "DPadX",
        Axis::DPadY => "DPadY",
        Axis::Unknown => "Unknown",
    }
}

/// Convert a canonical name back to an Axis.
pub fn axis_from_name(name: &str) -> Option<Axis> {
    let axis = match name {
        "LeftStickX" => Axis::LeftStickX,
        "LeftStickY" => Axis::LeftStickY,
        "LeftZ" => Axis::LeftZ,
        "RightStickX" => Axis::RightStickX,
        "RightStickY" => Axis::RightStickY,
        "RightZ" => Axis::RightZ,
        "DPadX" => Axis::DPadX,
        "DPadY" => Axis::DPadY,
        "Unknown" => Axis::Unknown,
        _ => return None,
    };
    Some(axis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        let raw = RawInput::key("ArrowLeft");
        assert_eq!(raw.to_string(), "ArrowLeft");
        assert_eq!("ArrowLeft".parse::<RawInput>().unwrap(), raw);
    }

    #[test]
    fn test_button_round_trip() {
        let raw = RawInput::button(Button::South);
        assert_eq!(raw.to_string(), "button-South");
        assert_eq!("button-South".parse::<RawInput>().unwrap(), raw);
    }

    #[test]
    fn test_axis_round_trip() {
        let raw = RawInput::axis(Axis::LeftStickX, AxisDir::Negative);
        assert_eq!(raw.to_string(), "axis-LeftStickX:-1");
        assert_eq!("axis-LeftStickX:-1".parse::<RawInput>().unwrap(), raw);

        let raw = RawInput::axis(Axis::LeftStickY, AxisDir::Positive);
        assert_eq!(raw.to_string(), "axis-LeftStickY:1");
        assert_eq!("axis-LeftStickY:1".parse::<RawInput>().unwrap(), raw);
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        assert!("".parse::<RawInput>().is_err());
        assert!("button-NotAButton".parse::<RawInput>().is_err());
        assert!("axis-LeftStickX".parse::<RawInput>().is_err());
        assert!("axis-LeftStickX:2".parse::<RawInput>().is_err());
        assert!("axis-NoSuchAxis:1".parse::<RawInput>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_strings() {
        let raw = RawInput::axis(Axis::LeftStickX, AxisDir::Negative);
        let json = serde_json::to_string(&raw).unwrap();
        assert_eq!(json, "\"axis-LeftStickX:-1\"");
        let back: RawInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(display_label(&RawInput::key("ArrowLeft")), "←");
        assert_eq!(display_label(&RawInput::key("ArrowDown")), "↓");
        assert_eq!(display_label(&RawInput::key("ArrowRight")), "→");
        assert_eq!(display_label(&RawInput::key("q")), "Q");
        assert_eq!(display_label(&RawInput::key("Enter")), "ENTER");
        assert_eq!(
            display_label(&RawInput::button(Button::Start)),
            "button-Start"
        );
    }

    #[test]
    fn test_button_names_round_trip() {
        for button in [
            Button::South,
            Button::East,
            Button::Select,
            Button::Start,
            Button::DPadLeft,
        ] {
            assert_eq!(button_from_name(button_name(button)), Some(button));
        }
    }
}
