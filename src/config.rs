use std::{collections::HashMap, path::PathBuf, time::Duration};

use config::{File, FileFormat, Source};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_builder::Builder;
use derive_deref::{Deref, DerefMut};
use serde::{
    de::{self, Deserializer},
    Deserialize,
};

use crate::{
    action::Action,
    cli::Cli,
    errors::ConfigurationError,
    tree::{BuildMode, TeardownMode, TreeMode, TreeShape},
};

const CONFIG: &str = include_str!("../.config/config.yaml");

/// Everything that shapes one run of the animation.
#[derive(Clone, Debug, PartialEq, Deserialize, Builder)]
#[builder(default, build_fn(name = "finish"))]
#[serde(default)]
pub struct AnimationSettings {
    /// Seconds from start until the tree stops twinkling.
    pub duration: u64,
    pub mode: TreeMode,
    pub density: f64,
    /// Seconds per twinkle frame.
    pub speed: f64,
    pub width: u16,
    pub build: bool,
    pub build_speed: f64,
    pub auto_twinkle: bool,
    pub gap: u16,
    pub teardown: bool,
    pub teardown_speed: f64,
    pub teardown_mode: TeardownMode,
    pub build_mode: BuildMode,
    pub seed: Option<u64>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration: 60,
            mode: TreeMode::Double,
            density: 0.25,
            speed: 0.5,
            width: 50,
            build: false,
            build_speed: 0.02,
            auto_twinkle: false,
            gap: 1,
            teardown: false,
            teardown_speed: 0.02,
            teardown_mode: TeardownMode::Random,
            build_mode: BuildMode::Sequential,
            seed: None,
        }
    }
}

/// Frame cadence of each phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub duration: Duration,
    pub speed: Duration,
    pub build_speed: Duration,
    pub teardown_speed: Duration,
}

impl AnimationSettings {
    pub fn shape(&self) -> TreeShape {
        TreeShape { mode: self.mode, density: self.density, max_width: self.width, gap: self.gap }
    }

    /// Rejects settings the animation cannot run with and converts the intervals.
    pub fn validate(&self) -> Result<Timing, ConfigurationError> {
        self.shape().validate()?;
        Ok(Timing {
            duration: Duration::from_secs(self.duration),
            speed: seconds("speed", self.speed, false)?,
            build_speed: seconds("build_speed", self.build_speed, true)?,
            teardown_speed: seconds("teardown_speed", self.teardown_speed, true)?,
        })
    }
}

fn seconds(name: &'static str, value: f64, allow_zero: bool) -> Result<Duration, ConfigurationError> {
    let bound = if allow_zero { ">= 0" } else { "> 0" };
    let in_range = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if !value.is_finite() || !in_range {
        return Err(ConfigurationError::Interval { name, bound, value });
    }
    Duration::try_from_secs_f64(value).map_err(|_| ConfigurationError::Interval { name, bound, value })
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub animation: AnimationSettings,
    #[serde(default)]
    pub music: Option<PathBuf>,
    #[serde(default)]
    pub plain: bool,
    #[serde(default)]
    pub keybindings: KeyBindings,
}

impl Config {
    pub fn new(cli: &Cli) -> Result<Self, ConfigurationError> {
        let (path, required) = match &cli.config {
            Some(path) => (path.clone(), true),
            None => (crate::utils::get_config_dir().join("config.yaml"), false),
        };
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
        }
        Self::load(File::from(path).format(FileFormat::Yaml).required(required), cli)
    }

    /// Layers the built-in defaults, `user` and the command line, in rising precedence.
    pub fn load<S>(user: S, cli: &Cli) -> Result<Self, ConfigurationError>
    where
        S: Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .add_source(File::from_str(CONFIG, FileFormat::Yaml))
            .add_source(user)
            .set_override_option("animation.duration", cli.duration)?
            .set_override_option("animation.mode", cli.mode.map(|mode| mode.to_string()))?
            .set_override_option("animation.density", cli.density)?
            .set_override_option("animation.speed", cli.speed)?
            .set_override_option("animation.width", cli.width.map(u64::from))?
            .set_override_option("animation.build", cli.build.then_some(true))?
            .set_override_option("animation.build_speed", cli.build_speed)?
            .set_override_option("animation.auto_twinkle", cli.auto_twinkle.then_some(true))?
            .set_override_option("animation.gap", cli.gap.map(u64::from))?
            .set_override_option("animation.teardown", cli.teardown.then_some(true))?
            .set_override_option("animation.teardown_speed", cli.teardown_speed)?
            .set_override_option("animation.teardown_mode", cli.teardown_mode.map(|mode| mode.to_string()))?
            .set_override_option("animation.build_mode", cli.build_mode.map(|mode| mode.to_string()))?
            .set_override_option("animation.seed", cli.seed)?
            .set_override_option("music", cli.music.as_ref().map(|path| path.to_string_lossy().into_owned()))?
            .set_override_option("plain", cli.plain.then_some(true))?;

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.animation.validate()?;
        Ok(cfg)
    }
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct KeyBindings(pub HashMap<KeyEvent, Action>);

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, String>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, action)| -> Result<(KeyEvent, Action), D::Error> {
                let event = parse_key_event(&key).map_err(de::Error::custom)?;
                let action = action.parse::<Action>().map_err(|_| {
                    let reason = format!("unknown action `{action}`");
                    de::Error::custom(ConfigurationError::KeyBinding { key, reason })
                })?;
                Ok((event, action))
            })
            .collect::<Result<HashMap<_, _>, D::Error>>()
            .map(KeyBindings)
    }
}

/// Parses bindings such as `<q>`, `<esc>` or `<ctrl-alt-x>`.
pub fn parse_key_event(raw: &str) -> Result<KeyEvent, ConfigurationError> {
    let invalid = |reason: &str| ConfigurationError::KeyBinding { key: raw.to_string(), reason: reason.to_string() };

    let inner = raw.trim().strip_prefix('<').and_then(|s| s.strip_suffix('>')).unwrap_or(raw.trim());
    if inner.contains(['<', '>']) {
        return Err(invalid("unbalanced angle brackets"));
    }
    let lowered = inner.to_ascii_lowercase();
    let (rest, mut modifiers) = extract_modifiers(&lowered);

    let code = match rest {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        },
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "hyphen" | "minus" => KeyCode::Char('-'),
        single if single.chars().count() == 1 => {
            let c = single.chars().next().ok_or_else(|| invalid("empty key"))?;
            KeyCode::Char(if modifiers.contains(KeyModifiers::SHIFT) { c.to_ascii_uppercase() } else { c })
        },
        _ => return Err(invalid("unknown key")),
    };
    Ok(KeyEvent::new(code, modifiers))
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        if let Some(rest) = current.strip_prefix("ctrl-") {
            modifiers.insert(KeyModifiers::CONTROL);
            current = rest;
        } else if let Some(rest) = current.strip_prefix("alt-") {
            modifiers.insert(KeyModifiers::ALT);
            current = rest;
        } else if let Some(rest) = current.strip_prefix("shift-") {
            modifiers.insert(KeyModifiers::SHIFT);
            current = rest;
        } else {
            break;
        }
    }

    (current, modifiers)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn load(user_yaml: &str, args: &[&str]) -> Result<Config, ConfigurationError> {
        let cli = Cli::try_parse_from(std::iter::once("xmas-tree").chain(args.iter().copied())).unwrap();
        Config::load(File::from_str(user_yaml, FileFormat::Yaml), &cli)
    }

    #[test]
    fn test_defaults() {
        let cfg = load("", &[]).unwrap();
        assert_eq!(cfg.animation, AnimationSettings::default());
        assert_eq!(cfg.music, None);
        assert!(!cfg.plain);
        assert_eq!(cfg.keybindings.get(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty())), Some(&Action::Quit));
        assert_eq!(
            cfg.keybindings.get(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(&Action::Quit)
        );
    }

    #[test]
    fn test_layers_take_precedence() {
        let user = "animation:\n  density: 0.5\n  width: 30\n  teardown_mode: reverse\n";
        let cfg = load(user, &["--density", "0.75", "--build", "--seed", "3"]).unwrap();

        assert_eq!(cfg.animation.density, 0.75);
        assert_eq!(cfg.animation.width, 30);
        assert_eq!(cfg.animation.teardown_mode, TeardownMode::Reverse);
        assert!(cfg.animation.build);
        assert_eq!(cfg.animation.seed, Some(3));
        assert_eq!(cfg.animation.mode, TreeMode::Double);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(load("animation:\n  mode: triple\n", &[]), Err(ConfigurationError::Source(_))));
        assert!(matches!(load("", &["--density", "1.5"]), Err(ConfigurationError::Density(_))));
        assert!(matches!(load("", &["--width", "2"]), Err(ConfigurationError::Width { .. })));
        assert!(matches!(load("", &["--speed", "0"]), Err(ConfigurationError::Interval { name: "speed", .. })));
        assert!(matches!(load("keybindings:\n  \"<nope>\": Quit\n", &[]), Err(ConfigurationError::Source(_))));
    }

    #[test]
    fn test_timing() {
        let settings = AnimationSettingsBuilder::default().speed(0.25).build_speed(0.0).finish().unwrap();
        let timing = settings.validate().unwrap();
        assert_eq!(timing.speed, Duration::from_millis(250));
        assert_eq!(timing.build_speed, Duration::ZERO);
        assert_eq!(timing.duration, Duration::from_secs(60));

        let settings = AnimationSettingsBuilder::default().teardown_speed(f64::NAN).finish().unwrap();
        assert!(matches!(settings.validate(), Err(ConfigurationError::Interval { name: "teardown_speed", .. })));

        let settings = AnimationSettingsBuilder::default().speed(1e20).finish().unwrap();
        assert!(matches!(settings.validate(), Err(ConfigurationError::Interval { name: "speed", .. })));
        let settings = AnimationSettingsBuilder::default().build_speed(1e300).finish().unwrap();
        assert!(matches!(settings.validate(), Err(ConfigurationError::Interval { name: "build_speed", .. })));
    }

    #[test]
    fn test_simple_keys() {
        assert_eq!(parse_key_event("<q>").unwrap(), KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty()));
        assert_eq!(parse_key_event("esc").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::empty()));
        assert_eq!(parse_key_event("<space>").unwrap(), KeyEvent::new(KeyCode::Char(' '), KeyModifiers::empty()));
    }

    #[test]
    fn test_with_modifiers() {
        assert_eq!(parse_key_event("<ctrl-c>").unwrap(), KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(
            parse_key_event("<CTRL-Alt-enter>").unwrap(),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL | KeyModifiers::ALT)
        );
        assert_eq!(parse_key_event("<shift-x>").unwrap(), KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(parse_key_event("<invalid-key>").is_err());
        assert!(parse_key_event("<ctrl-<q>>").is_err());
        assert!(parse_key_event("<>").is_err());
    }
}
